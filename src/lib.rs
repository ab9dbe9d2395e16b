//! Role-based access control and invitation lifecycle for multi-tenant
//! survey portals.
//!
//! `vestibule` is the transport-agnostic core behind a feedback/survey
//! portal: it decides what a caller is allowed to do and governs how an
//! email invitation moves from creation to acceptance or expiry. It owns
//! no storage and starts no background tasks; persistence is supplied by
//! the caller through the repository traits in [`invitations`].
//!
//! Two components:
//!
//! - [`Actor`] plus the [`roles`] module: a fixed role→permission table
//!   exposed through pure, fail-closed capability queries.
//! - [`invitations`]: the invitation state machine
//!   (`pending → accepted` / `pending → expired`) with single-use,
//!   high-entropy tokens.
//!
//! # Example
//!
//! ```rust
//! use vestibule::{Actor, Permission, Role};
//!
//! let admin = Actor::authenticated("uid-1", "admin@acme.test", Role::Admin, Some("org-1"));
//! assert!(admin.can_send_invites());
//! assert!(!admin.has_permission(Permission::ManageSystem));
//!
//! // Absent or anonymous callers are always denied.
//! assert!(!Actor::Anonymous.has_permission(Permission::ViewSurveys));
//! ```

pub mod actor;
pub mod crypto;
pub mod invitations;
pub mod roles;
pub mod secret;
pub mod validators;

pub use actor::{Actor, NavItem};
pub use invitations::{
    AcceptInviteAction, AcceptedInvite, CreateInviteAction, CreateInviteInput, CreateInviteOutput,
    CreateInvitation, ExpireStaleAction, Invitation, InvitationRepository, InviteConfig,
    InviteStatus, UserDirectory,
};
pub use roles::{Permission, Role};
pub use secret::SecretString;

#[cfg(feature = "mocks")]
pub use invitations::{MockInvitationRepository, MockUserDirectory};

use std::fmt;

/// Errors produced by the invitation lifecycle.
///
/// Permission queries never error: absent or malformed input degrades to a
/// deny, not an `Err`. Everything here is synchronous and final — no
/// variant is retried internally, because retrying a conflict or an
/// invalid-state transition cannot change the outcome without caller-side
/// action.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessError {
    /// A required field was empty.
    MissingField(&'static str),
    /// The invitee email is not a valid address.
    InvalidEmail,
    /// A user with the invitee email already exists.
    UserAlreadyExists,
    /// A pending invitation for this email and organization already exists.
    InvitePending,
    /// No invitation matches the presented token.
    InviteNotFound,
    /// The invitation is no longer pending; carries the status it was found in.
    InviteNotPending(InviteStatus),
    /// The invitation's expiry time has passed.
    InviteExpired,
    /// The persistence collaborator failed.
    Storage(String),
}

/// Coarse classification of an [`AccessError`], for mapping to transport
/// status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    InvalidState,
    Expired,
    Storage,
}

impl AccessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::InvalidEmail => ErrorKind::Validation,
            Self::UserAlreadyExists | Self::InvitePending => ErrorKind::Conflict,
            Self::InviteNotFound => ErrorKind::NotFound,
            Self::InviteNotPending(_) => ErrorKind::InvalidState,
            Self::InviteExpired => ErrorKind::Expired,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
            Self::InvalidEmail => write!(f, "Invalid email address"),
            Self::UserAlreadyExists => write!(f, "A user with this email already exists"),
            Self::InvitePending => write!(
                f,
                "A pending invitation already exists for this email and organization"
            ),
            Self::InviteNotFound => write!(f, "Invitation not found"),
            Self::InviteNotPending(status) => {
                write!(f, "Invitation is not pending (status: {})", status.as_str())
            }
            Self::InviteExpired => write!(f, "Invitation has expired"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for AccessError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AccessError::MissingField("email").kind(), ErrorKind::Validation);
        assert_eq!(AccessError::InvalidEmail.kind(), ErrorKind::Validation);
        assert_eq!(AccessError::UserAlreadyExists.kind(), ErrorKind::Conflict);
        assert_eq!(AccessError::InvitePending.kind(), ErrorKind::Conflict);
        assert_eq!(AccessError::InviteNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            AccessError::InviteNotPending(InviteStatus::Accepted).kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(AccessError::InviteExpired.kind(), ErrorKind::Expired);
        assert_eq!(AccessError::Storage("boom".into()).kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AccessError::MissingField("organization_id").to_string(),
            "Missing required field: organization_id"
        );
        assert_eq!(
            AccessError::InviteNotPending(InviteStatus::Expired).to_string(),
            "Invitation is not pending (status: expired)"
        );
    }
}
