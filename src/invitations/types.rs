//! Core types for the invitation lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Lifecycle state of an invitation.
///
/// `Pending` is the only initial state; `Accepted` and `Expired` are
/// terminal. Transitions are monotonic — nothing ever returns to
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Expired,
}

impl InviteStatus {
    /// Convert to string for database storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Expired => "expired",
        }
    }

    /// Parse from database string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// True for the terminal states.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Expired)
    }
}

/// An invitation for an email address to join an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    /// Unique identifier.
    pub id: i64,
    /// Email of the invitee.
    pub email: String,
    /// Role to assign when accepted.
    pub role: Role,
    /// The organization being invited to.
    pub organization_id: String,
    /// Human-readable organization name, used in the default message.
    pub organization_name: String,
    /// Uid of the user who sent the invitation.
    pub invited_by: String,
    /// Human message shown to the invitee.
    pub message: String,
    /// SHA-256 hash of the invitation token. The plain token is returned
    /// once at creation and never stored.
    #[serde(skip_serializing, default)]
    pub token_hash: String,
    /// Current lifecycle state.
    pub status: InviteStatus,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
    /// When the invitation expires.
    pub expires_at: DateTime<Utc>,
    /// When the invitation was accepted, if it was.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Uid of the user who accepted, if accepted. Set once, immutable
    /// thereafter.
    pub accepted_by: Option<String>,
}

impl Invitation {
    /// Check if the invitation is past its expiry time.
    ///
    /// Expiry is time-derived: an invitation can be logically expired
    /// while its stored status still reads `pending`.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Check if the invitation is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending
    }

    /// The default message when the inviter supplies none.
    #[must_use]
    pub fn default_message(organization_name: &str) -> String {
        format!("You have been invited to join {organization_name}")
    }
}

/// The role/organization payload an accepted invitation grants.
///
/// The caller uses this to upsert the user record; role and organization
/// are a direct copy of the invitation's, with no elevation or reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedInvite {
    pub role: Role,
    pub organization_id: String,
    pub organization_name: String,
}
