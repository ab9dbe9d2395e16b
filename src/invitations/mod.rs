//! The invitation lifecycle.
//!
//! An invitation is a time-bounded, single-use credential inviting an
//! email address to join an organization with a specified role. It starts
//! `pending` and moves monotonically to one of two terminal states:
//! `accepted` (the invitee presented the token in time) or `expired`.
//!
//! This module only decides and describes transitions; the invitation and
//! user records themselves live behind the repository traits supplied by
//! the caller.

mod actions;
mod repository;
mod types;

pub use actions::{
    AcceptInviteAction, CreateInviteAction, CreateInviteInput, CreateInviteOutput,
    ExpireStaleAction, InviteConfig,
};
pub use repository::{CreateInvitation, InvitationRepository, UserDirectory};
pub use types::{AcceptedInvite, Invitation, InviteStatus};

#[cfg(feature = "mocks")]
mod mocks;

#[cfg(feature = "mocks")]
pub use mocks::{MockInvitationRepository, MockUserDirectory};
