//! Persistence collaborator traits.
//!
//! The lifecycle never owns storage. Implementations back these traits
//! with whatever store the portal uses; the contracts below spell out the
//! atomicity that store must furnish.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::Invitation;
use crate::roles::Role;
use crate::AccessError;

/// Payload for persisting a new invitation.
#[derive(Debug, Clone)]
pub struct CreateInvitation {
    pub email: String,
    pub role: Role,
    pub organization_id: String,
    pub organization_name: String,
    pub invited_by: String,
    pub message: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Lookup into the portal's user store.
///
/// Only existence matters to the lifecycle: an invitation to an email that
/// already belongs to a user is redundant and rejected.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the uid of the user registered under `email`, if any.
    async fn find_uid_by_email(&self, email: &str) -> Result<Option<String>, AccessError>;
}

/// Storage for invitation records.
///
/// Two operations carry uniqueness obligations the backing store must
/// enforce (a uniqueness constraint or conditional write, not an
/// application-level read-then-write):
///
/// - `create` must reject a second row with the same token hash;
/// - `mark_accepted` must transition `pending → accepted` conditionally,
///   so that of two concurrent accepts exactly one wins and the loser
///   observes [`AccessError::InviteNotPending`].
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn create(&self, data: CreateInvitation) -> Result<Invitation, AccessError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Invitation>, AccessError>;

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Invitation>, AccessError>;

    /// The pending invitation for `(email, organization_id)`, if one
    /// exists and its expiry has not passed.
    async fn find_pending(
        &self,
        email: &str,
        organization_id: &str,
    ) -> Result<Option<Invitation>, AccessError>;

    /// All invitations for an organization, regardless of status.
    async fn find_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Invitation>, AccessError>;

    /// Transitions the invitation to `accepted`, recording the acceptance
    /// time and accepting uid.
    ///
    /// Must fail with [`AccessError::InviteNotPending`] carrying the
    /// current status when the invitation is not `pending` — this is the
    /// at-most-one-winner guarantee for concurrent accepts.
    async fn mark_accepted(&self, id: i64, accepted_by: &str) -> Result<Invitation, AccessError>;

    /// Transitions every `pending` invitation whose expiry is at or before
    /// `now` to `expired`. Returns how many rows changed.
    ///
    /// Expiry is a status, not removal: expired rows stay queryable.
    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<u64, AccessError>;
}

// Shared handles delegate, so callers can hold a repository in an Arc and
// hand clones to several actions.

#[async_trait]
impl<T: UserDirectory + ?Sized> UserDirectory for Arc<T> {
    async fn find_uid_by_email(&self, email: &str) -> Result<Option<String>, AccessError> {
        (**self).find_uid_by_email(email).await
    }
}

#[async_trait]
impl<T: InvitationRepository + ?Sized> InvitationRepository for Arc<T> {
    async fn create(&self, data: CreateInvitation) -> Result<Invitation, AccessError> {
        (**self).create(data).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invitation>, AccessError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Invitation>, AccessError> {
        (**self).find_by_token_hash(token_hash).await
    }

    async fn find_pending(
        &self,
        email: &str,
        organization_id: &str,
    ) -> Result<Option<Invitation>, AccessError> {
        (**self).find_pending(email, organization_id).await
    }

    async fn find_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Invitation>, AccessError> {
        (**self).find_by_organization(organization_id).await
    }

    async fn mark_accepted(&self, id: i64, accepted_by: &str) -> Result<Invitation, AccessError> {
        (**self).mark_accepted(id, accepted_by).await
    }

    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<u64, AccessError> {
        (**self).expire_stale(now).await
    }
}
