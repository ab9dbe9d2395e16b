//! In-memory repositories for tests and prototyping.
//!
//! The mock invitation repository honors the same conditional-transition
//! contract a real store must: `mark_accepted` only succeeds from
//! `pending`, under a single write lock.

#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::repository::{CreateInvitation, InvitationRepository, UserDirectory};
use super::types::{Invitation, InviteStatus};
use crate::AccessError;

/// In-memory email → uid directory.
pub struct MockUserDirectory {
    users: RwLock<HashMap<String, String>>,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a user under `email`.
    pub fn insert(&self, email: impl Into<String>, uid: impl Into<String>) {
        if let Ok(mut users) = self.users.write() {
            users.insert(email.into(), uid.into());
        }
    }
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn find_uid_by_email(&self, email: &str) -> Result<Option<String>, AccessError> {
        let users = self
            .users
            .read()
            .map_err(|_| AccessError::Storage("lock poisoned".into()))?;
        Ok(users.get(email).cloned())
    }
}

/// In-memory invitation store.
pub struct MockInvitationRepository {
    invitations: RwLock<HashMap<i64, Invitation>>,
    next_id: AtomicI64,
}

impl MockInvitationRepository {
    pub fn new() -> Self {
        Self {
            invitations: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MockInvitationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvitationRepository for MockInvitationRepository {
    async fn create(&self, data: CreateInvitation) -> Result<Invitation, AccessError> {
        let mut invitations = self
            .invitations
            .write()
            .map_err(|_| AccessError::Storage("lock poisoned".into()))?;

        // token hash uniqueness, as a real store would enforce via constraint
        if invitations
            .values()
            .any(|i| i.token_hash == data.token_hash)
        {
            return Err(AccessError::Storage("duplicate token hash".into()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let invitation = Invitation {
            id,
            email: data.email,
            role: data.role,
            organization_id: data.organization_id,
            organization_name: data.organization_name,
            invited_by: data.invited_by,
            message: data.message,
            token_hash: data.token_hash,
            status: InviteStatus::Pending,
            created_at: Utc::now(),
            expires_at: data.expires_at,
            accepted_at: None,
            accepted_by: None,
        };
        invitations.insert(id, invitation.clone());

        Ok(invitation)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invitation>, AccessError> {
        let invitations = self
            .invitations
            .read()
            .map_err(|_| AccessError::Storage("lock poisoned".into()))?;
        Ok(invitations.get(&id).cloned())
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Invitation>, AccessError> {
        let invitations = self
            .invitations
            .read()
            .map_err(|_| AccessError::Storage("lock poisoned".into()))?;
        Ok(invitations
            .values()
            .find(|i| i.token_hash == token_hash)
            .cloned())
    }

    async fn find_pending(
        &self,
        email: &str,
        organization_id: &str,
    ) -> Result<Option<Invitation>, AccessError> {
        let invitations = self
            .invitations
            .read()
            .map_err(|_| AccessError::Storage("lock poisoned".into()))?;
        let now = Utc::now();
        Ok(invitations
            .values()
            .find(|i| {
                i.email == email
                    && i.organization_id == organization_id
                    && i.status == InviteStatus::Pending
                    && i.expires_at > now
            })
            .cloned())
    }

    async fn find_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Invitation>, AccessError> {
        let invitations = self
            .invitations
            .read()
            .map_err(|_| AccessError::Storage("lock poisoned".into()))?;
        Ok(invitations
            .values()
            .filter(|i| i.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn mark_accepted(&self, id: i64, accepted_by: &str) -> Result<Invitation, AccessError> {
        let mut invitations = self
            .invitations
            .write()
            .map_err(|_| AccessError::Storage("lock poisoned".into()))?;

        let invitation = invitations.get_mut(&id).ok_or(AccessError::InviteNotFound)?;

        // conditional transition: at most one accept wins
        if invitation.status != InviteStatus::Pending {
            return Err(AccessError::InviteNotPending(invitation.status));
        }

        invitation.status = InviteStatus::Accepted;
        invitation.accepted_at = Some(Utc::now());
        invitation.accepted_by = Some(accepted_by.to_owned());

        Ok(invitation.clone())
    }

    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<u64, AccessError> {
        let mut invitations = self
            .invitations
            .write()
            .map_err(|_| AccessError::Storage("lock poisoned".into()))?;

        let mut changed = 0u64;
        for invitation in invitations.values_mut() {
            if invitation.status == InviteStatus::Pending && invitation.expires_at <= now {
                invitation.status = InviteStatus::Expired;
                changed += 1;
            }
        }

        Ok(changed)
    }
}
