use crate::crypto::hash_token;
use crate::invitations::{AcceptedInvite, InvitationRepository, InviteStatus};
use crate::{AccessError, SecretString};

/// Action to accept an invitation.
///
/// This action:
/// 1. Resolves the token to an invitation
/// 2. Rejects invitations that are no longer pending
/// 3. Rejects invitations past their expiry time
/// 4. Transitions the record to `accepted`
/// 5. Returns the role/organization payload for the caller's user upsert
///
/// Acceptance is deliberately not idempotent: a second accept on the same
/// token fails with [`AccessError::InviteNotPending`] rather than silently
/// succeeding, so a caller can never double-apply the user-creation side
/// effect without noticing.
pub struct AcceptInviteAction<I>
where
    I: InvitationRepository,
{
    invitations: I,
}

impl<I: InvitationRepository> AcceptInviteAction<I> {
    /// Creates a new `AcceptInviteAction`.
    pub fn new(invitations: I) -> Self {
        Self { invitations }
    }

    /// Accepts an invitation using the provided token.
    ///
    /// # Arguments
    ///
    /// * `token` - The invitation token (plain text, as sent to invitee)
    /// * `accepting_uid` - The uid of the user accepting the invitation
    ///
    /// # Returns
    ///
    /// - `Ok(accepted)` - The role/organization the caller should assign;
    ///   a direct copy of the invitation's, never elevated or reduced
    /// - `Err(AccessError::InviteNotFound)` - Token resolves to nothing
    /// - `Err(AccessError::InviteNotPending(_))` - Already accepted or
    ///   expired; also what the loser of a concurrent accept observes
    /// - `Err(AccessError::InviteExpired)` - Expiry time has passed, even
    ///   if the stored status still reads `pending`
    /// - `Err(_)` - Storage errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "accept_invite", skip_all, err)
    )]
    pub async fn execute(
        &self,
        token: &SecretString,
        accepting_uid: &str,
    ) -> Result<AcceptedInvite, AccessError> {
        if accepting_uid.is_empty() {
            return Err(AccessError::MissingField("accepting_uid"));
        }

        // hash the token to find it
        let token_hash = hash_token(token.expose_secret());

        let invitation = self
            .invitations
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(AccessError::InviteNotFound)?;

        // terminal states never transition again
        if invitation.status != InviteStatus::Pending {
            return Err(AccessError::InviteNotPending(invitation.status));
        }

        // expiry is time-derived, checked even while the stored status
        // still reads pending
        if invitation.is_expired() {
            return Err(AccessError::InviteExpired);
        }

        // conditional transition; a lost race surfaces as InviteNotPending
        let accepted = self
            .invitations
            .mark_accepted(invitation.id, accepting_uid)
            .await?;

        log::info!(
            target: "vestibule",
            "msg=\"invitation accepted\", invitation_id={}, organization_id=\"{}\", accepted_by=\"{}\"",
            accepted.id,
            accepted.organization_id,
            accepting_uid
        );

        Ok(AcceptedInvite {
            role: accepted.role,
            organization_id: accepted.organization_id,
            organization_name: accepted.organization_name,
        })
    }
}
