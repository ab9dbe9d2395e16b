use chrono::Utc;

use crate::invitations::InvitationRepository;
use crate::AccessError;

/// Action to sweep stale invitations to `expired`.
///
/// Expiry is already enforced at accept time from the expiry timestamp, so
/// this sweep only reconciles stored status with reality for listing and
/// reporting. The crate starts no timers; callers run this on whatever
/// schedule they own.
pub struct ExpireStaleAction<I>
where
    I: InvitationRepository,
{
    invitations: I,
}

impl<I: InvitationRepository> ExpireStaleAction<I> {
    /// Creates a new `ExpireStaleAction`.
    pub fn new(invitations: I) -> Self {
        Self { invitations }
    }

    /// Marks every pending invitation past its expiry as `expired`.
    ///
    /// Returns the number of invitations transitioned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "expire_stale_invites", skip_all, err)
    )]
    pub async fn execute(&self) -> Result<u64, AccessError> {
        let expired = self.invitations.expire_stale(Utc::now()).await?;

        if expired > 0 {
            log::info!(
                target: "vestibule",
                "msg=\"stale invitations expired\", count={expired}"
            );
        }

        Ok(expired)
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::crypto::hash_token;
    use crate::invitations::{CreateInvitation, InviteStatus, MockInvitationRepository};
    use crate::roles::Role;

    fn invitation(email: &str, token: &str, expires_in: Duration) -> CreateInvitation {
        CreateInvitation {
            email: email.to_owned(),
            role: Role::User,
            organization_id: "org-1".to_owned(),
            organization_name: "Acme".to_owned(),
            invited_by: "alice-uid".to_owned(),
            message: "You have been invited to join Acme".to_owned(),
            token_hash: hash_token(token),
            expires_at: Utc::now() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_expire_stale_only_touches_overdue_pending() {
        let invitations = MockInvitationRepository::new();

        let stale = invitations
            .create(invitation("a@example.com", "tok-a", -Duration::hours(2)))
            .await
            .unwrap();
        let fresh = invitations
            .create(invitation("b@example.com", "tok-b", Duration::days(7)))
            .await
            .unwrap();

        let action = ExpireStaleAction::new(invitations);

        assert_eq!(action.execute().await.unwrap(), 1);
        // second sweep finds nothing left to do
        assert_eq!(action.execute().await.unwrap(), 0);

        let stale = action
            .invitations
            .find_by_id(stale.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stale.status, InviteStatus::Expired);

        let fresh = action
            .invitations
            .find_by_id(fresh.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh.status, InviteStatus::Pending);
    }
}
