use chrono::{Duration, Utc};

use crate::crypto::{generate_token, hash_token, DEFAULT_TOKEN_LENGTH};
use crate::invitations::{CreateInvitation, Invitation, InvitationRepository, UserDirectory};
use crate::roles::Role;
use crate::validators::{validate_email, ValidationError};
use crate::{AccessError, SecretString};

/// Configuration for invitation creation.
#[derive(Debug, Clone)]
pub struct InviteConfig {
    /// Number of days until an invitation expires. Default: 7
    pub expiry_days: i64,
    /// Length of generated tokens in characters. Default: 32
    pub token_length: usize,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            expiry_days: 7,
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

/// Input data for creating an invitation.
#[derive(Debug, Clone)]
pub struct CreateInviteInput {
    pub email: String,
    pub role: Role,
    pub organization_id: String,
    pub organization_name: String,
    /// Uid of the inviter. The caller has already verified the inviter
    /// holds `send_invites`; this action records who, not whether.
    pub invited_by: String,
    /// Optional human message; a default is derived from the organization
    /// name when absent.
    pub message: Option<String>,
}

/// Output from creating an invitation.
#[derive(Debug)]
pub struct CreateInviteOutput {
    /// The created invitation record, status `pending`.
    pub invitation: Invitation,
    /// The plain token to deliver to the invitee (not stored, only
    /// returned once).
    pub token: SecretString,
}

/// Action to invite an email address into an organization.
///
/// This action:
/// 1. Validates the input fields
/// 2. Rejects emails that already belong to a user
/// 3. Rejects duplicates of a still-pending invitation
/// 4. Generates a secure token and creates the `pending` record
///
/// The returned token should be sent to the invitee (e.g., via email).
/// The token is hashed before storage and cannot be retrieved later.
pub struct CreateInviteAction<U, I>
where
    U: UserDirectory,
    I: InvitationRepository,
{
    directory: U,
    invitations: I,
    config: InviteConfig,
}

impl<U: UserDirectory, I: InvitationRepository> CreateInviteAction<U, I> {
    /// Creates a new `CreateInviteAction` with default configuration.
    pub fn new(directory: U, invitations: I) -> Self {
        Self {
            directory,
            invitations,
            config: InviteConfig::default(),
        }
    }

    /// Creates a new `CreateInviteAction` with custom configuration.
    pub fn with_config(directory: U, invitations: I, config: InviteConfig) -> Self {
        Self {
            directory,
            invitations,
            config,
        }
    }

    /// Creates an invitation.
    ///
    /// # Returns
    ///
    /// - `Ok(output)` - Invitation created with plain token for delivery
    /// - `Err(AccessError::MissingField(_) | AccessError::InvalidEmail)` - Bad input
    /// - `Err(AccessError::UserAlreadyExists)` - A user already has this email
    /// - `Err(AccessError::InvitePending)` - A pending invitation for this
    ///   email and organization already exists
    /// - `Err(_)` - Storage errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_invite", skip_all, err)
    )]
    pub async fn execute(
        &self,
        input: CreateInviteInput,
    ) -> Result<CreateInviteOutput, AccessError> {
        match validate_email(&input.email) {
            Ok(()) => {}
            Err(ValidationError::EmailEmpty) => return Err(AccessError::MissingField("email")),
            Err(_) => return Err(AccessError::InvalidEmail),
        }
        if input.organization_id.is_empty() {
            return Err(AccessError::MissingField("organization_id"));
        }
        if input.organization_name.is_empty() {
            return Err(AccessError::MissingField("organization_name"));
        }
        if input.invited_by.is_empty() {
            return Err(AccessError::MissingField("invited_by"));
        }

        // an invitation to someone who can already sign in is redundant
        if self
            .directory
            .find_uid_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(AccessError::UserAlreadyExists);
        }

        // one pending invitation per (email, organization)
        if self
            .invitations
            .find_pending(&input.email, &input.organization_id)
            .await?
            .is_some()
        {
            return Err(AccessError::InvitePending);
        }

        let token = generate_token(self.config.token_length);
        let token_hash = hash_token(&token);

        let expires_at = Utc::now() + Duration::days(self.config.expiry_days);
        let message = input
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| Invitation::default_message(&input.organization_name));

        let data = CreateInvitation {
            email: input.email,
            role: input.role,
            organization_id: input.organization_id,
            organization_name: input.organization_name,
            invited_by: input.invited_by,
            message,
            token_hash,
            expires_at,
        };

        let invitation = self.invitations.create(data).await?;

        log::info!(
            target: "vestibule",
            "msg=\"invitation created\", invitation_id={}, organization_id=\"{}\", email=\"{}\", role=\"{}\"",
            invitation.id,
            invitation.organization_id,
            invitation.email,
            invitation.role.as_str()
        );

        Ok(CreateInviteOutput {
            invitation,
            token: SecretString::new(token),
        })
    }
}
