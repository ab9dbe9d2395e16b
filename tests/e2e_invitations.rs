//! End-to-end tests for the invitation lifecycle.
//!
//! These tests walk the full flow a portal handler would drive: gate the
//! inviter with a permission check, create the invitation, deliver the
//! token, accept it, and build the new user's actor from the returned
//! payload. Run with: `cargo test --test e2e_invitations`

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use vestibule::{
    AcceptInviteAction, AccessError, Actor, CreateInviteAction, CreateInviteInput, ExpireStaleAction,
    InvitationRepository, InviteConfig, InviteStatus, MockInvitationRepository, MockUserDirectory,
    Permission, Role, SecretString,
};

fn invite_input(email: &str, role: Role) -> CreateInviteInput {
    CreateInviteInput {
        email: email.to_owned(),
        role,
        organization_id: "org1".to_owned(),
        organization_name: "Acme".to_owned(),
        invited_by: "alice-uid".to_owned(),
        message: None,
    }
}

#[tokio::test]
async fn test_invite_and_accept_flow() {
    let directory = Arc::new(MockUserDirectory::new());
    let invitations = Arc::new(MockInvitationRepository::new());

    // the handler first gates the inviter on send_invites
    let alice = Actor::authenticated("alice-uid", "alice@acme.test", Role::Admin, Some("org1"));
    assert!(alice.can_send_invites());

    let create = CreateInviteAction::new(Arc::clone(&directory), Arc::clone(&invitations));
    let output = create
        .execute(invite_input("bob@co.com", Role::Admin))
        .await
        .unwrap();

    assert_eq!(output.invitation.status, InviteStatus::Pending);
    assert_eq!(output.invitation.message, "You have been invited to join Acme");
    assert!(!output.token.is_empty());

    // bob signs in and presents the token
    let accept = AcceptInviteAction::new(Arc::clone(&invitations));
    let accepted = accept.execute(&output.token, "bob-uid").await.unwrap();

    assert_eq!(accepted.role, Role::Admin);
    assert_eq!(accepted.organization_id, "org1");
    assert_eq!(accepted.organization_name, "Acme");

    // the stored record reflects the terminal transition
    let stored = invitations
        .find_by_id(output.invitation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, InviteStatus::Accepted);
    assert_eq!(stored.accepted_by.as_deref(), Some("bob-uid"));

    // the caller upserts bob with exactly the granted role/organization
    let bob = Actor::authenticated(
        "bob-uid",
        "bob@co.com",
        accepted.role,
        Some(accepted.organization_id.as_str()),
    );
    assert!(bob.is_admin());
    assert!(bob.has_permission(Permission::ManageUsers));
    assert!(!bob.has_permission(Permission::ManageSystem));
}

#[tokio::test]
async fn test_accept_is_single_use() {
    let directory = Arc::new(MockUserDirectory::new());
    let invitations = Arc::new(MockInvitationRepository::new());

    let create = CreateInviteAction::new(directory, Arc::clone(&invitations));
    let output = create
        .execute(invite_input("bob@co.com", Role::User))
        .await
        .unwrap();

    let accept = AcceptInviteAction::new(invitations);
    accept.execute(&output.token, "bob-uid").await.unwrap();

    let second = accept.execute(&output.token, "mallory-uid").await;
    assert_eq!(
        second.unwrap_err(),
        AccessError::InviteNotPending(InviteStatus::Accepted)
    );
}

#[tokio::test]
async fn test_duplicate_and_existing_user_conflicts() {
    let directory = Arc::new(MockUserDirectory::new());
    let invitations = Arc::new(MockInvitationRepository::new());
    directory.insert("already@co.com", "existing-uid");

    let create = CreateInviteAction::new(directory, invitations);

    // a user with that email can already access the system
    let result = create.execute(invite_input("already@co.com", Role::User)).await;
    assert_eq!(result.unwrap_err(), AccessError::UserAlreadyExists);

    // first invite goes through, the identical second one conflicts
    create
        .execute(invite_input("new@co.com", Role::User))
        .await
        .unwrap();
    let result = create.execute(invite_input("new@co.com", Role::Owner)).await;
    assert_eq!(result.unwrap_err(), AccessError::InvitePending);
}

#[tokio::test]
async fn test_expired_invitation_cannot_be_accepted() {
    let directory = Arc::new(MockUserDirectory::new());
    let invitations = Arc::new(MockInvitationRepository::new());

    // zero-day expiry puts the invitation immediately past its deadline
    let config = InviteConfig {
        expiry_days: 0,
        ..InviteConfig::default()
    };
    let create = CreateInviteAction::with_config(directory, Arc::clone(&invitations), config);
    let output = create
        .execute(invite_input("late@co.com", Role::User))
        .await
        .unwrap();

    // nudge the clock past expires_at
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let accept = AcceptInviteAction::new(Arc::clone(&invitations));
    let result = accept.execute(&output.token, "late-uid").await;
    assert_eq!(result.unwrap_err(), AccessError::InviteExpired);

    // the sweep reconciles stored status afterwards
    let sweep = ExpireStaleAction::new(Arc::clone(&invitations));
    assert_eq!(sweep.execute().await.unwrap(), 1);
    let stored = invitations
        .find_by_id(output.invitation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, InviteStatus::Expired);

    // once marked, the status check fires before the time check
    let result = accept.execute(&output.token, "late-uid").await;
    assert_eq!(
        result.unwrap_err(),
        AccessError::InviteNotPending(InviteStatus::Expired)
    );
}

#[tokio::test]
async fn test_unknown_token_not_found() {
    let invitations = MockInvitationRepository::new();
    let accept = AcceptInviteAction::new(invitations);

    let result = accept
        .execute(&SecretString::new("never-issued-token"), "bob-uid")
        .await;
    assert_eq!(result.unwrap_err(), AccessError::InviteNotFound);
}

#[tokio::test]
async fn test_organization_listing_spans_statuses() {
    let directory = Arc::new(MockUserDirectory::new());
    let invitations = Arc::new(MockInvitationRepository::new());

    let create = CreateInviteAction::new(directory, Arc::clone(&invitations));
    let first = create
        .execute(invite_input("a@co.com", Role::User))
        .await
        .unwrap();
    create
        .execute(invite_input("b@co.com", Role::Owner))
        .await
        .unwrap();

    let accept = AcceptInviteAction::new(Arc::clone(&invitations));
    accept.execute(&first.token, "a-uid").await.unwrap();

    let all = invitations.find_by_organization("org1").await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|i| i.status == InviteStatus::Accepted));
    assert!(all.iter().any(|i| i.status == InviteStatus::Pending));

    // other organizations stay out of the listing
    assert!(invitations.find_by_organization("org2").await.unwrap().is_empty());
}
