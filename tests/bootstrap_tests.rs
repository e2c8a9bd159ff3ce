mod common;

use warden::model::account::Role;
use warden::services;
use warden::services::{ChangeReason, ForcedAction, SessionStatus};
use warden::utils::errors::ErrorCode;
use crate::common::*;


#[tokio::test]
async fn test_the_bootstrap_account_is_routed_to_escalation_not_password_change() {
    let ctx = start_warden().await;

    let response = login_ok("admin", DEFAULT_PASSWORD, &ctx).await;
    assert_eq!(response.forced_action, ForcedAction::MustEscalate);
    assert_eq!(response.account.role, Role::SuperAdmin);
}

#[tokio::test]
async fn test_an_ordinary_first_login_is_routed_to_password_change() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;

    services::create_account(&ctx, &root_id, "jones", "jones", Role::User)
        .await
        .expect("create");

    let response = login_ok("jones", DEFAULT_PASSWORD, &ctx).await;
    assert_eq!(response.forced_action, ForcedAction::MustChangePassword(ChangeReason::FirstLogin));
}

#[tokio::test]
async fn test_escalation_creates_the_super_admin_and_retires_the_bootstrap_account() {
    let ctx = start_warden().await;

    let response = login_ok("admin", DEFAULT_PASSWORD, &ctx).await;
    let bootstrap_id = response.account.account_id.clone();

    let root_id = services::complete_bootstrap_escalation(
        &ctx, &bootstrap_id, "root", "Root Admin", ROOT_PASSWORD, ROOT_PASSWORD)
        .await
        .expect("Expected the escalation to succeed");

    // The caller's session was terminated - a fresh login under the new identity is
    // required.
    assert_eq!(services::touch_session(&ctx, &response.session_token), SessionStatus::Expired);

    let response = login_ok("root", ROOT_PASSWORD, &ctx).await;
    assert_eq!(response.account.account_id, root_id);
    assert_eq!(response.account.role, Role::SuperAdmin);
    assert_eq!(response.forced_action, ForcedAction::None);

    // The bootstrap account is deactivated, never deleted.
    let err = login_err("admin", DEFAULT_PASSWORD, &ctx).await;
    assert_eq!(err.error_code(), ErrorCode::AccountDisabled);

    // And re-entry is rejected - the gating condition no longer holds.
    let err = services::complete_bootstrap_escalation(
        &ctx, &bootstrap_id, "root2", "Root Again", ROOT_PASSWORD, ROOT_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn test_escalation_rejects_the_reserved_and_taken_handles() {
    let ctx = start_warden().await;

    let response = login_ok("admin", DEFAULT_PASSWORD, &ctx).await;
    let bootstrap_id = response.account.account_id;

    // The bootstrap handle is reserved, case-insensitively.
    let err = services::complete_bootstrap_escalation(
        &ctx, &bootstrap_id, "Admin", "Root", ROOT_PASSWORD, ROOT_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::HandleInUse);

    // Any existing handle collides too, case-insensitively.
    services::create_account(&ctx, &bootstrap_id, "jones", "jones", Role::User)
        .await
        .expect("create");

    let err = services::complete_bootstrap_escalation(
        &ctx, &bootstrap_id, "JONES", "Root", ROOT_PASSWORD, ROOT_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::HandleInUse);
}

#[tokio::test]
async fn test_escalation_enforces_the_fixed_password_minimum() {
    let ctx = start_warden().await;

    let response = login_ok("admin", DEFAULT_PASSWORD, &ctx).await;
    let bootstrap_id = response.account.account_id;

    // Too short.
    let err = services::complete_bootstrap_escalation(&ctx, &bootstrap_id, "root", "Root", "Ab1!", "Ab1!")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::PasswordTooShort);

    // No uppercase.
    let err = services::complete_bootstrap_escalation(&ctx, &bootstrap_id, "root", "Root", "abcdef1!", "abcdef1!")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::UppercaseRequired);

    // No number.
    let err = services::complete_bootstrap_escalation(&ctx, &bootstrap_id, "root", "Root", "Abcdefg!", "Abcdefg!")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::NumberRequired);

    // No special character.
    let err = services::complete_bootstrap_escalation(&ctx, &bootstrap_id, "root", "Root", "Abcdefg1", "Abcdefg1")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::SpecialRequired);

    // Mismatched confirmation.
    let err = services::complete_bootstrap_escalation(&ctx, &bootstrap_id, "root", "Root", "Abcdef1!", "Abcdef2!")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::PasswordMismatch);
}

#[tokio::test]
async fn test_only_the_bootstrap_identity_may_escalate() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;

    // An ordinary account still in first-login state does not pass the gate.
    let created = services::create_account(&ctx, &root_id, "jones", "jones", Role::User)
        .await
        .expect("create");

    let err = services::complete_bootstrap_escalation(
        &ctx, &created.account_id, "sneaky", "Sneaky", ROOT_PASSWORD, ROOT_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Forbidden);

    // Nor does an established super-admin - first-login has been cleared.
    let err = services::complete_bootstrap_escalation(
        &ctx, &root_id, "another", "Another", ROOT_PASSWORD, ROOT_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Forbidden);
}
