mod common;

use warden::model::account::Role;
use warden::services;
use warden::services::{ChangeReason, ForcedAction, SessionStatus};
use warden::utils::errors::ErrorCode;
use crate::common::*;


#[tokio::test]
async fn test_only_the_admin_tier_may_create_accounts() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;
    let user_id = create_established_account(&root_id, "jones", Role::User, USER_PASSWORD, &ctx).await;

    let err = services::create_account(&ctx, &user_id, "smith", "smith", Role::User)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn test_only_a_super_admin_may_mint_another_super_admin() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;
    let admin_id = create_established_account(&root_id, "ops", Role::Admin, USER_PASSWORD, &ctx).await;

    let err = services::create_account(&ctx, &admin_id, "smith", "smith", Role::SuperAdmin)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Forbidden);

    // An admin may still create ordinary staff.
    services::create_account(&ctx, &admin_id, "smith", "smith", Role::User)
        .await
        .expect("create");

    // And the super-admin may mint a peer.
    services::create_account(&ctx, &root_id, "root2", "Root Two", Role::SuperAdmin)
        .await
        .expect("create");
}

#[tokio::test]
async fn test_handles_collide_case_insensitively() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;

    services::create_account(&ctx, &root_id, "jones", "jones", Role::User)
        .await
        .expect("create");

    let err = services::create_account(&ctx, &root_id, "JONES", "someone else", Role::User)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::HandleInUse);
}

#[tokio::test]
async fn test_a_new_account_logs_in_with_the_default_password_and_must_change_it() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;

    let created = services::create_account(&ctx, &root_id, "jones", "jones", Role::User)
        .await
        .expect("create");
    assert_eq!(created.default_password, DEFAULT_PASSWORD);

    let response = login_ok("jones", DEFAULT_PASSWORD, &ctx).await;
    assert_eq!(response.forced_action, ForcedAction::MustChangePassword(ChangeReason::FirstLogin));
}

#[tokio::test]
async fn test_an_admin_reset_unlocks_the_account_immediately() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;
    let user_id = create_established_account(&root_id, "jones", Role::User, USER_PASSWORD, &ctx).await;

    services::update_settings(&ctx, &root_id, services::UpdateSettingsRequest {
        login_failure_limit: Some(2),
        account_lock_minutes: Some(30),
        ..Default::default()
    }).expect("settings");

    set_time("2021-08-23T09:30:00Z", &ctx);
    login_err("jones", "Wrong1!aa", &ctx).await;
    login_err("jones", "Wrong1!aa", &ctx).await; // Locked for 30 minutes.

    // The human unlock path - no waiting out the window.
    let default_password = services::reset_password(&ctx, &root_id, &user_id)
        .await
        .expect("reset");

    let response = login_ok("jones", &default_password, &ctx).await;
    assert_eq!(response.forced_action, ForcedAction::MustChangePassword(ChangeReason::FirstLogin));
}

#[tokio::test]
async fn test_deactivation_cuts_live_sessions_and_reactivation_restores_access() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;
    let user_id = create_established_account(&root_id, "jones", Role::User, USER_PASSWORD, &ctx).await;

    let response = login_ok("jones", USER_PASSWORD, &ctx).await;

    services::set_active(&ctx, &root_id, &user_id, false).expect("deactivate");

    // The owner is cut off on their next request, not at some future login.
    assert_eq!(services::touch_session(&ctx, &response.session_token), SessionStatus::Expired);
    let err = login_err("jones", USER_PASSWORD, &ctx).await;
    assert_eq!(err.error_code(), ErrorCode::AccountDisabled);

    services::set_active(&ctx, &root_id, &user_id, true).expect("activate");
    login_ok("jones", USER_PASSWORD, &ctx).await;
}

#[tokio::test]
async fn test_an_admin_cannot_touch_a_super_admin_account() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;
    let admin_id = create_established_account(&root_id, "ops", Role::Admin, USER_PASSWORD, &ctx).await;

    let err = services::set_active(&ctx, &admin_id, &root_id, false).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Forbidden);

    let err = services::reset_password(&ctx, &admin_id, &root_id).await.unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn test_super_admin_accounts_are_never_hard_deleted() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;
    let user_id = create_established_account(&root_id, "jones", Role::User, USER_PASSWORD, &ctx).await;

    // A super-admin can only ever be deactivated.
    let err = services::delete_account(&ctx, &root_id, &root_id).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Forbidden);

    // Ordinary accounts can go, and the handle stops resolving with the generic
    // rejection.
    services::delete_account(&ctx, &root_id, &user_id).expect("delete");
    let err = login_err("jones", USER_PASSWORD, &ctx).await;
    assert_eq!(err.error_code(), ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn test_find_account_returns_the_summary_without_the_credential() {
    let ctx = start_warden().await;
    let root_id = escalate(&ctx).await;

    let summary = services::find_account(&ctx, &root_id).expect("find");
    assert_eq!(summary.handle, "root");
    assert_eq!(summary.role, Role::SuperAdmin);
    assert_eq!(summary.first_login, false);
}
