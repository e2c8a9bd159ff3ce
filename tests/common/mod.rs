#![allow(dead_code)]

use std::sync::Arc;
use chrono::{DateTime, Utc};
use warden::model::account::Role;
use warden::services;
use warden::services::{ChangeReason, ForcedAction, LoginResponse};
use warden::utils::config::Configuration;
use warden::utils::context::ServiceContext;
use warden::utils::errors::WardenError;

pub const ORIGIN: &str = "127.0.0.1";
pub const DEFAULT_PASSWORD: &str = "1111";
pub const ROOT_PASSWORD: &str = "Sup3rSecret!";
pub const USER_PASSWORD: &str = "Hunter2!";

///
/// Each test gets its own freshly seeded context - there is no shared server or
/// database, so tests are fully isolated and free to fix the clock or rewrite the
/// security settings.
///
pub async fn start_warden() -> Arc<ServiceContext> {
    warden::init_tracing();

    let config = Configuration::from_env().expect("The service configuration is not correct");
    warden::initialise(config).await.expect("Unable to initialise the service")
}

///
/// Pin the context's clock to a fixed point in time.
///
pub fn set_time(time: &str, ctx: &ServiceContext) {
    let parsed = DateTime::parse_from_rfc3339(time)
        .expect("Bad test timestamp")
        .with_timezone(&Utc);
    ctx.set_now(Some(parsed));
}

pub async fn login_ok(handle: &str, password: &str, ctx: &ServiceContext) -> LoginResponse {
    services::login(ctx, handle, password, ORIGIN)
        .await
        .expect("Expected the login to succeed")
}

pub async fn login_err(handle: &str, password: &str, ctx: &ServiceContext) -> WardenError {
    services::login(ctx, handle, password, ORIGIN)
        .await
        .expect_err("Expected the login to be rejected")
}

///
/// Walk the factory bootstrap account through escalation and return the id of the
/// resulting 'root' super-admin.
///
pub async fn escalate(ctx: &ServiceContext) -> String {
    let response = login_ok("admin", DEFAULT_PASSWORD, ctx).await;
    assert_eq!(response.forced_action, ForcedAction::MustEscalate);

    services::complete_bootstrap_escalation(
        ctx,
        &response.account.account_id,
        "root",
        "Root Admin",
        ROOT_PASSWORD,
        ROOT_PASSWORD)
        .await
        .expect("Expected the bootstrap escalation to succeed")
}

///
/// Create a staff account and complete its forced first-login password change, leaving
/// a normal account that logs in with the given password. Returns the account id.
///
pub async fn create_established_account(
    acting_id: &str,
    handle: &str,
    role: Role,
    password: &str,
    ctx: &ServiceContext,
) -> String {
    let created = services::create_account(ctx, acting_id, handle, handle, role)
        .await
        .expect("Expected the account to be created");

    let response = login_ok(handle, &created.default_password, ctx).await;
    assert_eq!(response.forced_action, ForcedAction::MustChangePassword(ChangeReason::FirstLogin));

    services::change_password(ctx, &created.account_id, None, password, password)
        .await
        .expect("Expected the first-login password change to succeed");

    created.account_id
}
