use serde::Serialize;
use crate::db;
use crate::model::account::Role;
use crate::model::settings::Settings;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// The password rules a client-side form needs to hint at - nothing else leaks.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PasswordPolicyResponse {
    pub min_length: u32,
    pub max_length: u32,
    pub require_uppercase: bool,
    pub require_special: bool,
    pub require_number: bool,
}

///
/// A partial settings update - each field is independently tunable, absent fields are
/// left alone.
///
#[derive(Clone, Debug, Default)]
pub struct UpdateSettingsRequest {
    pub password_min_length: Option<u32>,
    pub password_max_length: Option<u32>,
    pub password_require_uppercase: Option<bool>,
    pub password_require_special: Option<bool>,
    pub password_require_number: Option<bool>,
    pub default_password: Option<String>,
    pub prevent_duplicate_login: Option<bool>,
    pub session_timeout_enabled: Option<bool>,
    pub session_timeout_minutes: Option<u32>,
    pub login_failure_limit: Option<u32>,
    pub account_lock_minutes: Option<u32>,
    pub password_expiry_enabled: Option<bool>,
    pub password_expiry_days: Option<u32>,
}

pub fn get_password_policy(ctx: &ServiceContext) -> PasswordPolicyResponse {
    let settings = db::settings::load(ctx.store());

    PasswordPolicyResponse {
        min_length: settings.password_min_length,
        max_length: settings.password_max_length,
        require_uppercase: settings.password_require_uppercase,
        require_special: settings.password_require_special,
        require_number: settings.password_require_number,
    }
}

///
/// Apply a settings update. Only a super-admin may tune the security settings - the
/// boundary layer has already gated this, but the core re-checks rather than trusting
/// the caller.
///
/// Numeric windows are clamped here, at the boundary consuming external input: idle
/// timeout 3-60 minutes, failure limit 1-5, lock duration 5-30 minutes, expiry 30-365
/// days. The saved settings apply from the very next operation.
///
pub fn update_settings(ctx: &ServiceContext, acting_account_id: &str, request: UpdateSettingsRequest)
    -> Result<(), WardenError> {

    let acting = db::account::load(acting_account_id, ctx.store())?;
    if acting.role != Role::SuperAdmin {
        return Err(ErrorCode::Forbidden.with_msg("Access denied"))
    }

    let mut settings = db::settings::load(ctx.store());
    apply(&mut settings, request);
    db::settings::save(ctx.store(), settings);

    tracing::info!("Security settings updated by {}", acting.handle);
    Ok(())
}

fn apply(settings: &mut Settings, request: UpdateSettingsRequest) {
    if let Some(value) = request.password_min_length {
        settings.password_min_length = value;
    }
    if let Some(value) = request.password_max_length {
        settings.password_max_length = value;
    }
    if let Some(value) = request.password_require_uppercase {
        settings.password_require_uppercase = value;
    }
    if let Some(value) = request.password_require_special {
        settings.password_require_special = value;
    }
    if let Some(value) = request.password_require_number {
        settings.password_require_number = value;
    }
    if let Some(value) = request.default_password {
        settings.default_password = value;
    }
    if let Some(value) = request.prevent_duplicate_login {
        settings.prevent_duplicate_login = value;
    }
    if let Some(value) = request.session_timeout_enabled {
        settings.session_timeout_enabled = value;
    }
    if let Some(value) = request.session_timeout_minutes {
        settings.session_timeout_minutes = value.max(3).min(60);
    }
    if let Some(value) = request.login_failure_limit {
        settings.login_failure_limit = value.max(1).min(5);
    }
    if let Some(value) = request.account_lock_minutes {
        settings.account_lock_minutes = value.max(5).min(30);
    }
    if let Some(value) = request.password_expiry_enabled {
        settings.password_expiry_enabled = value;
    }
    if let Some(value) = request.password_expiry_days {
        settings.password_expiry_days = value.max(30).min(365);
    }
}
