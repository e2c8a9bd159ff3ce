use crate::{db, utils};
use crate::model::account::{Account, Role};
use crate::model::algorithm;
use crate::model::settings::SPECIAL_CHARACTERS;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

// The escalation password floor is fixed, not read from the tunable settings - at
// bootstrap time the settings themselves may not be trustworthy yet.
const MIN_LENGTH: usize = 8;

///
/// One-shot escalation of the factory bootstrap account into a real, named super-admin.
///
/// Gated on the caller being the bootstrap identity, still active, with its first-login
/// flag set. On success the named super-admin is created with first-login already
/// cleared, the bootstrap account is deactivated (never deleted) with its own flag
/// cleared so the gate can never hold again, and the caller's sessions are terminated
/// to force a fresh login under the new identity. Returns the new account's id.
///
pub async fn complete_bootstrap_escalation(
    ctx: &ServiceContext,
    acting_account_id: &str,
    new_handle: &str,
    display_name: &str,
    password: &str,
    confirm_password: &str,
) -> Result<String, WardenError> {

    let acting = db::account::load(acting_account_id, ctx.store())?;

    // Defensive re-check of the gate - the boundary layer routed us here, but the core
    // does not trust it. Rejections are a generic access-denied.
    if !acting.active
        || !acting.first_login
        || !acting.handle.eq_ignore_ascii_case(&ctx.config().bootstrap_handle) {
        return Err(ErrorCode::Forbidden.with_msg("Access denied"))
    }

    if password != confirm_password {
        return Err(ErrorCode::PasswordMismatch.with_msg("The new password and confirmation do not match"))
    }

    if new_handle.eq_ignore_ascii_case(&ctx.config().bootstrap_handle) {
        return Err(ErrorCode::HandleInUse.with_msg(&format!("The handle '{}' is reserved", new_handle)))
    }

    if db::account::handle_in_use(new_handle, ctx.store()) {
        return Err(ErrorCode::HandleInUse.with_msg(&format!("The handle '{}' is already in use", new_handle)))
    }

    validate_minimum(password)?;

    let plain = password.to_string();
    let phc = tokio::task::spawn_blocking(move || algorithm::hash_into_phc(&plain))
        .await
        .map_err(WardenError::from)??;

    let now = ctx.now();
    let account = Account {
        account_id: utils::generate_id(),
        handle: new_handle.to_string(),
        display_name: display_name.to_string(),
        phc,
        role: Role::SuperAdmin,
        active: true,
        locked: false,
        locked_until: None,
        failed_attempts: 0,
        first_login: false,
        password_changed_at: Some(now),
        last_login: None,
        created_on: now,
    };

    let new_account_id = account.account_id.clone();
    db::account::insert(account, ctx.store())?;

    // Retire the bootstrap identity and kill its sessions - re-entry is now impossible
    // because the gating condition no longer holds.
    db::account::retire(ctx.store(), &acting.account_id)?;
    db::session::delete_for_account(ctx.store(), &acting.account_id);

    tracing::info!("Bootstrap escalation complete - super-admin '{}' created, bootstrap account '{}' retired",
        new_handle, acting.handle);

    Ok(new_account_id)
}

///
/// The fixed minimum for the escalation password: at least 8 characters with an
/// uppercase letter, a number and a special character.
///
fn validate_minimum(password: &str) -> Result<(), WardenError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(ErrorCode::PasswordTooShort
            .with_msg(&format!("passwords must be at least {} characters", MIN_LENGTH)))
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ErrorCode::UppercaseRequired.with_msg("passwords must contain an uppercase letter"))
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ErrorCode::NumberRequired.with_msg("passwords must contain a number"))
    }

    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(ErrorCode::SpecialRequired.with_msg("passwords must contain a special character"))
    }

    Ok(())
}
