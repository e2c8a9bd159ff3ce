use serde::Serialize;
use crate::{db, utils};
use crate::model::account::{Account, AccountSummary, Role};
use crate::model::algorithm;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

#[derive(Clone, Debug, Serialize)]
pub struct CreatedAccount {
    pub account_id: String,
    pub handle: String,
    /// Handed back so the administrator can pass the initial credential on. The owner
    /// must change it at first login.
    pub default_password: String,
}

///
/// Create a staff account, seeded with the default password and flagged for a forced
/// change at first login.
///
/// Admin-tier only, and only a super-admin may mint another super-admin. The boundary
/// layer gates this too - the core re-checks anyway.
///
pub async fn create_account(ctx: &ServiceContext, acting_account_id: &str, handle: &str, display_name: &str, role: Role)
    -> Result<CreatedAccount, WardenError> {

    let acting = require_admin_tier(ctx, acting_account_id)?;

    if role == Role::SuperAdmin && acting.role != Role::SuperAdmin {
        return Err(ErrorCode::Forbidden.with_msg("Access denied"))
    }

    if db::account::handle_in_use(handle, ctx.store()) {
        return Err(ErrorCode::HandleInUse.with_msg(&format!("The handle '{}' is already in use", handle)))
    }

    let settings = db::settings::load(ctx.store());
    let default_password = settings.default_password.clone();

    let plain = default_password.clone();
    let phc = tokio::task::spawn_blocking(move || algorithm::hash_into_phc(&plain))
        .await
        .map_err(WardenError::from)??;

    let account = Account {
        account_id: utils::generate_id(),
        handle: handle.to_string(),
        display_name: display_name.to_string(),
        phc,
        role,
        active: true,
        locked: false,
        locked_until: None,
        failed_attempts: 0,
        first_login: true,
        password_changed_at: None,
        last_login: None,
        created_on: ctx.now(),
    };

    let account_id = account.account_id.clone();
    db::account::insert(account, ctx.store())?;

    tracing::info!("Account {} ({}) created by {}", handle, role, acting.handle);

    Ok(CreatedAccount {
        account_id,
        handle: handle.to_string(),
        default_password,
    })
}

///
/// Activate or deactivate an account. Deactivation kills any live sessions - the owner
/// is cut off on their next request, not at some future login.
///
pub fn set_active(ctx: &ServiceContext, acting_account_id: &str, account_id: &str, active: bool)
    -> Result<(), WardenError> {

    let acting = require_admin_tier(ctx, acting_account_id)?;
    let target = db::account::load(account_id, ctx.store())?;

    if target.role == Role::SuperAdmin && acting.role != Role::SuperAdmin {
        return Err(ErrorCode::Forbidden.with_msg("Access denied"))
    }

    db::account::set_active(ctx.store(), account_id, active)?;

    if !active {
        let ended = db::session::delete_for_account(ctx.store(), account_id);
        tracing::warn!("Account {} deactivated by {} - {} session(s) terminated", target.handle, acting.handle, ended);
    } else {
        tracing::info!("Account {} activated by {}", target.handle, acting.handle);
    }

    Ok(())
}

///
/// Reset an account back to the default password.
///
/// This is the human unlock path, independent of the time-boxed lockout: it clears the
/// lock and failure counter immediately, flags a forced change at first login, and
/// terminates the account's sessions. Returns the default password so the administrator
/// can pass it on.
///
pub async fn reset_password(ctx: &ServiceContext, acting_account_id: &str, account_id: &str)
    -> Result<String, WardenError> {

    let acting = require_admin_tier(ctx, acting_account_id)?;
    let target = db::account::load(account_id, ctx.store())?;

    if target.role == Role::SuperAdmin && acting.role != Role::SuperAdmin {
        return Err(ErrorCode::Forbidden.with_msg("Access denied"))
    }

    let settings = db::settings::load(ctx.store());
    let default_password = settings.default_password.clone();

    let plain = default_password.clone();
    let phc = tokio::task::spawn_blocking(move || algorithm::hash_into_phc(&plain))
        .await
        .map_err(WardenError::from)??;

    db::account::store_password(ctx, account_id, &phc, true)?;
    db::account::clear_lock(ctx.store(), account_id)?;
    db::session::delete_for_account(ctx.store(), account_id);

    tracing::info!("Password for account {} reset by {}", target.handle, acting.handle);
    Ok(default_password)
}

///
/// Hard-delete an account. Super-admin accounts are never hard-deleted - they can only
/// be deactivated.
///
pub fn delete_account(ctx: &ServiceContext, acting_account_id: &str, account_id: &str)
    -> Result<(), WardenError> {

    let acting = require_admin_tier(ctx, acting_account_id)?;
    let target = db::account::load(account_id, ctx.store())?;

    if target.role == Role::SuperAdmin {
        return Err(ErrorCode::Forbidden.with_msg("Access denied"))
    }

    db::account::delete(account_id, ctx.store())?;
    db::session::delete_for_account(ctx.store(), account_id);

    tracing::warn!("Account {} deleted by {}", target.handle, acting.handle);
    Ok(())
}

///
/// Fetch a single account summary for the boundary layer.
///
pub fn find_account(ctx: &ServiceContext, account_id: &str) -> Result<AccountSummary, WardenError> {
    let account = db::account::load(account_id, ctx.store())?;
    Ok(AccountSummary::from(&account))
}

fn require_admin_tier(ctx: &ServiceContext, acting_account_id: &str) -> Result<Account, WardenError> {
    let acting = db::account::load(acting_account_id, ctx.store())?;

    if !acting.role.is_admin_tier() {
        return Err(ErrorCode::Forbidden.with_msg("Access denied"))
    }

    Ok(acting)
}
