use serde::Serialize;
use crate::db;
use crate::model::account::{Account, AccountSummary};
use crate::model::algorithm;
use crate::model::settings::Settings;
use crate::services::lockout::{self, FailureOutcome, LockState};
use crate::services::session;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// What the boundary layer must do with the caller before any normal page is served.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum ForcedAction {
    None,
    MustChangePassword(ChangeReason),
    MustEscalate,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum ChangeReason {
    FirstLogin,
    Expired,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginResponse {
    pub account: AccountSummary,
    pub session_token: String,
    pub forced_action: ForcedAction,
}

///
/// Authenticate a handle/password pair from the given origin address.
///
/// The steps run strictly in order and each short-circuits: resolve the handle, check
/// the active flag, consult the lockout guard, and only then compare the password. A
/// locked-out attempt never reaches the comparison, so it cannot extend the lock or
/// move the failure counter.
///
pub async fn login(ctx: &ServiceContext, handle: &str, password: &str, origin_address: &str)
    -> Result<LoginResponse, WardenError> {

    // Resolve the handle. An unknown handle gets the same generic rejection as a wrong
    // password so callers cannot enumerate accounts - but the ledger records the probe.
    let account = match db::account::load_by_handle(handle, ctx.store()) {
        Some(account) => account,
        None => {
            db::attempt::record(ctx, None, false, origin_address);
            tracing::warn!("Login attempt against unknown handle from {}", origin_address);
            return Err(invalid_credentials())
        },
    };

    if !account.active {
        db::attempt::record(ctx, Some(&account.account_id), false, origin_address);
        return Err(ErrorCode::AccountDisabled.with_msg("The account is disabled"))
    }

    // A snapshot of the settings for the rest of this operation.
    let settings = db::settings::load(ctx.store());

    if let LockState::Locked { remaining_minutes } = lockout::check(ctx, &account)? {
        db::attempt::record(ctx, Some(&account.account_id), false, origin_address);
        return Err(ErrorCode::AccountLocked
            .with_msg(&format!("The account is locked - try again in {} minute(s)", remaining_minutes)))
    }

    // Compare against the stored hash. This is highly CPU-bound so it runs on the
    // blocking worker pool, not the main event loop.
    let phc = account.phc.clone();
    let candidate = password.to_string();
    let matched = tokio::task::spawn_blocking(move || algorithm::verify(&candidate, &phc))
        .await
        .map_err(WardenError::from)??;

    if !matched {
        let rejection = handle_failure(ctx, &account, &settings, origin_address)?;
        return Err(rejection)
    }

    lockout::record_success(ctx, &account)?;
    db::attempt::record(ctx, Some(&account.account_id), true, origin_address);

    let session_token = session::start(ctx, &account.account_id, origin_address, &settings);
    let forced_action = forced_action(ctx, &account, &settings);

    // Reload so the summary reflects the login we just stamped.
    let account = db::account::load(&account.account_id, ctx.store())?;
    tracing::info!("Account {} logged in from {}", account.handle, origin_address);

    Ok(LoginResponse {
        account: AccountSummary::from(&account),
        session_token,
        forced_action,
    })
}

///
/// Bump the failure counter (possibly tripping the lock), write the ledger entry, and
/// build the rejection. Both writes land before the response is returned.
///
fn handle_failure(ctx: &ServiceContext, account: &Account, settings: &Settings, origin_address: &str)
    -> Result<WardenError, WardenError> {

    let outcome = lockout::record_failure(ctx, account, settings)?;
    db::attempt::record(ctx, Some(&account.account_id), false, origin_address);

    Ok(match outcome {
        FailureOutcome::Remaining(remaining) => ErrorCode::InvalidCredentials
            .with_msg(&format!("Invalid credentials - {} attempt(s) remaining before the account is locked", remaining)),
        FailureOutcome::Locked { lock_minutes } => ErrorCode::AccountLocked
            .with_msg(&format!("The account is locked for {} minute(s)", lock_minutes)),
    })
}

///
/// Decide what, if anything, the caller is forced to do before normal access.
///
/// The bootstrap identity still on its first login routes to escalation, ahead of the
/// ordinary first-login password change.
///
fn forced_action(ctx: &ServiceContext, account: &Account, settings: &Settings) -> ForcedAction {
    if account.first_login && account.handle.eq_ignore_ascii_case(&ctx.config().bootstrap_handle) {
        return ForcedAction::MustEscalate
    }

    if account.first_login {
        return ForcedAction::MustChangePassword(ChangeReason::FirstLogin)
    }

    if password_expired(ctx, account, settings) {
        return ForcedAction::MustChangePassword(ChangeReason::Expired)
    }

    ForcedAction::None
}

///
/// True when expiry enforcement is on and the password's age has reached the limit. An
/// account with no recorded change date counts as expired.
///
fn password_expired(ctx: &ServiceContext, account: &Account, settings: &Settings) -> bool {
    if !settings.password_expiry_enabled {
        return false
    }

    match account.password_changed_at {
        Some(changed_at) => (ctx.now() - changed_at).num_days() >= settings.password_expiry_days as i64,
        None => true,
    }
}

fn invalid_credentials() -> WardenError {
    ErrorCode::InvalidCredentials.with_msg("Invalid credentials")
}
