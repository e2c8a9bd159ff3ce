use chrono::Duration;
use crate::db;
use crate::model::account::Account;
use crate::model::settings::Settings;
use crate::utils::context::ServiceContext;
use crate::utils::errors::WardenError;

///
/// What the guard reports when an account is inspected before a login attempt.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LockState {
    Open,
    Locked { remaining_minutes: i64 },
}

///
/// What a recorded failure did to the account.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FailureOutcome {
    /// Still open - this many attempts remain before the account locks.
    Remaining(u32),
    /// This failure tripped the lock transition.
    Locked { lock_minutes: u32 },
}

///
/// Inspect the account's lock state, lazily healing an expired lock.
///
/// There is no background sweeper: a lock whose window has elapsed is cleared (flag and
/// failure counter both) as a side effect of this read, so every state read is
/// self-healing. This runs before the password is ever compared - a locked-out attempt
/// must not extend the lock or touch the counter.
///
pub fn check(ctx: &ServiceContext, account: &Account) -> Result<LockState, WardenError> {
    if !account.locked {
        return Ok(LockState::Open)
    }

    match account.locked_until {
        Some(until) if ctx.now() < until => {
            let remaining = until - ctx.now();
            Ok(LockState::Locked { remaining_minutes: remaining_minutes(remaining) })
        },
        _ => {
            // The window has elapsed (or the lock had no expiry, which shouldn't happen) -
            // heal it now. A subsequent failure counts as attempt 1 of a fresh window.
            db::account::clear_lock(ctx.store(), &account.account_id)?;
            tracing::info!("Account {} lock expired and was cleared on access", account.handle);
            Ok(LockState::Open)
        },
    }
}

///
/// Record a password failure, transitioning Open -> Locked when the consecutive count
/// reaches the configured limit.
///
pub fn record_failure(ctx: &ServiceContext, account: &Account, settings: &Settings)
    -> Result<FailureOutcome, WardenError> {

    let failures = db::account::increase_failure_count(ctx, &account.account_id)?;

    if failures >= settings.login_failure_limit {
        db::account::lock(ctx, &account.account_id, settings.account_lock_minutes)?;
        tracing::warn!("Account {} locked for {} minutes after {} consecutive login failures",
            account.handle, settings.account_lock_minutes, failures);
        return Ok(FailureOutcome::Locked { lock_minutes: settings.account_lock_minutes })
    }

    Ok(FailureOutcome::Remaining(settings.login_failure_limit - failures))
}

///
/// A success always returns the account to Open with a zeroed counter, however close to
/// the limit it was, and stamps the login.
///
pub fn record_success(ctx: &ServiceContext, account: &Account) -> Result<(), WardenError> {
    db::account::record_success(ctx, &account.account_id)
}

///
/// Whole minutes remaining, rounded up so "locked for 1 minute" never reads as zero.
///
fn remaining_minutes(remaining: Duration) -> i64 {
    (remaining.num_seconds() + 59) / 60
}
