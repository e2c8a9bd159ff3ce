use crate::db::store::Store;
use crate::model::account::Account;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// Load the requested account from the store.
///
pub fn load(account_id: &str, store: &Store) -> Result<Account, WardenError> {
    match store.accounts.read().get(account_id) {
        Some(account) => Ok(account.clone()),
        None => Err(ErrorCode::AccountNotFound.with_msg("The account requested does not exist")),
    }
}

///
/// Look an account up by its login handle. Handles are stored case-sensitively but the
/// login lookup is exact - collision checks at creation time are the case-insensitive ones.
///
pub fn load_by_handle(handle: &str, store: &Store) -> Option<Account> {
    store.accounts.read()
        .values()
        .find(|account| account.handle == handle)
        .cloned()
}

///
/// True if any account already owns this handle, compared case-insensitively.
///
pub fn handle_in_use(handle: &str, store: &Store) -> bool {
    store.accounts.read()
        .values()
        .any(|account| account.handle.eq_ignore_ascii_case(handle))
}

///
/// Insert a new account, rejecting a case-insensitive handle collision.
///
pub fn insert(account: Account, store: &Store) -> Result<(), WardenError> {
    let mut accounts = store.accounts.write();

    if accounts.values().any(|existing| existing.handle.eq_ignore_ascii_case(&account.handle)) {
        return Err(ErrorCode::HandleInUse.with_msg(&format!("The handle '{}' is already in use", account.handle)))
    }

    accounts.insert(account.account_id.clone(), account);
    Ok(())
}

///
/// Hard-delete an account. Super-admin accounts are never hard-deleted - deactivate them
/// instead.
///
pub fn delete(account_id: &str, store: &Store) -> Result<(), WardenError> {
    match store.accounts.write().remove(account_id) {
        Some(_) => Ok(()),
        None => Err(ErrorCode::AccountNotFound.with_msg("The account requested does not exist")),
    }
}

///
/// Apply a mutation to the stored account under the table's write lock.
///
fn update<F>(account_id: &str, store: &Store, mutate: F) -> Result<(), WardenError>
where F: FnOnce(&mut Account) {

    match store.accounts.write().get_mut(account_id) {
        Some(account) => {
            mutate(account);
            Ok(())
        },
        None => Err(ErrorCode::AccountNotFound.with_msg("The account requested does not exist")),
    }
}

///
/// Bump the consecutive-failure counter and return the new count.
///
pub fn increase_failure_count(ctx: &ServiceContext, account_id: &str) -> Result<u32, WardenError> {
    let mut new_count = 0;
    update(account_id, ctx.store(), |account| {
        account.failed_attempts += 1;
        new_count = account.failed_attempts;
    })?;
    Ok(new_count)
}

///
/// Lock the account for the given number of minutes from now. The failure counter is
/// left at the limit - the lazy unlock on next access resets it.
///
pub fn lock(ctx: &ServiceContext, account_id: &str, lock_minutes: u32) -> Result<(), WardenError> {
    let until = ctx.now() + chrono::Duration::minutes(lock_minutes as i64);

    update(account_id, ctx.store(), |account| {
        account.locked = true;
        account.locked_until = Some(until);
    })
}

///
/// Clear the lock flag and reset the failure counter - the self-healing half of the
/// lazy expiry check.
///
pub fn clear_lock(store: &Store, account_id: &str) -> Result<(), WardenError> {
    update(account_id, store, |account| {
        account.locked = false;
        account.locked_until = None;
        account.failed_attempts = 0;
    })
}

///
/// Clear any failure details and stamp a successful login.
///
pub fn record_success(ctx: &ServiceContext, account_id: &str) -> Result<(), WardenError> {
    let now = ctx.now();
    update(account_id, ctx.store(), |account| {
        account.locked = false;
        account.locked_until = None;
        account.failed_attempts = 0;
        account.last_login = Some(now);
    })
}

///
/// Replace the stored credential and stamp the change.
///
/// first_login is set explicitly: false when the owner chose the password, true when an
/// admin reset it back to the default.
///
pub fn store_password(ctx: &ServiceContext, account_id: &str, phc: &str, first_login: bool)
    -> Result<(), WardenError> {

    let now = ctx.now();
    update(account_id, ctx.store(), |account| {
        account.phc = phc.to_string();
        account.first_login = first_login;
        account.password_changed_at = Some(now);
    })
}

pub fn set_active(store: &Store, account_id: &str, active: bool) -> Result<(), WardenError> {
    update(account_id, store, |account| account.active = active)
}

///
/// Retire the bootstrap account after escalation: deactivated and first-login cleared,
/// so the gating condition for escalation can never hold again.
///
pub fn retire(store: &Store, account_id: &str) -> Result<(), WardenError> {
    update(account_id, store, |account| {
        account.active = false;
        account.first_login = false;
    })
}
