use crate::model::attempt::LoginAttempt;
use crate::utils;
use crate::utils::context::ServiceContext;

///
/// Append a login-attempt fact to the ledger.
///
/// account_id is None for attempts against unknown handles. The ledger is written
/// before any response is returned so the audit trail survives a failed delivery.
///
pub fn record(ctx: &ServiceContext, account_id: Option<&str>, success: bool, origin_address: &str) {
    let attempt = LoginAttempt {
        attempt_id: utils::generate_id(),
        account_id: account_id.map(String::from),
        success,
        origin_address: origin_address.to_string(),
        attempted_at: ctx.now(),
    };

    ctx.store().attempts.write().push(attempt);
}

///
/// The recorded attempts for one account, oldest first. Audit display only - nothing in
/// the authorisation path reads these back.
///
pub fn for_account(ctx: &ServiceContext, account_id: &str) -> Vec<LoginAttempt> {
    ctx.store().attempts.read()
        .iter()
        .filter(|attempt| attempt.account_id.as_deref() == Some(account_id))
        .cloned()
        .collect()
}

///
/// Attempts that could not be attributed to any account - unknown handles, i.e.
/// potential enumeration probes.
///
pub fn unattributed(ctx: &ServiceContext) -> Vec<LoginAttempt> {
    ctx.store().attempts.read()
        .iter()
        .filter(|attempt| attempt.account_id.is_none())
        .cloned()
        .collect()
}
