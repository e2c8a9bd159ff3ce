use chrono::Duration;
use crate::{db, utils};
use crate::model::session::SessionRecord;
use crate::model::settings::Settings;
use crate::utils::context::ServiceContext;

///
/// What a touch reports about the session.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionStatus {
    Fresh,
    Expired,
}

///
/// Start a session for the account, returning the new opaque token.
///
/// Under duplicate-login prevention every prior session for the account is evicted
/// first, unconditionally - the evicted session is not notified, its next touch simply
/// finds nothing. Concurrent logins race on delete-then-insert; last start wins the
/// single slot, which is acceptable.
///
pub fn start(ctx: &ServiceContext, account_id: &str, origin_address: &str, settings: &Settings) -> String {

    if settings.prevent_duplicate_login {
        let evicted = db::session::delete_for_account(ctx.store(), account_id);
        if evicted > 0 {
            tracing::info!("Evicted {} prior session(s) for account {} on new login", evicted, account_id);
        }
    }

    let now = ctx.now();
    let record = SessionRecord {
        session_id: utils::generate_id(),
        account_id: account_id.to_string(),
        logged_in_at: now,
        last_activity: now,
        origin_address: origin_address.to_string(),
    };

    let session_id = record.session_id.clone();
    db::session::insert(ctx.store(), record);
    session_id
}

///
/// Per-request freshness check for an authenticated session.
///
/// With the timeout disabled the registry is a pass-through - always fresh. Otherwise a
/// session idle for longer than the configured window is discovered expired on this
/// touch (never pre-emptively), deleted, and reported so the caller terminates it. A
/// fresh session has its last-activity advanced to now.
///
pub fn touch_session(ctx: &ServiceContext, session_id: &str) -> SessionStatus {
    let settings = db::settings::load(ctx.store());

    if !settings.session_timeout_enabled {
        return SessionStatus::Fresh
    }

    let record = match db::session::find(ctx.store(), session_id) {
        Some(record) => record,
        None => return SessionStatus::Expired,
    };

    let idle = ctx.now() - record.last_activity;
    if idle > Duration::minutes(settings.session_timeout_minutes as i64) {
        db::session::delete(ctx.store(), session_id);
        tracing::info!("Session for account {} expired after {} minutes idle",
            record.account_id, idle.num_minutes());
        return SessionStatus::Expired
    }

    db::session::touch(ctx.store(), session_id, ctx.now());
    SessionStatus::Fresh
}

///
/// End the session. Idempotent - ending a token that no longer exists is not an error.
///
pub fn end(ctx: &ServiceContext, session_id: &str) {
    if db::session::delete(ctx.store(), session_id) {
        tracing::info!("Session {} ended", session_id);
    }
}
