use crate::db;
use crate::model::attempt::LoginAttempt;
use crate::model::session::SessionRecord;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// The recorded login attempts for one account, for the audit surface. Admin-tier only.
///
pub fn login_attempts(ctx: &ServiceContext, acting_account_id: &str, account_id: &str)
    -> Result<Vec<LoginAttempt>, WardenError> {

    require_admin_tier(ctx, acting_account_id)?;
    Ok(db::attempt::for_account(ctx, account_id))
}

///
/// Attempts against handles that don't exist - enumeration probes. Admin-tier only.
///
pub fn unattributed_attempts(ctx: &ServiceContext, acting_account_id: &str)
    -> Result<Vec<LoginAttempt>, WardenError> {

    require_admin_tier(ctx, acting_account_id)?;
    Ok(db::attempt::unattributed(ctx))
}

///
/// The live sessions for one account. Admin-tier only.
///
pub fn live_sessions(ctx: &ServiceContext, acting_account_id: &str, account_id: &str)
    -> Result<Vec<SessionRecord>, WardenError> {

    require_admin_tier(ctx, acting_account_id)?;
    Ok(db::session::for_account(ctx.store(), account_id))
}

fn require_admin_tier(ctx: &ServiceContext, acting_account_id: &str) -> Result<(), WardenError> {
    let acting = db::account::load(acting_account_id, ctx.store())?;

    if !acting.role.is_admin_tier() {
        return Err(ErrorCode::Forbidden.with_msg("Access denied"))
    }

    Ok(())
}
