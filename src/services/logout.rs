use crate::services::session;
use crate::utils::context::ServiceContext;

///
/// End the caller's session. Logging out an already-dead token is a no-op, not an
/// error - the browser may fire this twice.
///
pub fn logout(ctx: &ServiceContext, session_token: &str) {
    session::end(ctx, session_token);
}
