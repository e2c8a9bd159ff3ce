use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// An immutable login-attempt fact. Append-only and never read back by authorisation
/// logic - it exists purely for the audit trail.
///
/// account_id is None for attempts against handles that don't exist, which is itself
/// useful audit data (it surfaces enumeration attempts).
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginAttempt {
    pub attempt_id: String,
    pub account_id: Option<String>,
    pub success: bool,
    pub origin_address: String,
    pub attempted_at: DateTime<Utc>,
}
