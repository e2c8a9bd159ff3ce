use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// A live session. Created on successful login, destroyed on logout, on idle-timeout
/// discovery, or evicted when the same account logs in again under duplicate-login
/// prevention.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub account_id: String,
    pub logged_in_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub origin_address: String,
}
