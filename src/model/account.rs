use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Display, Serialize, PartialEq)]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
}

impl Role {
    ///
    /// Super-admins and admins form the administrative tier that may manage accounts.
    ///
    pub fn is_admin_tier(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

///
/// An identity record for a member of staff.
///
/// The lock fields and failure counter belong to the lockout guard - a locked account
/// (locked = true and now < locked_until) cannot authenticate, and the lock clears
/// itself lazily the next time the guard inspects it after expiry.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Account {
    pub account_id: String,
    pub handle: String,
    pub display_name: String,
    pub phc: String,
    pub role: Role,
    pub active: bool,
    pub locked: bool,
    pub locked_until: Option<DateTime<Utc>>,
    pub failed_attempts: u32,
    pub first_login: bool,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_on: DateTime<Utc>,
}

///
/// The subset of account fields handed back to the boundary layer - never the credential.
///
#[derive(Clone, Debug, Serialize)]
pub struct AccountSummary {
    pub account_id: String,
    pub handle: String,
    pub display_name: String,
    pub role: Role,
    pub first_login: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        AccountSummary {
            account_id: account.account_id.clone(),
            handle: account.handle.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
            first_login: account.first_login,
            last_login: account.last_login,
        }
    }
}
