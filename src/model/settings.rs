use serde::{Deserialize, Serialize};
use crate::utils::errors::{ErrorCode, WardenError};

///
/// The special characters a password may be required to contain one of.
///
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

///
/// The tunable security settings - a singleton, lazily created with defaults the first
/// time it is read.
///
/// Every authentication decision re-reads these from the store at the time of the call,
/// so a super-admin tightening or loosening a rule takes effect on the very next
/// operation - nothing in the core caches a snapshot across requests.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settings {
    pub password_min_length: u32,
    pub password_max_length: u32,
    pub password_require_uppercase: bool,
    pub password_require_special: bool,
    pub password_require_number: bool,
    pub default_password: String,
    pub prevent_duplicate_login: bool,
    pub session_timeout_enabled: bool,
    pub session_timeout_minutes: u32,
    pub login_failure_limit: u32,
    pub account_lock_minutes: u32,
    pub password_expiry_enabled: bool,
    pub password_expiry_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            password_min_length: 8,
            password_max_length: 20,
            password_require_uppercase: true,
            password_require_special: true,
            password_require_number: true,
            default_password: String::from("1111"),
            prevent_duplicate_login: false,
            session_timeout_enabled: true,
            session_timeout_minutes: 30,
            login_failure_limit: 5,
            account_lock_minutes: 10,
            password_expiry_enabled: false,
            password_expiry_days: 90,
        }
    }
}

impl Settings {
    ///
    /// Check the plain text password doesn't violate the configured format rules.
    ///
    /// The checks run in order and stop at the first violated rule, whose message names
    /// the rule. No side effects - callers must re-invoke against the settings current
    /// at the time of each operation.
    ///
    pub fn validate_pattern(&self, plain_text_password: &str) -> Result<(), WardenError> {

        if plain_text_password.chars().count() < self.password_min_length as usize {
            return Err(ErrorCode::PasswordTooShort
                .with_msg(&format!("passwords must be at least {} characters", self.password_min_length)))
        }

        if plain_text_password.chars().count() > self.password_max_length as usize {
            return Err(ErrorCode::PasswordTooLong
                .with_msg(&format!("passwords may not be more than {} characters", self.password_max_length)))
        }

        if self.password_require_uppercase
            && !plain_text_password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(ErrorCode::UppercaseRequired
                .with_msg("passwords must contain an uppercase letter"))
        }

        if self.password_require_special
            && !plain_text_password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return Err(ErrorCode::SpecialRequired
                .with_msg("passwords must contain a special character"))
        }

        if self.password_require_number
            && !plain_text_password.chars().any(|c| c.is_ascii_digit()) {
            return Err(ErrorCode::NumberRequired
                .with_msg("passwords must contain a number"))
        }

        Ok(())
    }
}
