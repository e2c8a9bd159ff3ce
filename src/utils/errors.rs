use std::fmt;
use tokio::task::JoinError;

///
/// Every failure the core can produce carries one of these codes.
///
/// The 04xx/05xx band is internal faults - the only class a caller should surface as a
/// fatal error. Everything from 2000 up is an expected, user-facing outcome of an
/// authentication or administration request.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorCode {
    HashThreadingIssue       = 0401,
    ConfigurationInvalid     = 0500,
    HashingError             = 0509,
    InvalidPHCFormat         = 0510,

    // Password format violations - the message names the violated rule.
    PasswordTooShort         = 2002,
    PasswordTooLong          = 2003,
    UppercaseRequired        = 2005,
    SpecialRequired          = 2006,
    NumberRequired           = 2007,

    // Login outcomes.
    InvalidCredentials       = 2101,
    AccountDisabled          = 2102,
    AccountLocked            = 2103,
    PasswordReuse            = 2104,
    PasswordMismatch         = 2105,

    // Sessions.
    SessionExpired           = 2201,

    // Administration.
    Forbidden                = 2301,
    AccountNotFound          = 2302,
    HandleInUse              = 2303,
}

impl ErrorCode {
    pub fn with_msg(&self, message: &str) -> WardenError {
        WardenError::new(*self, message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WardenError {
    error_code: ErrorCode,
    message: String,
}

impl WardenError {
    pub fn new(error_code: ErrorCode, message: &str) -> Self {
        WardenError { error_code, message: message.to_string() }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    ///
    /// True if this is an internal fault rather than an expected, user-facing rejection.
    ///
    pub fn is_internal(&self) -> bool {
        (self.error_code as u32) < 2000
    }
}

impl fmt::Display for WardenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({}): {}", self.error_code, self.error_code as u32, self.message)
    }
}

impl std::error::Error for WardenError {}

impl From<JoinError> for WardenError {
    fn from(error: JoinError) -> Self {
        ErrorCode::HashThreadingIssue.with_msg(&format!("Unable to hash: {}", error))
    }
}

impl From<argon2::Error> for WardenError {
    fn from(error: argon2::Error) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Invalid configuration for algorithm: {}", error))
    }
}

impl From<argon2::password_hash::Error> for WardenError {
    fn from(error: argon2::password_hash::Error) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Unable to hash password: {}", error))
    }
}

impl From<config::ConfigError> for WardenError {
    fn from(error: config::ConfigError) -> Self {
        ErrorCode::ConfigurationInvalid.with_msg(&format!("The service configuration is not correct: {}", error))
    }
}

impl From<serde_json::Error> for WardenError {
    fn from(error: serde_json::Error) -> Self {
        ErrorCode::ConfigurationInvalid.with_msg(&format!("Unable to convert to json: {}", error))
    }
}
