mod accounts;
mod audit;
mod bootstrap;
mod change_password;
mod lockout;
mod login;
mod logout;
mod policy;
mod session;

pub use accounts::{create_account, delete_account, find_account, reset_password, set_active, CreatedAccount};
pub use audit::{live_sessions, login_attempts, unattributed_attempts};
pub use bootstrap::complete_bootstrap_escalation;
pub use change_password::change_password;
pub use login::{login, ChangeReason, ForcedAction, LoginResponse};
pub use logout::logout;
pub use policy::{get_password_policy, update_settings, PasswordPolicyResponse, UpdateSettingsRequest};
pub use session::{touch_session, SessionStatus};
