use crate::db;
use crate::model::algorithm;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// Change an account's password.
///
/// Outside the first-login state the current password must be supplied and match, and
/// the new password may not equal it. On first login the current password is not
/// required (the caller only just proved it), but the new password may not be the
/// configured default - otherwise the bootstrap credential would survive the forced
/// rotation. The new password is always validated against the settings current at call
/// time.
///
/// On success every session for the account is terminated: a password change forces
/// re-authentication with the new secret, it is never a silent in-place swap.
///
pub async fn change_password(
    ctx: &ServiceContext,
    account_id: &str,
    current_password: Option<&str>,
    new_password: &str,
    confirm_password: &str,
) -> Result<(), WardenError> {

    let account = db::account::load(account_id, ctx.store())?;
    let settings = db::settings::load(ctx.store());

    if new_password != confirm_password {
        return Err(ErrorCode::PasswordMismatch.with_msg("The new password and confirmation do not match"))
    }

    if !account.first_login {
        let current = match current_password {
            Some(current) => current.to_string(),
            None => return Err(ErrorCode::InvalidCredentials.with_msg("The current password is required")),
        };

        let phc = account.phc.clone();
        let matched = tokio::task::spawn_blocking(move || algorithm::verify(&current, &phc))
            .await
            .map_err(WardenError::from)??;

        if !matched {
            tracing::warn!("Password change for account {} rejected - current password did not match", account.handle);
            return Err(ErrorCode::InvalidCredentials.with_msg("The current password is incorrect"))
        }

        if current_password == Some(new_password) {
            return Err(ErrorCode::PasswordReuse.with_msg("The new password must differ from the current password"))
        }
    } else if new_password == settings.default_password {
        return Err(ErrorCode::PasswordReuse.with_msg("The new password may not be the default password"))
    }

    settings.validate_pattern(new_password)?;

    let plain = new_password.to_string();
    let phc = tokio::task::spawn_blocking(move || algorithm::hash_into_phc(&plain))
        .await
        .map_err(WardenError::from)??;

    db::account::store_password(ctx, account_id, &phc, false)?;

    let ended = db::session::delete_for_account(ctx.store(), account_id);
    tracing::info!("Account {} changed its password - {} session(s) terminated for re-authentication",
        account.handle, ended);

    Ok(())
}
