use rand_core::OsRng;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// Hash the plain text password into an argon2id PHC string with a fresh random salt.
///
/// ref: https://github.com/P-H-C/phc-string-format/blob/master/phc-sf-spec.md
///
/// Hashing is highly CPU-bound - callers invoke this via the blocking worker pool, not
/// on the main event loop.
///
pub fn hash_into_phc(plain_text_password: &str) -> Result<String, WardenError> {
    let salt = argon2::password_hash::SaltString::generate(&mut OsRng);

    let phc = argon2::PasswordHasher::hash_password(
        &argon2::Argon2::default(),
        plain_text_password.as_bytes(),
        salt.as_ref())?;

    Ok(phc.to_string())
}

///
/// Validate whether the plain text password matches the hashed PHC string provided.
///
pub fn verify(plain_text_password: &str, phc: &str) -> Result<bool, WardenError> {
    let parsed_hash = argon2::PasswordHash::new(phc)
        .map_err(|e| ErrorCode::InvalidPHCFormat.with_msg(&format!("The stored credential is not a valid PHC string: {}", e)))?;

    match argon2::PasswordVerifier::verify_password(&argon2::Argon2::default(), plain_text_password.as_bytes(), &parsed_hash) {
        Ok(_)  => Ok(true),
        Err(_) => Ok(false),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_hashed_password_verifies_and_a_wrong_one_does_not() -> Result<(), WardenError> {
        let phc = hash_into_phc("W!bbl321")?;
        assert!(phc.starts_with("$argon2"));
        assert_eq!(verify("W!bbl321", &phc)?, true);
        assert_eq!(verify("Hello456!", &phc)?, false);
        Ok(())
    }

    #[test]
    fn test_garbage_phc_is_an_error_not_a_mismatch() {
        let err = verify("anything", "not-a-phc-string").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidPHCFormat);
        assert!(err.is_internal()); // A corrupted stored credential is a fault, not a rejection.
    }
}
