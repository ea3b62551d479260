//! Account passwords.
//!
//! Hashes are Argon2id PHC strings, so salt and cost parameters are stored
//! with each hash and can change without touching existing rows.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use eventhub_core::error::CoreError;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(plain: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// `Ok(false)` for a wrong password. `Err` only when `stored` is not a
/// readable PHC string.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Registration rule: at least [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(plain: &str) -> Result<(), CoreError> {
    if plain.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
