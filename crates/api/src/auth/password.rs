//! Argon2id password storage.
//!
//! Stored values are PHC strings (`$argon2id$v=19$...`), which embed the salt
//! and cost parameters.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use journey_core::error::CoreError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(plaintext: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|phc| phc.to_string())
}

/// `Ok(false)` for a wrong password. `Err` means `stored` is not a PHC string.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<bool, HashError> {
    let phc = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Length in characters, not bytes.
pub fn ensure_strong(password: &str) -> Result<(), CoreError> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )))
    }
}
