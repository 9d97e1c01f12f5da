/// Argon2id password hashing
///
/// Passwords are stored as PHC strings (algorithm, parameters, salt and hash
/// in one self-describing value), so parameter changes only affect hashes
/// created after the change; old hashes keep verifying with the parameters
/// baked into them.
///
/// Parameters: 64 MB memory, 3 passes, 4 lanes, 32-byte output.
///
/// # Example
///
/// ```
/// use tripmark_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct horse battery staple")?;
///
/// assert!(verify_password("correct horse battery staple", &hash)?);
/// assert!(!verify_password("Tr0ub4dor&3", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Hashing a new password failed
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The stored hash is not a valid PHC string
    #[error("stored password hash is malformed: {0}")]
    BadHash(String),

    /// Verification failed for a reason other than a wrong password
    #[error("password verification failed: {0}")]
    Verify(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params =
        Params::new(65536, 3, 4, Some(32)).map_err(|e| PasswordError::Hash(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a plaintext password with a fresh random salt
///
/// Two calls with the same password produce different strings; equality on
/// hashes is meaningless, always go through [`verify_password`].
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a plaintext password against a stored PHC string
///
/// A wrong password is `Ok(false)`, not an error. The comparison runs with
/// the parameters recorded in the hash, not the current defaults.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| PasswordError::BadHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashes_are_phc_strings_with_the_configured_params() {
        let hash = hash_password("a password").expect("hashing should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_salts_differ_between_calls() {
        let first = hash_password("same password").expect("hashing should succeed");
        let second = hash_password("same password").expect("hashing should succeed");

        assert_ne!(first, second);
    }

    #[test]
    fn test_roundtrip_accepts_the_right_password_only() {
        let hash = hash_password("open sesame").expect("hashing should succeed");

        assert!(verify_password("open sesame", &hash).expect("verify should succeed"));
        assert!(!verify_password("open says me", &hash).expect("verify should succeed"));
        assert!(!verify_password("", &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_garbage_hash_is_an_error_not_a_mismatch() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::BadHash(_))));
    }
}
