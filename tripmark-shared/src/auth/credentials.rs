/// Credential store
///
/// Account creation and credential verification over the user table. The web
/// handlers and the tests both go through these functions, so the duplicate
/// check and the no-enumeration behavior live in exactly one place.

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::models::user::{CreateUser, User};
use sqlx::SqlitePool;
use tracing::debug;

/// Error type for credential operations
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The chosen username is already taken
    #[error("username is already taken")]
    DuplicateUsername,

    /// Password hashing or verification failed
    #[error("password operation failed: {0}")]
    Password(#[from] PasswordError),

    /// Database error
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for CredentialError {
    fn from(err: sqlx::Error) -> Self {
        CredentialError::Database(err)
    }
}

/// Creates a new account with the given plaintext password
///
/// The password is hashed before it touches the database. Username
/// uniqueness is enforced by the unique index; a collision surfaces as
/// `CredentialError::DuplicateUsername` rather than a raw database error.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, CredentialError> {
    let password_hash = hash_password(password)?;

    match User::create(
        pool,
        CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(CredentialError::DuplicateUsername)
        }
        Err(e) => Err(CredentialError::Database(e)),
    }
}

/// Checks a username/password pair against the stored credentials
///
/// Returns the matching user, or `None` for both an unknown username and a
/// wrong password. Callers cannot tell the two apart; only the debug log
/// distinguishes them.
pub async fn verify_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, CredentialError> {
    let user = match User::find_by_username(pool, username).await? {
        Some(user) => user,
        None => {
            debug!(username, "Login rejected: unknown username");
            return Ok(None);
        }
    };

    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        debug!(username, "Login rejected: wrong password");
        Ok(None)
    }
}

// Database-backed tests are in tests/credentials_tests.rs; the hashing
// behavior itself is covered in password.rs.
