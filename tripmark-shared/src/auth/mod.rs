/// Authentication utilities
///
/// This module provides the credential side of authentication. Session
/// handling lives in the web crate; everything here is plain functions over
/// the user table.
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`credentials`]: Account creation and credential checks
///
/// # Example
///
/// ```no_run
/// use tripmark_shared::auth::credentials;
/// # use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = credentials::create_user(&pool, "alice", "secret").await?;
///
/// // Wrong password and unknown username both come back as None
/// assert!(credentials::verify_user(&pool, "alice", "wrong").await?.is_none());
/// assert_eq!(
///     credentials::verify_user(&pool, "alice", "secret").await?.map(|u| u.id),
///     Some(user.id)
/// );
/// # Ok(())
/// # }
/// ```

pub mod credentials;
pub mod password;
