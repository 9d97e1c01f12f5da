/// User accounts
///
/// The account lifecycle is deliberately small: rows are created at
/// registration and looked up at login (by username) or per request (by
/// session id). There is no update or delete path.
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// One registered account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,

    /// Unique, case-sensitive
    pub username: String,

    /// Argon2id PHC string, produced by `auth::password`
    pub password_hash: String,
}

/// Insert payload for a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,

    /// Already hashed; plaintext never reaches this layer
    pub password_hash: String,
}

impl User {
    /// Inserts the account and returns it with its assigned id
    ///
    /// A username collision surfaces as a unique-violation database error;
    /// the credential store translates it for callers.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Looks an account up by id
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Looks an account up by exact username
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

// Database-backed coverage lives in tests/credentials_tests.rs, which
// exercises these operations through the credential store.
