/// Database models for Tripmark
///
/// User accounts and the spots they own, each with its CRUD queries.
///
/// # Models
///
/// - `user`: Account rows
/// - `spot`: Travel spots owned by users
///
/// # Example
///
/// ```no_run
/// use tripmark_shared::models::user::{CreateUser, User};
/// use tripmark_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod spot;
pub mod user;
