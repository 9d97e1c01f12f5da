/// Database layer for Tripmark
///
/// Connection pooling and schema migrations. The row types themselves sit
/// in `models` at the crate root.
///
/// # Modules
///
/// - `pool`: SQLite pool construction with a startup health check
/// - `migrations`: Database creation and migration runner
///
/// # Example
///
/// ```no_run
/// use tripmark_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://instance/tripmark.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
