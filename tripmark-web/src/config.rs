/// Environment-driven configuration
///
/// Everything has a development default, so `cargo run` works from a fresh
/// checkout with no `.env` at all:
///
/// - `API_HOST` (0.0.0.0) / `API_PORT` (5001)
/// - `DATABASE_URL` (sqlite://instance/tripmark.db)
/// - `DATABASE_MAX_CONNECTIONS` (5)
/// - `SESSION_SECRET` (a built-in development value; set your own before
///   exposing the server)
///
/// # Example
///
/// ```no_run
/// use tripmark_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Listening on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Fallback signing secret for development setups without a `.env`
///
/// Session cookies signed with this value can be forged by anyone who reads
/// the source, so production deployments must set `SESSION_SECRET`.
pub const DEFAULT_SESSION_SECRET: &str =
    "dev-only-session-secret-change-me-before-exposing-this-to-the-network";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

/// Listener address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

/// Database settings handed to the shared pool builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Session cookie signing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Signing-key material; at least 64 bytes
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(env_or(key, default).parse::<T>()?)
}

impl Config {
    /// Loads configuration from the environment, reading `.env` first
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or the session
    /// secret is too short to derive a signing key from.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let secret = env_or("SESSION_SECRET", DEFAULT_SESSION_SECRET);
        if secret.len() < 64 {
            anyhow::bail!("SESSION_SECRET must be at least 64 characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host: env_or("API_HOST", "0.0.0.0"),
                port: env_parse("API_PORT", "5001")?,
            },
            database: DatabaseConfig {
                url: env_or("DATABASE_URL", "sqlite://instance/tripmark.db"),
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", "5")?,
            },
            session: SessionConfig { secret },
        })
    }

    /// The `host:port` string to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address_joins_host_and_port() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 5001,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 5,
            },
            session: SessionConfig {
                secret: DEFAULT_SESSION_SECRET.to_string(),
            },
        };

        assert_eq!(config.bind_address(), "127.0.0.1:5001");
    }

    #[test]
    fn test_default_secret_passes_the_length_check() {
        // Key derivation assumes the secret survived from_env validation
        assert!(DEFAULT_SESSION_SECRET.len() >= 64);
    }

    #[test]
    fn test_env_or_prefers_the_default_for_unset_keys() {
        assert_eq!(env_or("TRIPMARK_TEST_UNSET_KEY", "fallback"), "fallback");
    }
}
