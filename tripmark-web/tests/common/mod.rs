/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory test database setup
/// - Router construction over a literal test configuration
/// - Request helpers that carry the session cookie
/// - Straight-to-database lookups for verifying what handlers stored

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tower::Service as _;
use tripmark_shared::db::migrations::run_migrations;
use tripmark_shared::models::spot::Spot;
use tripmark_shared::models::user::User;
use tripmark_web::app::{build_router, AppState};
use tripmark_web::config::{ApiConfig, Config, DatabaseConfig, SessionConfig};

/// Test context holding the database handle and the built router
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context over a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        // One immortal connection so the in-memory database survives the
        // whole test
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: "x".repeat(64),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a GET request, optionally with a session cookie
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let request = builder.body(Body::empty()).unwrap();

        self.app.clone().call(request).await.unwrap()
    }

    /// Sends a POST with a form-encoded body, optionally with a session cookie
    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        self.app.clone().call(request).await.unwrap()
    }

    /// Registers an account, logs it in, and returns the session cookie
    pub async fn login_as(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/register",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = self
            .post_form(
                "/login",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        session_cookie(&response).expect("login should set a session cookie")
    }
}

/// Extracts the session cookie (name=value) from a response
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get("set-cookie")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.to_string())
}

/// Returns the Location header of a redirect response
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Reads the full response body as text
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

/// Looks up a user id by name, straight from the database
pub async fn user_id(ctx: &TestContext, username: &str) -> i64 {
    User::find_by_username(&ctx.db, username)
        .await
        .expect("lookup should succeed")
        .expect("user should exist")
        .id
}

/// All spots for a user, ordered by id
pub async fn spots_for(ctx: &TestContext, username: &str) -> Vec<Spot> {
    let owner = user_id(ctx, username).await;
    Spot::list_by_owner(&ctx.db, owner, None)
        .await
        .expect("listing should succeed")
}
