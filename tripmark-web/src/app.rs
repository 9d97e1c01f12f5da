/// Shared application state and the router that serves it.
///
/// ```no_run
/// use tripmark_web::{app::AppState, config::Config};
/// use sqlx::SqlitePool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = SqlitePool::connect(&config.database.url).await?;
/// let app = tripmark_web::app::build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    error::AppError,
    middleware::security::SecurityHeadersLayer,
    session::{CurrentUser, USER_ID_KEY},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_sessions::{
    cookie::{time::Duration, Key, SameSite},
    Expiry, MemoryStore, Session, SessionManagerLayer,
};
use tracing::Level;
use tripmark_shared::{models::user::User, spots::SpotService};

/// State shared by every handler, cloned per request
///
/// The pool is already reference-counted and the config sits behind an
/// `Arc`, so the clone is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Builds a spot service over the shared pool
    pub fn spots(&self) -> SpotService {
        SpotService::new(self.db.clone())
    }
}

/// Builds the complete router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── /health            # Health check (public)
/// ├── /login             # Login form + submit (public)
/// ├── /register          # Registration form + submit (public)
/// ├── /                  # Spot listing (session required)
/// ├── /add               # Create a spot (session required)
/// ├── /edit/:id          # Update a spot (session required)
/// ├── /delete/:id        # Confirm + delete a spot (session required)
/// ├── /map               # Map of located spots (session required)
/// └── /logout            # Clear the session (session required)
/// ```
///
/// # Layers
///
/// Request tracing, then the session layer, then security headers on the
/// way out. The login requirement is a route layer on the protected group
/// only, so `/health`, `/login` and `/register` stay reachable anonymously.
///
/// # Example
///
/// ```no_run
/// use tripmark_web::app::{AppState, build_router};
/// use tripmark_web::config::Config;
/// use sqlx::SqlitePool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = SqlitePool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
///
/// let app = build_router(state);
///
/// // Start server
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5001").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Reachable without a session
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        );

    // Everything else needs a logged-in user
    let protected_routes = Router::new()
        .route("/", get(routes::spots::index))
        .route(
            "/add",
            get(routes::spots::add_page).post(routes::spots::add),
        )
        .route(
            "/edit/:id",
            get(routes::spots::edit_page).post(routes::spots::edit),
        )
        .route(
            "/delete/:id",
            get(routes::spots::delete_page).post(routes::spots::delete),
        )
        .route("/map", get(routes::spots::map_page))
        .route("/logout", get(routes::auth::logout))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Signed session cookies over an in-memory store. Config validation
    // guarantees the secret is long enough for key derivation.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(30)))
        .with_signed(Key::derive_from(state.config.session.secret.as_bytes()));

    // Assemble the stack outermost-first
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(session_layer)
        .layer(SecurityHeadersLayer::new(false))
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Resolves the logged-in user from the session cookie and injects
/// [`CurrentUser`] into request extensions. Anonymous requests are
/// redirected to the login page with the requested path as `next`.
async fn session_auth_layer(
    State(state): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Remember where the user was headed so login can send them back
    let requested = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let user_id: i64 = session
        .get(USER_ID_KEY)
        .await?
        .ok_or_else(|| AppError::Unauthenticated {
            next: requested.clone(),
        })?;

    // The session may outlive its account; treat that as logged out
    let user = match User::find_by_id(&state.db, user_id).await? {
        Some(user) => user,
        None => {
            session.flush().await?;
            return Err(AppError::Unauthenticated { next: requested });
        }
    };

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(req).await)
}
