/// Authentication endpoints
///
/// This module provides the login, registration, and logout flows:
///
/// - `GET /login` - Login form
/// - `POST /login` - Verify credentials and open a session
/// - `GET /register` - Registration form
/// - `POST /register` - Create an account (no automatic login)
/// - `GET /logout` - Drop the logged-in user from the session
///
/// Failed logins re-render the form with one generic message whether the
/// username or the password was wrong, so the form never confirms which
/// usernames exist.

use crate::{
    app::AppState,
    error::AppResult,
    pages,
    session::{self, USER_ID_KEY},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tripmark_shared::auth::credentials::{self, CredentialError};
use validator::Validate;

/// Query parameters for the login page
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Path to return to after a successful login
    pub next: Option<String>,
}

/// Login form body
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,

    /// Carried through a hidden field on the login page
    pub next: Option<String>,
}

/// Registration form body
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Clamps the post-login target to a local path
///
/// Anything that does not start with a single `/` could send the browser to
/// another origin, so those fall back to the home page.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") => n,
        _ => "/",
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errors)| errors.iter())
        .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Validation failed".to_string())
}

/// GET /login
///
/// Renders the login form. A `next` query parameter is threaded into the
/// form so the user lands where they were originally headed.
pub async fn login_page(
    session: Session,
    Query(query): Query<LoginQuery>,
) -> AppResult<Response> {
    let flashes = session::take_flashes(&session).await?;

    Ok(Html(pages::render_login(query.next.as_deref(), None, &flashes)).into_response())
}

/// POST /login
///
/// Verifies the credentials and stores the user id in the session. On
/// failure the form is re-rendered with status 401 and the generic error.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let user = match credentials::verify_user(&state.db, &form.username, &form.password).await? {
        Some(user) => user,
        None => {
            let flashes = session::take_flashes(&session).await?;
            return Ok((
                StatusCode::UNAUTHORIZED,
                Html(pages::render_login(
                    form.next.as_deref(),
                    Some("Invalid username or password."),
                    &flashes,
                )),
            )
                .into_response());
        }
    };

    session.insert(USER_ID_KEY, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Redirect::to(safe_next(form.next.as_deref())).into_response())
}

/// GET /register
pub async fn register_page(session: Session) -> AppResult<Response> {
    let flashes = session::take_flashes(&session).await?;

    Ok(Html(pages::render_register(None, &flashes)).into_response())
}

/// POST /register
///
/// Creates the account and sends the user to the login page; registration
/// never opens a session by itself. A taken username flashes a notice and
/// redirects back here.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    // Validate request
    if let Err(errors) = form.validate() {
        let message = first_validation_message(&errors);
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::render_register(Some(&message), &[])),
        )
            .into_response());
    }

    match credentials::create_user(&state.db, &form.username, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User registered");
            session::push_flash(&session, "Account created, please log in.").await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(CredentialError::DuplicateUsername) => {
            session::push_flash(&session, "Username already taken.").await?;
            Ok(Redirect::to("/register").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /logout
///
/// Drops the user id from the session and flashes a notice on the login
/// page. The session record itself stays so the flash can ride on it.
pub async fn logout(session: Session) -> AppResult<Response> {
    let _: Option<i64> = session.remove(USER_ID_KEY).await?;
    session::push_flash(&session, "Logged out.").await?;

    Ok(Redirect::to("/login").into_response())
}
