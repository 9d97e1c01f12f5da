/// Error handling for the web server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<T, AppError>` which converts to a redirect or an
/// error page depending on the variant.
///
/// Handlers that want a flash message or a re-rendered form catch the
/// underlying error themselves; whatever reaches `AppError` gets the plain
/// fallback response below.
///
/// # Example
///
/// ```no_run
/// use tripmark_web::error::AppResult;
/// use axum::response::{Html, IntoResponse, Response};
///
/// async fn handler() -> AppResult<Response> {
///     let page = fetch_page().await?;
///     Ok(Html(page).into_response())
/// }
/// # async fn fetch_page() -> AppResult<String> { Ok(String::new()) }
/// ```

use crate::pages;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;
use tripmark_shared::auth::credentials::CredentialError;
use tripmark_shared::spots::SpotError;

/// Handler result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type
#[derive(Debug)]
pub enum AppError {
    /// No logged-in user; redirects to the login page (303)
    ///
    /// `next` is the path the user was trying to reach, replayed after login.
    Unauthenticated { next: String },

    /// The record belongs to someone else; redirects home (303)
    Forbidden,

    /// Missing page or record (404)
    NotFound,

    /// Rejected form input (422)
    Validation(String),

    /// Internal server error (500)
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthenticated { next } => write!(f, "Unauthenticated (next: {})", next),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated { next } => {
                let target = format!("/login?next={}", urlencoding::encode(&next));
                Redirect::to(&target).into_response()
            }
            AppError::Forbidden => Redirect::to("/").into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(pages::render_message_page(
                    "Not found",
                    "The page or record you asked for does not exist.",
                )),
            )
                .into_response(),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(pages::render_message_page("Invalid input", &msg)),
            )
                .into_response(),
            AppError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(pages::render_message_page(
                        "Something went wrong",
                        "An internal error occurred. Please try again.",
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Convert sqlx errors to application errors
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert spot service errors to application errors
impl From<SpotError> for AppError {
    fn from(err: SpotError) -> Self {
        match err {
            SpotError::Validation(msg) => AppError::Validation(msg),
            SpotError::NotFound => AppError::NotFound,
            SpotError::Forbidden => AppError::Forbidden,
            SpotError::Database(err) => err.into(),
        }
    }
}

/// Convert credential errors to application errors
impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::DuplicateUsername => {
                AppError::Validation("Username already taken.".to_string())
            }
            CredentialError::Password(err) => {
                AppError::Internal(format!("Password operation failed: {}", err))
            }
            CredentialError::Database(err) => err.into(),
        }
    }
}

/// Convert session store errors to application errors
impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(format!("Session error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Validation("Name is required.".to_string());
        assert_eq!(err.to_string(), "Validation failed: Name is required.");

        let err = AppError::NotFound;
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_spot_errors_map_to_the_right_variants() {
        assert!(matches!(
            AppError::from(SpotError::Forbidden),
            AppError::Forbidden
        ));
        assert!(matches!(
            AppError::from(SpotError::NotFound),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(SpotError::Validation("bad".to_string())),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_row_not_found_becomes_not_found() {
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::NotFound
        ));
    }
}
