/// Session keys, the current user, and flash messages
///
/// The session cookie carries two entries: the logged-in user's id under
/// [`USER_ID_KEY`], and a queue of one-shot notices under [`FLASH_KEY`].
/// Flash messages survive exactly one render; pages drain the queue with
/// [`take_flashes`] when they build their HTML.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Key for storing the user id in the session
pub const USER_ID_KEY: &str = "user_id";

/// Key for storing pending flash messages in the session
pub const FLASH_KEY: &str = "flash";

/// The authenticated user, resolved once per request
///
/// The auth middleware looks the user up from the session and injects this
/// into request extensions, so handlers never re-read the session for
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Database id
    pub id: i64,

    /// Display name, shown in the page header
    pub username: String,
}

/// Appends a notice to the flash queue
pub async fn push_flash(
    session: &Session,
    message: &str,
) -> Result<(), tower_sessions::session::Error> {
    let mut flashes: Vec<String> = session.get(FLASH_KEY).await?.unwrap_or_default();
    flashes.push(message.to_string());
    session.insert(FLASH_KEY, flashes).await
}

/// Drains the flash queue, leaving it empty for the next request
pub async fn take_flashes(
    session: &Session,
) -> Result<Vec<String>, tower_sessions::session::Error> {
    Ok(session.remove(FLASH_KEY).await?.unwrap_or_default())
}
