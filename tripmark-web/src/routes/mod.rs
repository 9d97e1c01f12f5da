/// Route handlers, grouped by concern
///
/// - `health`: Liveness endpoint
/// - `auth`: Login, registration, logout
/// - `spots`: Spot listing, add/edit/delete forms, and the map

pub mod health;
pub mod auth;
pub mod spots;
