/// Custom middleware for the web server
///
/// Only the security-header layer lives here; tracing and sessions come
/// straight from `tower-http` and `tower-sessions`.

pub mod security;
