//! # TripMark Web Server Library
//!
//! Everything the `tripmark-web` binary serves lives here, so the
//! integration tests can assemble the same router over a test pool.
//!
//! ## Modules
//!
//! - `app`: Shared state and router assembly
//! - `config`: Environment-driven configuration
//! - `error`: `AppError` and its HTTP rendering
//! - `middleware`: Security headers
//! - `pages`: Server-rendered HTML pages
//! - `routes`: Route handlers
//! - `session`: Session keys, the current user, and flash messages

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod session;
