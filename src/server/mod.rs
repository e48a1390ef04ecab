//! HTTP server
//!
//! Serves the relay over HTTP with axum. The relay itself does not depend on
//! anything in here.

pub mod config;
pub mod listener;
pub mod routes;

pub use config::ServerConfig;
pub use listener::ChatServer;
pub use routes::router;
