//! # HTTP Server Module
//!
//! Combines all endpoint routers into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/auth/*` - Sign-up and sign-in
//! - `/hoots/*` - Posts and their comments (bearer token required)
//! - `/observability/*` - Health and counters

pub mod auth_routes;
pub mod config;
pub mod observability_routes;
pub mod post_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
