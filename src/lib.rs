//! hoots - posts with nested comments over an authenticated REST API
//!
//! Any signed-in caller may read; only a post's author may change or
//! delete it.

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod posts;
