//! # HTTP Server
//!
//! Wires the services together and combines all routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::auth::{AuthService, InMemoryUserRepository};
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry};
use crate::posts::{CommentPolicy, InMemoryPostStore, PostService};

use super::auth_routes::{auth_routes, AuthState};
use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes, track_failures};
use super::post_routes::{post_routes, PostsState};

/// HTTP server for the hoots API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig) -> Self {
        let router = Self::build_router(&config);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig) -> Router {
        let users = Arc::new(InMemoryUserRepository::new());
        let metrics = Arc::new(MetricsRegistry::new());

        let auth = AuthService::new(
            Arc::clone(&users),
            config.jwt_config(),
            config.password_policy(),
        );
        let jwt = auth.jwt_manager().clone();

        let posts = PostService::new(Arc::new(InMemoryPostStore::new()), users)
            .with_comment_policy(config.comment_policy)
            .with_metrics(Arc::clone(&metrics));

        let auth_state = Arc::new(AuthState::new(auth));
        let posts_state = Arc::new(PostsState::new(posts, jwt));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest("/auth", auth_routes(auth_state))
            .nest("/hoots", post_routes(posts_state))
            .nest("/observability", observability_routes(Arc::clone(&metrics)))
            .layer(middleware::from_fn_with_state(metrics, track_failures))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<(), std::io::Error> {
        self.config
            .validate()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        if self.config.comment_policy == CommentPolicy::Open {
            Logger::warn(
                Event::CommentPolicyOpen.as_str(),
                &[("detail", "any authenticated caller may edit or delete any comment")],
            );
        }

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(
            Event::Serving,
            &[
                ("addr", &addr.to_string()),
                ("comment_policy", self.config.comment_policy.as_str()),
            ],
        );

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}
