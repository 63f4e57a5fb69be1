//! HTTP Server Configuration
//!
//! Bind address, CORS, token signing and the comment policy.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::auth::crypto::PasswordPolicy;
use crate::auth::jwt::PLACEHOLDER_SECRET;
use crate::auth::JwtConfig;
use crate::posts::CommentPolicy;

/// Environment variable that overrides `jwt_secret`
pub const JWT_SECRET_ENV: &str = "HOOTS_JWT_SECRET";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// HS256 signing secret for bearer tokens; must be set (file or
    /// `HOOTS_JWT_SECRET`) before serving
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Token lifetime in minutes (default: 1440)
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// Minimum password length at sign-up (default: 8)
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Who may edit/delete comments (default: "open")
    #[serde(default)]
    pub comment_policy: CommentPolicy,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(), // Vite dev server
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

fn default_jwt_secret() -> String {
    String::new()
}

fn default_token_ttl_minutes() -> i64 {
    24 * 60
}

fn default_min_password_length() -> usize {
    PasswordPolicy::default().min_length
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl_minutes(),
            min_password_length: default_min_password_length(),
            comment_policy: CommentPolicy::default(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Replace the signing secret if `value` is non-empty
    pub fn override_jwt_secret(&mut self, value: Option<String>) {
        if let Some(secret) = value.filter(|s| !s.is_empty()) {
            self.jwt_secret = secret;
        }
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be > 0".to_string());
        }
        if self.jwt_secret.is_empty() {
            return Err(format!(
                "jwt_secret must be set in the config file or via {}",
                JWT_SECRET_ENV
            ));
        }
        if self.jwt_secret == PLACEHOLDER_SECRET {
            return Err("jwt_secret is the public placeholder; generate a real secret".to_string());
        }
        if self.token_ttl_minutes <= 0 {
            return Err("token_ttl_minutes must be > 0".to_string());
        }
        Ok(())
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            access_token_ttl: Duration::minutes(self.token_ttl_minutes),
            ..JwtConfig::default()
        }
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.min_password_length,
        }
    }
}
