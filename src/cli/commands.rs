//! CLI command implementations
//!
//! `serve` boot sequence:
//! 1. Load config (file or defaults)
//! 2. Apply the signing secret from the environment
//! 3. Validate
//! 4. Build the tokio runtime and run the HTTP server

use std::fs;
use std::path::Path;

use crate::auth::crypto::generate_secret;
use crate::http_server::config::JWT_SECRET_ENV;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Load configuration, applying the `HOOTS_JWT_SECRET` override
pub fn load_config(path: Option<&Path>) -> CliResult<HttpServerConfig> {
    load_config_with_secret(path, std::env::var(JWT_SECRET_ENV).ok())
}

fn load_config_with_secret(
    path: Option<&Path>,
    secret: Option<String>,
) -> CliResult<HttpServerConfig> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                CliError::config_error(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            serde_json::from_str(&content)?
        }
        None => HttpServerConfig::default(),
    };

    config.override_jwt_secret(secret);
    config.validate().map_err(CliError::config_error)?;

    Ok(config)
}

/// Write a default configuration file with a freshly generated signing secret
///
/// Refuses to overwrite an existing file.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let config = HttpServerConfig {
        jwt_secret: generate_secret(),
        ..HttpServerConfig::default()
    };
    let body = serde_json::to_string_pretty(&config)?;
    fs::write(config_path, body)?;

    println!("{}", serde_json::json!({ "initialized": true, "config": config_path }));
    Ok(())
}

/// Start the HTTP server
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.port = port;
        config.validate().map_err(CliError::config_error)?;
    }

    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", &config.socket_addr()),
            ("comment_policy", config.comment_policy.as_str()),
        ],
    );

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server.start().await.map_err(|e| {
            let reason = e.to_string();
            log_event_with_fields(Event::ServeFailed, &[("reason", &reason)]);
            CliError::boot_failed(format!("HTTP server failed: {}", reason))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use crate::auth::jwt::PLACEHOLDER_SECRET;
    use crate::posts::CommentPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("hoots.json");

        init(&config_path).unwrap();

        let config = load_config_with_secret(Some(&config_path), None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.comment_policy, CommentPolicy::Open);
    }

    #[test]
    fn test_init_generates_distinct_secrets() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a.json");
        let second = temp_dir.path().join("b.json");

        init(&first).unwrap();
        init(&second).unwrap();

        let a = load_config_with_secret(Some(&first), None).unwrap();
        let b = load_config_with_secret(Some(&second), None).unwrap();
        assert_ne!(a.jwt_secret, PLACEHOLDER_SECRET);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_defaults_without_secret_rejected() {
        let result = load_config_with_secret(None, None);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_placeholder_secret_in_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("hoots.json");
        fs::write(
            &config_path,
            serde_json::json!({ "jwt_secret": PLACEHOLDER_SECRET }).to_string(),
        )
        .unwrap();

        let result = load_config_with_secret(Some(&config_path), None);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);

        // The environment can still supply a real one
        let config =
            load_config_with_secret(Some(&config_path), Some("from-env".to_string())).unwrap();
        assert_eq!(config.jwt_secret, "from-env");
    }

    #[test]
    fn test_init_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("hoots.json");

        init(&config_path).unwrap();

        let result = init(&config_path);
        assert_eq!(
            result.unwrap_err().code(),
            &CliErrorCode::AlreadyInitialized
        );
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_config_with_secret(Some(&temp_dir.path().join("nope.json")), None);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("hoots.json");
        fs::write(&config_path, "{ not json").unwrap();

        let result = load_config_with_secret(Some(&config_path), None);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("hoots.json");
        fs::write(&config_path, r#"{"jwt_secret": "s3cret", "token_ttl_minutes": 0}"#).unwrap();

        let result = load_config_with_secret(Some(&config_path), None);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_secret_override_applies() {
        let config = load_config_with_secret(None, Some("s3cret".to_string())).unwrap();
        assert_eq!(config.jwt_secret, "s3cret");
    }
}
