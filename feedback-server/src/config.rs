use std::env;

use feedback_core::{FeedbackError, Result};

/// Server configuration, loaded from environment variables.
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    /// Secret used to sign anti-forgery tokens. Required.
    pub csrf_secret: String,
    /// Lifetime of an issued anti-forgery token, in seconds.
    pub csrf_token_ttl_secs: i64,
    /// Operator bearer token gating the admin routes. Required.
    pub admin_token: String,
    pub log_file: Option<String>,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    /// If `port` is provided it overrides FEEDBACK_PORT.
    pub fn load(port: Option<u16>) -> Result<Self> {
        let port = match port {
            Some(p) => p,
            None => env::var("FEEDBACK_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|e| FeedbackError::Config(format!("Invalid FEEDBACK_PORT: {}", e)))?,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:feedback.db".to_string());

        let csrf_secret = env::var("CSRF_SECRET")
            .map_err(|_| FeedbackError::Config("CSRF_SECRET not set".to_string()))?;
        if csrf_secret.len() < 16 {
            return Err(FeedbackError::Config(
                "CSRF_SECRET must be at least 16 bytes".to_string(),
            ));
        }

        let csrf_token_ttl_secs = env::var("CSRF_TOKEN_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let admin_token = env::var("ADMIN_TOKEN")
            .map_err(|_| FeedbackError::Config("ADMIN_TOKEN not set".to_string()))?;

        let log_file = env::var("LOG_FILE").ok();

        Ok(Self {
            port,
            database_url,
            csrf_secret,
            csrf_token_ttl_secs,
            admin_token,
            log_file,
        })
    }
}
