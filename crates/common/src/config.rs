//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. The resulting struct is
//! built once at process start and passed by reference to every
//! component that needs it; there is no ambient global.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Session token signing
    pub jwt_secret: String,
    pub token_expiry_minutes: i64,

    /// Bootstrap admin account, auto-registered on first login
    /// against an empty users table
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,

    /// Frontend origin allowed by CORS
    pub frontend_url: Option<String>,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            token_expiry_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),

            admin_email: env::var("ADMIN_EMAIL")
                .map_err(|_| anyhow::anyhow!("ADMIN_EMAIL is required"))?,
            admin_password: env::var("ADMIN_PASSWORD")
                .map_err(|_| anyhow::anyhow!("ADMIN_PASSWORD is required"))?,
            admin_name: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),

            frontend_url: env::var("FRONTEND_URL").ok(),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "clubhub=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires .env file with all config vars - run locally only
    fn test_config_from_env_loads_successfully() {
        let result = Config::from_env();
        assert!(
            result.is_ok(),
            "Config should load successfully in development environment: {}",
            result
                .err()
                .map_or("Unknown error".to_string(), |e| e.to_string())
        );

        let config = result.unwrap();
        assert!(
            !config.database_url.is_empty(),
            "DATABASE_URL should be populated"
        );
        assert!(
            !config.jwt_secret.is_empty(),
            "JWT_SECRET should be populated"
        );
        assert!(config.port > 0, "PORT should be a valid port number");
    }
}
