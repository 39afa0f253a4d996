use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Secret used when SECRET_KEY is unset outside production
const DEVELOPMENT_SECRET: &str = "development-secret-change-me";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string from DB. None selects the in-memory backend.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub auth_scheme: String,
    pub bcrypt_cost: u32,
    pub enable_cors: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SECRET_KEY must be set in {0:?} mode")]
    MissingSecret(Environment),

    #[error("DB must be set in {0:?} mode")]
    MissingDatabase(Environment),

    #[error("bcrypt cost {0} is outside 4..=31")]
    InvalidBcryptCost(u32),

    #[error("invalid auth scheme '{0}'")]
    InvalidAuthScheme(String),
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DB") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // API overrides
        if let Ok(v) = env::var("PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECRET_KEY") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_AUTH_SCHEME") {
            self.security.auth_scheme = v;
        }
        if let Ok(v) = env::var("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    /// Check the settings a server cannot safely start without.
    ///
    /// Outside production an unset secret is replaced by a fixed development
    /// secret, which is logged loudly so it never goes unnoticed.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            if self.environment == Environment::Production {
                return Err(ConfigError::MissingSecret(self.environment));
            }
            tracing::warn!("SECRET_KEY not set; using the development signing secret");
            self.security.jwt_secret = DEVELOPMENT_SECRET.to_string();
        }

        if self.environment == Environment::Production && self.database.url.is_none() {
            return Err(ConfigError::MissingDatabase(self.environment));
        }

        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(self.security.bcrypt_cost));
        }

        let scheme = &self.security.auth_scheme;
        if scheme.is_empty() || scheme.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidAuthScheme(scheme.clone()));
        }

        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            api: ApiConfig {
                port: 8080,
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                auth_scheme: "jwt".to_string(),
                bcrypt_cost: 10,
                enable_cors: true,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            api: ApiConfig {
                port: 8080,
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                auth_scheme: "jwt".to_string(),
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            api: ApiConfig {
                port: 8080,
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                auth_scheme: "jwt".to_string(),
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
            },
        }
    }
}
