// config/mod.rs - process-wide settings
//
// A preset is chosen by APP_ENV, then individual values are overridden from
// the environment. The result is built once and shared through `config()`.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub filter: FilterConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Unrecognized or missing names fall back to development
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            Some("test") => Environment::Test,
            _ => Environment::Development,
        }
    }
}

/// Clause compiler diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    pub enable_query_logging: bool,
    /// Swapped into the DATABASE_URL path when set
    pub database_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    /// HS256 signing key; empty means every token is refused
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = Environment::from_name(env::var("APP_ENV").ok().as_deref());
        Self::preset(environment).with_env_overrides()
    }

    pub fn preset(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::development(),
            Environment::Test => Self::test(),
            Environment::Staging => Self::staging(),
            Environment::Production => Self::production(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        override_from_env(&mut self.filter.debug_logging, "FILTER_DEBUG_LOGGING");

        override_from_env(&mut self.database.max_connections, "DATABASE_MAX_CONNECTIONS");
        override_from_env(&mut self.database.connection_timeout, "DATABASE_CONNECTION_TIMEOUT");
        override_from_env(&mut self.database.enable_query_logging, "DATABASE_ENABLE_QUERY_LOGGING");
        if let Ok(name) = env::var("DATABASE_NAME") {
            self.database.database_name = Some(name);
        }

        override_from_env(&mut self.api.host, "HOST");
        override_from_env(&mut self.api.port, "PORT");
        override_from_env(&mut self.api.enable_request_logging, "API_ENABLE_REQUEST_LOGGING");
        override_from_env(&mut self.api.max_request_size_bytes, "API_MAX_REQUEST_SIZE_BYTES");

        override_from_env(&mut self.security.enable_cors, "SECURITY_ENABLE_CORS");
        if let Ok(origins) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_origins(&origins);
        }
        override_from_env(&mut self.security.jwt_secret, "SECRET_KEY");
        override_from_env(&mut self.security.jwt_expiry_hours, "SECURITY_JWT_EXPIRY_HOURS");

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            filter: FilterConfig { debug_logging: true },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
                enable_query_logging: true,
                database_name: None,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: split_origins("http://localhost:3000,http://localhost:5173"),
                jwt_secret: "secret-dev".to_string(),
                jwt_expiry_hours: 24 * 7,
            },
        }
    }

    fn test() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Test;
        config.filter.debug_logging = false;
        config.database.max_connections = 5;
        config.database.enable_query_logging = false;
        config.database.database_name = Some("jobly_test".to_string());
        config.api.enable_request_logging = false;
        config
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.filter.debug_logging = false;
        config.database.max_connections = 20;
        config.database.connection_timeout = 10;
        config.api.host = "0.0.0.0".to_string();
        config.api.max_request_size_bytes = 512 * 1024;
        config.security.cors_origins = split_origins("https://staging.example.com");
        config.security.jwt_secret = String::new();
        config.security.jwt_expiry_hours = 24;
        config
    }

    fn production() -> Self {
        let mut config = Self::staging();
        config.environment = Environment::Production;
        config.database.max_connections = 50;
        config.database.connection_timeout = 5;
        config.database.enable_query_logging = false;
        config.api.enable_request_logging = false;
        config.api.max_request_size_bytes = 256 * 1024;
        config.security.cors_origins = split_origins("https://app.example.com");
        config.security.jwt_expiry_hours = 4;
        config
    }
}

/// Replace `target` with the parsed value of `key`; unparsable values are ignored
fn override_from_env<T: FromStr>(target: &mut T, key: &str) {
    if let Ok(raw) = env::var(key) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => tracing::warn!("Ignoring unparsable {}={:?}", key, raw),
        }
    }
}

fn split_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_is_usable_without_env() {
        let config = AppConfig::preset(Environment::Development);
        assert!(config.filter.debug_logging);
        assert_eq!(config.api.port, 3001);
        assert!(!config.security.jwt_secret.is_empty());
        assert!(config.database.database_name.is_none());
    }

    #[test]
    fn test_preset_uses_test_database() {
        let config = AppConfig::preset(Environment::Test);
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.database.database_name.as_deref(), Some("jobly_test"));
        assert!(!config.filter.debug_logging);
    }

    #[test]
    fn production_needs_a_secret() {
        let config = AppConfig::preset(Environment::Production);
        assert!(config.security.jwt_secret.is_empty());
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.security.jwt_expiry_hours, 4);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_name(Some("prod")), Environment::Production);
        assert_eq!(Environment::from_name(Some("stage")), Environment::Staging);
        assert_eq!(Environment::from_name(Some("test")), Environment::Test);
        assert_eq!(Environment::from_name(Some("nonsense")), Environment::Development);
        assert_eq!(Environment::from_name(None), Environment::Development);
    }

    #[test]
    fn origins_are_trimmed() {
        assert_eq!(
            split_origins(" http://a.example , http://b.example,"),
            vec!["http://a.example".to_string(), "http://b.example".to_string()]
        );
    }
}
