use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Externally reachable base URL of the REST mount point, used by the
    /// REST adapter to build `links.self` values in responses.
    pub rest_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// When false the scoped handle applies no access rules at all
    /// (every caller, anonymous included, can read and write).
    pub enforce: bool,
    /// Column stamped with the caller id on create and used to restrict
    /// update/delete to the owning caller. None disables row ownership.
    pub owner_column: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(v) = env::var("DATAGATE_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("DATAGATE_REST_BASE_URL") {
            self.server.rest_base_url = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs = v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging = v.parse().unwrap_or(self.database.enable_query_logging);
        }

        // Policy overrides
        if let Ok(v) = env::var("DATAGATE_POLICY_ENFORCE") {
            self.policy.enforce = v.parse().unwrap_or(self.policy.enforce);
        }
        if let Ok(v) = env::var("DATAGATE_OWNER_COLUMN") {
            self.policy.owner_column = if v.trim().is_empty() { None } else { Some(v) };
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                rest_base_url: "http://localhost:3000/api/rest".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 10,
                acquire_timeout_secs: 30,
                enable_query_logging: true,
            },
            policy: PolicyConfig { enforce: true, owner_column: None },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                rest_base_url: "https://staging.example.com/api/rest".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 10,
                enable_query_logging: true,
            },
            policy: PolicyConfig { enforce: true, owner_column: None },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                rest_base_url: "https://app.example.com/api/rest".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 50,
                acquire_timeout_secs: 5,
                enable_query_logging: false,
            },
            policy: PolicyConfig { enforce: true, owner_column: None },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
