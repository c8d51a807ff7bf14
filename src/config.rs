use anyhow::Result;
use std::env;

/// `BACKEND_URL` value selecting the in-process backend.
pub const MEMORY_BACKEND: &str = "memory://";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub backend_url: String,
    pub backend_token: Option<String>,
    pub backend_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
    pub cors_origin: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 8080),
            environment: var_or("ENVIRONMENT", "development"),
            backend_url: var_or("BACKEND_URL", "http://localhost:4000/api"),
            backend_token: env::var("BACKEND_TOKEN").ok().filter(|t| !t.is_empty()),
            backend_timeout_secs: parsed_or("BACKEND_TIMEOUT_SECS", 30),
            cache_ttl_secs: parsed_or("CACHE_TTL_SECS", 30),
            cache_capacity: parsed_or("CACHE_CAPACITY", 64),
            cors_origin: var_or("CORS_ORIGIN", "http://localhost:3000"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn uses_memory_backend(&self) -> bool {
        self.backend_url == MEMORY_BACKEND
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
