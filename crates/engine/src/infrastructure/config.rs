//! Engine configuration from environment variables.
//!
//! Supported variables:
//! - `DATABASE_URL`: SQLite connection string
//! - `DATABASE_MAX_CONNECTIONS`: pool size
//! - `SERVER_HOST`, `SERVER_PORT` (falls back to `PORT`)
//! - `CORS_ALLOWED_ORIGINS`: `*` or a comma-separated origin list

use std::path::Path;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:promotions.db?mode=rwc";
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    pub cors_allowed_origins: Option<String>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(val) => match val.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        val = %val,
                        "DATABASE_MAX_CONNECTIONS is not a positive integer, ignoring"
                    );
                    DEFAULT_DATABASE_MAX_CONNECTIONS
                }
            },
            None => DEFAULT_DATABASE_MAX_CONNECTIONS,
        };

        let server_host =
            lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
        let server_port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            database_url,
            database_max_connections,
            server_host,
            server_port,
            cors_allowed_origins,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Load `.env.local` then `.env` from the repo root, if present.
///
/// Variables already set are never overwritten, so local overrides win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
