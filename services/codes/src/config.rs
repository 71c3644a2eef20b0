use std::time::Duration;

use serde::Deserialize;

use scanpass_core::config::Config;

/// Codes service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct CodesConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port to listen on (default 3120). Env var: `CODES_PORT`.
    #[serde(default = "default_codes_port")]
    pub codes_port: u16,
    /// Public origin that scan links are built on (e.g. "https://scan.example.com").
    /// Env var: `PUBLIC_BASE_URL`.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Upper bound for any single storage call, in milliseconds (default 3000).
    /// Env var: `STORAGE_TIMEOUT_MS`.
    #[serde(default = "default_storage_timeout_ms")]
    pub storage_timeout_ms: u64,
    /// Connection pool size (default 10). Env var: `DB_MAX_CONNECTIONS`.
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
}

fn default_codes_port() -> u16 {
    3120
}

fn default_public_base_url() -> String {
    "http://localhost:3120".to_owned()
}

fn default_storage_timeout_ms() -> u64 {
    3000
}

fn default_db_max_connections() -> u32 {
    10
}

impl Config for CodesConfig {}

impl CodesConfig {
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}
