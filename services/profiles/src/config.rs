use serde::Deserialize;

use tavola_core::config::Config;

/// Profiles service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ProfilesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Shared key required on the internal surface. Env var: `SERVICE_KEY`.
    pub service_key: String,
    /// TCP port to listen on (default 3120). Env var: `PROFILES_PORT`.
    #[serde(default = "default_port")]
    pub profiles_port: u16,
}

fn default_port() -> u16 {
    3120
}

impl Config for ProfilesConfig {}
