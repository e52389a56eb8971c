// src/config.rs

use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    // Server Config
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    // Single allow-origin for the local dashboard frontend.
    #[serde(default = "default_cors_allow_origin")]
    pub cors_allow_origin: String,

    // When set, every demo-data generator is seeded with this value so
    // responses are reproducible across requests (used by the test suite).
    #[serde(default)]
    pub demo_seed: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_allow_origin() -> String {
    "http://localhost:3000".to_string()
}

impl Config {
    /// Load config from environment variables using envy.
    pub fn load() -> Result<Self, anyhow::Error> {
        envy::from_env::<Self>().map_err(anyhow::Error::from)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
