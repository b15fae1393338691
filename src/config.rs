use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::{env, net::SocketAddr, time::Duration};

pub const MAINNET_NODE_URL: &str = "https://fullnode.mainnet.aptoslabs.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub node_url: String, // Aptos REST base url, including /v1
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_url: MAINNET_NODE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            static_dir: "static".to_string(),
            request_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok(); // Load from .env file when present

        let defaults = Config::default();

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("Invalid BIND_ADDR: {}", addr))?,
            Err(_) => defaults.bind_addr,
        };

        let config = Config {
            node_url: env::var("APTOS_NODE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.node_url),
            bind_addr,
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| secs.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
