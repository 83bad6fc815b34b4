use anyhow::{Context, Result};
use movie_search::ClientConfig;
use std::env;
use std::net::SocketAddr;

pub const BIND_ADDR_VAR: &str = "UI_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub client: ClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let client = ClientConfig::from_env()?;

        let bind_addr = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("{} is not a socket address: {}", BIND_ADDR_VAR, bind_addr))?;

        Ok(Self { bind_addr, client })
    }
}
