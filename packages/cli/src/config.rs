// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Database location, bind address and admin token settings

use std::net::{IpAddr, SocketAddr};

use clubdata_config::constants::{
    CLUBDATA_API_HOST, CLUBDATA_API_PORT, CLUBDATA_API_TOKEN, CLUBDATA_DATABASE_URL,
    CLUBDATA_DEV_MODE, DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_DATABASE_URL,
};
use clubdata_config::{env_flag, env_parse, env_string, env_string_or};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub api_token: Option<String>,
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_parse::<u16>(CLUBDATA_API_PORT)
            .map_err(ConfigError::InvalidPort)?
            .unwrap_or(DEFAULT_API_PORT);

        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let host_str = env_string_or(CLUBDATA_API_HOST, DEFAULT_API_HOST);
        let host = host_str
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_str.clone()))?;

        Ok(Config {
            database_url: env_string_or(CLUBDATA_DATABASE_URL, DEFAULT_DATABASE_URL),
            host,
            port,
            api_token: env_string(CLUBDATA_API_TOKEN),
            dev_mode: env_flag(CLUBDATA_DEV_MODE),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
