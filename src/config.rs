use crate::constants::{
    DEFAULT_ALLOWED_ORIGIN, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_LISTEN_ADDRESS,
    DEFAULT_LISTEN_PORT, DEFAULT_MAX_BODY_BYTES, DEFAULT_QUIT_TIMEOUT_MILLIS,
    DEFAULT_REPLY_TIMEOUT_SECS,
};
use crate::core_ftpclient::types::FtpTimeouts;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    #[validate(range(min = 1))]
    pub listen_port: u16,
    pub allowed_origin: String,
    #[validate(range(min = 1))]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct FtpClientConfig {
    #[validate(range(min = 1))]
    pub connect_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub reply_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub quit_timeout_millis: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Config {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub ftp: FtpClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from(DEFAULT_LISTEN_ADDRESS),
            listen_port: DEFAULT_LISTEN_PORT,
            allowed_origin: String::from(DEFAULT_ALLOWED_ORIGIN),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for FtpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            reply_timeout_secs: DEFAULT_REPLY_TIMEOUT_SECS,
            quit_timeout_millis: DEFAULT_QUIT_TIMEOUT_MILLIS,
        }
    }
}

impl FtpClientConfig {
    pub fn timeouts(&self) -> FtpTimeouts {
        FtpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            reply: Duration::from_secs(self.reply_timeout_secs),
            quit: Duration::from_millis(self.quit_timeout_millis),
        }
    }
}

impl Config {
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(config_str).context("Failed to parse configuration")?;
        config
            .validate()
            .context("Invalid configuration values")?;
        Ok(config)
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to load configuration file: {}", path))
    }
}
