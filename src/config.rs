use crate::github::{DEFAULT_API_URL, RepoRef};
use std::net::SocketAddr;
use thiserror::Error;

pub const TOKEN_VAR: &str = "PRIVATE_GITHUB_TOKEN";
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
pub const API_URL_VAR: &str = "GITHUB_API_URL";
pub const ADDR_VAR: &str = "SITE_ADDR";

const DEFAULT_REPOSITORY: &str = "mjovanc/njord";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_REPOSITORY must look like owner/name, got {0:?}")]
    InvalidRepository(String),
    #[error("SITE_ADDR is not a socket address: {0:?}")]
    InvalidAddress(String),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: Option<String>,
    pub repository: RepoRef,
    pub api_url: String,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Blank
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let repository = get(REPOSITORY_VAR).unwrap_or_else(|| DEFAULT_REPOSITORY.to_string());
        let repository =
            RepoRef::parse(&repository).ok_or(ConfigError::InvalidRepository(repository))?;

        let addr = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(addr))?;

        Ok(Self {
            token: get(TOKEN_VAR),
            repository,
            api_url: get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            addr,
        })
    }
}
