use std::net::{IpAddr, SocketAddr};

use doc_store::S3Config;

/// Port the HTTP front end listens on when `MCP_SERVER_PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Address the HTTP front end binds to when `MCP_SERVER_BIND` is unset.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Environment variables that must be present (and non-empty) at startup.
pub const REQUIRED_VARS: [&str; 5] = [
    "S3_ENDPOINT",
    "S3_ACCESS_KEY_ID",
    "S3_SECRET_ACCESS_KEY",
    "S3_BUCKET_NAME",
    "S3_REGION",
];

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Object store connection settings
    pub s3: S3Config,
    /// HTTP listening port
    pub port: u16,
    /// HTTP bind address (IPv4 or IPv6)
    pub bind: IpAddr,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `S3_ENDPOINT`: Endpoint URL of the S3-compatible service
    /// - `S3_ACCESS_KEY_ID` / `S3_SECRET_ACCESS_KEY`: Credentials
    /// - `S3_BUCKET_NAME`: Bucket holding the documents
    /// - `S3_REGION`: Region to sign requests for
    ///
    /// Optional: `MCP_SERVER_PORT` (default 3000), `MCP_SERVER_BIND` (default 0.0.0.0).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let require = |name: &'static str| get(name).ok_or(ConfigError::MissingVar(name));

        let s3 = S3Config {
            endpoint: require("S3_ENDPOINT")?,
            access_key_id: require("S3_ACCESS_KEY_ID")?,
            secret_access_key: require("S3_SECRET_ACCESS_KEY")?,
            bucket_name: require("S3_BUCKET_NAME")?,
            region: require("S3_REGION")?,
        };

        let port = match get("MCP_SERVER_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let raw_bind = get("MCP_SERVER_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = raw_bind
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidBind(raw_bind))?;

        Ok(Self { s3, port, bind })
    }

    /// Address the HTTP front end listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("MCP_SERVER_PORT is not a valid port: {0}")]
    InvalidPort(String),

    #[error("MCP_SERVER_BIND is not a valid IP address: {0}")]
    InvalidBind(String),
}
