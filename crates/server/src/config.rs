//! Server configuration
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config` / `REVKV_CONFIG`)
//! 3. individual flags or their `REVKV_*` environment variables
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! shutdown_timeout_secs = 5
//! log = "info"
//!
//! [store]
//! max_entries = 2
//! page_size = 10
//! ```

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use revkv::StoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default listen address
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;
/// Default time allowed for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;
/// Default log filter
pub const DEFAULT_LOG: &str = "info";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`ServerConfig`]
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that was requested
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
    /// A setting is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to bind; 0 picks a free port
    pub port: u16,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout_secs: u64,
    /// `tracing` filter directive, e.g. `info` or `revkv_server=debug`
    pub log: String,
    /// Store limits
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            log: DEFAULT_LOG.to_owned(),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a TOML file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that every setting can be honored
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Address the listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Drain deadline as a [`Duration`]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Command-line arguments for `revkv-server`
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "revkv-server", version, about = "In-memory key/value store with CAS writes")]
pub struct Args {
    /// TOML configuration file
    #[arg(long, env = "REVKV_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "REVKV_HOST")]
    pub host: Option<IpAddr>,

    /// Port to bind
    #[arg(long, short, env = "REVKV_PORT")]
    pub port: Option<u16>,

    /// Maximum number of distinct keys
    #[arg(long, env = "REVKV_MAX_ENTRIES")]
    pub max_entries: Option<usize>,

    /// Entries per listing page
    #[arg(long, env = "REVKV_PAGE_SIZE")]
    pub page_size: Option<usize>,

    /// Seconds to drain in-flight requests on shutdown
    #[arg(long, env = "REVKV_SHUTDOWN_TIMEOUT_SECS")]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log filter directive
    #[arg(long, env = "REVKV_LOG")]
    pub log: Option<String>,
}

impl Args {
    /// Merge file settings and overrides into a validated config
    pub fn resolve(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = ServerConfig::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite every setting given on the command line
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(max_entries) = self.max_entries {
            config.store.max_entries = max_entries;
        }
        if let Some(page_size) = self.page_size {
            config.store.page_size = page_size;
        }
        if let Some(secs) = self.shutdown_timeout_secs {
            config.shutdown_timeout_secs = secs;
        }
        if let Some(log) = &self.log {
            config.log = log.clone();
        }
    }
}
