//! Configuration for skkserv
//!
//! Centralized configuration with sensible defaults, and the shared handle
//! the reload path reads dictionary sources from.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Result, SkkError};

/// Main configuration for a skkserv instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address, also reported verbatim by the host command
    pub listen_addr: String,

    /// Max concurrent client connections (0 = unbounded)
    pub max_connections: usize,

    /// Connection read timeout in milliseconds (0 = wait forever)
    pub read_timeout_ms: u64,

    /// Connection write timeout in milliseconds (0 = wait forever)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Dictionary Configuration
    // -------------------------------------------------------------------------
    /// Dictionary source locations, merged in order
    pub dictionaries: Vec<String>,

    // -------------------------------------------------------------------------
    // Encoding Configuration
    // -------------------------------------------------------------------------
    /// Byte encoding clients send requests in
    pub request_encoding: RequestEncoding,
}

/// Encoding of incoming request lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestEncoding {
    /// EUC-JP (plus ASCII), the traditional SKK wire encoding
    #[default]
    EucJp,

    /// UTF-8
    Utf8,
}

impl std::str::FromStr for RequestEncoding {
    type Err = SkkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euc-jp" | "eucjp" | "euc_jp" => Ok(RequestEncoding::EucJp),
            "utf-8" | "utf8" => Ok(RequestEncoding::Utf8),
            other => Err(SkkError::Config(format!("unknown request encoding: {}", other))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:1178".to_string(),
            max_connections: 0,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            dictionaries: Vec::new(),
            request_encoding: RequestEncoding::EucJp,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Append one dictionary source location
    pub fn dictionary(mut self, location: impl Into<String>) -> Self {
        self.config.dictionaries.push(location.into());
        self
    }

    /// Replace the dictionary source list
    pub fn dictionaries<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.dictionaries = locations.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request encoding
    pub fn request_encoding(mut self, encoding: RequestEncoding) -> Self {
        self.config.request_encoding = encoding;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

// =============================================================================
// Configuration Provider
// =============================================================================

/// Source of the current dictionary locations, consulted on every reload
pub trait DictionarySources: Send + Sync {
    fn dictionary_sources(&self) -> Vec<String>;
}

/// Cloneable, process-wide handle to the live configuration
#[derive(Debug, Clone)]
pub struct SharedConfig {
    inner: Arc<RwLock<Config>>,
}

impl SharedConfig {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> Config {
        self.inner.read().clone()
    }

    /// Replace the dictionary list; takes effect on the next reload
    pub fn set_dictionaries(&self, locations: Vec<String>) {
        self.inner.write().dictionaries = locations;
    }
}

impl DictionarySources for SharedConfig {
    fn dictionary_sources(&self) -> Vec<String> {
        self.inner.read().dictionaries.clone()
    }
}
