//! Error types for skkserv
//!
//! Provides a unified error type for all operations, plus the
//! classification the dispatcher uses to decide which failures end a
//! connection and which are answered with silence.

use thiserror::Error;

/// Result type alias using SkkError
pub type Result<T> = std::result::Result<T, SkkError>;

/// Unified error type for skkserv operations
#[derive(Debug, Error)]
pub enum SkkError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Dictionary Errors
    // -------------------------------------------------------------------------
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Broad category of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Socket accept/read/write failures
    Transport,

    /// Request bytes that the normalizer rejected
    Decode,

    /// Empty lines, unknown commands, unknown customize subcommands
    Protocol,

    /// Dictionary source or reload failures
    Dictionary,

    /// Invalid configuration
    Config,
}

impl ErrorClass {
    /// Whether a failure of this class is answered with an empty response
    /// while the connection stays open.
    ///
    /// Only transport failures tear a connection down. Dictionary failures
    /// surface during reload, which never answers the client either.
    pub fn is_silent(self) -> bool {
        !matches!(self, ErrorClass::Transport)
    }
}

impl SkkError {
    /// Classify this error
    pub fn class(&self) -> ErrorClass {
        match self {
            SkkError::Io(_) => ErrorClass::Transport,
            SkkError::Decode(_) => ErrorClass::Decode,
            SkkError::Protocol(_) => ErrorClass::Protocol,
            SkkError::Dictionary(_) => ErrorClass::Dictionary,
            SkkError::Config(_) => ErrorClass::Config,
        }
    }

    /// Shorthand for `self.class().is_silent()`
    pub fn is_silent(&self) -> bool {
        self.class().is_silent()
    }
}
