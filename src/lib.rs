//! # skkserv
//!
//! An SKK dictionary server speaking the classic skkserv TCP protocol:
//! - Line-oriented requests in EUC-JP (or UTF-8)
//! - Exact lookup and prefix completion
//! - Hot dictionary reload that never disturbs in-flight queries
//! - One thread per client connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │              (one thread per connection)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ raw request line
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Dispatcher                               │
//! │        normalize → parse → route → encode reply              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │ DictManager │◀─reload──│ SharedConfig │
//!   │ (snapshot)  │          │  (sources)   │
//!   └─────────────┘          └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod encoding;
pub mod dictionary;
pub mod protocol;
pub mod network;
pub mod dispatcher;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorClass, Result, SkkError};
pub use config::{Config, SharedConfig};
pub use dispatcher::Dispatcher;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of skkserv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifier returned by the version command
pub fn version_string() -> String {
    format!("{}-{}", env!("CARGO_PKG_NAME"), VERSION)
}
