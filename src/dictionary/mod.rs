//! Dictionary Module
//!
//! Candidate storage behind the lookup and completion commands.
//!
//! ## Responsibilities
//! - Answer exact lookups and prefix completions
//! - Rebuild the data set from its sources on demand (hot reload)
//! - Never expose a half-built data set to concurrent readers
//!
//! ## Snapshot Model
//! ```text
//!   readers ──clone Arc──▶ ┌───────────────────┐
//!                          │ RwLock<Arc<Set>>  │ ◀──swap── reload
//!                          └───────────────────┘     (builds new Set
//!                                                      outside the lock)
//! ```

mod jisyo;
mod loader;
mod manager;
mod set;

pub use jisyo::{parse_jisyo, JisyoEntry};
pub use loader::{FileLoader, SourceLoader};
pub use manager::DictManager;
pub use set::DictionarySet;

use crate::error::Result;

/// Dictionary operations consumed by the dispatcher
pub trait DictionaryService: Send + Sync {
    /// Candidates for `key`, in dictionary order, or `None` if unknown
    fn lookup(&self, key: &str) -> Option<Vec<String>>;

    /// Keys beginning with `prefix`, in key order, or `None` if none match
    fn complete(&self, prefix: &str) -> Option<Vec<String>>;

    /// Replace the live data set with one built from `sources`
    ///
    /// On failure the previously-live set keeps serving.
    fn reload(&self, sources: &[String]) -> Result<()>;
}
