//! Dictionary Manager
//!
//! Owns the live dictionary snapshot and rebuilds it on reload.
//!
//! ## Responsibilities
//! - Serve lookups/completions from the current snapshot
//! - Build a replacement snapshot from the configured sources
//! - Swap snapshots atomically, keeping the old one on failure

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::encoding::decode_dictionary;
use crate::error::Result;

use super::{parse_jisyo, DictionaryService, DictionarySet, SourceLoader};

/// Reloadable dictionary service
///
/// ## Concurrency:
/// - `live`: RwLock held only long enough to clone or replace the `Arc`;
///   searches run on the cloned snapshot with no lock held
/// - `reload_lock`: serializes reloads so two rebuilds never race to swap
/// - `generation`: bumped after each successful swap (lock-free)
pub struct DictManager {
    /// Currently served data set
    live: RwLock<Arc<DictionarySet>>,

    /// Fetches source bytes for (re)builds
    loader: Box<dyn SourceLoader>,

    /// Serializes reload operations
    reload_lock: Mutex<()>,

    /// Number of successful swaps since construction
    generation: AtomicU64,
}

impl DictManager {
    /// Build the initial data set from `sources`
    pub fn open(sources: &[String], loader: impl SourceLoader + 'static) -> Result<Self> {
        let manager = Self::with_set(DictionarySet::new(), loader);
        let set = manager.build(sources)?;
        *manager.live.write() = Arc::new(set);
        Ok(manager)
    }

    /// Serve a prebuilt data set
    pub fn with_set(set: DictionarySet, loader: impl SourceLoader + 'static) -> Self {
        Self {
            live: RwLock::new(Arc::new(set)),
            loader: Box::new(loader),
            reload_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Capture the current snapshot
    ///
    /// The returned set stays valid and unchanged even if a reload swaps
    /// in a new one afterwards.
    pub fn snapshot(&self) -> Arc<DictionarySet> {
        Arc::clone(&*self.live.read())
    }

    /// Number of successful reloads
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Build a complete set from sources, without touching the live one
    fn build(&self, sources: &[String]) -> Result<DictionarySet> {
        let mut set = DictionarySet::new();

        for source in sources {
            let bytes = self.loader.fetch(source)?;
            let text = decode_dictionary(&bytes);
            let entries = parse_jisyo(&text);
            tracing::debug!("Loaded {} entries from {}", entries.len(), source);
            set.merge(entries);
        }

        Ok(set)
    }
}

impl DictionaryService for DictManager {
    fn lookup(&self, key: &str) -> Option<Vec<String>> {
        let snapshot = self.snapshot();
        snapshot.lookup(key).map(<[String]>::to_vec)
    }

    fn complete(&self, prefix: &str) -> Option<Vec<String>> {
        let snapshot = self.snapshot();
        let keys = snapshot.complete(prefix);
        if keys.is_empty() {
            None
        } else {
            Some(keys)
        }
    }

    fn reload(&self, sources: &[String]) -> Result<()> {
        let _reload_guard = self.reload_lock.lock();

        let set = match self.build(sources) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!("Reload aborted, keeping current dictionary: {}", e);
                return Err(e);
            }
        };

        let key_count = set.len();
        *self.live.write() = Arc::new(set);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        tracing::info!(
            "Dictionary reloaded from {} source(s): {} keys, generation {}",
            sources.len(),
            key_count,
            generation
        );
        Ok(())
    }
}
