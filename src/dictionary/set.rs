//! Immutable dictionary snapshot

use std::collections::BTreeMap;
use std::ops::Bound;

use super::JisyoEntry;

/// One complete, immutable dictionary data set
///
/// Keys are kept ordered so completion is a range scan.
#[derive(Debug, Default, Clone)]
pub struct DictionarySet {
    entries: BTreeMap<String, Vec<String>>,
}

impl DictionarySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from entries, merging duplicates in order
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = JisyoEntry>,
    {
        let mut set = Self::new();
        set.merge(entries);
        set
    }

    /// Merge entries into this set
    ///
    /// A key seen again only contributes candidates not already present,
    /// appended after the existing ones.
    pub fn merge<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = JisyoEntry>,
    {
        for entry in entries {
            let existing = self.entries.entry(entry.key).or_default();
            for candidate in entry.candidates {
                if !existing.contains(&candidate) {
                    existing.push(candidate);
                }
            }
        }
    }

    /// Exact lookup
    pub fn lookup(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// All keys starting with `prefix`, in key order
    ///
    /// An empty prefix matches nothing rather than the whole dictionary.
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }

        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
