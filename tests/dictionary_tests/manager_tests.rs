//! Tests for DictManager
//!
//! These tests verify:
//! - Initial load from files (UTF-8 and EUC-JP)
//! - Reload replaces the live set
//! - Failed reloads keep the old set
//! - Readers never observe a partially replaced set

use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use skkserv::dictionary::{DictManager, DictionaryService, FileLoader, SourceLoader};
use skkserv::{Result, SkkError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// In-memory sources, editable between reloads
#[derive(Clone, Default)]
struct MemoryLoader {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryLoader {
    fn put(&self, location: &str, text: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(location.to_string(), text.as_bytes().to_vec());
    }

    fn remove(&self, location: &str) {
        self.files.lock().unwrap().remove(location);
    }
}

impl SourceLoader for MemoryLoader {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(location)
            .cloned()
            .ok_or_else(|| SkkError::Dictionary(format!("no such source: {}", location)))
    }
}

fn sources(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A jisyo where every key maps to the same two tagged candidates
fn tagged_jisyo(tag: &str, keys: usize) -> String {
    (0..keys)
        .map(|i| format!("k{} /{}-a/{}-b/\n", i, tag, tag))
        .collect()
}

// =============================================================================
// Loading Tests
// =============================================================================

#[test]
fn test_open_from_utf8_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("SKK-JISYO.test");
    fs::write(&path, "hoge /候補1/候補2/\n").unwrap();

    let manager =
        DictManager::open(&[path.to_string_lossy().into_owned()], FileLoader).unwrap();

    assert_eq!(
        manager.lookup("hoge"),
        Some(vec!["候補1".to_string(), "候補2".to_string()])
    );
    assert_eq!(manager.lookup("nope"), None);
}

#[test]
fn test_open_from_euc_jp_file_url() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("SKK-JISYO.euc");
    // "かな /仮名/\n" in EUC-JP
    let bytes = [
        0xA4, 0xAB, 0xA4, 0xCA, b' ', b'/', 0xB2, 0xBE, 0xCC, 0xBE, b'/', b'\n',
    ];
    fs::write(&path, bytes).unwrap();

    let location = format!("file://{}", path.display());
    let manager = DictManager::open(&[location], FileLoader).unwrap();

    assert_eq!(manager.lookup("かな"), Some(vec!["仮名".to_string()]));
}

#[test]
fn test_open_euc_jis_2004_file_skips_only_bad_lines() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("SKK-JISYO.2004");
    // "ゔ /ヴ/", an undecodable line, then "か /化/"
    let bytes = [
        0xA4, 0xF4, b' ', b'/', 0xA5, 0xF4, b'/', b'\n',
        0xFF, 0xFE, b' ', b'/', b'x', b'/', b'\n',
        0xA4, 0xAB, b' ', b'/', 0xB2, 0xBD, b'/', b'\n',
    ];
    fs::write(&path, bytes).unwrap();

    let manager =
        DictManager::open(&[path.to_string_lossy().into_owned()], FileLoader).unwrap();

    assert_eq!(manager.lookup("ゔ"), Some(vec!["ヴ".to_string()]));
    assert_eq!(manager.lookup("か"), Some(vec!["化".to_string()]));
    assert_eq!(manager.snapshot().len(), 2);
}

#[test]
fn test_open_missing_file_fails() {
    let result = DictManager::open(&sources(&["/definitely/not/here.jisyo"]), FileLoader);
    assert!(matches!(result, Err(SkkError::Dictionary(_))));
}

#[test]
fn test_remote_sources_are_rejected() {
    let err = FileLoader.fetch("https://example.com/SKK-JISYO.L").unwrap_err();
    assert!(matches!(err, SkkError::Dictionary(_)));
}

#[test]
fn test_sources_merge_in_order() {
    let loader = MemoryLoader::default();
    loader.put("a", "かんじ /漢字/\n");
    loader.put("b", "かんじ /幹事/漢字/\nき /木/\n");

    let manager = DictManager::open(&sources(&["a", "b"]), loader).unwrap();

    assert_eq!(
        manager.lookup("かんじ"),
        Some(vec!["漢字".to_string(), "幹事".to_string()])
    );
    assert_eq!(manager.lookup("き"), Some(vec!["木".to_string()]));
}

#[test]
fn test_complete_through_service() {
    let loader = MemoryLoader::default();
    loader.put("a", "かな /仮名/\nかんじ /漢字/\n");
    let manager = DictManager::open(&sources(&["a"]), loader).unwrap();

    assert_eq!(
        manager.complete("か"),
        Some(vec!["かな".to_string(), "かんじ".to_string()])
    );
    assert_eq!(manager.complete("き"), None);
}

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_reload_replaces_live_set() {
    let loader = MemoryLoader::default();
    loader.put("a", "hoge /old/\n");
    let manager = DictManager::open(&sources(&["a"]), loader.clone()).unwrap();
    assert_eq!(manager.generation(), 0);

    loader.put("a", "hoge /new/\nfuga /added/\n");
    manager.reload(&sources(&["a"])).unwrap();

    assert_eq!(manager.lookup("hoge"), Some(vec!["new".to_string()]));
    assert_eq!(manager.lookup("fuga"), Some(vec!["added".to_string()]));
    assert_eq!(manager.generation(), 1);
}

#[test]
fn test_reload_with_new_source_list() {
    let loader = MemoryLoader::default();
    loader.put("a", "hoge /a/\n");
    loader.put("b", "piyo /b/\n");
    let manager = DictManager::open(&sources(&["a"]), loader).unwrap();

    manager.reload(&sources(&["b"])).unwrap();

    assert_eq!(manager.lookup("hoge"), None);
    assert_eq!(manager.lookup("piyo"), Some(vec!["b".to_string()]));
}

#[test]
fn test_failed_reload_keeps_old_set() {
    let loader = MemoryLoader::default();
    loader.put("a", "hoge /old/\n");
    loader.put("b", "fuga /old/\n");
    let manager = DictManager::open(&sources(&["a", "b"]), loader.clone()).unwrap();

    // First source changes, second becomes unreachable
    loader.put("a", "hoge /new/\n");
    loader.remove("b");

    assert!(manager.reload(&sources(&["a", "b"])).is_err());
    assert_eq!(manager.lookup("hoge"), Some(vec!["old".to_string()]));
    assert_eq!(manager.lookup("fuga"), Some(vec!["old".to_string()]));
    assert_eq!(manager.generation(), 0);
}

#[test]
fn test_snapshot_survives_reload() {
    let loader = MemoryLoader::default();
    loader.put("a", "hoge /old/\n");
    let manager = DictManager::open(&sources(&["a"]), loader.clone()).unwrap();

    let before = manager.snapshot();
    loader.put("a", "hoge /new/\n");
    manager.reload(&sources(&["a"])).unwrap();

    assert_eq!(before.lookup("hoge").unwrap(), &["old".to_string()][..]);
    assert_eq!(manager.snapshot().lookup("hoge").unwrap(), &["new".to_string()][..]);
}

// =============================================================================
// Concurrent Access Tests
// =============================================================================

#[test]
fn test_concurrent_lookups_during_reload_never_tear() {
    const KEYS: usize = 200;

    let loader = MemoryLoader::default();
    loader.put("a", &tagged_jisyo("old", KEYS));
    let manager = Arc::new(DictManager::open(&sources(&["a"]), loader.clone()).unwrap());
    let done = Arc::new(AtomicBool::new(false));

    // Readers: every lookup sees one tag for both candidates, and every
    // snapshot sees one tag across all keys
    let mut handles = vec![];
    for _ in 0..4 {
        let manager = Arc::clone(&manager);
        let done = Arc::clone(&done);
        handles.push(thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                for i in 0..KEYS {
                    let candidates = manager.lookup(&format!("k{}", i)).unwrap();
                    assert_eq!(candidates.len(), 2);
                    let tag = candidates[0].trim_end_matches("-a");
                    assert_eq!(candidates[1], format!("{}-b", tag));
                }

                let snapshot = manager.snapshot();
                let tag = snapshot.lookup("k0").unwrap()[0].clone();
                for i in 0..KEYS {
                    assert_eq!(snapshot.lookup(&format!("k{}", i)).unwrap()[0], tag);
                }
            }
        }));
    }

    // Writer: alternate between two full data sets
    for round in 0..20 {
        let tag = if round % 2 == 0 { "new" } else { "old" };
        loader.put("a", &tagged_jisyo(tag, KEYS));
        manager.reload(&sources(&["a"])).unwrap();
    }
    done.store(true, Ordering::Relaxed);

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(manager.generation(), 20);
}
