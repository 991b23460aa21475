//! Dictionary source loading

use std::fs;
use std::path::Path;

use crate::error::{Result, SkkError};

/// Fetches the raw bytes of one dictionary source
pub trait SourceLoader: Send + Sync {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Loads dictionaries from the local filesystem
///
/// Accepts plain paths and `file://` URLs. Remote URLs are refused; fetch
/// them out of band and point the server at the local copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

impl SourceLoader for FileLoader {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Err(SkkError::Dictionary(format!(
                "remote dictionary sources are not supported: {}",
                location
            )));
        }

        let path = location.strip_prefix("file://").unwrap_or(location);
        fs::read(Path::new(path)).map_err(|e| {
            SkkError::Dictionary(format!("failed to read dictionary {}: {}", location, e))
        })
    }
}
