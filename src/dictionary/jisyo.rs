//! SKK jisyo line reader
//!
//! Only the plain `key /cand1/cand2/.../` shape is understood. Okuri-ari
//! and okuri-nasi sections are not distinguished; every entry lands in the
//! same map.

/// One parsed dictionary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JisyoEntry {
    pub key: String,
    pub candidates: Vec<String>,
}

/// Parse jisyo text into entries, skipping comments and malformed lines
pub fn parse_jisyo(text: &str) -> Vec<JisyoEntry> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<JisyoEntry> {
    let line = line.trim_end_matches('\r');
    if line.is_empty() || line.starts_with(';') {
        return None;
    }

    let (key, rest) = line.split_once(' ')?;
    let rest = rest.trim_start();
    if key.is_empty() || !rest.starts_with('/') {
        tracing::trace!("Skipping malformed jisyo line: {}", line);
        return None;
    }

    let candidates: Vec<String> = rest
        .split('/')
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if candidates.is_empty() {
        return None;
    }

    Some(JisyoEntry {
        key: key.to_string(),
        candidates,
    })
}
