//! Encoding Module
//!
//! Turns raw request bytes into text the protocol layer can parse.
//!
//! SKK clients traditionally speak EUC-JP, or its JIS X 0213 extension
//! EUC-JIS-2004 (both supersets of ASCII for the command bytes). Decoding
//! is strict: malformed sequences are reported, never replaced with U+FFFD,
//! so that a garbled key cannot accidentally match a dictionary entry.

mod jisx0213;

use encoding_rs::{EUC_JP, UTF_8};

use crate::config::RequestEncoding;
use crate::error::{Result, SkkError};

pub use jisx0213::decode_euc_jis_2004;

/// Converts a raw request line into canonical text
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: &[u8]) -> Result<String>;
}

/// Strict EUC-JP decoder, accepting the EUC-JIS-2004 kana additions
#[derive(Debug, Default, Clone, Copy)]
pub struct EucJpNormalizer;

impl Normalizer for EucJpNormalizer {
    fn normalize(&self, raw: &[u8]) -> Result<String> {
        decode_euc_jis_2004(raw)
            .ok_or_else(|| SkkError::Decode(format!("invalid EUC-JP sequence in {} bytes", raw.len())))
    }
}

/// Strict UTF-8 decoder
#[derive(Debug, Default, Clone, Copy)]
pub struct Utf8Normalizer;

impl Normalizer for Utf8Normalizer {
    fn normalize(&self, raw: &[u8]) -> Result<String> {
        UTF_8
            .decode_without_bom_handling_and_without_replacement(raw)
            .map(|text| text.into_owned())
            .ok_or_else(|| SkkError::Decode(format!("invalid UTF-8 sequence in {} bytes", raw.len())))
    }
}

/// Pick the normalizer for a configured request encoding
pub fn normalizer_for(encoding: RequestEncoding) -> Box<dyn Normalizer> {
    match encoding {
        RequestEncoding::EucJp => Box::new(EucJpNormalizer),
        RequestEncoding::Utf8 => Box::new(Utf8Normalizer),
    }
}

/// Encode text as EUC-JP, as a legacy client would put it on the wire
///
/// Fails if the text contains characters EUC-JP cannot represent.
pub fn encode_legacy(text: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = EUC_JP.encode(text);
    if had_errors {
        return Err(SkkError::Decode(format!("{:?} is not representable in EUC-JP", text)));
    }
    Ok(bytes.into_owned())
}

/// Decode dictionary file contents: UTF-8 when valid, EUC-JIS-2004 otherwise
///
/// EUC input is decoded line by line; a line that cannot be decoded is
/// skipped with a warning instead of failing the whole source.
pub fn decode_dictionary(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut text = String::with_capacity(bytes.len());
    for (index, line) in bytes.split(|&b| b == b'\n').enumerate() {
        match decode_euc_jis_2004(line) {
            Some(decoded) => {
                text.push_str(&decoded);
                text.push('\n');
            }
            None => tracing::warn!("Skipping undecodable dictionary line {}", index + 1),
        }
    }
    text
}
