//! EUC-JIS-2004 decoding
//!
//! `encoding_rs` covers EUC-JP (JIS X 0208 + JIS X 0212). EUC-JIS-2004
//! reuses the same byte layout and fills code points JIS X 0208 leaves
//! empty with JIS X 0213 plane 1 characters. Sequences `encoding_rs`
//! rejects are looked up in the supplement table below, which carries the
//! kana additions of rows 4 and 5 (the ones SKK dictionaries use for
//! readings such as ゔ and semi-voiced か゚).

use encoding_rs::EUC_JP;

/// JIS X 0213 plane 1 additions in EUC byte form
const SUPPLEMENT: &[([u8; 2], &str)] = &[
    // Row 4: hiragana
    ([0xA4, 0xF4], "\u{3094}"),         // ゔ
    ([0xA4, 0xF5], "\u{3095}"),         // ゕ
    ([0xA4, 0xF6], "\u{3096}"),         // ゖ
    ([0xA4, 0xF7], "\u{304B}\u{309A}"), // か゚
    ([0xA4, 0xF8], "\u{304D}\u{309A}"), // き゚
    ([0xA4, 0xF9], "\u{304F}\u{309A}"), // く゚
    ([0xA4, 0xFA], "\u{3051}\u{309A}"), // け゚
    ([0xA4, 0xFB], "\u{3053}\u{309A}"), // こ゚
    // Row 5: katakana
    ([0xA5, 0xF7], "\u{30AB}\u{309A}"), // カ゚
    ([0xA5, 0xF8], "\u{30AD}\u{309A}"), // キ゚
    ([0xA5, 0xF9], "\u{30AF}\u{309A}"), // ク゚
    ([0xA5, 0xFA], "\u{30B1}\u{309A}"), // ケ゚
    ([0xA5, 0xFB], "\u{30B3}\u{309A}"), // コ゚
    ([0xA5, 0xFC], "\u{30BB}\u{309A}"), // セ゚
    ([0xA5, 0xFD], "\u{30C4}\u{309A}"), // ツ゚
    ([0xA5, 0xFE], "\u{30C8}\u{309A}"), // ト゚
];

fn supplement(pair: [u8; 2]) -> Option<&'static str> {
    SUPPLEMENT
        .iter()
        .find(|(bytes, _)| *bytes == pair)
        .map(|(_, text)| *text)
}

/// Strictly decode EUC-JIS-2004 bytes, `None` on any unmappable sequence
pub fn decode_euc_jis_2004(bytes: &[u8]) -> Option<String> {
    if let Some(text) = EUC_JP.decode_without_bom_handling_and_without_replacement(bytes) {
        return Some(text.into_owned());
    }

    // Slow path: one character at a time
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    while let Some(&lead) = rest.first() {
        let width = match lead {
            0x00..=0x7F => 1,
            0x8F => 3,
            0x8E | 0xA1..=0xFE => 2,
            _ => return None,
        };
        if rest.len() < width {
            return None;
        }
        let (unit, tail) = rest.split_at(width);

        if width == 2 {
            if let Some(text) = supplement([unit[0], unit[1]]) {
                out.push_str(text);
                rest = tail;
                continue;
            }
        }

        let text = EUC_JP.decode_without_bom_handling_and_without_replacement(unit)?;
        out.push_str(&text);
        rest = tail;
    }

    Some(out)
}
