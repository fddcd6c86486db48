//! Text decoding for string table payloads
//!
//! Tables are expected to be UTF-8. Older official assets carry Windows-1252
//! text, so bytes that are not valid UTF-8 are decoded as Windows-1252 with
//! U+FFFD for the five undefined code points.

use std::borrow::Cow;

/// Windows-1252 mappings for 0x80..=0x9F; `None` is undefined
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Decode table text, UTF-8 first with a Windows-1252 fallback
///
/// Never fails.
pub fn decode_text(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(_) => decode_cp1252(raw).into_owned(),
    }
}

/// Decode Windows-1252, substituting U+FFFD for undefined bytes
pub fn decode_cp1252(raw: &[u8]) -> Cow<'_, str> {
    if raw.is_ascii() {
        // ASCII is valid UTF-8
        return String::from_utf8_lossy(raw);
    }

    Cow::Owned(
        raw.iter()
            .map(|&b| match b {
                0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)].unwrap_or('\u{FFFD}'),
                _ => char::from(b),
            })
            .collect(),
    )
}
