//! UTF-8 code point decoding and encoding for grid cells
//!
//! Decoding is deliberately lax: the lead byte alone decides the sequence
//! length and continuation bytes are masked, not validated. A lead byte that
//! is invalid, or whose sequence runs past the end of the input, decodes to
//! U+FFFD and consumes exactly one byte, so decoding always makes progress.

/// Replacement character for undecodable input
pub const REPLACEMENT: char = '\u{FFFD}';

/// Decode one code point starting at byte `index`.
///
/// Returns the decoded character and the number of bytes consumed (1..=4).
/// `index` must be inside `bytes`.
pub fn decode(bytes: &[u8], index: usize) -> (char, usize) {
    let lead = bytes[index];
    let remaining = bytes.len() - index;
    let cont = |offset: usize| u32::from(bytes[index + offset] & 0x3F);

    let (code, len) = if lead < 0x80 {
        (u32::from(lead), 1)
    } else if lead >> 5 == 0x6 && remaining > 1 {
        ((u32::from(lead & 0x1F) << 6) | cont(1), 2)
    } else if lead >> 4 == 0xE && remaining > 2 {
        ((u32::from(lead & 0x0F) << 12) | (cont(1) << 6) | cont(2), 3)
    } else if lead >> 3 == 0x1E && remaining > 3 {
        ((u32::from(lead & 0x07) << 18) | (cont(1) << 12) | (cont(2) << 6) | cont(3), 4)
    } else {
        return (REPLACEMENT, 1);
    };

    (char::from_u32(code).unwrap_or(REPLACEMENT), len)
}

/// Decode a whole byte string into code points.
pub fn decode_all(bytes: &[u8]) -> Vec<char> {
    let mut cells = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        let (ch, advance) = decode(bytes, index);
        cells.push(ch);
        index += advance;
    }
    cells
}

/// Count the code points `decode_all` would produce without allocating them.
pub fn count(bytes: &[u8]) -> usize {
    let mut total = 0;
    let mut index = 0;
    while index < bytes.len() {
        index += decode(bytes, index).1;
        total += 1;
    }
    total
}

/// Encode a single code point as UTF-8 (1 to 4 bytes).
pub fn encode(ch: char) -> String {
    let mut buffer = [0u8; 4];
    ch.encode_utf8(&mut buffer).to_owned()
}
