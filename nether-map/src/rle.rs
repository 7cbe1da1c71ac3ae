//! Run-length codec for string payloads
//!
//! Tile grids and fill strings are dominated by long runs of a single
//! character, so the encoder offers the string as `(count, byte)` pairs and
//! keeps whichever form is smaller. Input is treated as raw bytes: ASCII-range
//! text is the supported domain, multi-byte codepoints are split into their
//! constituent bytes and make RLE strictly worse, never wrong at the byte
//! level.

/// Encode `s` as (count, byte) pairs, two bytes per run, runs capped at 255
pub fn encode(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 2);

    let Some((&first, rest)) = bytes.split_first() else {
        return out;
    };

    let mut current = first;
    let mut count: u8 = 1;
    for &b in rest {
        if b != current || count == u8::MAX {
            out.push(count);
            out.push(current);
            current = b;
            count = 1;
        } else {
            count += 1;
        }
    }
    out.push(count);
    out.push(current);

    out
}

/// Expand an RLE payload back to bytes (test support only)
#[cfg(test)]
pub(crate) fn decode(encoded: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for pair in encoded.chunks_exact(2) {
        out.extend(std::iter::repeat_n(pair[1], pair[0] as usize));
    }
    out
}
