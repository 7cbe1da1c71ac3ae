//! Two-pass tree encoder
//!
//! Pass 1 ([`collect_strings`]) walks the tree read-only and fills the
//! [`StringTable`] in canonical pre-order. Pass 2 ([`encode_element`]) walks
//! the same tree again and emits bytes, resolving every name, key, and string
//! value against the table built in pass 1. Both passes share one table, so
//! the indices written are the indices assigned.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::element::{AttributeValue, Element};
use crate::error::MapError;
use crate::strings::StringTable;
use crate::writer::MapWriter;
use crate::{
    INNER_TEXT_KEY, MAP_HEADER, MAX_DEPTH, MAX_RLE_LEN, TAG_BOOL, TAG_F32, TAG_I16, TAG_I32,
    TAG_STR_INDEXED, TAG_STR_RAW, TAG_STR_RLE, TAG_U8, rle,
};

/// Encode a map tree to `writer`
///
/// Writes the fixed header, the caller-supplied package name, the string
/// table, and the recursively encoded root element, then flushes. A failure
/// partway through leaves a partial artifact; the caller owns discarding it.
pub fn encode_map<W: Write>(root: &Element, package: &str, writer: W) -> Result<(), MapError> {
    let mut table = StringTable::new();
    collect_strings(root, &mut table, 0)?;
    tracing::debug!(strings = table.len(), "string table built");

    let mut w = MapWriter::new(writer);
    w.write_string(MAP_HEADER)?;
    w.write_string(package)?;
    table.serialize(&mut w)?;
    encode_element(root, &table, &mut w, 0)?;
    w.flush()
}

/// Encode a map tree into a fresh byte vector
pub fn encode_map_to_vec(root: &Element, package: &str) -> Result<Vec<u8>, MapError> {
    let mut buf = Vec::with_capacity(4096);
    encode_map(root, package, &mut buf)?;
    tracing::debug!(bytes = buf.len(), "map encoded");
    Ok(buf)
}

/// Encode a map tree to a file at `path`
///
/// The file is created inside this call and closed on every exit path. On
/// error the partially written file is left on disk for the caller to remove.
pub fn encode_map_to_file(
    root: &Element,
    package: &str,
    path: impl AsRef<Path>,
) -> Result<(), MapError> {
    let file = File::create(path)?;
    encode_map(root, package, BufWriter::new(file))
}

/// Pass 1: register names, keys, and string values in pre-order
///
/// Per element: the name, then each attribute's key followed by its value if
/// the value is a string, then the inner-text sentinel key (the body itself
/// is never registered), then the children. This order is the canonical table
/// order; interoperable output depends on reproducing it exactly.
pub(crate) fn collect_strings(
    element: &Element,
    table: &mut StringTable,
    depth: usize,
) -> Result<(), MapError> {
    if depth > MAX_DEPTH {
        return Err(MapError::TooDeep(depth));
    }

    table.register(&element.name)?;

    for (key, value) in &element.attributes {
        table.register(key)?;
        if let AttributeValue::Str(s) = value {
            table.register(s)?;
        }
    }
    if element.inner_text.is_some() {
        table.register(INNER_TEXT_KEY)?;
    }

    for child in &element.children {
        collect_strings(child, table, depth + 1)?;
    }
    Ok(())
}

/// Pass 2: emit one element and recurse into its children
pub(crate) fn encode_element<W: Write>(
    element: &Element,
    table: &StringTable,
    w: &mut MapWriter<W>,
    depth: usize,
) -> Result<(), MapError> {
    if depth > MAX_DEPTH {
        return Err(MapError::TooDeep(depth));
    }

    w.write_u16(resolve_index(table, &element.name, "element name"))?;

    let attr_count = element.wire_attr_count();
    if attr_count > u8::MAX as usize {
        return Err(MapError::TooManyAttributes {
            element: element.name.clone(),
            count: attr_count,
        });
    }
    w.write_u8(attr_count as u8)?;

    for (key, value) in &element.attributes {
        w.write_u16(resolve_index(table, key, "attribute key"))?;
        encode_value(value, table, w)?;
    }
    if let Some(text) = &element.inner_text {
        w.write_u16(resolve_index(table, INNER_TEXT_KEY, "attribute key"))?;
        encode_string(text, table, w)?;
    }

    let child_count = element.children.len();
    if child_count > u16::MAX as usize {
        return Err(MapError::TooManyChildren {
            element: element.name.clone(),
            count: child_count,
        });
    }
    w.write_u16(child_count as u16)?;

    for child in &element.children {
        encode_element(child, table, w, depth + 1)?;
    }
    Ok(())
}

/// Resolve a name/key index, degrading to 0 on a miss
///
/// A miss cannot happen for a table built from the same tree, but the wire
/// format's legacy behavior is index 0 rather than failure, so we keep that
/// and log it. See the lookup-miss note in the crate docs.
fn resolve_index(table: &StringTable, s: &str, what: &str) -> u16 {
    match table.index_of(s) {
        Some(idx) => idx,
        None => {
            tracing::warn!(string = %s, what, "string missing from table, writing index 0");
            0
        }
    }
}

/// Emit one tagged attribute value
///
/// Booleans must be matched before the integer narrowing: 0/1 fit every
/// integer range but carry a different tag.
pub(crate) fn encode_value<W: Write>(
    value: &AttributeValue,
    table: &StringTable,
    w: &mut MapWriter<W>,
) -> Result<(), MapError> {
    match value {
        AttributeValue::Bool(b) => {
            w.write_u8(TAG_BOOL)?;
            w.write_u8(u8::from(*b))
        }
        AttributeValue::Int(v) => match *v {
            0..=255 => {
                w.write_u8(TAG_U8)?;
                w.write_u8(*v as u8)
            }
            -32768..=32767 => {
                w.write_u8(TAG_I16)?;
                w.write_i16(*v as i16)
            }
            _ => {
                let narrowed = i32::try_from(*v).map_err(|_| MapError::IntOutOfRange(*v))?;
                w.write_u8(TAG_I32)?;
                w.write_i32(narrowed)
            }
        },
        AttributeValue::Float(f) => {
            w.write_u8(TAG_F32)?;
            w.write_f32(*f)
        }
        AttributeValue::Str(s) => encode_string(s, table, w),
    }
}

/// Emit a string value: table index when registered, otherwise whichever of
/// raw and RLE is smaller
fn encode_string<W: Write>(
    s: &str,
    table: &StringTable,
    w: &mut MapWriter<W>,
) -> Result<(), MapError> {
    if let Some(idx) = table.index_of(s) {
        w.write_u8(TAG_STR_INDEXED)?;
        return w.write_u16(idx);
    }

    let encoded = rle::encode(s);
    if encoded.len() < s.len() && encoded.len() <= MAX_RLE_LEN {
        w.write_u8(TAG_STR_RLE)?;
        w.write_u16(encoded.len() as u16)?;
        w.write_bytes(&encoded)
    } else {
        w.write_u8(TAG_STR_RAW)?;
        w.write_string(s)
    }
}
