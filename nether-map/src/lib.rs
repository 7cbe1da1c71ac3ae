//! Nether-Map: binary map encoder for Celeste-compatible element trees
//!
//! This crate serializes an in-memory tree of named elements (attributes,
//! children, optional inner text) into the compact binary map format used by
//! Celeste. It is a **pure encoder** - tree construction is the caller's job
//! (level tooling, procedural generators, converters), and no decoder for the
//! full format is provided.
//!
//! # Key Features
//!
//! - **Deduplicated string table**: every element name, attribute key, and
//!   string attribute value is stored once and referenced by a `u16` index
//! - **Type-narrowed values**: integers are written as the smallest of
//!   u8/i16/i32 that fits; booleans, floats, and strings get their own tags
//! - **Opportunistic RLE**: long repetitive strings (tile grids, fills) fall
//!   back to run-length encoding when it is strictly smaller than the raw text
//! - **Deterministic output**: two fixed traversals, byte-identical results
//!   for identical input trees
//!
//! # Format Overview
//!
//! All integers are little-endian. String lengths use a 7-bit varint prefix.
//!
//! ```text
//! [header: varint len + "CELESTE MAP"]
//! [package name: varint len + UTF-8]
//! [string table]
//! - count: u16
//! - count x (varint len + UTF-8)
//! [root element, recursive]
//! - name index: u16
//! - attribute count: u8
//! - per attribute: key index (u16), tag (u8), tag-specific payload
//! - child count: u16
//! - children follow recursively
//! ```
//!
//! Value tags:
//!
//! | Tag | Value | Payload |
//! |-----|-------|---------|
//! | 0 | bool | u8 (0/1) |
//! | 1 | int in 0..=255 | u8 |
//! | 2 | int in i16 range | i16 |
//! | 3 | int in i32 range | i32 |
//! | 4 | float | f32 |
//! | 5 | string in table | u16 index |
//! | 6 | string, raw | varint len + UTF-8 |
//! | 7 | string, run-length encoded | u16 len + (count, byte) pairs |
//!
//! # Usage
//!
//! ```
//! use nether_map::{encode_map_to_vec, Element};
//!
//! let room = Element::new("level")
//!     .with_attr("name", "lvl_1")
//!     .with_attr("width", 320)
//!     .with_child(Element::new("solids").with_text("999999\n900009\n999999"));
//! let root = Element::new("Map").with_child(Element::new("levels").with_child(room));
//!
//! let bytes = encode_map_to_vec(&root, "my-campaign").unwrap();
//! assert!(!bytes.is_empty());
//! ```

mod element;
mod encode;
mod error;
pub mod rle;
mod strings;
mod writer;

pub use element::{AttributeValue, Element};
pub use encode::{encode_map, encode_map_to_file, encode_map_to_vec};
pub use error::MapError;
pub use strings::StringTable;
pub use writer::MapWriter;

// =============================================================================
// Constants
// =============================================================================

/// Fixed ASCII header written before any map data
pub const MAP_HEADER: &str = "CELESTE MAP";

/// Sentinel attribute key used to carry an element's inner text
pub const INNER_TEXT_KEY: &str = "innerText";

/// Maximum element nesting depth before the encoder fails fast
pub const MAX_DEPTH: usize = 1024;

/// Largest RLE payload the encoder will choose (the format caps it at the
/// i16 bound, not 65535)
pub const MAX_RLE_LEN: usize = 32767;

/// Value tag: boolean (u8 payload, 0 or 1)
pub const TAG_BOOL: u8 = 0;

/// Value tag: integer in 0..=255 (u8 payload)
pub const TAG_U8: u8 = 1;

/// Value tag: integer in the i16 range (i16 payload)
pub const TAG_I16: u8 = 2;

/// Value tag: integer in the i32 range (i32 payload)
pub const TAG_I32: u8 = 3;

/// Value tag: 32-bit float (f32 payload)
pub const TAG_F32: u8 = 4;

/// Value tag: string present in the table (u16 index payload)
pub const TAG_STR_INDEXED: u8 = 5;

/// Value tag: raw string (varint length + UTF-8 payload)
pub const TAG_STR_RAW: u8 = 6;

/// Value tag: run-length encoded string (u16 length + RLE payload)
pub const TAG_STR_RLE: u8 = 7;
