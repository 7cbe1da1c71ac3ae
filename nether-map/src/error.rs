//! Map encoding error types

use thiserror::Error;

/// Errors that abort an encode
///
/// A table lookup miss is deliberately not an error: the map format
/// degrades it to index 0, so the encoder logs a warning and keeps going
/// (see `encode`). Everything here is fatal and leaves a partial artifact
/// the caller must discard.
#[derive(Debug, Error)]
pub enum MapError {
    /// Write to the output resource failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Element carries more attributes than the u8 count field can hold
    #[error("element '{element}' has {count} attributes (max 255)")]
    TooManyAttributes { element: String, count: usize },

    /// Element carries more children than the u16 count field can hold
    #[error("element '{element}' has {count} children (max 65535)")]
    TooManyChildren { element: String, count: usize },

    /// More unique strings than the u16 table index can address
    #[error("string table overflow: {0} entries (max 65535)")]
    StringTableOverflow(usize),

    /// Integer attribute value outside the i32 range
    #[error("integer value {0} does not fit in 32 bits")]
    IntOutOfRange(i64),

    /// Nesting exceeded the depth bound (malformed or pathological tree)
    #[error("element tree deeper than {0} levels")]
    TooDeep(usize),
}
