//! Binary output writer
//!
//! [`MapWriter`] wraps any `std::io::Write` and emits the primitives the map
//! format is built from: fixed-width little-endian integers, f32, raw bytes,
//! and varint-length-prefixed UTF-8 strings.

use std::io::Write;

use crate::error::MapError;

/// Append-only writer of map format primitives
pub struct MapWriter<W: Write> {
    out: W,
}

impl<W: Write> MapWriter<W> {
    pub fn new(out: W) -> Self {
        MapWriter { out }
    }

    pub fn write_u8(&mut self, val: u8) -> Result<(), MapError> {
        self.out.write_all(&[val])?;
        Ok(())
    }

    pub fn write_u16(&mut self, val: u16) -> Result<(), MapError> {
        self.out.write_all(&val.to_le_bytes())?;
        Ok(())
    }

    pub fn write_i16(&mut self, val: i16) -> Result<(), MapError> {
        self.out.write_all(&val.to_le_bytes())?;
        Ok(())
    }

    pub fn write_i32(&mut self, val: i32) -> Result<(), MapError> {
        self.out.write_all(&val.to_le_bytes())?;
        Ok(())
    }

    pub fn write_f32(&mut self, val: f32) -> Result<(), MapError> {
        self.out.write_all(&val.to_le_bytes())?;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), MapError> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    /// Write an unsigned varint: 7 value bits per byte, low group first,
    /// continuation bit 0x80 on every byte except the last
    pub fn write_varint(&mut self, mut val: u64) -> Result<(), MapError> {
        while val > 0x7F {
            self.write_u8((val & 0x7F) as u8 | 0x80)?;
            val >>= 7;
        }
        self.write_u8(val as u8)
    }

    /// Write a string as varint byte length + UTF-8 bytes, no terminator
    pub fn write_string(&mut self, s: &str) -> Result<(), MapError> {
        self.write_varint(s.len() as u64)?;
        self.write_bytes(s.as_bytes())
    }

    pub fn flush(&mut self) -> Result<(), MapError> {
        self.out.flush()?;
        Ok(())
    }
}
