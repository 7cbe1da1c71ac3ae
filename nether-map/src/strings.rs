//! Deduplicated string table
//!
//! Every element name, attribute key, and string attribute value in the tree
//! is stored once, in first-occurrence order under pre-order traversal, and
//! referenced from the element stream by a `u16` index. Inner text bodies are
//! never registered; the `innerText` sentinel key is.

use std::collections::HashMap;
use std::io::Write;

use crate::error::MapError;
use crate::writer::MapWriter;

/// First-occurrence-ordered string registry
///
/// Built once per encode, before any byte is written, so the indices assigned
/// during the collection pass are exactly the ones the element stream refers
/// to. Occurrence counts are tracked and readable, but only presence affects
/// indexing.
#[derive(Debug, Default)]
pub struct StringTable {
    /// Entries in table (= first occurrence) order
    entries: Vec<String>,
    /// Occurrence count per entry, parallel to `entries`
    counts: Vec<u32>,
    /// Content -> table index
    index: HashMap<String, u16>,
}

impl StringTable {
    pub fn new() -> Self {
        StringTable::default()
    }

    /// Record an occurrence of `s`, assigning it the next index if unseen
    ///
    /// Idempotent with respect to the assigned index: the first call fixes
    /// the string's position for the lifetime of the table.
    pub fn register(&mut self, s: &str) -> Result<u16, MapError> {
        if let Some(&idx) = self.index.get(s) {
            self.counts[idx as usize] += 1;
            return Ok(idx);
        }
        if self.entries.len() > u16::MAX as usize {
            return Err(MapError::StringTableOverflow(self.entries.len()));
        }
        let idx = self.entries.len() as u16;
        self.entries.push(s.to_string());
        self.counts.push(1);
        self.index.insert(s.to_string(), idx);
        Ok(idx)
    }

    /// Index of `s`, or `None` if it was never registered
    pub fn index_of(&self, s: &str) -> Option<u16> {
        self.index.get(s).copied()
    }

    /// How many times `s` was registered
    pub fn occurrences(&self, s: &str) -> u32 {
        self.index
            .get(s)
            .map_or(0, |&idx| self.counts[idx as usize])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the table: u16 entry count, then each string length-prefixed,
    /// in table order
    pub fn serialize<W: Write>(&self, w: &mut MapWriter<W>) -> Result<(), MapError> {
        if self.entries.len() > u16::MAX as usize {
            return Err(MapError::StringTableOverflow(self.entries.len()));
        }
        w.write_u16(self.entries.len() as u16)?;
        for entry in &self.entries {
            w.write_string(entry)?;
        }
        Ok(())
    }
}
