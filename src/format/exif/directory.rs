//! Directory (IFD) parsing.
//!
//! # Directory Layout
//!
//! ```text
//! Bytes 0-1:        Entry count N
//! Bytes 2..2+12N:   N entries of 12 bytes each
//! Bytes 2+12N..+4:  Offset of the next directory (0 if none)
//! ```

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::error::{ExifError, FieldError, Location};
use crate::io::Segment;

use super::field::{decode_entry, FieldRecord, ENTRY_SIZE};
use super::header::ByteOrder;
use super::tags::DirectoryName;

/// Size of the entry count at the start of a directory
const COUNT_SIZE: u64 = 2;

/// A parsed directory: its fields keyed by tag, plus the chain offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    name: DirectoryName,
    fields: BTreeMap<u16, FieldRecord>,
    next_directory_offset: u32,
}

impl Directory {
    /// Parse the directory starting at `offset` in `segment`.
    ///
    /// A tag appearing twice keeps the later entry. The next-directory offset
    /// is recorded but not followed.
    ///
    /// # Errors
    /// - `OffsetOutOfBounds` if `offset` lies outside the segment
    /// - `TruncatedData` if the entry table or next offset runs past the end
    /// - any error from decoding an entry, tagged with the entry index and tag
    pub fn parse(
        segment: &Segment,
        offset: u32,
        byte_order: ByteOrder,
        name: DirectoryName,
    ) -> Result<Self, ExifError> {
        let offset = offset as u64;
        if offset >= segment.len() as u64 {
            return Err(ExifError::OffsetOutOfBounds {
                location: Location {
                    directory: Some(name),
                    entry: None,
                },
                offset,
                len: COUNT_SIZE,
                size: segment.len() as u64,
            });
        }

        let count = segment
            .read_u16(offset, byte_order)
            .map_err(|e| e.in_directory(name))?;
        trace!(directory = %name, offset, count, "parsing directory");

        let mut fields = BTreeMap::new();
        let mut entry_offset = offset + COUNT_SIZE;

        for index in 0..count as usize {
            let tag = segment.read_u16(entry_offset, byte_order).ok();
            let field = decode_entry(segment, entry_offset, byte_order)
                .map_err(|e| e.at_entry(index, tag).in_directory(name))?;

            let tag = field.tag();
            if fields.insert(tag, field).is_some() {
                warn!(directory = %name, tag, "duplicate tag, keeping the later entry");
            }
            entry_offset += ENTRY_SIZE as u64;
        }

        let next_directory_offset = segment
            .read_u32(entry_offset, byte_order)
            .map_err(|e| e.in_directory(name))?;

        Ok(Directory {
            name,
            fields,
            next_directory_offset,
        })
    }

    #[inline]
    pub fn name(&self) -> DirectoryName {
        self.name
    }

    /// Offset of the next directory in the chain, 0 if none.
    #[inline]
    pub fn next_directory_offset(&self) -> u32 {
        self.next_directory_offset
    }

    pub fn get(&self, tag: u16) -> Option<&FieldRecord> {
        self.fields.get(&tag)
    }

    /// Look up a field, failing with `UnknownTag` if it is absent.
    pub fn get_field(&self, tag: u16) -> Result<&FieldRecord, FieldError> {
        self.get(tag).ok_or(FieldError::UnknownTag {
            directory: self.name,
            tag,
        })
    }

    pub fn contains(&self, tag: u16) -> bool {
        self.fields.contains_key(&tag)
    }

    /// Fields in ascending tag order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldRecord> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
