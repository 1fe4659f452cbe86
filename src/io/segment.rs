//! Bounds-checked access to the Exif payload.
//!
//! Every offset inside an EXIF document is relative to the start of the
//! TIFF-style header, which is the first byte after the `Exif\0\0` signature.
//! `Segment` owns that payload and is the only place the decoder touches raw
//! bytes, so every read is checked against the payload length here.

use bytes::Bytes;

use crate::error::{ExifError, Location};
use crate::format::exif::ByteOrder;

/// Immutable Exif payload (the bytes following `Exif\0\0`).
///
/// Cloning is cheap; field data returned by [`Segment::data_at`] shares the
/// same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    data: Bytes,
}

impl Segment {
    /// Wrap an Exif payload.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The whole payload.
    #[inline]
    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }

    /// Borrow `len` bytes of fixed-size structure at `offset`.
    ///
    /// Used for headers, entry counts and entries. Fails with `TruncatedData`.
    pub fn structure_at(&self, offset: u64, len: usize) -> Result<&[u8], ExifError> {
        let Some(range) = self.checked_range(offset, len as u64) else {
            return Err(ExifError::TruncatedData {
                location: Location::default(),
                offset,
                needed: len as u64,
                available: self.data.len() as u64,
            });
        };
        Ok(&self.data[range])
    }

    /// Slice `len` bytes of offset-addressed data at `offset`.
    ///
    /// Used for field values stored outside their entry. Fails with
    /// `OffsetOutOfBounds`.
    pub fn data_at(&self, offset: u64, len: u64) -> Result<Bytes, ExifError> {
        let Some(range) = self.checked_range(offset, len) else {
            return Err(ExifError::OffsetOutOfBounds {
                location: Location::default(),
                offset,
                len,
                size: self.data.len() as u64,
            });
        };
        Ok(self.data.slice(range))
    }

    /// Read a u16 at `offset` using `byte_order`.
    pub fn read_u16(&self, offset: u64, byte_order: ByteOrder) -> Result<u16, ExifError> {
        Ok(byte_order.read_u16(self.structure_at(offset, 2)?))
    }

    /// Read a u32 at `offset` using `byte_order`.
    pub fn read_u32(&self, offset: u64, byte_order: ByteOrder) -> Result<u32, ExifError> {
        Ok(byte_order.read_u32(self.structure_at(offset, 4)?))
    }

    fn checked_range(&self, offset: u64, len: u64) -> Option<std::ops::Range<usize>> {
        let end = offset.checked_add(len)?;
        if end > self.data.len() as u64 {
            return None;
        }
        Some(offset as usize..end as usize)
    }
}

impl From<Vec<u8>> for Segment {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
