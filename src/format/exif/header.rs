//! TIFF-style header at the start of the Exif payload.
//!
//! # Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: TIFF magic (42), not required
//! Bytes 4-7: Offset to IFD0, relative to byte 0
//! ```

use tracing::debug;

use crate::error::{ExifError, Location};
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// TIFF magic number following the byte order marker
const TIFF_MAGIC: u16 = 42;

/// Size of the header in bytes
pub const HEADER_SIZE: usize = 8;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of an EXIF document.
///
/// Resolved once from the header and threaded through every later read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Decode a SHORT (entry tag, type code, count of directory entries).
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        if self == ByteOrder::BigEndian {
            read_u16_be(bytes)
        } else {
            read_u16_le(bytes)
        }
    }

    /// Decode a LONG (value counts, offsets, pointer targets).
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        if self == ByteOrder::BigEndian {
            read_u32_be(bytes)
        } else {
            read_u32_le(bytes)
        }
    }

    /// Decode an SLONG, the same bytes reinterpreted as two's complement.
    #[inline]
    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        self.read_u32(bytes) as i32
    }

    /// The two-letter marker for this order.
    pub const fn marker(self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "II",
            ByteOrder::BigEndian => "MM",
        }
    }
}

// =============================================================================
// ExifHeader
// =============================================================================

/// Parsed header: byte order plus the offset of IFD0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifHeader {
    /// Byte order for all multi-byte values in the segment
    pub byte_order: ByteOrder,

    /// Offset of IFD0 from the start of the segment
    pub ifd0_offset: u32,
}

impl ExifHeader {
    /// Parse the header from the start of the Exif payload.
    ///
    /// # Errors
    /// - `TruncatedData` if the payload is shorter than 8 bytes
    /// - `UnknownByteOrder` if the first two bytes are not II or MM
    pub fn parse(bytes: &[u8]) -> Result<Self, ExifError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ExifError::TruncatedData {
                location: Location::default(),
                offset: 0,
                needed: HEADER_SIZE as u64,
                available: bytes.len() as u64,
            });
        }

        // Checked as specific byte patterns, so the read order doesn't matter
        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(ExifError::UnknownByteOrder(magic)),
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != TIFF_MAGIC {
            debug!(version, "EXIF header has unexpected TIFF magic, continuing");
        }

        let ifd0_offset = byte_order.read_u32(&bytes[4..8]);

        Ok(ExifHeader {
            byte_order,
            ifd0_offset,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
