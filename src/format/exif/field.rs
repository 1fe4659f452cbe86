//! Decoding of single directory entries.
//!
//! # Entry Layout (12 bytes)
//!
//! ```text
//! Bytes 0-1:  Tag
//! Bytes 2-3:  Field type code
//! Bytes 4-7:  Count (number of values, not bytes)
//! Bytes 8-11: Value if it fits in 4 bytes, otherwise offset of the value
//! ```
//!
//! Offsets in the value slot are relative to the start of the segment,
//! never to the entry itself.

use std::fmt;

use bytes::Bytes;
use tracing::trace;

use crate::error::ExifError;
use crate::io::Segment;

use super::header::ByteOrder;
use super::tags::FieldType;

/// Size of a directory entry in bytes
pub const ENTRY_SIZE: usize = 12;

/// Offset of the value slot within an entry
const VALUE_SLOT_OFFSET: usize = 8;

// =============================================================================
// Rational
// =============================================================================

/// A numerator/denominator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational<T> {
    pub numerator: T,
    pub denominator: T,
}

impl<T> Rational<T> {
    pub const fn new(numerator: T, denominator: T) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl<T: Copy + Into<f64>> Rational<T> {
    /// Value as a float, or `None` for a zero denominator.
    pub fn to_f64(self) -> Option<f64> {
        let denominator: f64 = self.denominator.into();
        if denominator == 0.0 {
            return None;
        }
        Some(self.numerator.into() / denominator)
    }
}

impl<T: fmt::Display> fmt::Display for Rational<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// FieldValue
// =============================================================================

/// Type-specific decoded value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Byte(Vec<u8>),

    /// Text with trailing NULs removed
    Ascii(String),

    Short(Vec<u16>),

    Long(Vec<u32>),

    Rational(Vec<Rational<u32>>),

    /// Opaque bytes (maker notes, version strings, ...)
    Undefined(Bytes),

    SLong(Vec<i32>),

    SRational(Vec<Rational<i32>>),

    /// Unrecognized type code; holds the 4 bytes embedded in the entry
    Unknown {
        type_code: u16,
        bytes: Bytes,
    },
}

impl FieldValue {
    fn decode(field_type: FieldType, raw: &Bytes, byte_order: ByteOrder) -> Self {
        match field_type {
            FieldType::Byte => FieldValue::Byte(raw.to_vec()),
            FieldType::Ascii => {
                let end = raw.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
                FieldValue::Ascii(String::from_utf8_lossy(&raw[..end]).into_owned())
            }
            FieldType::Short => FieldValue::Short(
                raw.chunks_exact(2)
                    .map(|c| byte_order.read_u16(c))
                    .collect(),
            ),
            FieldType::Long => FieldValue::Long(
                raw.chunks_exact(4)
                    .map(|c| byte_order.read_u32(c))
                    .collect(),
            ),
            FieldType::Rational => FieldValue::Rational(
                raw.chunks_exact(8)
                    .map(|c| {
                        Rational::new(byte_order.read_u32(&c[..4]), byte_order.read_u32(&c[4..]))
                    })
                    .collect(),
            ),
            FieldType::Undefined => FieldValue::Undefined(raw.clone()),
            FieldType::SLong => FieldValue::SLong(
                raw.chunks_exact(4)
                    .map(|c| byte_order.read_i32(c))
                    .collect(),
            ),
            FieldType::SRational => FieldValue::SRational(
                raw.chunks_exact(8)
                    .map(|c| {
                        Rational::new(byte_order.read_i32(&c[..4]), byte_order.read_i32(&c[4..]))
                    })
                    .collect(),
            ),
        }
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Legacy form: decimal digits of every byte, concatenated
            FieldValue::Byte(bytes) => bytes.iter().try_for_each(|b| write!(f, "{}", b)),
            FieldValue::Ascii(text) => f.write_str(text),
            FieldValue::Short(values) => join(f, values),
            FieldValue::Long(values) => join(f, values),
            FieldValue::Rational(values) => join(f, values),
            FieldValue::SLong(values) => join(f, values),
            FieldValue::SRational(values) => join(f, values),
            FieldValue::Undefined(bytes) | FieldValue::Unknown { bytes, .. } => {
                f.write_str(&hex::encode_upper(bytes))
            }
        }
    }
}

// =============================================================================
// FieldRecord
// =============================================================================

/// One decoded directory entry.
///
/// `raw_bytes` always holds exactly `count * unit size` bytes for known types,
/// taken either from the entry's value slot or from the offset it points to.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    tag: u16,
    type_code: u16,
    count: u32,
    raw: Bytes,
    value: FieldValue,
    byte_order: ByteOrder,
    inline: bool,
}

impl FieldRecord {
    #[inline]
    pub fn tag(&self) -> u16 {
        self.tag
    }

    /// Numeric type code as stored in the entry.
    #[inline]
    pub fn type_code(&self) -> u16 {
        self.type_code
    }

    /// Field type, or `None` for unrecognized type codes.
    #[inline]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_u16(self.type_code)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn raw_bytes(&self) -> &Bytes {
        &self.raw
    }

    #[inline]
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Whether the value was stored in the entry itself.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// First value as an unsigned integer (BYTE, SHORT or LONG fields).
    pub fn first_u32(&self) -> Option<u32> {
        match &self.value {
            FieldValue::Byte(v) => v.first().map(|&x| x as u32),
            FieldValue::Short(v) => v.first().map(|&x| x as u32),
            FieldValue::Long(v) => v.first().copied(),
            _ => None,
        }
    }

    /// First value as a u16, if it is an unsigned integer that fits.
    pub fn first_u16(&self) -> Option<u16> {
        self.first_u32().and_then(|v| u16::try_from(v).ok())
    }

    /// Text of an ASCII field.
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Ascii(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

// =============================================================================
// Entry decoding
// =============================================================================

/// Decode the 12-byte entry at `entry_offset` into a [`FieldRecord`].
///
/// Values of at most 4 bytes are read from the entry's value slot. Larger
/// values are read from the segment at the offset held in the slot.
///
/// # Errors
/// - `TruncatedData` if the entry itself runs past the segment
/// - `OffsetOutOfBounds` if offset-addressed data runs past the segment
pub fn decode_entry(
    segment: &Segment,
    entry_offset: u64,
    byte_order: ByteOrder,
) -> Result<FieldRecord, ExifError> {
    let entry = segment.structure_at(entry_offset, ENTRY_SIZE)?;

    let tag = byte_order.read_u16(&entry[0..2]);
    let type_code = byte_order.read_u16(&entry[2..4]);
    let count = byte_order.read_u32(&entry[4..8]);
    let slot_offset = entry_offset as usize + VALUE_SLOT_OFFSET;

    let Some(field_type) = FieldType::from_u16(type_code) else {
        trace!(tag, type_code, "unknown field type, keeping embedded bytes");
        let bytes = segment.as_bytes().slice(slot_offset..slot_offset + 4);
        return Ok(FieldRecord {
            tag,
            type_code,
            count,
            raw: bytes.clone(),
            value: FieldValue::Unknown { type_code, bytes },
            byte_order,
            inline: true,
        });
    };

    let byte_len = field_type.byte_len(count);
    let inline = byte_len <= FieldType::INLINE_THRESHOLD;
    let raw = if inline {
        segment
            .as_bytes()
            .slice(slot_offset..slot_offset + byte_len as usize)
    } else {
        let data_offset = byte_order.read_u32(&entry[8..12]);
        segment.data_at(data_offset as u64, byte_len)?
    };

    let value = FieldValue::decode(field_type, &raw, byte_order);

    Ok(FieldRecord {
        tag,
        type_code,
        count,
        raw,
        value,
        byte_order,
        inline,
    })
}

// =============================================================================
// Tests
// =============================================================================
