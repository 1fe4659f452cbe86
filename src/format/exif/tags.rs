//! EXIF field type, directory and tag definitions.
//!
//! This module defines the vocabulary for EXIF decoding:
//! - Field types that determine how entry values are encoded
//! - The fixed set of directories a document can contain
//! - Well-known tag IDs, including the pointer tags linking directories

use std::fmt;

use serde::Serialize;

// =============================================================================
// Field Types
// =============================================================================

/// EXIF field types that determine how values are encoded.
///
/// Each field type has a fixed unit size, which decides whether a value
/// fits in the 4-byte slot of its entry or lives at an offset in the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two unsigned 32-bit integers, numerator then denominator (8 bytes)
    Rational = 5,

    /// Opaque byte data (1 byte per element)
    Undefined = 7,

    /// Signed 32-bit integer (4 bytes)
    SLong = 9,

    /// Two signed 32-bit integers, numerator then denominator (8 bytes)
    SRational = 10,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SLong => 4,
            FieldType::Rational | FieldType::SRational => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unknown type codes. Unknown types are not an error;
    /// such entries are kept as opaque fields.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            _ => None,
        }
    }

    /// Maximum bytes that can be stored inline in an entry.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Total byte length of `count` values of this type.
    #[inline]
    pub fn byte_len(self, count: u32) -> u64 {
        self.size_in_bytes() as u64 * count as u64
    }

    /// Check if `count` values of this type fit in the entry's value slot.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        self.byte_len(count) <= Self::INLINE_THRESHOLD
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
        }
    }
}

// =============================================================================
// Directories
// =============================================================================

/// The directories an EXIF document can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DirectoryName {
    /// Primary image directory, located by the header
    #[serde(rename = "IFD0")]
    Ifd0,

    /// Camera settings, located by tag 0x8769 in IFD0
    #[serde(rename = "EXIF")]
    Exif,

    /// Location data, located by tag 0x8825 in IFD0
    #[serde(rename = "GPS")]
    Gps,

    /// Interoperability data, located by tag 0xA005 in the EXIF directory
    #[serde(rename = "Interoperability")]
    Interoperability,
}

impl DirectoryName {
    /// All directories in parse order.
    pub const ALL: [DirectoryName; 4] = [
        DirectoryName::Ifd0,
        DirectoryName::Exif,
        DirectoryName::Gps,
        DirectoryName::Interoperability,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DirectoryName::Ifd0 => "IFD0",
            DirectoryName::Exif => "EXIF",
            DirectoryName::Gps => "GPS",
            DirectoryName::Interoperability => "Interoperability",
        }
    }

    /// Parse a directory name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DirectoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tags
// =============================================================================

/// Orientation of the image (IFD0)
pub const TAG_ORIENTATION: u16 = 0x0112;

/// Offset of the EXIF directory (IFD0)
pub const TAG_EXIF_IFD_POINTER: u16 = 0x8769;

/// Offset of the GPS directory (IFD0)
pub const TAG_GPS_IFD_POINTER: u16 = 0x8825;

/// Offset of the Interoperability directory (EXIF)
pub const TAG_INTEROP_IFD_POINTER: u16 = 0xA005;

/// Human-readable name for a well-known tag in a given directory.
///
/// Returns `None` for tags not in the table; these are still decoded.
pub fn tag_name(directory: DirectoryName, tag: u16) -> Option<&'static str> {
    match directory {
        DirectoryName::Ifd0 => match tag {
            0x010E => Some("ImageDescription"),
            0x010F => Some("Make"),
            0x0110 => Some("Model"),
            TAG_ORIENTATION => Some("Orientation"),
            0x011A => Some("XResolution"),
            0x011B => Some("YResolution"),
            0x0128 => Some("ResolutionUnit"),
            0x0131 => Some("Software"),
            0x0132 => Some("DateTime"),
            0x013B => Some("Artist"),
            0x0213 => Some("YCbCrPositioning"),
            0x8298 => Some("Copyright"),
            TAG_EXIF_IFD_POINTER => Some("ExifIFDPointer"),
            TAG_GPS_IFD_POINTER => Some("GPSInfoIFDPointer"),
            _ => None,
        },
        DirectoryName::Exif => match tag {
            0x829A => Some("ExposureTime"),
            0x829D => Some("FNumber"),
            0x8822 => Some("ExposureProgram"),
            0x8827 => Some("ISOSpeedRatings"),
            0x9000 => Some("ExifVersion"),
            0x9003 => Some("DateTimeOriginal"),
            0x9004 => Some("DateTimeDigitized"),
            0x9101 => Some("ComponentsConfiguration"),
            0x9201 => Some("ShutterSpeedValue"),
            0x9202 => Some("ApertureValue"),
            0x9204 => Some("ExposureBiasValue"),
            0x9207 => Some("MeteringMode"),
            0x9209 => Some("Flash"),
            0x920A => Some("FocalLength"),
            0x927C => Some("MakerNote"),
            0x9286 => Some("UserComment"),
            0xA000 => Some("FlashpixVersion"),
            0xA001 => Some("ColorSpace"),
            0xA002 => Some("PixelXDimension"),
            0xA003 => Some("PixelYDimension"),
            TAG_INTEROP_IFD_POINTER => Some("InteroperabilityIFDPointer"),
            0xA402 => Some("ExposureMode"),
            0xA403 => Some("WhiteBalance"),
            0xA405 => Some("FocalLengthIn35mmFilm"),
            0xA406 => Some("SceneCaptureType"),
            0xA434 => Some("LensModel"),
            _ => None,
        },
        DirectoryName::Gps => match tag {
            0x0000 => Some("GPSVersionID"),
            0x0001 => Some("GPSLatitudeRef"),
            0x0002 => Some("GPSLatitude"),
            0x0003 => Some("GPSLongitudeRef"),
            0x0004 => Some("GPSLongitude"),
            0x0005 => Some("GPSAltitudeRef"),
            0x0006 => Some("GPSAltitude"),
            0x0007 => Some("GPSTimeStamp"),
            0x001D => Some("GPSDateStamp"),
            _ => None,
        },
        DirectoryName::Interoperability => match tag {
            0x0001 => Some("InteroperabilityIndex"),
            0x0002 => Some("InteroperabilityVersion"),
            _ => None,
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
