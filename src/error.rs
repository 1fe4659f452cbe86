use std::fmt;

use thiserror::Error;

use crate::format::exif::DirectoryName;

/// Where in the document a structural error was raised.
///
/// Errors are created by the low-level segment reads without any context;
/// the directory and entry being decoded are attached as the error
/// propagates outward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    /// Directory being parsed, if any
    pub directory: Option<DirectoryName>,

    /// Entry index and tag within that directory, if an entry was being decoded
    pub entry: Option<EntryLocation>,
}

/// Position of a single 12-byte entry inside a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLocation {
    pub index: usize,

    /// Tag of the entry, when the entry was long enough to read it
    pub tag: Option<u16>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.directory, self.entry) {
            (None, _) => write!(f, "segment"),
            (Some(dir), None) => write!(f, "{} directory", dir),
            (Some(dir), Some(entry)) => {
                write!(f, "{} directory, entry {}", dir, entry.index)?;
                if let Some(tag) = entry.tag {
                    write!(f, " (tag 0x{:04X})", tag)?;
                }
                Ok(())
            }
        }
    }
}

/// Errors that can occur while locating or decoding EXIF metadata
#[derive(Debug, Clone, Error)]
pub enum ExifError {
    /// I/O error while reading the JPEG stream
    #[error("I/O error: {0}")]
    Io(String),

    /// No SOI marker, or no APP1 Exif segment before leaving the APPn range
    #[error("EXIF segment not found: {0}")]
    SegmentNotFound(String),

    /// A fixed-size structural read runs past the end of the segment
    #[error("Truncated data in {location}: need {needed} bytes at offset {offset}, segment has {available}")]
    TruncatedData {
        location: Location,
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// Header byte-order marker is neither "II" nor "MM"
    #[error("Unknown byte order: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    UnknownByteOrder(u16),

    /// A mandatory pointer field is absent
    #[error("Missing directory pointer 0x{tag:04X} in {directory} directory")]
    MissingDirectoryPointer { directory: DirectoryName, tag: u16 },

    /// A pointer field exists but does not hold an unsigned integer
    #[error(
        "Invalid directory pointer 0x{tag:04X} in {directory} directory: field type {type_code}"
    )]
    InvalidDirectoryPointer {
        directory: DirectoryName,
        tag: u16,
        type_code: u16,
    },

    /// Resolved data or directory offset falls outside the segment
    #[error("Offset out of bounds in {location}: {len} bytes at offset {offset}, segment is {size} bytes")]
    OffsetOutOfBounds {
        location: Location,
        offset: u64,
        len: u64,
        size: u64,
    },
}

impl ExifError {
    /// Attach the directory being parsed, unless one is already recorded.
    pub fn in_directory(self, directory: DirectoryName) -> Self {
        self.map_location(|loc| {
            if loc.directory.is_none() {
                loc.directory = Some(directory);
            }
        })
    }

    /// Attach the entry being decoded, unless one is already recorded.
    pub fn at_entry(self, index: usize, tag: Option<u16>) -> Self {
        self.map_location(|loc| {
            if loc.entry.is_none() {
                loc.entry = Some(EntryLocation { index, tag });
            }
        })
    }

    /// Location of a structural error, if this is one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ExifError::TruncatedData { location, .. }
            | ExifError::OffsetOutOfBounds { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Whether the input is structurally corrupt (truncated or bad offsets).
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            ExifError::TruncatedData { .. } | ExifError::OffsetOutOfBounds { .. }
        )
    }

    fn map_location(mut self, f: impl FnOnce(&mut Location)) -> Self {
        match &mut self {
            ExifError::TruncatedData { location, .. }
            | ExifError::OffsetOutOfBounds { location, .. } => f(location),
            _ => {}
        }
        self
    }
}

impl From<std::io::Error> for ExifError {
    fn from(err: std::io::Error) -> Self {
        ExifError::Io(err.to_string())
    }
}

/// Errors returned by field lookups on a decoded document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The directory is absent or does not contain the tag
    #[error("Unknown field tag 0x{tag:04X} in {directory} directory")]
    UnknownTag { directory: DirectoryName, tag: u16 },
}
