//! Whole-document decoding: header, IFD0 and the directories it links to.
//!
//! ```text
//! IFD0 --0x8769--> EXIF --0xA005--> Interoperability
//!   \
//!    --0x8825--> GPS
//! ```
//!
//! The EXIF pointer is mandatory. GPS and Interoperability are parsed only
//! when their pointer field is present.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ExifError, FieldError};
use crate::format::jpeg::{find_exif_segment, locate_exif_segment};
use crate::io::Segment;

use super::directory::Directory;
use super::field::FieldRecord;
use super::header::{ByteOrder, ExifHeader};
use super::orientation::Orientation;
use super::tags::{
    DirectoryName, FieldType, TAG_EXIF_IFD_POINTER, TAG_GPS_IFD_POINTER, TAG_INTEROP_IFD_POINTER,
    TAG_ORIENTATION,
};

/// Orientation reported when the tag is absent or unreadable
pub const DEFAULT_ORIENTATION: u16 = 1;

/// Decode the EXIF metadata of an in-memory JPEG file.
pub fn parse_exif(bytes: &[u8]) -> Result<ExifDocument, ExifError> {
    let segment = find_exif_segment(bytes)?;
    ExifDocument::from_segment(&segment)
}

/// Decoded EXIF metadata.
///
/// Immutable once constructed; GPS and Interoperability may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ExifDocument {
    header: ExifHeader,
    directories: BTreeMap<DirectoryName, Directory>,
}

impl ExifDocument {
    /// Decode a document from an Exif payload (the bytes after `Exif\0\0`).
    ///
    /// # Errors
    /// - `TruncatedData` / `UnknownByteOrder` from the header
    /// - `MissingDirectoryPointer` if IFD0 has no EXIF pointer
    /// - `InvalidDirectoryPointer` if a pointer field is not SHORT or LONG
    /// - any structural error from the directories, tagged with their name
    pub fn from_segment(segment: &Segment) -> Result<Self, ExifError> {
        let header = ExifHeader::parse(segment.as_bytes())?;
        let byte_order = header.byte_order;
        debug!(
            byte_order = byte_order.marker(),
            ifd0_offset = header.ifd0_offset,
            "parsed EXIF header"
        );

        let mut directories = BTreeMap::new();

        let ifd0 = Directory::parse(segment, header.ifd0_offset, byte_order, DirectoryName::Ifd0)?;

        let exif_offset =
            pointer(&ifd0, TAG_EXIF_IFD_POINTER)?.ok_or(ExifError::MissingDirectoryPointer {
                directory: DirectoryName::Ifd0,
                tag: TAG_EXIF_IFD_POINTER,
            })?;
        let exif = Directory::parse(segment, exif_offset, byte_order, DirectoryName::Exif)?;

        if let Some(offset) = pointer(&ifd0, TAG_GPS_IFD_POINTER)? {
            let gps = Directory::parse(segment, offset, byte_order, DirectoryName::Gps)?;
            directories.insert(DirectoryName::Gps, gps);
        } else {
            debug!("no GPS directory pointer");
        }

        if let Some(offset) = pointer(&exif, TAG_INTEROP_IFD_POINTER)? {
            let interop =
                Directory::parse(segment, offset, byte_order, DirectoryName::Interoperability)?;
            directories.insert(DirectoryName::Interoperability, interop);
        } else {
            debug!("no Interoperability directory pointer");
        }

        directories.insert(DirectoryName::Ifd0, ifd0);
        directories.insert(DirectoryName::Exif, exif);

        Ok(ExifDocument {
            header,
            directories,
        })
    }

    /// Decode the document from a seekable JPEG stream positioned at its start.
    pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self, ExifError> {
        let segment = locate_exif_segment(reader)?;
        Self::from_segment(&segment)
    }

    /// Open and decode a JPEG file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExifError> {
        let file = File::open(path)?;
        Self::from_reader(&mut BufReader::new(file))
    }

    #[inline]
    pub fn header(&self) -> &ExifHeader {
        &self.header
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    /// A directory, if it was present in the document.
    pub fn directory(&self, name: DirectoryName) -> Option<&Directory> {
        self.directories.get(&name)
    }

    /// Present directories, in IFD0, EXIF, GPS, Interoperability order.
    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.directories.values()
    }

    /// Look up a field by directory and tag.
    ///
    /// Fails with `UnknownTag` if the directory is absent or lacks the tag.
    pub fn get_field(
        &self,
        directory: DirectoryName,
        tag: u16,
    ) -> Result<&FieldRecord, FieldError> {
        self.directory(directory)
            .ok_or(FieldError::UnknownTag { directory, tag })?
            .get_field(tag)
    }

    /// Raw orientation value from IFD0, or 1 when absent.
    pub fn orientation(&self) -> u16 {
        match self.get_field(DirectoryName::Ifd0, TAG_ORIENTATION) {
            Ok(field) => match field.first_u16() {
                Some(value) => value,
                None => {
                    warn!(
                        type_code = field.type_code(),
                        "orientation field is not an unsigned integer, using default"
                    );
                    DEFAULT_ORIENTATION
                }
            },
            Err(err) => {
                warn!("{}, using default orientation", err);
                DEFAULT_ORIENTATION
            }
        }
    }

    /// Orientation as a display transform; out-of-range values map to `Normal`.
    pub fn orientation_transform(&self) -> Orientation {
        let value = self.orientation();
        Orientation::from_exif(value).unwrap_or_else(|| {
            warn!(value, "orientation value outside 1..=8, ignoring");
            Orientation::Normal
        })
    }
}

/// Offset held by a pointer field, if the field is present.
fn pointer(directory: &Directory, tag: u16) -> Result<Option<u32>, ExifError> {
    let Some(field) = directory.get(tag) else {
        return Ok(None);
    };

    let invalid = || ExifError::InvalidDirectoryPointer {
        directory: directory.name(),
        tag,
        type_code: field.type_code(),
    };

    match field.field_type() {
        Some(FieldType::Short | FieldType::Long) => field.first_u32().map(Some).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

// =============================================================================
// Tests
// =============================================================================
