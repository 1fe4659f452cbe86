//! EXIF decoder.
//!
//! The Exif payload of a JPEG APP1 segment is a small TIFF file: a header
//! followed by chained Image File Directories (IFDs).
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares the endianness (II = little-endian,
//!   MM = big-endian). All multi-byte values must be read respecting it.
//!
//! - **Directories**: IFD0 describes the main image. Pointer fields in IFD0
//!   link to the EXIF and GPS directories, and the EXIF directory links to
//!   the Interoperability directory.
//!
//! - **Inline vs offset values**: values of up to 4 bytes are stored in the
//!   entry itself, larger values at an offset from the start of the payload.

mod directory;
mod document;
mod field;
mod header;
mod orientation;
mod tags;

pub use directory::Directory;
pub use document::{parse_exif, ExifDocument, DEFAULT_ORIENTATION};
pub use field::{decode_entry, FieldRecord, FieldValue, Rational, ENTRY_SIZE};
pub use header::{ByteOrder, ExifHeader, HEADER_SIZE};
pub use orientation::Orientation;
pub use tags::{
    tag_name, DirectoryName, FieldType, TAG_EXIF_IFD_POINTER, TAG_GPS_IFD_POINTER,
    TAG_INTEROP_IFD_POINTER, TAG_ORIENTATION,
};
