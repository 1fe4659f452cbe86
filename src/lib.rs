//! # exif-orient
//!
//! A bounds-checked decoder for the EXIF metadata embedded in JPEG files.
//!
//! The decoder locates the Exif APP1 segment in the JPEG marker stream,
//! parses its TIFF-style header, and walks the IFD0, EXIF, GPS and
//! Interoperability directories. Every field is decoded into a typed value,
//! and the orientation tag is exposed for auto-rotation.
//!
//! Decoding is a pure, synchronous computation over a buffered segment of at
//! most 64KB. Corrupt input yields a typed error, never a panic.
//!
//! ## Architecture
//!
//! - [`io`] - Endian helpers and the bounds-checked [`Segment`]
//! - [`mod@format`] - JPEG segment location and the EXIF decoder
//! - [`report`] - Serializable summaries of decoded documents
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_orient::{parse_exif, DirectoryName};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let document = parse_exif(&bytes).unwrap();
//!
//! println!("orientation: {}", document.orientation());
//! if let Ok(model) = document.get_field(DirectoryName::Ifd0, 0x0110) {
//!     println!("camera: {}", model);
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod report;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{EntryLocation, ExifError, FieldError, Location};
pub use format::exif::{
    decode_entry, parse_exif, tag_name, ByteOrder, Directory, DirectoryName, ExifDocument,
    ExifHeader, FieldRecord, FieldType, FieldValue, Orientation, Rational, DEFAULT_ORIENTATION,
    ENTRY_SIZE, HEADER_SIZE, TAG_EXIF_IFD_POINTER, TAG_GPS_IFD_POINTER, TAG_INTEROP_IFD_POINTER,
    TAG_ORIENTATION,
};
pub use format::{find_exif_segment, is_jpeg, locate_exif_segment};
pub use io::Segment;
pub use report::{DirectoryReport, FieldReport, FileReport};
