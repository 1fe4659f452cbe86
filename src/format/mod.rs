//! Parsers for JPEG metadata.
//!
//! [`jpeg`] finds the Exif APP1 segment in a JPEG marker stream, and
//! [`exif`] decodes the TIFF-structured metadata inside it.

pub mod exif;
pub mod jpeg;

pub use jpeg::{find_exif_segment, is_jpeg, locate_exif_segment};
