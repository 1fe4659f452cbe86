//! Locating the Exif APP1 segment inside a JPEG stream.
//!
//! # Marker Stream
//!
//! A JPEG file starts with SOI (FFD8), followed by marker segments. Each
//! segment is a 2-byte marker, a 2-byte big-endian length (which counts the
//! length bytes themselves) and `length - 2` bytes of payload. Application
//! segments (APP0..APP15) come first; Exif metadata lives in an APP1 segment
//! whose payload starts with `Exif\0\0`.
//!
//! APP1 is also used for XMP, so an APP1 segment without the signature must
//! be skipped by its full declared length before reading the next marker.

use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom};

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::ExifError;
use crate::io::Segment;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: u16 = 0xFFD8;

/// First application segment marker (JFIF)
pub const APP0: u16 = 0xFFE0;

/// Application segment 1 (Exif, XMP)
pub const APP1: u16 = 0xFFE1;

/// Last application segment marker
pub const APP15: u16 = 0xFFEF;

/// Signature at the start of an Exif APP1 payload
pub const EXIF_SIGNATURE: &[u8; 6] = b"Exif\0\0";

/// Size of the segment length field
const LENGTH_SIZE: u16 = 2;

/// Check if data starts with the JPEG SOI marker.
pub fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && u16::from_be_bytes([data[0], data[1]]) == SOI
}

/// Running out of input while scanning means there is no Exif segment.
fn eof_as_not_found(context: &'static str) -> impl FnOnce(io::Error) -> ExifError {
    move |e| match e.kind() {
        ErrorKind::UnexpectedEof => ExifError::SegmentNotFound(context.to_string()),
        _ => ExifError::from(e),
    }
}

fn read_u16<R: Read>(reader: &mut R) -> Result<u16, ExifError> {
    let mut buf = [0u8; 2];
    reader
        .read_exact(&mut buf)
        .map_err(eof_as_not_found("stream ended before an Exif APP1 segment"))?;
    Ok(u16::from_be_bytes(buf))
}

/// Scan a JPEG stream and return the Exif payload (bytes after `Exif\0\0`).
///
/// The reader must be positioned at the start of the JPEG stream.
///
/// # Errors
/// - `SegmentNotFound` if the stream does not start with SOI, ends early, or
///   reaches a non-APPn marker before an Exif APP1 segment
/// - `Io` for other read failures
pub fn locate_exif_segment<R: Read + Seek>(reader: &mut R) -> Result<Segment, ExifError> {
    let marker = read_u16(reader)?;
    if marker != SOI {
        return Err(ExifError::SegmentNotFound(format!(
            "not a JPEG stream: expected SOI 0x{:04X}, got 0x{:04X}",
            SOI, marker
        )));
    }

    loop {
        let marker = read_u16(reader)?;
        if !(APP0..=APP15).contains(&marker) {
            return Err(ExifError::SegmentNotFound(format!(
                "reached marker 0x{:04X} before an Exif APP1 segment",
                marker
            )));
        }

        let length = read_u16(reader)?;
        if length < LENGTH_SIZE {
            return Err(ExifError::SegmentNotFound(format!(
                "invalid length {} for segment 0x{:04X}",
                length, marker
            )));
        }
        let payload_len = (length - LENGTH_SIZE) as usize;

        if marker != APP1 {
            trace!(marker, payload_len, "skipping application segment");
            reader.seek(SeekFrom::Current(payload_len as i64))?;
            continue;
        }

        let mut payload = vec![0u8; payload_len];
        reader
            .read_exact(&mut payload)
            .map_err(eof_as_not_found("stream ended inside an APP1 segment"))?;

        if payload.starts_with(EXIF_SIGNATURE) {
            debug!(len = payload_len - EXIF_SIGNATURE.len(), "found Exif segment");
            return Ok(Segment::new(Bytes::from(payload).slice(EXIF_SIGNATURE.len()..)));
        }

        debug!(payload_len, "skipping APP1 segment without Exif signature");
    }
}

/// Scan an in-memory JPEG file for the Exif payload.
pub fn find_exif_segment(data: &[u8]) -> Result<Segment, ExifError> {
    locate_exif_segment(&mut Cursor::new(data))
}

// =============================================================================
// Tests
// =============================================================================
