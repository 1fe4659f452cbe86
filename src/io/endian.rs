//! Fixed-width integer reads for Exif payloads.
//!
//! An Exif payload declares its byte order once ("II" or "MM") and every
//! directory count, entry field and value after the header follows it. These
//! helpers decode the leading bytes of a slice; trailing bytes are ignored.
//! `Segment` bounds-checks every slice before it reaches them.

/// Copy the first `N` bytes of `bytes`.
///
/// # Panics
/// Panics if the slice is shorter than `N`.
#[inline]
fn leading<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

/// Intel-order ("II") u16.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes(leading(bytes))
}

/// Motorola-order ("MM") u16.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes(leading(bytes))
}

/// Intel-order ("II") u32. Used for counts, offsets and LONG values.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(leading(bytes))
}

/// Motorola-order ("MM") u32.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes(leading(bytes))
}
