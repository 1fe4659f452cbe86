//! Test utilities for integration tests.
//!
//! Builds synthetic Exif payloads and wraps them in minimal JPEG streams.
//! Directory offsets and pointer fields are laid out automatically.

use exif_orient::{ByteOrder, TAG_EXIF_IFD_POINTER, TAG_GPS_IFD_POINTER, TAG_INTEROP_IFD_POINTER};

// =============================================================================
// JPEG Markers
// =============================================================================

pub const SOI: u16 = 0xFFD8;
pub const EOI: u16 = 0xFFD9;
pub const APP0: u16 = 0xFFE0;
pub const APP1: u16 = 0xFFE1;
pub const APP2: u16 = 0xFFE2;
pub const DQT: u16 = 0xFFDB;

// =============================================================================
// Entries
// =============================================================================

#[derive(Debug, Clone)]
enum Values {
    Bytes(Vec<u8>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    /// Unknown type: the slot is written verbatim
    Slot([u8; 4]),
}

/// A directory entry to be encoded with the document's byte order.
#[derive(Debug, Clone)]
pub struct Entry {
    pub tag: u16,
    pub type_code: u16,
    pub count: u32,
    values: Values,
}

impl Entry {
    pub fn byte(tag: u16, values: &[u8]) -> Self {
        Self::with_bytes(tag, 1, values)
    }

    /// ASCII with a trailing NUL appended
    pub fn ascii(tag: u16, text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        Self::with_bytes(tag, 2, &bytes)
    }

    pub fn undefined(tag: u16, values: &[u8]) -> Self {
        Self::with_bytes(tag, 7, values)
    }

    pub fn short(tag: u16, values: &[u16]) -> Self {
        Self {
            tag,
            type_code: 3,
            count: values.len() as u32,
            values: Values::Shorts(values.to_vec()),
        }
    }

    pub fn long(tag: u16, values: &[u32]) -> Self {
        Self {
            tag,
            type_code: 4,
            count: values.len() as u32,
            values: Values::Longs(values.to_vec()),
        }
    }

    pub fn rational(tag: u16, values: &[(u32, u32)]) -> Self {
        Self {
            tag,
            type_code: 5,
            count: values.len() as u32,
            values: Values::Rationals(values.to_vec()),
        }
    }

    pub fn srational(tag: u16, values: &[(i32, i32)]) -> Self {
        Self {
            tag,
            type_code: 10,
            count: values.len() as u32,
            values: Values::SRationals(values.to_vec()),
        }
    }

    /// Entry with an unrecognized type code and a literal value slot
    pub fn unknown(tag: u16, type_code: u16, count: u32, slot: [u8; 4]) -> Self {
        Self {
            tag,
            type_code,
            count,
            values: Values::Slot(slot),
        }
    }

    fn with_bytes(tag: u16, type_code: u16, values: &[u8]) -> Self {
        Self {
            tag,
            type_code,
            count: values.len() as u32,
            values: Values::Bytes(values.to_vec()),
        }
    }

    /// Encoded value bytes, as they appear inline or in the data area.
    pub fn encode(&self, order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::new();
        match &self.values {
            Values::Bytes(v) => out.extend_from_slice(v),
            Values::Shorts(v) => v.iter().for_each(|x| put_u16(&mut out, *x, order)),
            Values::Longs(v) => v.iter().for_each(|x| put_u32(&mut out, *x, order)),
            Values::Rationals(v) => v.iter().for_each(|(n, d)| {
                put_u32(&mut out, *n, order);
                put_u32(&mut out, *d, order);
            }),
            Values::SRationals(v) => v.iter().for_each(|(n, d)| {
                put_u32(&mut out, *n as u32, order);
                put_u32(&mut out, *d as u32, order);
            }),
            Values::Slot(slot) => out.extend_from_slice(slot),
        }
        out
    }

    fn is_unknown(&self) -> bool {
        matches!(self.values, Values::Slot(_))
    }
}

pub fn put_u16(out: &mut Vec<u8>, value: u16, order: ByteOrder) {
    match order {
        ByteOrder::LittleEndian => out.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::BigEndian => out.extend_from_slice(&value.to_be_bytes()),
    }
}

pub fn put_u32(out: &mut Vec<u8>, value: u32, order: ByteOrder) {
    match order {
        ByteOrder::LittleEndian => out.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::BigEndian => out.extend_from_slice(&value.to_be_bytes()),
    }
}

// =============================================================================
// Exif payload builder
// =============================================================================

/// Builds the bytes following `Exif\0\0`.
///
/// Directories are written in IFD0, EXIF, GPS, Interoperability order, each
/// followed by its own data area. Pointer entries are added automatically
/// for every directory that is present.
#[derive(Debug, Clone)]
pub struct ExifBuilder {
    order: ByteOrder,
    ifd0: Vec<Entry>,
    exif: Option<Vec<Entry>>,
    gps: Option<Vec<Entry>>,
    interop: Option<Vec<Entry>>,
}

impl ExifBuilder {
    /// Builder with an empty IFD0 and an empty EXIF directory.
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            ifd0: Vec::new(),
            exif: Some(Vec::new()),
            gps: None,
            interop: None,
        }
    }

    pub fn ifd0(mut self, entry: Entry) -> Self {
        self.ifd0.push(entry);
        self
    }

    pub fn exif(mut self, entry: Entry) -> Self {
        self.exif.get_or_insert_with(Vec::new).push(entry);
        self
    }

    pub fn gps(mut self, entry: Entry) -> Self {
        self.gps.get_or_insert_with(Vec::new).push(entry);
        self
    }

    pub fn interop(mut self, entry: Entry) -> Self {
        self.interop.get_or_insert_with(Vec::new).push(entry);
        self
    }

    /// Leave out the EXIF directory and its pointer.
    pub fn without_exif(mut self) -> Self {
        self.exif = None;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let order = self.order;

        let mut ifd0 = self.ifd0.clone();
        let mut exif = self.exif.clone();
        // Placeholder pointers; real offsets are patched in below
        if exif.is_some() {
            ifd0.push(Entry::long(TAG_EXIF_IFD_POINTER, &[0]));
        }
        if self.gps.is_some() {
            ifd0.push(Entry::long(TAG_GPS_IFD_POINTER, &[0]));
        }
        if let (Some(entries), Some(_)) = (exif.as_mut(), self.interop.as_ref()) {
            entries.push(Entry::long(TAG_INTEROP_IFD_POINTER, &[0]));
        }

        let mut layout: Vec<(u16, Vec<Entry>)> = vec![(0, ifd0)];
        if let Some(entries) = exif {
            layout.push((TAG_EXIF_IFD_POINTER, entries));
        }
        if let Some(entries) = self.gps.clone() {
            layout.push((TAG_GPS_IFD_POINTER, entries));
        }
        if let Some(entries) = self.interop.clone() {
            layout.push((TAG_INTEROP_IFD_POINTER, entries));
        }

        // Directory offsets
        let mut offsets = Vec::with_capacity(layout.len());
        let mut cursor = 8usize;
        for (_, entries) in &layout {
            offsets.push(cursor as u32);
            cursor += directory_size(entries, order);
        }

        // Patch pointer entries with the real offsets
        for (i, (pointer_tag, _)) in layout.clone().iter().enumerate().skip(1) {
            for (_, entries) in layout.iter_mut() {
                for entry in entries.iter_mut() {
                    if entry.tag == *pointer_tag && entry.type_code == 4 {
                        *entry = Entry::long(*pointer_tag, &[offsets[i]]);
                    }
                }
            }
        }

        let mut out = Vec::new();
        match order {
            ByteOrder::LittleEndian => out.extend_from_slice(b"II"),
            ByteOrder::BigEndian => out.extend_from_slice(b"MM"),
        }
        put_u16(&mut out, 42, order);
        put_u32(&mut out, 8, order);

        for (i, (_, entries)) in layout.iter().enumerate() {
            debug_assert_eq!(out.len(), offsets[i] as usize);
            write_directory(&mut out, entries, order);
        }

        out
    }
}

fn directory_size(entries: &[Entry], order: ByteOrder) -> usize {
    let data: usize = entries
        .iter()
        .map(|e| e.encode(order).len())
        .filter(|&len| len > 4)
        .sum();
    2 + 12 * entries.len() + 4 + data
}

fn write_directory(out: &mut Vec<u8>, entries: &[Entry], order: ByteOrder) {
    let start = out.len();
    let mut data_offset = start + 2 + 12 * entries.len() + 4;
    let mut data_area = Vec::new();

    put_u16(out, entries.len() as u16, order);
    for entry in entries {
        put_u16(out, entry.tag, order);
        put_u16(out, entry.type_code, order);
        put_u32(out, entry.count, order);

        let encoded = entry.encode(order);
        if encoded.len() <= 4 || entry.is_unknown() {
            let mut slot = [0u8; 4];
            slot[..encoded.len().min(4)].copy_from_slice(&encoded[..encoded.len().min(4)]);
            out.extend_from_slice(&slot);
        } else {
            put_u32(out, data_offset as u32, order);
            data_offset += encoded.len();
            data_area.extend_from_slice(&encoded);
        }
    }
    put_u32(out, 0, order);
    out.extend_from_slice(&data_area);
}

// =============================================================================
// JPEG wrapping
// =============================================================================

/// A marker segment with a correct length field.
pub fn segment(marker: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = marker.to_be_bytes().to_vec();
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// APP1 segment carrying an Exif payload.
pub fn exif_app1(payload: &[u8]) -> Vec<u8> {
    let mut body = b"Exif\0\0".to_vec();
    body.extend_from_slice(payload);
    segment(APP1, &body)
}

/// APP1 segment carrying an XMP packet (no Exif signature).
pub fn xmp_app1() -> Vec<u8> {
    let packet = b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">\xFF\xD9\xFF\xE1</x:xmpmeta>";
    segment(APP1, packet)
}

/// APP0 JFIF segment.
pub fn jfif_app0() -> Vec<u8> {
    segment(APP0, b"JFIF\0\x01\x01\0\0\x48\0\x48\0\0")
}

/// SOI + segments + a stub quantization table + EOI.
pub fn jpeg(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut out = SOI.to_be_bytes().to_vec();
    for s in segments {
        out.extend_from_slice(s);
    }
    out.extend(segment(DQT, &[0u8; 65]));
    out.extend_from_slice(&EOI.to_be_bytes());
    out
}

/// Complete JPEG with JFIF and Exif segments.
pub fn jpeg_with_exif(payload: &[u8]) -> Vec<u8> {
    jpeg(&[jfif_app0(), exif_app1(payload)])
}
