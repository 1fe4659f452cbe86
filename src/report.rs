//! Serializable summaries of decoded documents.
//!
//! Used by the binary for both text and JSON output.

use std::fmt;

use serde::Serialize;

use crate::format::exif::{
    tag_name, Directory, DirectoryName, ExifDocument, FieldRecord, Orientation,
};

/// One decoded field, rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    /// Tag as `0xNNNN`
    pub tag: String,

    /// Well-known tag name, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,

    pub type_code: u16,

    /// Type name, `None` for unrecognized type codes
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<&'static str>,

    pub count: u32,

    /// Textual rendering of the decoded value
    pub value: String,

    /// Raw bytes as hex
    pub raw: String,
}

impl FieldReport {
    pub fn new(directory: DirectoryName, field: &FieldRecord) -> Self {
        Self {
            tag: format!("0x{:04X}", field.tag()),
            name: tag_name(directory, field.tag()),
            type_code: field.type_code(),
            type_name: field.field_type().map(|t| t.name()),
            count: field.count(),
            value: field.to_string(),
            raw: hex::encode_upper(field.raw_bytes()),
        }
    }
}

/// One directory and its fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryReport {
    pub name: DirectoryName,
    pub next_directory_offset: u32,
    pub fields: Vec<FieldReport>,
}

impl DirectoryReport {
    pub fn new(directory: &Directory) -> Self {
        Self {
            name: directory.name(),
            next_directory_offset: directory.next_directory_offset(),
            fields: directory
                .fields()
                .map(|field| FieldReport::new(directory.name(), field))
                .collect(),
        }
    }
}

/// Everything decoded from one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub byte_order: &'static str,
    pub orientation: u16,
    pub transform: Orientation,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<DirectoryReport>,
}

impl FileReport {
    /// Summarize `document`.
    ///
    /// `only` restricts output to a single directory; `orientation_only`
    /// omits directories entirely.
    pub fn new(
        path: impl Into<String>,
        document: &ExifDocument,
        only: Option<DirectoryName>,
        orientation_only: bool,
    ) -> Self {
        let directories = if orientation_only {
            Vec::new()
        } else {
            document
                .directories()
                .filter(|dir| only.map_or(true, |name| dir.name() == name))
                .map(DirectoryReport::new)
                .collect()
        };

        Self {
            path: path.into(),
            byte_order: document.byte_order().marker(),
            orientation: document.orientation(),
            transform: document.orientation_transform(),
            directories,
        }
    }

    /// Human-readable multi-line rendering.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path)?;
        writeln!(
            f,
            "  byte order: {}, orientation: {} ({:?})",
            self.byte_order, self.orientation, self.transform
        )?;

        for dir in &self.directories {
            writeln!(f, "  [{}]", dir.name)?;
            for field in &dir.fields {
                let label = field.name.unwrap_or("-");
                let type_name = field.type_name.unwrap_or("?");
                writeln!(
                    f,
                    "    {} {:<28} {:<9} {:>5}  {}",
                    field.tag, label, type_name, field.count, field.value
                )?;
            }
        }

        Ok(())
    }
}
