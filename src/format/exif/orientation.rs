//! Interpretation of the Orientation tag (0x0112).
//!
//! The stored value describes how the camera held the sensor; a viewer
//! applies the matching transform to display the image upright.

use serde::Serialize;

/// Transform needed to display an image upright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    /// 1: Already upright
    #[default]
    Normal,
    /// 2: Mirrored left to right
    FlipHorizontal,
    /// 3: Upside down
    Rotate180,
    /// 4: Mirrored top to bottom
    FlipVertical,
    /// 5: Mirrored along the top-left/bottom-right diagonal
    Transpose,
    /// 6: Needs a 90 degree clockwise rotation
    Rotate90,
    /// 7: Mirrored along the top-right/bottom-left diagonal
    Transverse,
    /// 8: Needs a 270 degree clockwise rotation
    Rotate270,
}

impl Orientation {
    /// Convert a raw EXIF orientation value. Values outside 1..=8 are `None`.
    pub fn from_exif(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::FlipHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipVertical),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    pub const fn to_exif(self) -> u16 {
        match self {
            Self::Normal => 1,
            Self::FlipHorizontal => 2,
            Self::Rotate180 => 3,
            Self::FlipVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// Clockwise rotation to apply, in degrees, after any horizontal flip.
    pub const fn rotation_degrees(self) -> u16 {
        match self {
            Self::Normal | Self::FlipHorizontal => 0,
            Self::Rotate90 | Self::Transverse => 90,
            Self::Rotate180 | Self::FlipVertical => 180,
            Self::Rotate270 | Self::Transpose => 270,
        }
    }

    /// Whether a horizontal flip is applied before the rotation.
    pub const fn is_mirrored(self) -> bool {
        matches!(
            self,
            Self::FlipHorizontal | Self::FlipVertical | Self::Transpose | Self::Transverse
        )
    }

    /// Whether displaying upright swaps width and height.
    pub const fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }
}
