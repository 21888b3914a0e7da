//! Placement of the six faces inside an atlas image.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CubemapError, FaceId};

/// How six square faces are arranged in one atlas image.
///
/// ```text
/// Strip (6S x S):
///  ------ ------ ------ ------ ------ ------
/// |  +x  |  -x  |  +y  |  -y  |  +z  |  -z  |
///  ------ ------ ------ ------ ------ ------
///
/// Cross (4S x 3S):
///  ------
/// |  +z  |
///  ------ ------ ------ ------
/// |  -y  |  +x  |  +y  |  -x  |
///  ------ ------ ------ ------
/// |  -z  |
///  ------
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceLayout {
    /// Six faces side by side, in face order.
    #[default]
    Strip,
    /// A 4x3 grid with six occupied cells.
    Cross,
}

impl FaceLayout {
    /// Grid size in cells as `(columns, rows)`.
    pub const fn grid(self) -> (u32, u32) {
        match self {
            FaceLayout::Strip => (6, 1),
            FaceLayout::Cross => (4, 3),
        }
    }

    /// Grid cell `(column, row)` holding `face`.
    pub const fn cell(self, face: FaceId) -> (u32, u32) {
        match self {
            FaceLayout::Strip => (face.index() as u32, 0),
            FaceLayout::Cross => match face {
                FaceId::PosX => (1, 1),
                FaceId::NegX => (3, 1),
                FaceId::PosY => (2, 1),
                FaceId::NegY => (0, 1),
                FaceId::PosZ => (0, 0),
                FaceId::NegZ => (0, 2),
            },
        }
    }

    /// Pixel offset of the top-left corner of `face` for faces of `side_length`.
    pub fn offset_for(self, face: FaceId, side_length: u32) -> Result<(u32, u32), CubemapError> {
        // Validates the side and guarantees the products below cannot overflow.
        self.atlas_size(side_length)?;
        let (col, row) = self.cell(face);
        Ok((col * side_length, row * side_length))
    }

    /// Atlas dimensions `(width, height)` for faces of `side_length`.
    pub fn atlas_size(self, side_length: u32) -> Result<(u32, u32), CubemapError> {
        if side_length == 0 {
            return Err(CubemapError::InvalidSideLength(side_length));
        }
        let (cols, rows) = self.grid();
        match (side_length.checked_mul(cols), side_length.checked_mul(rows)) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(CubemapError::InvalidSideLength(side_length)),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FaceLayout::Strip => "strip",
            FaceLayout::Cross => "cross",
        }
    }
}

impl fmt::Display for FaceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FaceLayout {
    type Err = CubemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strip" => Ok(FaceLayout::Strip),
            "cross" => Ok(FaceLayout::Cross),
            other => Err(CubemapError::UnknownLayout(other.to_string())),
        }
    }
}
