//! Cube face identification and enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CubemapError;

/// Identifies a cube face by its outward axis direction.
///
/// The discriminants fix the caller-visible face order used when composing
/// and splitting atlases: `+x, -x, +y, -y, +z, -z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FaceId {
    /// +X face
    #[serde(rename = "+x")]
    PosX = 0,
    /// -X face
    #[serde(rename = "-x")]
    NegX = 1,
    /// +Y face
    #[serde(rename = "+y")]
    PosY = 2,
    /// -Y face
    #[serde(rename = "-y")]
    NegY = 3,
    /// +Z face (up)
    #[serde(rename = "+z")]
    PosZ = 4,
    /// -Z face (down)
    #[serde(rename = "-z")]
    NegZ = 5,
}

impl FaceId {
    /// Returns all six faces in composition order.
    pub const fn all() -> [FaceId; 6] {
        [
            FaceId::PosX,
            FaceId::NegX,
            FaceId::PosY,
            FaceId::NegY,
            FaceId::PosZ,
            FaceId::NegZ,
        ]
    }

    /// Returns the face index (0-5).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a face from an index (0-5).
    pub const fn from_index(index: usize) -> Option<FaceId> {
        match index {
            0 => Some(FaceId::PosX),
            1 => Some(FaceId::NegX),
            2 => Some(FaceId::PosY),
            3 => Some(FaceId::NegY),
            4 => Some(FaceId::PosZ),
            5 => Some(FaceId::NegZ),
            _ => None,
        }
    }

    /// Returns the axis label (e.g., "+x", "-z").
    pub const fn label(self) -> &'static str {
        match self {
            FaceId::PosX => "+x",
            FaceId::NegX => "-x",
            FaceId::PosY => "+y",
            FaceId::NegY => "-y",
            FaceId::PosZ => "+z",
            FaceId::NegZ => "-z",
        }
    }

    /// Returns a file-name friendly name (e.g., "posx", "negy").
    pub const fn short_name(self) -> &'static str {
        match self {
            FaceId::PosX => "posx",
            FaceId::NegX => "negx",
            FaceId::PosY => "posy",
            FaceId::NegY => "negy",
            FaceId::PosZ => "posz",
            FaceId::NegZ => "negz",
        }
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FaceId {
    type Err = CubemapError;

    /// Accepts either the axis label (`"+x"`) or the short name (`"posx"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FaceId::all()
            .into_iter()
            .find(|face| s == face.label() || s.eq_ignore_ascii_case(face.short_name()))
            .ok_or_else(|| CubemapError::UnknownFace(s.to_string()))
    }
}
