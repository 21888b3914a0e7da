//! Cubemap faces and atlases.
//!
//! Six square face images are packed into (and unpacked from) a single atlas
//! image according to a [`FaceLayout`]. Faces are always supplied and returned
//! in the fixed order `+x, -x, +y, -y, +z, -z`.

mod atlas;
mod face;
mod layout;

use thiserror::Error;

use crate::raster::RasterError;

pub use atlas::{compose, split, CubeFaces};
pub use face::FaceId;
pub use layout::FaceLayout;

/// Errors that can occur while building or taking apart a cubemap atlas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubemapError {
    #[error("Unknown face identifier '{0}'")]
    UnknownFace(String),
    #[error("Unknown face layout '{0}'")]
    UnknownLayout(String),
    #[error("Invalid face side length: {0}")]
    InvalidSideLength(u32),
    #[error("Expected 6 cubemap faces, got {0}")]
    WrongFaceCount(usize),
    #[error("Face {face} is {actual_width}x{actual_height} with {actual_channels} channel(s), expected {width}x{height} with {channels}")]
    FaceMismatch {
        face: FaceId,
        width: u32,
        height: u32,
        channels: u8,
        actual_width: u32,
        actual_height: u32,
        actual_channels: u8,
    },
    #[error("Cubemap faces must be square, got {0}x{1}")]
    FaceNotSquare(u32, u32),
    #[error("Atlas width {0} is not a multiple of 6 (expected a 6:1 strip)")]
    InvalidAspectRatio(u32),
    #[error("Atlas face sizes disagree: width gives {side_from_width}, height gives {side_from_height}")]
    NonSquareFace {
        side_from_width: u32,
        side_from_height: u32,
    },
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),
}

impl CubemapError {
    /// True for violations of the composition preconditions: wrong face count,
    /// faces disagreeing in size or channels, or non-square faces.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            CubemapError::WrongFaceCount(_)
                | CubemapError::FaceMismatch { .. }
                | CubemapError::FaceNotSquare(..)
        )
    }
}
