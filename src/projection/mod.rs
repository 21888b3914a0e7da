//! Projection descriptors.
//!
//! A descriptor packages the parameters of one projection (its kind, pixel
//! dimensions and kind-specific options) and turns them into the token a
//! [`ProjectionGeometryProvider`](crate::geometry::ProjectionGeometryProvider)
//! expects. Descriptors never compute geometry themselves.

mod config;
mod descriptor;

use thiserror::Error;

pub use config::{CubemapOptions, ProjectionKind};
pub use descriptor::{Cubemap, Equirectangular, ProjectionDescriptor};

/// Errors raised when constructing a projection descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Unknown projection '{0}'")]
    UnknownProjection(String),
    #[error("Equirectangular width must be at least 2, got {0}")]
    InvalidWidth(u32),
    #[error("Equirectangular height must be width / 2 = {expected}, got {height} (width {width})")]
    HeightMismatch { width: u32, height: u32, expected: u32 },
    #[error("Cubemap side length {0} is out of range")]
    InvalidSideLength(u32),
    #[error("Border padding {padding} leaves no usable pixels on a {side_length}px face")]
    BorderPaddingTooLarge { padding: u32, side_length: u32 },
}
