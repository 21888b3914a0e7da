//! 360° panorama projection conversion.
//!
//! This crate converts panoramas between the equirectangular projection and
//! cubemaps. Six face images are packed into an atlas, resampled through
//! coordinate tables supplied by a geometry provider, and optionally split
//! back into faces.

pub mod raster;
pub mod cubemap;
pub mod projection;
pub mod geometry;
pub mod pipeline;
pub mod io;

pub use raster::Image;
pub use cubemap::{compose, split, CubeFaces, CubemapError, FaceId, FaceLayout};
pub use projection::{Cubemap, CubemapOptions, DescriptorError, Equirectangular, ProjectionDescriptor, ProjectionKind};
pub use geometry::{CoordinateTables, GeometryError, ProjectionGeometryProvider, SphereGeometry};
pub use pipeline::{RemapError, RemapPipeline};
