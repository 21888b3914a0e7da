//! Projection geometry.
//!
//! A [`ProjectionGeometryProvider`] turns a pair of projection geometries into
//! coordinate tables that map every destination pixel to a fractional source
//! coordinate. The remap pipeline consumes providers only through this trait;
//! [`SphereGeometry`] is the built-in analytic implementation.

mod analytic;
mod table;

use thiserror::Error;

pub use analytic::{ProjectionModel, SphereGeometry};
pub use table::{CoordinateTable, CoordinateTables};

/// Errors reported by a geometry provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Unsupported projection: {0}")]
    UnsupportedProjection(String),
    #[error("Malformed geometry token: {0}")]
    MalformedToken(String),
    #[error("Invalid coordinate tables: {0}")]
    InvalidTables(String),
}

/// Source of coordinate tables for a projection pair.
///
/// Tokens are opaque to callers: they are created by the provider and handed
/// back to it unchanged.
pub trait ProjectionGeometryProvider {
    /// The provider's description of one projection geometry.
    type Token;

    /// Token for an equirectangular (spherical) image of `width`x`height`.
    fn spherical_token(&self, width: u32, height: u32) -> Result<Self::Token, GeometryError>;

    /// Token for a cubemap with faces of `side_length` and `border_padding`
    /// margin pixels per face edge.
    fn cubemap_token(
        &self,
        side_length: u32,
        border_padding: u32,
    ) -> Result<Self::Token, GeometryError>;

    /// Builds the x/y tables mapping every pixel of `output` to a coordinate in
    /// an `input` image. Both tables are sized to the output's pixel grid.
    fn build_coordinate_tables(
        &self,
        input: &Self::Token,
        output: &Self::Token,
    ) -> Result<CoordinateTables, GeometryError>;
}
