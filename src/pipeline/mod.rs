//! Remap pipeline for converting images between projections.
//!
//! The pipeline asks a [`ProjectionGeometryProvider`](crate::geometry::ProjectionGeometryProvider)
//! for coordinate tables and resamples the source image through them with a
//! fixed Lanczos-4 kernel and wrap-around addressing.

mod remap;

pub use remap::{resample, RemapError, RemapPipeline};
