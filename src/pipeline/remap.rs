//! Table-driven resampling between two projections.

use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;

use crate::geometry::{CoordinateTables, GeometryError, ProjectionGeometryProvider};
use crate::projection::ProjectionDescriptor;
use crate::raster::{sample_lanczos4_wrap, Image, RasterError};

/// Errors that can occur while remapping an image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemapError {
    #[error("Geometry unavailable: {0}")]
    GeometryUnavailable(#[from] GeometryError),
    #[error(
        "Coordinate tables do not match the {expected_width}x{expected_height} output \
         (x table {x:?}, y table {y:?})"
    )]
    TableSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        x: (u32, u32),
        y: (u32, u32),
    },
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),
}

/// Converts images from one projection to another using tables from `P`.
#[derive(Debug, Clone, Default)]
pub struct RemapPipeline<P> {
    provider: P,
}

impl<P: ProjectionGeometryProvider> RemapPipeline<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resamples `source`, laid out as `input`, into a new image laid out as
    /// `output`.
    ///
    /// The source is only read. Table dimensions are checked against
    /// `output` before any pixel is written.
    pub fn run(
        &self,
        source: &Image,
        input: &ProjectionDescriptor,
        output: &ProjectionDescriptor,
    ) -> Result<Image, RemapError> {
        let input_token = input.geometry_token(&self.provider)?;
        let output_token = output.geometry_token(&self.provider)?;

        let start = Instant::now();
        let tables = self
            .provider
            .build_coordinate_tables(&input_token, &output_token)?;
        log::debug!(
            "built {}x{} coordinate tables for {} -> {} in {:.2?}",
            tables.x.width(),
            tables.x.height(),
            input,
            output,
            start.elapsed()
        );

        let (width, height) = output.dimensions();
        if tables.x.dimensions() != (width, height) || tables.y.dimensions() != (width, height) {
            return Err(RemapError::TableSizeMismatch {
                expected_width: width,
                expected_height: height,
                x: tables.x.dimensions(),
                y: tables.y.dimensions(),
            });
        }

        resample(source, &tables)
    }
}

/// Samples `source` at every coordinate pair of `tables`.
///
/// The result has the tables' dimensions and the source's channel count.
/// Rows are filled in parallel.
pub fn resample(source: &Image, tables: &CoordinateTables) -> Result<Image, RemapError> {
    let (width, height) = tables.x.dimensions();
    if tables.y.dimensions() != (width, height) {
        return Err(RemapError::TableSizeMismatch {
            expected_width: width,
            expected_height: height,
            x: tables.x.dimensions(),
            y: tables.y.dimensions(),
        });
    }

    let start = Instant::now();
    let channels = source.channels() as usize;
    let mut dest = Image::new(width, height, source.channels())?;
    let row_len = dest.row_len();

    dest.as_raw_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let xs = tables.x.row(y as u32);
            let ys = tables.y.row(y as u32);
            for ((pixel, &sx), &sy) in row.chunks_exact_mut(channels).zip(xs).zip(ys) {
                sample_lanczos4_wrap(source, sx, sy, pixel);
            }
        });

    log::debug!(
        "resampled {}x{} -> {}x{} in {:.2?}",
        source.width(),
        source.height(),
        width,
        height,
        start.elapsed()
    );
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CoordinateTable;
    use crate::projection::{Cubemap, CubemapOptions, Equirectangular};

    /// Provider whose tokens are plain output sizes and whose tables are
    /// the identity, optionally resized.
    struct IdentityProvider {
        shrink: u32,
    }

    impl ProjectionGeometryProvider for IdentityProvider {
        type Token = (u32, u32);

        fn spherical_token(&self, width: u32, height: u32) -> Result<(u32, u32), GeometryError> {
            Ok((width, height))
        }

        fn cubemap_token(&self, side: u32, _padding: u32) -> Result<(u32, u32), GeometryError> {
            Ok((side * 6, side))
        }

        fn build_coordinate_tables(
            &self,
            _input: &(u32, u32),
            output: &(u32, u32),
        ) -> Result<CoordinateTables, GeometryError> {
            CoordinateTables::identity(output.0 - self.shrink, output.1)
        }
    }

    struct FailingProvider;

    impl ProjectionGeometryProvider for FailingProvider {
        type Token = ();

        fn spherical_token(&self, _: u32, _: u32) -> Result<(), GeometryError> {
            Ok(())
        }

        fn cubemap_token(&self, _: u32, _: u32) -> Result<(), GeometryError> {
            Err(GeometryError::UnsupportedProjection("cubemap".to_string()))
        }

        fn build_coordinate_tables(&self, _: &(), _: &()) -> Result<CoordinateTables, GeometryError> {
            Err(GeometryError::InvalidTables("no tables".to_string()))
        }
    }

    fn gradient(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, 3, |x, y| {
            [(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, 0]
        })
        .unwrap()
    }

    #[test]
    fn test_identity_tables_copy_exactly() {
        let pipeline = RemapPipeline::new(IdentityProvider { shrink: 0 });
        let desc: ProjectionDescriptor = Equirectangular::new(32).unwrap().into();
        let source = gradient(32, 16);
        let before = source.clone();

        let out = pipeline.run(&source, &desc, &desc).unwrap();
        assert_eq!(out, source);
        assert_eq!(source, before);
    }

    #[test]
    fn test_table_size_mismatch() {
        let pipeline = RemapPipeline::new(IdentityProvider { shrink: 1 });
        let desc: ProjectionDescriptor = Equirectangular::new(32).unwrap().into();
        let source = gradient(32, 16);

        let err = pipeline.run(&source, &desc, &desc).unwrap_err();
        assert_eq!(
            err,
            RemapError::TableSizeMismatch {
                expected_width: 32,
                expected_height: 16,
                x: (31, 16),
                y: (31, 16),
            }
        );
    }

    #[test]
    fn test_provider_errors_propagate() {
        let pipeline = RemapPipeline::new(FailingProvider);
        let equi: ProjectionDescriptor = Equirectangular::new(8).unwrap().into();
        let cube: ProjectionDescriptor = Cubemap::with_side(4, &CubemapOptions::default())
            .unwrap()
            .into();
        let source = gradient(8, 4);

        assert!(matches!(
            pipeline.run(&source, &equi, &cube),
            Err(RemapError::GeometryUnavailable(GeometryError::UnsupportedProjection(_)))
        ));
        assert!(matches!(
            pipeline.run(&source, &equi, &equi),
            Err(RemapError::GeometryUnavailable(GeometryError::InvalidTables(_)))
        ));
    }

    #[test]
    fn test_resample_wraps_and_keeps_channels() {
        let source = Image::from_fn(4, 2, 2, |x, y| [(x * 10 + y) as u8, 200, 0, 0]).unwrap();
        let x = CoordinateTable::from_vec(2, 1, vec![4.0, -1.0]).unwrap();
        let y = CoordinateTable::from_vec(2, 1, vec![2.0, 1.0]).unwrap();
        let out = resample(&source, &CoordinateTables::new(x, y)).unwrap();

        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(out.channels(), 2);
        // (4, 2) wraps to (0, 0); (-1, 1) wraps to (3, 1).
        assert_eq!(out.pixel(0, 0), &[0, 200]);
        assert_eq!(out.pixel(1, 0), &[31, 200]);
    }

    #[test]
    fn test_resample_rejects_unequal_tables() {
        let source = gradient(4, 4);
        let tables = CoordinateTables::new(
            CoordinateTable::from_vec(2, 2, vec![0.0; 4]).unwrap(),
            CoordinateTable::from_vec(4, 1, vec![0.0; 4]).unwrap(),
        );
        assert!(matches!(
            resample(&source, &tables),
            Err(RemapError::TableSizeMismatch { .. })
        ));
    }
}
