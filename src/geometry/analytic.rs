//! Analytic sphere/cubemap geometry.
//!
//! Every pixel position is mapped to a ray on the unit sphere and back. The
//! sphere uses `+z` as up; the centre of an equirectangular image looks along
//! `+x`, and longitude increases toward `+y`.

use std::f64::consts::PI;

use glam::DVec3;
use rayon::prelude::*;

use super::{CoordinateTable, CoordinateTables, GeometryError, ProjectionGeometryProvider};
use crate::cubemap::FaceId;

/// Geometry token understood by [`SphereGeometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionModel {
    /// Equirectangular image of `width`x`height` pixels.
    Spherical { width: u32, height: u32 },
    /// 6:1 strip atlas of `side`-pixel faces, sampled `border_padding`
    /// pixels inside each face edge.
    Cubemap { side: u32, border_padding: u32 },
}

impl ProjectionModel {
    /// Pixel dimensions `(width, height)` of an image in this projection.
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            ProjectionModel::Spherical { width, height } => (width, height),
            ProjectionModel::Cubemap { side, .. } => (side.saturating_mul(6), side),
        }
    }

    fn validate(&self) -> Result<(), GeometryError> {
        match *self {
            ProjectionModel::Spherical { width, height } => {
                if width < 2 || height == 0 {
                    return Err(GeometryError::MalformedToken(format!(
                        "spherical projection of {}x{}",
                        width, height
                    )));
                }
            }
            ProjectionModel::Cubemap {
                side,
                border_padding,
            } => {
                if side == 0 || side.checked_mul(6).is_none() {
                    return Err(GeometryError::MalformedToken(format!(
                        "cubemap face side {}",
                        side
                    )));
                }
                if border_padding.saturating_mul(2) >= side {
                    return Err(GeometryError::MalformedToken(format!(
                        "border padding {} on a {}px face",
                        border_padding, side
                    )));
                }
            }
        }
        Ok(())
    }

    /// Maps the pixel position `(u, v)` to a direction on the unit sphere.
    pub fn to_ray(&self, u: f64, v: f64) -> DVec3 {
        match *self {
            ProjectionModel::Spherical { width, height } => {
                let mid_w = width as f64 / 2.0;
                let mid_h = height as f64 / 2.0;
                let scale = mid_w / PI;

                let lon = (u - mid_w) / scale;
                let lat = -(v - mid_h) / scale;
                let (slat, clat) = lat.sin_cos();
                let (slon, clon) = lon.sin_cos();
                DVec3::new(clat * clon, clat * slon, slat)
            }
            ProjectionModel::Cubemap { side, .. } => {
                let side = side as f64;
                let index = (u / side).floor().clamp(0.0, 5.0);
                let face = FaceId::from_index(index as usize).unwrap_or(FaceId::PosX);

                // Local face coordinates in [-1, 1].
                let uu = 2.0 * ((u - index * side) / side) - 1.0;
                let vv = 2.0 * (v / side) - 1.0;
                let m = 1.0 / (1.0 + uu * uu + vv * vv).sqrt();

                match face {
                    FaceId::PosX => DVec3::new(m, uu * m, -vv * m),
                    FaceId::NegX => DVec3::new(-m, -uu * m, -vv * m),
                    FaceId::PosY => DVec3::new(-uu * m, m, -vv * m),
                    FaceId::NegY => DVec3::new(uu * m, -m, -vv * m),
                    FaceId::PosZ => DVec3::new(uu * m, -vv * m, m),
                    FaceId::NegZ => DVec3::new(uu * m, vv * m, -m),
                }
            }
        }
    }

    /// Maps a direction to the pixel position `(u, v)` that sees it.
    pub fn to_tex_coords(&self, ray: DVec3) -> (f64, f64) {
        match *self {
            ProjectionModel::Spherical { width, height } => {
                let mid_w = width as f64 / 2.0;
                let mid_h = height as f64 / 2.0;
                let scale = mid_w / PI;

                let ray = ray.normalize_or_zero();
                let lon = ray.y.atan2(ray.x);
                let lat = ray.z.clamp(-1.0, 1.0).asin();
                (scale * lon + mid_w, -scale * lat + mid_h)
            }
            ProjectionModel::Cubemap {
                side,
                border_padding,
            } => {
                let side = side as f64;
                let pad = border_padding as f64;
                let (face, s, t) = ray_to_face(ray);

                let u01 = 0.5 * (s + 1.0);
                let v01 = 0.5 * (t + 1.0);
                let inner = side - 2.0 * pad;
                (
                    face.index() as f64 * side + pad + u01 * inner,
                    pad + v01 * inner,
                )
            }
        }
    }
}

/// Picks the face a ray exits through and returns its local coordinates in
/// [-1, 1]. Ties on the dominant axis resolve toward z, then y, then x.
fn ray_to_face(r: DVec3) -> (FaceId, f64, f64) {
    let a = r.abs();
    let (face, s, t, major) = if a.z >= a.x && a.z >= a.y {
        if r.z > 0.0 {
            (FaceId::PosZ, r.x, -r.y, a.z)
        } else {
            (FaceId::NegZ, r.x, r.y, a.z)
        }
    } else if a.y >= a.x {
        if r.y > 0.0 {
            (FaceId::PosY, -r.x, -r.z, a.y)
        } else {
            (FaceId::NegY, r.x, -r.z, a.y)
        }
    } else if r.x > 0.0 {
        (FaceId::PosX, r.y, -r.z, a.x)
    } else {
        (FaceId::NegX, -r.y, -r.z, a.x)
    };

    if major <= 0.0 || !major.is_finite() {
        return (FaceId::PosX, 0.0, 0.0);
    }
    (face, s / major, t / major)
}

/// Analytic geometry provider for equirectangular and cubemap projections.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereGeometry;

impl SphereGeometry {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectionGeometryProvider for SphereGeometry {
    type Token = ProjectionModel;

    fn spherical_token(&self, width: u32, height: u32) -> Result<ProjectionModel, GeometryError> {
        let token = ProjectionModel::Spherical { width, height };
        token.validate()?;
        Ok(token)
    }

    fn cubemap_token(
        &self,
        side_length: u32,
        border_padding: u32,
    ) -> Result<ProjectionModel, GeometryError> {
        let token = ProjectionModel::Cubemap {
            side: side_length,
            border_padding,
        };
        token.validate()?;
        Ok(token)
    }

    fn build_coordinate_tables(
        &self,
        input: &ProjectionModel,
        output: &ProjectionModel,
    ) -> Result<CoordinateTables, GeometryError> {
        input.validate()?;
        output.validate()?;
        let (width, height) = output.dimensions();
        let row_len = width as usize;
        let len = row_len * height as usize;
        let mut xs = vec![0.0f32; len];
        let mut ys = vec![0.0f32; len];

        // Rows are independent: each one only reads the two tokens.
        xs.par_chunks_mut(row_len)
            .zip(ys.par_chunks_mut(row_len))
            .enumerate()
            .for_each(|(y, (row_x, row_y))| {
                for (x, (tx, ty)) in row_x.iter_mut().zip(row_y.iter_mut()).enumerate() {
                    let ray = output.to_ray(x as f64, y as f64);
                    let (u, v) = input.to_tex_coords(ray);
                    *tx = u as f32;
                    *ty = v as f32;
                }
            });

        Ok(CoordinateTables::new(
            CoordinateTable::from_vec(width, height, xs)?,
            CoordinateTable::from_vec(width, height, ys)?,
        ))
    }
}
