//! Equirectangular and cubemap descriptors.

use std::fmt;

use crate::geometry::{GeometryError, ProjectionGeometryProvider};

use super::{CubemapOptions, DescriptorError, ProjectionKind};

/// A 2:1 equirectangular panorama.
///
/// The height is always derived from the width by integer division, so odd
/// widths truncate (`4097 -> 2048`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Equirectangular {
    width: u32,
    height: u32,
}

impl Equirectangular {
    /// Creates a descriptor for an image `width` pixels wide.
    pub fn new(width: u32) -> Result<Self, DescriptorError> {
        if width < 2 {
            return Err(DescriptorError::InvalidWidth(width));
        }
        Ok(Self {
            width,
            height: width / 2,
        })
    }

    /// Creates a descriptor and checks that `height` is the derived height.
    pub fn with_dimensions(width: u32, height: u32) -> Result<Self, DescriptorError> {
        let desc = Self::new(width)?;
        if desc.height != height {
            return Err(DescriptorError::HeightMismatch {
                width,
                height,
                expected: desc.height,
            });
        }
        Ok(desc)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// A cubemap stored as a 6:1 strip atlas of square faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cubemap {
    side_length: u32,
    border_padding: u32,
}

impl Cubemap {
    /// Creates a descriptor from an atlas width.
    ///
    /// The face side is `atlas_width / 4` (integer division), matching the
    /// width convention used for requested output sizes.
    pub fn new(atlas_width: u32, options: &CubemapOptions) -> Result<Self, DescriptorError> {
        Self::with_side(atlas_width / 4, options)
    }

    /// Creates a descriptor from a known face side length.
    pub fn with_side(side_length: u32, options: &CubemapOptions) -> Result<Self, DescriptorError> {
        if side_length == 0 || side_length.checked_mul(6).is_none() {
            return Err(DescriptorError::InvalidSideLength(side_length));
        }
        let padding = options.border_padding;
        if padding.saturating_mul(2) >= side_length {
            return Err(DescriptorError::BorderPaddingTooLarge {
                padding,
                side_length,
            });
        }
        Ok(Self {
            side_length,
            border_padding: padding,
        })
    }

    pub fn side_length(&self) -> u32 {
        self.side_length
    }

    pub fn border_padding(&self) -> u32 {
        self.border_padding
    }
}

/// Parameters of one projection, as consumed by the remap pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionDescriptor {
    Equirectangular(Equirectangular),
    Cubemap(Cubemap),
}

impl ProjectionDescriptor {
    /// Builds a descriptor of `kind` for an image `width` pixels wide.
    ///
    /// `options` only applies to cubemaps.
    pub fn from_width(
        kind: ProjectionKind,
        width: u32,
        options: &CubemapOptions,
    ) -> Result<Self, DescriptorError> {
        Ok(match kind {
            ProjectionKind::Equirectangular => Equirectangular::new(width)?.into(),
            ProjectionKind::Cubemap => Cubemap::new(width, options)?.into(),
        })
    }

    pub fn kind(&self) -> ProjectionKind {
        match self {
            ProjectionDescriptor::Equirectangular(_) => ProjectionKind::Equirectangular,
            ProjectionDescriptor::Cubemap(_) => ProjectionKind::Cubemap,
        }
    }

    /// Pixel dimensions `(width, height)` of an image in this projection.
    ///
    /// Cubemaps are laid out as a 6:1 strip.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ProjectionDescriptor::Equirectangular(e) => (e.width, e.height),
            ProjectionDescriptor::Cubemap(c) => (c.side_length * 6, c.side_length),
        }
    }

    /// Asks `provider` for the geometry token describing this projection.
    pub fn geometry_token<P>(&self, provider: &P) -> Result<P::Token, GeometryError>
    where
        P: ProjectionGeometryProvider + ?Sized,
    {
        match self {
            ProjectionDescriptor::Equirectangular(e) => provider.spherical_token(e.width, e.height),
            ProjectionDescriptor::Cubemap(c) => {
                provider.cubemap_token(c.side_length, c.border_padding)
            }
        }
    }
}

impl From<Equirectangular> for ProjectionDescriptor {
    fn from(e: Equirectangular) -> Self {
        ProjectionDescriptor::Equirectangular(e)
    }
}

impl From<Cubemap> for ProjectionDescriptor {
    fn from(c: Cubemap) -> Self {
        ProjectionDescriptor::Cubemap(c)
    }
}

impl fmt::Display for ProjectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        match self {
            ProjectionDescriptor::Equirectangular(_) => write!(f, "equirectangular {}x{}", w, h),
            ProjectionDescriptor::Cubemap(c) => write!(
                f,
                "cubemap {}x{} (face {}px, padding {}px)",
                w, h, c.side_length, c.border_padding
            ),
        }
    }
}
