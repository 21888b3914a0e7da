//! Projection options and names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DescriptorError;

/// Options for cubemap projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CubemapOptions {
    /// Margin in pixels reserved on every face edge when sampling a cubemap
    /// source, keeping the interpolation kernel away from face seams.
    pub border_padding: u32,
}

impl CubemapOptions {
    pub fn with_border_padding(border_padding: u32) -> Self {
        Self { border_padding }
    }
}

/// The supported projection kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Equirectangular,
    Cubemap,
}

impl ProjectionKind {
    pub const fn name(self) -> &'static str {
        match self {
            ProjectionKind::Equirectangular => "equirectangular",
            ProjectionKind::Cubemap => "cubemap",
        }
    }

    /// Number of input images a conversion from this projection expects.
    pub const fn input_image_count(self) -> usize {
        match self {
            ProjectionKind::Equirectangular => 1,
            ProjectionKind::Cubemap => 6,
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionKind {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equirectangular" => Ok(ProjectionKind::Equirectangular),
            "cubemap" => Ok(ProjectionKind::Cubemap),
            other => Err(DescriptorError::UnknownProjection(other.to_string())),
        }
    }
}
