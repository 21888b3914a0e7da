//! Loading and saving images through the `image` crate.
//!
//! Decoded images are converted to 8-bit [`Image`] buffers with 1 to 4
//! channels. Formats are chosen from file extensions.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, LumaA, Rgb, Rgba};
use thiserror::Error;

use crate::cubemap::CubeFaces;
use crate::raster::{Image, RasterError};

/// Errors that can occur while reading or writing image files.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),
    #[error("Unsupported color layout: {0}")]
    UnsupportedColor(String),
}

impl TryFrom<DynamicImage> for Image {
    type Error = ImageIoError;

    fn try_from(dynamic: DynamicImage) -> Result<Self, Self::Error> {
        let (width, height) = (dynamic.width(), dynamic.height());
        let (channels, data) = match dynamic {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other => {
                log::debug!("converting {:?} image to 8 bits per channel", other.color());
                if other.color().has_alpha() {
                    (4, other.to_rgba8().into_raw())
                } else {
                    (3, other.to_rgb8().into_raw())
                }
            }
        };
        Ok(Image::from_raw(width, height, channels, data)?)
    }
}

impl TryFrom<Image> for DynamicImage {
    type Error = ImageIoError;

    fn try_from(img: Image) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        let channels = img.channels();
        let data = img.into_raw();
        let dynamic = match channels {
            1 => ImageBuffer::<Luma<u8>, _>::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
            2 => ImageBuffer::<LumaA<u8>, _>::from_raw(width, height, data).map(DynamicImage::ImageLumaA8),
            3 => ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
            4 => ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
            _ => None,
        };
        dynamic.ok_or_else(|| {
            ImageIoError::UnsupportedColor(format!("{} channel(s) at {}x{}", channels, width, height))
        })
    }
}

/// Decodes the image at `path`.
pub fn load_image(path: &Path) -> Result<Image, ImageIoError> {
    let dynamic = image::open(path)?;
    let img = Image::try_from(dynamic)?;
    log::debug!(
        "loaded {} ({}x{}, {} channel(s))",
        path.display(),
        img.width(),
        img.height(),
        img.channels()
    );
    Ok(img)
}

/// Decodes every path in order.
pub fn load_faces<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Image>, ImageIoError> {
    paths.iter().map(|p| load_image(p.as_ref())).collect()
}

/// Encodes `img` to `path`, choosing the format from the file extension.
///
/// JPEG has no alpha channel, so alpha is dropped when writing one.
pub fn save_image(img: &Image, path: &Path) -> Result<(), ImageIoError> {
    let format = ImageFormat::from_path(path)?;
    let mut dynamic = DynamicImage::try_from(img.clone())?;
    if format == ImageFormat::Jpeg && dynamic.color().has_alpha() {
        log::warn!("dropping alpha channel for JPEG output {}", path.display());
        dynamic = match img.channels() {
            2 => DynamicImage::ImageLuma8(dynamic.to_luma8()),
            _ => DynamicImage::ImageRgb8(dynamic.to_rgb8()),
        };
    }
    dynamic.save_with_format(path, format)?;
    Ok(())
}

/// Writes each face of `faces` as `{base_name}_{face}.{extension}` inside
/// `output_dir`, creating the directory if needed.
///
/// Returns the written paths in face order.
pub fn save_faces(
    faces: &CubeFaces,
    output_dir: &Path,
    base_name: &str,
    extension: &str,
) -> Result<Vec<PathBuf>, ImageIoError> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(6);
    for (id, face) in faces.iter() {
        let filename = format!("{}_{}.{}", base_name, id.short_name(), extension);
        let path = output_dir.join(filename);
        save_image(face, &path)?;
        written.push(path);
    }
    Ok(written)
}
