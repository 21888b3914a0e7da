//! Owned 8-bit image buffer.

use thiserror::Error;

/// Largest supported number of interleaved channels (RGBA).
pub const MAX_CHANNELS: u8 = 4;

/// Errors raised when building or slicing an [`Image`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("Image dimensions must be non-zero, got {0}x{1}")]
    EmptyImage(u32, u32),
    #[error("Unsupported channel count: {0} (expected 1 to 4)")]
    InvalidChannelCount(u8),
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("Region {width}x{height} at ({x}, {y}) does not fit in a {image_width}x{image_height} image")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
}

/// A 2-D buffer of interleaved 8-bit pixels.
///
/// Pixels are stored in row-major order; pixel `(x, y)` starts at byte
/// `(y * width + x) * channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Image {
    /// Creates a zero-filled image.
    pub fn new(width: u32, height: u32, channels: u8) -> Result<Self, RasterError> {
        let len = buffer_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0; len],
        })
    }

    /// Wraps an existing buffer, checking that its length matches the dimensions.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = buffer_len(width, height, channels)?;
        if data.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    ///
    /// Only the first `channels` bytes of each returned array are used.
    pub fn from_fn<F>(width: u32, height: u32, channels: u8, mut f: F) -> Result<Self, RasterError>
    where
        F: FnMut(u32, u32) -> [u8; MAX_CHANNELS as usize],
    {
        let mut img = Self::new(width, height, channels)?;
        let c = channels as usize;
        for y in 0..height {
            for x in 0..width {
                let px = f(x, y);
                img.pixel_mut(x, y).copy_from_slice(&px[..c]);
            }
        }
        Ok(img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Number of bytes in one row.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns the bytes of row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row index out of bounds");
        let len = self.row_len();
        let start = y as usize * len;
        &self.data[start..start + len]
    }

    /// Returns the bytes of row `y` mutably.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row index out of bounds");
        let len = self.row_len();
        let start = y as usize * len;
        &mut self.data[start..start + len]
    }

    /// Returns the channel bytes of pixel `(x, y)`.
    ///
    /// # Panics
    /// Panics if the pixel is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let idx = self.pixel_offset(x, y);
        &self.data[idx..idx + self.channels as usize]
    }

    /// Returns the channel bytes of pixel `(x, y)` mutably.
    ///
    /// # Panics
    /// Panics if the pixel is outside the image.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let idx = self.pixel_offset(x, y);
        let c = self.channels as usize;
        &mut self.data[idx..idx + c]
    }

    /// Copies all of `src` into this image with its top-left corner at `(x, y)`.
    ///
    /// Channel counts must match; no conversion is performed.
    pub fn copy_from(&mut self, src: &Image, x: u32, y: u32) -> Result<(), RasterError> {
        if src.channels != self.channels {
            return Err(RasterError::InvalidChannelCount(src.channels));
        }
        self.check_region(x, y, src.width, src.height)?;

        let c = self.channels as usize;
        let dst_start = x as usize * c;
        let span = src.row_len();
        for row in 0..src.height {
            let dst = self.row_mut(y + row);
            dst[dst_start..dst_start + span].copy_from_slice(src.row(row));
        }
        Ok(())
    }

    /// Copies the `width`x`height` region at `(x, y)` into a new image.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Image, RasterError> {
        self.check_region(x, y, width, height)?;
        let mut out = Image::new(width, height, self.channels)?;

        let c = self.channels as usize;
        let src_start = x as usize * c;
        let span = out.row_len();
        for row in 0..height {
            out.row_mut(row)
                .copy_from_slice(&self.row(y + row)[src_start..src_start + span]);
        }
        Ok(out)
    }

    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel index out of bounds");
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    fn check_region(&self, x: u32, y: u32, width: u32, height: u32) -> Result<(), RasterError> {
        let fits = x <= self.width
            && y <= self.height
            && width <= self.width - x
            && height <= self.height - y;
        if fits {
            Ok(())
        } else {
            Err(RasterError::RegionOutOfBounds {
                x,
                y,
                width,
                height,
                image_width: self.width,
                image_height: self.height,
            })
        }
    }
}

fn buffer_len(width: u32, height: u32, channels: u8) -> Result<usize, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyImage(width, height));
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(RasterError::InvalidChannelCount(channels));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or(RasterError::BufferSizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, 3, |x, y| [x as u8, y as u8, (x + y) as u8, 0]).unwrap()
    }

    #[test]
    fn test_new_is_zero_filled() {
        let img = Image::new(4, 2, 3).unwrap();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.as_raw().len(), 24);
        assert!(img.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rejects_empty_and_bad_channels() {
        assert_eq!(Image::new(0, 4, 3), Err(RasterError::EmptyImage(0, 4)));
        assert_eq!(Image::new(4, 4, 0), Err(RasterError::InvalidChannelCount(0)));
        assert_eq!(Image::new(4, 4, 5), Err(RasterError::InvalidChannelCount(5)));
    }

    #[test]
    fn test_from_raw_checks_length() {
        let err = Image::from_raw(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferSizeMismatch {
                expected: 12,
                actual: 11
            }
        );
        assert!(Image::from_raw(2, 2, 3, vec![0; 12]).is_ok());
    }

    #[test]
    fn test_pixel_layout_is_row_major_interleaved() {
        let img = gradient(3, 2);
        assert_eq!(img.pixel(2, 1), &[2, 1, 3]);
        assert_eq!(&img.as_raw()[15..18], &[2, 1, 3]);
        assert_eq!(img.row(1).len(), 9);
    }

    #[test]
    fn test_copy_from_and_crop() {
        let patch = gradient(2, 2);
        let mut canvas = Image::new(5, 4, 3).unwrap();
        canvas.copy_from(&patch, 3, 2).unwrap();

        assert_eq!(canvas.pixel(3, 2), patch.pixel(0, 0));
        assert_eq!(canvas.pixel(4, 3), patch.pixel(1, 1));
        assert_eq!(canvas.pixel(2, 2), &[0, 0, 0]);

        let back = canvas.crop(3, 2, 2, 2).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn test_region_out_of_bounds() {
        let patch = gradient(2, 2);
        let mut canvas = Image::new(3, 3, 3).unwrap();
        assert!(matches!(
            canvas.copy_from(&patch, 2, 0),
            Err(RasterError::RegionOutOfBounds { .. })
        ));
        assert!(canvas.crop(0, 0, 4, 1).is_err());
    }

    #[test]
    fn test_copy_from_rejects_channel_mismatch() {
        let gray = Image::new(1, 1, 1).unwrap();
        let mut canvas = Image::new(3, 3, 3).unwrap();
        assert_eq!(
            canvas.copy_from(&gray, 0, 0),
            Err(RasterError::InvalidChannelCount(1))
        );
    }
}
