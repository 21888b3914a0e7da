//! In-memory raster images and the sampling primitives used for resampling.
//!
//! Images are stored row-major with interleaved 8-bit channels. Sampling
//! treats integer coordinates as pixel positions (no half-pixel offset) and
//! resolves out-of-range taps by wrapping around both axes.

mod image;
mod sample;

pub use self::image::{Image, RasterError, MAX_CHANNELS};
pub use sample::{lanczos4_weights, sample_lanczos4_wrap, wrap_index, LANCZOS4_TAPS};
