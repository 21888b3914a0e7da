//! Lanczos-4 sampling with wrap-around addressing.

use std::f64::consts::PI;

use super::image::{Image, MAX_CHANNELS};

/// Number of taps per axis of the Lanczos-4 kernel.
pub const LANCZOS4_TAPS: usize = 8;

/// Maps a possibly out-of-range index onto `[0, len)` by periodic wraparound.
///
/// `len` must be non-zero.
#[inline]
pub fn wrap_index(i: i64, len: u32) -> usize {
    i.rem_euclid(len as i64) as usize
}

/// Computes the 8 normalized Lanczos-4 weights for a fractional offset.
///
/// Weight `k` applies to the tap at `floor(s) - 3 + k`. An offset below
/// `f32::EPSILON` selects the centre tap exactly so that integer coordinates
/// reproduce the source pixel.
pub fn lanczos4_weights(frac: f32) -> [f32; LANCZOS4_TAPS] {
    let mut weights = [0.0f32; LANCZOS4_TAPS];
    if frac < f32::EPSILON {
        weights[3] = 1.0;
        return weights;
    }

    let f = frac as f64;
    let mut raw = [0.0f64; LANCZOS4_TAPS];
    let mut sum = 0.0;
    for (k, w) in raw.iter_mut().enumerate() {
        let t = f + 3.0 - k as f64;
        let pt = PI * t;
        // sinc(t) * sinc(t / 4)
        *w = 4.0 * pt.sin() * (pt * 0.25).sin() / (pt * pt);
        sum += *w;
    }
    for (dst, w) in weights.iter_mut().zip(raw) {
        *dst = (w / sum) as f32;
    }
    weights
}

/// Samples `img` at the fractional position `(x, y)` and writes one pixel to `out`.
///
/// Taps outside the image wrap around both axes. Accumulation happens in
/// `f32`; results are rounded to nearest and saturated to `0..=255`.
/// Non-finite coordinates produce a black pixel rather than panicking.
///
/// # Panics
/// Panics if `out` is shorter than `img.channels()`.
pub fn sample_lanczos4_wrap(img: &Image, x: f32, y: f32, out: &mut [u8]) {
    let c = img.channels() as usize;
    let (width, height) = img.dimensions();

    // Reducing first keeps the tap arithmetic in range; the fraction is unchanged.
    let x = x.rem_euclid(width as f32);
    let y = y.rem_euclid(height as f32);
    let x0 = x.floor();
    let y0 = y.floor();
    let wx = lanczos4_weights(x - x0);
    let wy = lanczos4_weights(y - y0);

    let base_x = x0 as i64 - 3;
    let base_y = y0 as i64 - 3;
    let cols: [usize; LANCZOS4_TAPS] =
        std::array::from_fn(|k| wrap_index(base_x + k as i64, width) * c);

    let mut acc = [0.0f32; MAX_CHANNELS as usize];
    for (j, &wy_j) in wy.iter().enumerate() {
        if wy_j == 0.0 {
            continue;
        }
        let row = img.row(wrap_index(base_y + j as i64, height) as u32);
        let mut row_acc = [0.0f32; MAX_CHANNELS as usize];
        for (&col, &wx_k) in cols.iter().zip(wx.iter()) {
            if wx_k == 0.0 {
                continue;
            }
            for (a, &v) in row_acc[..c].iter_mut().zip(&row[col..col + c]) {
                *a += wx_k * v as f32;
            }
        }
        for (a, r) in acc[..c].iter_mut().zip(row_acc) {
            *a += wy_j * r;
        }
    }

    for (dst, a) in out[..c].iter_mut().zip(acc) {
        *dst = a.round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, 3, |x, y| {
            let v = if (x + y) % 2 == 0 { 200 } else { 40 };
            [v, (x * 10) as u8, (y * 10) as u8, 0]
        })
        .unwrap()
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(-1, 5), 4);
        assert_eq!(wrap_index(-5, 5), 0);
        assert_eq!(wrap_index(-6, 5), 4);
        assert_eq!(wrap_index(0, 5), 0);
        assert_eq!(wrap_index(7, 5), 2);
        assert_eq!(wrap_index(3, 1), 0);
    }

    #[test]
    fn test_weights_integer_offset_is_identity() {
        let w = lanczos4_weights(0.0);
        assert_eq!(w, [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_weights_normalized_and_symmetric() {
        for &f in &[0.1f32, 0.25, 0.5, 0.75, 0.9] {
            let w = lanczos4_weights(f);
            let sum: f32 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "sum {} for frac {}", sum, f);
        }

        let half = lanczos4_weights(0.5);
        for k in 0..4 {
            assert!((half[k] - half[7 - k]).abs() < 1e-6);
        }
        // Nearest taps dominate.
        assert!(half[3] > 0.45 && half[4] > 0.45);
    }

    #[test]
    fn test_sample_integer_coordinates_exact() {
        let img = checker(9, 7);
        let mut px = [0u8; 3];
        for y in 0..7 {
            for x in 0..9 {
                sample_lanczos4_wrap(&img, x as f32, y as f32, &mut px);
                assert_eq!(&px, img.pixel(x, y), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_sample_wraps_instead_of_clamping() {
        let img = checker(9, 7);
        let mut px = [0u8; 3];

        sample_lanczos4_wrap(&img, -1.0, 0.0, &mut px);
        assert_eq!(&px, img.pixel(8, 0));

        sample_lanczos4_wrap(&img, 9.0, 7.0, &mut px);
        assert_eq!(&px, img.pixel(0, 0));

        sample_lanczos4_wrap(&img, 2.0, -2.0, &mut px);
        assert_eq!(&px, img.pixel(2, 5));
    }

    #[test]
    fn test_sample_constant_image_is_constant() {
        let img = Image::from_fn(12, 12, 4, |_, _| [17, 99, 250, 255]).unwrap();
        let mut px = [0u8; 4];
        for &(x, y) in &[(0.3f32, 0.7f32), (5.5, 5.5), (-0.25, 11.6), (100.1, -40.9)] {
            sample_lanczos4_wrap(&img, x, y, &mut px);
            assert_eq!(px, [17, 99, 250, 255]);
        }
    }

    #[test]
    fn test_sample_non_finite_does_not_panic() {
        let img = checker(4, 4);
        let mut px = [1u8; 3];
        sample_lanczos4_wrap(&img, f32::NAN, 1.0, &mut px);
        sample_lanczos4_wrap(&img, f32::INFINITY, f32::NEG_INFINITY, &mut px);
    }
}
