//! Sobel gradient-magnitude edge filter.
//!
//! The horizontal and vertical 3x3 Sobel responses of the normalized
//! luminance come from [`imageproc::filter::filter_clamped`] with
//! clamp-to-edge borders. Their magnitude is scaled as if the kernels were
//! normalized to unit weight per side and the two directions averaged:
//!
//! ```text
//! magnitude = sqrt((gx^2 + gy^2) / 2) / 4
//! ```
//!
//! so a full black-to-white step gives `sqrt(1/2)`, about 180 in 8 bits,
//! and the strongest possible diagonal response reaches 1.0.

use std::f32::consts::SQRT_2;

use image::Luma;
use imageproc::filter::filter_clamped;
use imageproc::kernel::Kernel;

use crate::tone::Gray32FImage;

/// Sum of the absolute kernel weights on one side of a 3x3 Sobel kernel.
const SOBEL_SIDE_WEIGHT: f32 = 4.0;

const SOBEL_HORIZONTAL: Kernel<'static, f32> =
    Kernel::new(&[-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0], 3, 3);
const SOBEL_VERTICAL: Kernel<'static, f32> =
    Kernel::new(&[-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0], 3, 3);

/// Compute the Sobel gradient magnitude of a normalized luminance image.
///
/// Returns normalized magnitudes in [0, 1] with the same dimensions.
/// Flat regions map to 0.
#[must_use = "returns the gradient magnitude image"]
pub fn sobel_magnitude(image: &Gray32FImage) -> Gray32FImage {
    let gx: Gray32FImage = filter_clamped(image, SOBEL_HORIZONTAL);
    let gy: Gray32FImage = filter_clamped(image, SOBEL_VERTICAL);

    Gray32FImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([scaled_magnitude(
            gx.get_pixel(x, y).0[0],
            gy.get_pixel(x, y).0[0],
        )])
    })
}

/// Normalized magnitude for raw Sobel responses of normalized samples.
fn scaled_magnitude(h: f32, v: f32) -> f32 {
    (h.hypot(v) / SQRT_2 / SOBEL_SIDE_WEIGHT).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::{denormalize, quantize_gray};

    /// 10x10 image with a sharp vertical boundary at x = 5.
    fn sharp_edge_image() -> Gray32FImage {
        Gray32FImage::from_fn(10, 10, |x, _y| Luma([if x < 5 { 0.0 } else { 1.0 }]))
    }

    #[test]
    fn blank_image_produces_no_edges() {
        let img = Gray32FImage::from_pixel(20, 20, Luma([128.0 / 255.0]));
        let edges = sobel_magnitude(&img);
        assert!(edges.pixels().all(|p| p.0[0] == 0.0));
    }

    #[test]
    fn step_edge_response() {
        let edges = quantize_gray(&sobel_magnitude(&sharp_edge_image()));
        for (x, y, p) in edges.enumerate_pixels() {
            if x == 4 || x == 5 {
                // 4 / sqrt(2) / 4 * 255 = 180.3
                assert_eq!(p.0[0], 180, "boundary pixel ({x},{y})");
            } else {
                assert_eq!(p.0[0], 0, "flat pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn horizontal_and_vertical_edges_respond_equally() {
        let vertical = sobel_magnitude(&sharp_edge_image());
        let horizontal_src =
            Gray32FImage::from_fn(10, 10, |_x, y| Luma([if y < 5 { 0.0 } else { 1.0 }]));
        let horizontal = sobel_magnitude(&horizontal_src);
        assert_eq!(vertical.get_pixel(4, 3), horizontal.get_pixel(3, 4));
    }

    #[test]
    fn small_steps_are_not_rounded_away() {
        // A one-level step gives well under one 8-bit level per side; the
        // response must still be the exact scaled value.
        let img = Gray32FImage::from_fn(6, 3, |x, _| Luma([if x < 3 { 0.5 } else { 0.502 }]));
        let m = sobel_magnitude(&img).get_pixel(2, 1).0[0];
        let expected = 0.002 * 4.0 / SQRT_2 / 4.0;
        assert!((m - expected).abs() < 1e-6, "got {m}, expected {expected}");
    }

    #[test]
    fn output_dimensions_match_input() {
        let img = Gray32FImage::new(17, 31);
        assert_eq!(sobel_magnitude(&img).dimensions(), (17, 31));
    }

    #[test]
    fn diagonal_extreme_saturates() {
        assert_eq!(denormalize(scaled_magnitude(4.0, 4.0)), 255);
        assert_eq!(denormalize(scaled_magnitude(-4.0, 0.0)), 180);
    }
}
