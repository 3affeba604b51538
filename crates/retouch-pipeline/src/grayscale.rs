//! Luminance conversion and single-to-three channel expansion.
//!
//! [`luminance`] collapses a normalized RGB image to one channel ahead of
//! edge detection. [`gray_to_rgb`] is the last step of every render: a
//! single-channel result is replicated into three identical channels so
//! the output is always RGB.

use image::{Luma, Rgb, Rgb32FImage};

use crate::tone::Gray32FImage;
use crate::types::{GrayImage, RgbImage};

/// Rec. 709 luma weights for red, green and blue.
pub const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Convert a normalized RGB image to normalized luminance.
///
/// Uses the Rec. 709 weights in [`LUMA_WEIGHTS`]. They sum to one, so
/// the result stays in [0, 1].
#[must_use = "returns the luminance image"]
pub fn luminance(image: &Rgb32FImage) -> Gray32FImage {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    Gray32FImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Luma([wr.mul_add(r, wg.mul_add(g, wb * b))])
    })
}

/// Replicate a single-channel image into three identical channels.
#[must_use = "returns the expanded RGB image"]
pub fn gray_to_rgb(image: &GrayImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let v = image.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}
