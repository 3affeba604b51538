//! Gaussian blur over normalized samples.
//!
//! Both functions hand the tone-adjusted `f32` buffer straight to
//! [`imageproc::filter::gaussian_blur_f32`], so no rounding happens until
//! the filter stage denormalizes its result. Borders clamp to the edge.

use image::Rgb32FImage;

use crate::tone::Gray32FImage;

/// Blur a normalized single-channel image.
///
/// `sigma` must be positive; [`ParameterSet::validate`](crate::ParameterSet::validate)
/// guarantees that for every render.
#[must_use = "returns the blurred image"]
pub fn gaussian_blur(image: &Gray32FImage, sigma: f32) -> Gray32FImage {
    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Blur a normalized RGB image, each channel independently.
///
/// `sigma` must be positive.
#[must_use = "returns the blurred RGB image"]
pub fn gaussian_blur_rgb(image: &Rgb32FImage, sigma: f32) -> Rgb32FImage {
    imageproc::filter::gaussian_blur_f32(image, sigma)
}
