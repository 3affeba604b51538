//! Tone adjustments: gamma, intensity, brightness and clamping.
//!
//! Each sample is normalized to [0, 1] and then, in this fixed order:
//!
//! ```text
//! x = x ^ gamma
//! x = x * intensity
//! x = x + brightness
//! x = clamp(x, 0, 1)
//! ```
//!
//! The order is part of the output contract. Swapping any two steps
//! changes the rendered values.
//!
//! The result depends only on the 8-bit input value, so the four steps
//! are evaluated once for each of the 256 possible samples into a
//! [`ToneTable`] and then looked up per pixel.

use image::{ImageBuffer, Luma, Rgb, Rgb32FImage};

use crate::types::{GrayImage, ParameterSet, RgbImage, SourceImage};

/// Single-channel image of normalized `f32` samples.
pub type Gray32FImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Apply the four tone steps to one normalized sample.
#[must_use]
pub fn tone_sample(x: f32, gamma: f32, intensity: f32, brightness: f32) -> f32 {
    x.powf(gamma)
        .mul_add(intensity, brightness)
        .clamp(0.0, 1.0)
}

/// Scale a normalized sample back to 8 bits.
///
/// Rounds to nearest so that a neutral tone table reproduces every
/// input value exactly. Out-of-range and NaN inputs saturate.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn denormalize(x: f32) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Precomputed tone output for every 8-bit input sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneTable([f32; 256]);

impl ToneTable {
    /// Build the table for the tone fields of `params`.
    ///
    /// `filter_mode` and `blur_sigma` are ignored.
    #[must_use]
    pub fn new(params: &ParameterSet) -> Self {
        let mut table = [0.0; 256];
        for (value, slot) in (0..=u8::MAX).zip(table.iter_mut()) {
            *slot = tone_sample(
                f32::from(value) / 255.0,
                params.gamma,
                params.intensity,
                params.brightness,
            );
        }
        Self(table)
    }

    /// Normalized tone output for one input sample.
    #[must_use]
    pub fn get(&self, sample: u8) -> f32 {
        self.0[usize::from(sample)]
    }
}

/// A tone-adjusted image, still in normalized `f32` samples.
///
/// Keeps the channel layout of the [`SourceImage`] it came from.
#[derive(Debug, Clone)]
pub enum Toned {
    /// Single-channel samples.
    Gray(Gray32FImage),
    /// Three-channel samples.
    Rgb(Rgb32FImage),
}

/// Run the tone steps over every sample of `source`.
#[must_use = "returns the tone-adjusted image"]
pub fn apply(source: &SourceImage, table: &ToneTable) -> Toned {
    match source {
        SourceImage::Gray(img) => Toned::Gray(Gray32FImage::from_fn(
            img.width(),
            img.height(),
            |x, y| Luma([table.get(img.get_pixel(x, y).0[0])]),
        )),
        SourceImage::Rgb(img) => Toned::Rgb(Rgb32FImage::from_fn(
            img.width(),
            img.height(),
            |x, y| Rgb(img.get_pixel(x, y).0.map(|v| table.get(v))),
        )),
    }
}

/// Denormalize a single-channel `f32` image to 8 bits.
#[must_use]
pub fn quantize_gray(image: &Gray32FImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([denormalize(image.get_pixel(x, y).0[0])])
    })
}

/// Denormalize a three-channel `f32` image to 8 bits.
#[must_use]
pub fn quantize_rgb(image: &Rgb32FImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        Rgb(image.get_pixel(x, y).0.map(denormalize))
    })
}
