//! Filter stage: dispatch on [`FilterMode`] and hand 8-bit results to
//! the channel expansion step.
//!
//! Blur and edge detection run on the normalized `f32` samples from the
//! tone stage. Every branch denormalizes exactly once, at the end.

use crate::blur;
use crate::edge;
use crate::grayscale;
use crate::tone::{self, Toned};
use crate::types::{FilterMode, GrayImage, RenderedImage, RgbImage};

/// Output of the filter stage, before channel expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filtered {
    /// Single-channel result (gray source or edge magnitude).
    Gray(GrayImage),
    /// Three-channel result.
    Rgb(RgbImage),
}

impl Filtered {
    /// Expand to the three-channel rendered form.
    ///
    /// Single-channel results are replicated into three identical
    /// channels; three-channel results pass through.
    #[must_use]
    pub fn into_rendered(self) -> RenderedImage {
        match self {
            Self::Gray(img) => grayscale::gray_to_rgb(&img),
            Self::Rgb(img) => img,
        }
    }
}

/// Run the selected filter over a tone-adjusted image.
///
/// `sigma` is only read for [`FilterMode::GaussianBlur`] and must then be
/// positive.
#[must_use = "returns the filtered image"]
pub fn apply(toned: &Toned, mode: FilterMode, sigma: f32) -> Filtered {
    match (mode, toned) {
        (FilterMode::None, Toned::Gray(img)) => Filtered::Gray(tone::quantize_gray(img)),
        (FilterMode::None, Toned::Rgb(img)) => Filtered::Rgb(tone::quantize_rgb(img)),
        (FilterMode::GaussianBlur, Toned::Gray(img)) => {
            Filtered::Gray(tone::quantize_gray(&blur::gaussian_blur(img, sigma)))
        }
        (FilterMode::GaussianBlur, Toned::Rgb(img)) => {
            Filtered::Rgb(tone::quantize_rgb(&blur::gaussian_blur_rgb(img, sigma)))
        }
        (FilterMode::SobelEdges, Toned::Gray(img)) => {
            Filtered::Gray(tone::quantize_gray(&edge::sobel_magnitude(img)))
        }
        (FilterMode::SobelEdges, Toned::Rgb(img)) => Filtered::Gray(tone::quantize_gray(
            &edge::sobel_magnitude(&grayscale::luminance(img)),
        )),
    }
}
