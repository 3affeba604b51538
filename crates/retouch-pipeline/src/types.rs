//! Shared types for the retouch tone and filter pipeline.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can build single-channel
/// sources without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can build color sources
/// and consume rendered output without depending on `image` directly.
pub use image::RgbImage;

/// Output of the pipeline.
///
/// Always three channels, even for single-channel sources.
pub type RenderedImage = RgbImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Total number of pixels.
    #[must_use]
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// An immutable 8-bit source image: either one channel or three.
///
/// Any other channel layout is rejected at construction, so once a
/// `SourceImage` exists the pipeline can rely on its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceImage {
    /// Single-channel (height x width) samples.
    Gray(GrayImage),
    /// Three-channel (height x width x 3) samples.
    Rgb(RgbImage),
}

impl SourceImage {
    /// Build a source image from interleaved raw samples.
    ///
    /// `channels` must be 1 or 3 and `samples` must hold exactly
    /// `width * height * channels` values.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidImageShape`] for any other channel
    /// count or a sample buffer of the wrong length.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        samples: Vec<u8>,
    ) -> Result<Self, PipelineError> {
        let len = samples.len();
        let expected = u64::from(width) * u64::from(height) * u64::from(channels);
        let shape_error = PipelineError::InvalidImageShape {
            width,
            height,
            channels,
            len,
        };

        if len as u64 != expected {
            return Err(shape_error);
        }

        let image = match channels {
            1 => GrayImage::from_raw(width, height, samples).map(Self::Gray),
            3 => RgbImage::from_raw(width, height, samples).map(Self::Rgb),
            _ => None,
        };
        image.ok_or(shape_error)
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        match self {
            Self::Gray(img) => img.width(),
            Self::Rgb(img) => img.width(),
        }
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        match self {
            Self::Gray(img) => img.height(),
            Self::Rgb(img) => img.height(),
        }
    }

    /// Width and height together.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Number of samples per pixel (1 or 3).
    #[must_use]
    pub const fn channel_count(&self) -> u8 {
        match self {
            Self::Gray(_) => 1,
            Self::Rgb(_) => 3,
        }
    }

    /// The interleaved samples, row-major.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Self::Gray(img) => img.as_raw(),
            Self::Rgb(img) => img.as_raw(),
        }
    }
}

impl From<GrayImage> for SourceImage {
    fn from(image: GrayImage) -> Self {
        Self::Gray(image)
    }
}

impl From<RgbImage> for SourceImage {
    fn from(image: RgbImage) -> Self {
        Self::Rgb(image)
    }
}

/// Which filter runs after the tone adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Pass the tone-adjusted image through unchanged.
    #[default]
    None,
    /// Isotropic Gaussian smoothing, per channel, with
    /// [`ParameterSet::blur_sigma`] as the standard deviation.
    GaussianBlur,
    /// Sobel gradient magnitude of the luminance, replicated into three
    /// identical channels.
    SobelEdges,
}

impl FilterMode {
    /// Every filter mode, in menu order.
    pub const ALL: [Self; 3] = [Self::None, Self::GaussianBlur, Self::SobelEdges];

    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::GaussianBlur => "gaussian blur",
            Self::SobelEdges => "sobel edges",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The full set of adjustments applied by one [`render`](crate::render)
/// call.
///
/// Defaults leave the image untouched. Fields are public; callers that
/// assemble values by hand should run [`validate`](Self::validate) (which
/// `render` also does) before relying on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Exponent applied to each normalized sample.
    pub gamma: f32,

    /// Multiplier applied after gamma.
    pub intensity: f32,

    /// Offset added after intensity, in normalized units.
    pub brightness: f32,

    /// Filter applied after clamping.
    pub filter_mode: FilterMode,

    /// Gaussian standard deviation in pixels. Only used by
    /// [`FilterMode::GaussianBlur`], but always validated.
    pub blur_sigma: f32,
}

impl ParameterSet {
    /// Default gamma exponent.
    pub const DEFAULT_GAMMA: f32 = 1.0;
    /// Default intensity multiplier.
    pub const DEFAULT_INTENSITY: f32 = 1.0;
    /// Default brightness offset.
    pub const DEFAULT_BRIGHTNESS: f32 = 0.0;
    /// Default blur standard deviation.
    pub const DEFAULT_BLUR_SIGMA: f32 = 2.0;

    /// Valid gamma exponents.
    pub const GAMMA_RANGE: RangeInclusive<f32> = 0.5..=2.0;
    /// Valid intensity multipliers.
    pub const INTENSITY_RANGE: RangeInclusive<f32> = 0.5..=2.0;
    /// Valid brightness offsets.
    pub const BRIGHTNESS_RANGE: RangeInclusive<f32> = -1.0..=1.0;
    /// Valid blur standard deviations.
    pub const BLUR_SIGMA_RANGE: RangeInclusive<f32> = 0.1..=5.0;

    /// Check every field against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidParameter`] for the first field
    /// that is out of range or not finite.
    pub fn validate(&self) -> Result<(), PipelineError> {
        check_range("gamma", self.gamma, &Self::GAMMA_RANGE)?;
        check_range("intensity", self.intensity, &Self::INTENSITY_RANGE)?;
        check_range("brightness", self.brightness, &Self::BRIGHTNESS_RANGE)?;
        check_range("blur_sigma", self.blur_sigma, &Self::BLUR_SIGMA_RANGE)
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            gamma: Self::DEFAULT_GAMMA,
            intensity: Self::DEFAULT_INTENSITY,
            brightness: Self::DEFAULT_BRIGHTNESS,
            filter_mode: FilterMode::default(),
            blur_sigma: Self::DEFAULT_BLUR_SIGMA,
        }
    }
}

fn check_range(
    name: &'static str,
    value: f32,
    range: &RangeInclusive<f32>,
) -> Result<(), PipelineError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(PipelineError::InvalidParameter {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Errors that can occur when building a source or rendering.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// The samples do not describe a single-channel or 3-channel image.
    #[error(
        "unsupported image shape: {width}x{height} with {channels} channel(s) and {len} samples \
         (expected 1 or 3 channels and width*height*channels samples)"
    )]
    InvalidImageShape {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Declared channel count.
        channels: u8,
        /// Number of samples actually supplied.
        len: usize,
    },

    /// A parameter is outside its valid range.
    #[error("invalid parameter {name}={value}: expected a value in [{min}, {max}]")]
    InvalidParameter {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f32,
        /// Smallest valid value.
        min: f32,
        /// Largest valid value.
        max: f32,
    },
}
