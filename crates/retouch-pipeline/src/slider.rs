//! Integer slider positions and their mapping to [`ParameterSet`] values.
//!
//! Interactive front ends expose the parameters as integer sliders:
//!
//! | slider     | range       | default | parameter                 |
//! |------------|-------------|---------|---------------------------|
//! | gamma      | 50 ..= 200  | 100     | `gamma = pos / 100`       |
//! | intensity  | 50 ..= 200  | 100     | `intensity = pos / 100`   |
//! | brightness | -255 ..= 255| 0       | `brightness = pos / 255`  |
//! | sigma      | 1 ..= 50    | 20      | `blur_sigma = pos / 10`   |
//!
//! Setters clamp into the slider range, so every [`SliderPositions`]
//! maps to a [`ParameterSet`] that passes validation.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::types::{FilterMode, ParameterSet};

/// The raw integer position of every control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderPositions {
    gamma: i32,
    intensity: i32,
    brightness: i32,
    sigma: i32,
    filter_mode: FilterMode,
}

impl SliderPositions {
    /// Gamma slider range (hundredths).
    pub const GAMMA_RANGE: RangeInclusive<i32> = 50..=200;
    /// Intensity slider range (hundredths).
    pub const INTENSITY_RANGE: RangeInclusive<i32> = 50..=200;
    /// Brightness slider range (255ths).
    pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = -255..=255;
    /// Sigma slider range (tenths).
    pub const SIGMA_RANGE: RangeInclusive<i32> = 1..=50;

    /// Default gamma slider position.
    pub const DEFAULT_GAMMA: i32 = 100;
    /// Default intensity slider position.
    pub const DEFAULT_INTENSITY: i32 = 100;
    /// Default brightness slider position.
    pub const DEFAULT_BRIGHTNESS: i32 = 0;
    /// Default sigma slider position.
    pub const DEFAULT_SIGMA: i32 = 20;

    const GAMMA_SCALE: f32 = 100.0;
    const INTENSITY_SCALE: f32 = 100.0;
    const BRIGHTNESS_SCALE: f32 = 255.0;
    const SIGMA_SCALE: f32 = 10.0;

    /// Current gamma slider position.
    #[must_use]
    pub const fn gamma(&self) -> i32 {
        self.gamma
    }

    /// Current intensity slider position.
    #[must_use]
    pub const fn intensity(&self) -> i32 {
        self.intensity
    }

    /// Current brightness slider position.
    #[must_use]
    pub const fn brightness(&self) -> i32 {
        self.brightness
    }

    /// Current sigma slider position.
    #[must_use]
    pub const fn sigma(&self) -> i32 {
        self.sigma
    }

    /// Currently selected filter.
    #[must_use]
    pub const fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    /// Move the gamma slider, clamped into [`Self::GAMMA_RANGE`].
    pub fn set_gamma(&mut self, position: i32) {
        self.gamma = clamp_to(position, &Self::GAMMA_RANGE);
    }

    /// Move the intensity slider, clamped into [`Self::INTENSITY_RANGE`].
    pub fn set_intensity(&mut self, position: i32) {
        self.intensity = clamp_to(position, &Self::INTENSITY_RANGE);
    }

    /// Move the brightness slider, clamped into [`Self::BRIGHTNESS_RANGE`].
    pub fn set_brightness(&mut self, position: i32) {
        self.brightness = clamp_to(position, &Self::BRIGHTNESS_RANGE);
    }

    /// Move the sigma slider, clamped into [`Self::SIGMA_RANGE`].
    pub fn set_sigma(&mut self, position: i32) {
        self.sigma = clamp_to(position, &Self::SIGMA_RANGE);
    }

    /// Select a filter.
    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        self.filter_mode = mode;
    }

    /// Map the positions to pipeline parameters.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_parameters(&self) -> ParameterSet {
        // Positions are bounded well inside f32's exact integer range.
        ParameterSet {
            gamma: self.gamma as f32 / Self::GAMMA_SCALE,
            intensity: self.intensity as f32 / Self::INTENSITY_SCALE,
            brightness: self.brightness as f32 / Self::BRIGHTNESS_SCALE,
            filter_mode: self.filter_mode,
            blur_sigma: self.sigma as f32 / Self::SIGMA_SCALE,
        }
    }
}

impl Default for SliderPositions {
    fn default() -> Self {
        Self {
            gamma: Self::DEFAULT_GAMMA,
            intensity: Self::DEFAULT_INTENSITY,
            brightness: Self::DEFAULT_BRIGHTNESS,
            sigma: Self::DEFAULT_SIGMA,
            filter_mode: FilterMode::default(),
        }
    }
}

fn clamp_to(position: i32, range: &RangeInclusive<i32>) -> i32 {
    position.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_to_default_parameters() {
        assert_eq!(
            SliderPositions::default().to_parameters(),
            ParameterSet::default()
        );
    }

    #[test]
    fn positions_are_scaled() {
        let mut sliders = SliderPositions::default();
        sliders.set_gamma(150);
        sliders.set_intensity(75);
        sliders.set_brightness(-51);
        sliders.set_sigma(5);
        let params = sliders.to_parameters();
        assert!((params.gamma - 1.5).abs() < f32::EPSILON);
        assert!((params.intensity - 0.75).abs() < f32::EPSILON);
        assert!((params.brightness + 0.2).abs() < 1e-6);
        assert!((params.blur_sigma - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn setters_clamp_into_range() {
        let mut sliders = SliderPositions::default();
        sliders.set_gamma(10);
        sliders.set_intensity(1_000);
        sliders.set_brightness(-300);
        sliders.set_sigma(0);
        assert_eq!(sliders.gamma(), 50);
        assert_eq!(sliders.intensity(), 200);
        assert_eq!(sliders.brightness(), -255);
        assert_eq!(sliders.sigma(), 1);
    }

    #[test]
    fn every_extreme_maps_to_valid_parameters() {
        for gamma in [i32::MIN, 50, 200, i32::MAX] {
            for brightness in [i32::MIN, -255, 255, i32::MAX] {
                for sigma in [i32::MIN, 1, 50, i32::MAX] {
                    let mut sliders = SliderPositions::default();
                    sliders.set_gamma(gamma);
                    sliders.set_intensity(gamma);
                    sliders.set_brightness(brightness);
                    sliders.set_sigma(sigma);
                    assert!(
                        sliders.to_parameters().validate().is_ok(),
                        "{sliders:?} mapped out of range",
                    );
                }
            }
        }
    }

    #[test]
    fn filter_selection_carries_through() {
        let mut sliders = SliderPositions::default();
        sliders.set_filter_mode(FilterMode::SobelEdges);
        assert_eq!(sliders.filter_mode(), FilterMode::SobelEdges);
        assert_eq!(sliders.to_parameters().filter_mode, FilterMode::SobelEdges);
    }
}
