//! retouch-pipeline: Pure tone and filter pipeline (sans-IO).
//!
//! Maps a source image and a parameter set to a rendered RGB image
//! through:
//! gamma -> intensity -> brightness -> clamp -> filter -> 8-bit -> RGB.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! pixel buffers and returns structured data. Decoding and encoding files
//! lives in `retouch-io`.

pub mod blur;
pub mod diagnostics;
pub mod edge;
pub mod filter;
pub mod grayscale;
pub mod slider;
pub mod tone;
pub mod types;

pub use diagnostics::{Clock, RenderDiagnostics, render_with_diagnostics};
pub use slider::SliderPositions;
pub use types::{
    Dimensions, FilterMode, GrayImage, ParameterSet, PipelineError, RenderedImage, RgbImage,
    SourceImage,
};

use tone::ToneTable;

/// Render `source` with `params`.
///
/// The source is never modified and no state is kept between calls:
/// every render starts again from the original samples, so adjustments
/// never accumulate. Identical inputs give bit-identical output.
///
/// # Pipeline steps
///
/// 1. Normalize samples to [0, 1] and raise to `gamma`
/// 2. Multiply by `intensity`
/// 3. Add `brightness`
/// 4. Clamp to [0, 1]
/// 5. Filter: none, Gaussian blur, or Sobel edges
/// 6. Denormalize to 8 bits (round to nearest, saturating)
/// 7. Replicate single-channel results into three channels
///
/// # Errors
///
/// Returns [`PipelineError::InvalidParameter`] if any field of `params`
/// is outside its valid range. No work is done in that case.
pub fn render(source: &SourceImage, params: &ParameterSet) -> Result<RenderedImage, PipelineError> {
    params.validate()?;

    // 1-4. Tone adjustments.
    let toned = tone::apply(source, &ToneTable::new(params));

    // 5-6. Filter, ending in 8-bit samples.
    let filtered = filter::apply(&toned, params.filter_mode, params.blur_sigma);

    // 7. Channel expansion.
    Ok(filtered.into_rendered())
}
