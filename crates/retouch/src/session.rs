//! Editing session: one source image, the current controls, and the last
//! render.
//!
//! Every mutation re-renders from the untouched source, so the rendered
//! image is always a function of the source and the current parameters
//! alone.

use std::path::{Path, PathBuf};

use retouch_pipeline::{
    FilterMode, ParameterSet, PipelineError, RenderedImage, SliderPositions, SourceImage,
};

use crate::StdClock;

/// State behind the interactive front end.
#[derive(Debug)]
pub struct Session {
    source: SourceImage,
    source_path: PathBuf,
    sliders: SliderPositions,
    params: ParameterSet,
    rendered: RenderedImage,
    timings: bool,
}

impl Session {
    /// Start a session from slider positions and render once.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineError`] from the initial render.
    pub fn new(
        source: SourceImage,
        source_path: PathBuf,
        sliders: SliderPositions,
        timings: bool,
    ) -> Result<Self, PipelineError> {
        Self::with_parameters(source, source_path, sliders, sliders.to_parameters(), timings)
    }

    /// Start a session from an explicit parameter set and render once.
    ///
    /// `sliders` keeps the positions later slider moves start from; only
    /// the field a slider controls is replaced when it moves.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidParameter`] if `params` is out of
    /// range.
    pub fn with_parameters(
        source: SourceImage,
        source_path: PathBuf,
        sliders: SliderPositions,
        params: ParameterSet,
        timings: bool,
    ) -> Result<Self, PipelineError> {
        let rendered = render(&source, &params, timings)?;
        Ok(Self {
            source,
            source_path,
            sliders,
            params,
            rendered,
            timings,
        })
    }

    /// The most recent render.
    #[must_use]
    pub const fn rendered(&self) -> &RenderedImage {
        &self.rendered
    }

    /// Parameters the most recent render used.
    #[must_use]
    pub const fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    /// Current slider positions.
    #[must_use]
    pub const fn sliders(&self) -> &SliderPositions {
        &self.sliders
    }

    /// Path the source was loaded from.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Move the gamma slider and re-render.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineError`] from the render.
    pub fn set_gamma(&mut self, position: i32) -> Result<(), PipelineError> {
        self.sliders.set_gamma(position);
        self.params.gamma = self.sliders.to_parameters().gamma;
        self.rerender()
    }

    /// Move the intensity slider and re-render.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineError`] from the render.
    pub fn set_intensity(&mut self, position: i32) -> Result<(), PipelineError> {
        self.sliders.set_intensity(position);
        self.params.intensity = self.sliders.to_parameters().intensity;
        self.rerender()
    }

    /// Move the brightness slider and re-render.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineError`] from the render.
    pub fn set_brightness(&mut self, position: i32) -> Result<(), PipelineError> {
        self.sliders.set_brightness(position);
        self.params.brightness = self.sliders.to_parameters().brightness;
        self.rerender()
    }

    /// Move the blur sigma slider and re-render.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineError`] from the render.
    pub fn set_sigma(&mut self, position: i32) -> Result<(), PipelineError> {
        self.sliders.set_sigma(position);
        self.params.blur_sigma = self.sliders.to_parameters().blur_sigma;
        self.rerender()
    }

    /// Select a filter and re-render.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineError`] from the render.
    pub fn select_filter(&mut self, mode: FilterMode) -> Result<(), PipelineError> {
        self.sliders.set_filter_mode(mode);
        self.params.filter_mode = mode;
        self.rerender()
    }

    /// Return every control to its default and re-render.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineError`] from the render.
    pub fn reset(&mut self) -> Result<(), PipelineError> {
        self.sliders = SliderPositions::default();
        self.params = self.sliders.to_parameters();
        self.rerender()
    }

    /// Write the most recent render to `dir` as `modified_<name>`.
    ///
    /// # Errors
    ///
    /// Returns the [`retouch_io::CodecError`] if the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, retouch_io::CodecError> {
        retouch_io::save(self.rendered(), dir, &self.source_path)
    }

    fn rerender(&mut self) -> Result<(), PipelineError> {
        self.rendered = render(&self.source, &self.params, self.timings)?;
        Ok(())
    }
}

fn render(
    source: &SourceImage,
    params: &ParameterSet,
    timings: bool,
) -> Result<RenderedImage, PipelineError> {
    if !timings {
        return retouch_pipeline::render(source, params);
    }

    let (rendered, diagnostics) =
        retouch_pipeline::render_with_diagnostics(source, params, &StdClock)?;
    log::info!("\n{}", diagnostics.report());
    Ok(rendered)
}
