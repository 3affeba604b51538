//! Render diagnostics: per-stage timing and a short summary.
//!
//! [`render_with_diagnostics`] runs exactly the same stages as
//! [`render`](crate::render) and records how long each one took. Time is
//! read through the [`Clock`] trait so this crate stays free of any
//! platform time source; native callers wrap `std::time::Instant`.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::filter;
use crate::tone::{self, ToneTable};
use crate::types::{
    Dimensions, FilterMode, ParameterSet, PipelineError, RenderedImage, SourceImage,
};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Source of monotonic timestamps.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Capture the current time.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Diagnostics collected from a single render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderDiagnostics {
    /// Tone table construction plus per-sample lookup.
    #[serde(with = "duration_serde")]
    pub tone: Duration,
    /// Filter stage, including denormalization to 8 bits.
    #[serde(with = "duration_serde")]
    pub filter: Duration,
    /// Expansion to three channels.
    #[serde(with = "duration_serde")]
    pub expand: Duration,
    /// Total wall-clock duration, validation included.
    #[serde(with = "duration_serde")]
    pub total: Duration,
    /// Which filter ran.
    pub filter_mode: FilterMode,
    /// Source image dimensions.
    pub dimensions: Dimensions,
    /// Channel count of the source image (1 or 3).
    pub source_channels: u8,
}

impl RenderDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Render Diagnostics Report\n{}", "=".repeat(48)));
        lines.push(format!(
            "Image: {}x{} ({} pixels, {} channel(s))",
            self.dimensions.width,
            self.dimensions.height,
            self.dimensions.pixel_count(),
            self.source_channels,
        ));
        lines.push(format!("Filter: {}", self.filter_mode));
        lines.push(format!("Total duration: {:.3}ms", duration_ms(self.total)));
        lines.push(String::new());

        lines.push(format!("{:<16} {:>10} {:>10}", "Stage", "Duration", "% Total"));
        lines.push("-".repeat(48));

        let total_ms = duration_ms(self.total);
        for (name, duration) in [
            ("Tone", self.tone),
            ("Filter", self.filter),
            ("Expand", self.expand),
        ] {
            let ms = duration_ms(duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%"));
        }

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Render `source` with `params` and time every stage.
///
/// Produces the same image as [`render`](crate::render).
///
/// # Errors
///
/// Returns [`PipelineError::InvalidParameter`] if `params` fails
/// validation.
pub fn render_with_diagnostics<C: Clock>(
    source: &SourceImage,
    params: &ParameterSet,
    clock: &C,
) -> Result<(RenderedImage, RenderDiagnostics), PipelineError> {
    let start = clock.now();
    params.validate()?;

    let stage = clock.now();
    let toned = tone::apply(source, &ToneTable::new(params));
    let tone_duration = clock.elapsed(&stage);

    let stage = clock.now();
    let filtered = filter::apply(&toned, params.filter_mode, params.blur_sigma);
    let filter_duration = clock.elapsed(&stage);

    let stage = clock.now();
    let rendered = filtered.into_rendered();
    let expand_duration = clock.elapsed(&stage);

    let diagnostics = RenderDiagnostics {
        tone: tone_duration,
        filter: filter_duration,
        expand: expand_duration,
        total: clock.elapsed(&start),
        filter_mode: params.filter_mode,
        dimensions: source.dimensions(),
        source_channels: source.channel_count(),
    };
    Ok((rendered, diagnostics))
}
