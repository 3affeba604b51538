//! retouch: adjust the tone of an image and optionally blur it or trace
//! its edges.
//!
//! Loads one image, renders it through the tone and filter pipeline, and
//! writes the result as `modified_<name>`. With `--interactive` the
//! controls are driven from stdin instead, one command per line, and the
//! image is re-rendered after every change.
//!
//! # Usage
//!
//! ```text
//! retouch [OPTIONS] <IMAGE>
//! retouch --gamma 140 --filter gaussian --sigma 15 photo.jpg
//! retouch --interactive photo.jpg
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod command;
mod interactive;
mod session;

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::builder::RangedI64ValueParser;
use clap::{Parser, ValueEnum};
use retouch_pipeline::{Clock, FilterMode, ParameterSet, SliderPositions};

use crate::session::Session;

/// Adjust gamma, intensity and brightness of an image, then optionally
/// apply a Gaussian blur or Sobel edge filter.
#[derive(Parser)]
#[command(name = "retouch", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Gamma slider position (100 = 1.0).
    #[arg(long, default_value_t = SliderPositions::DEFAULT_GAMMA, value_parser = slider(SliderPositions::GAMMA_RANGE))]
    gamma: i32,

    /// Intensity slider position (100 = 1.0).
    #[arg(long, default_value_t = SliderPositions::DEFAULT_INTENSITY, value_parser = slider(SliderPositions::INTENSITY_RANGE))]
    intensity: i32,

    /// Brightness slider position (255 = +1.0).
    #[arg(long, default_value_t = SliderPositions::DEFAULT_BRIGHTNESS, allow_negative_numbers = true, value_parser = slider(SliderPositions::BRIGHTNESS_RANGE))]
    brightness: i32,

    /// Blur sigma slider position (10 = 1.0).
    #[arg(long, default_value_t = SliderPositions::DEFAULT_SIGMA, value_parser = slider(SliderPositions::SIGMA_RANGE))]
    sigma: i32,

    /// Filter applied after the tone adjustments.
    #[arg(long, value_enum, default_value_t = Filter::None)]
    filter: Filter,

    /// Full parameter set as a JSON string.
    ///
    /// When provided, the slider and filter flags are ignored for the
    /// first render. The JSON must be a valid `ParameterSet`
    /// serialization; missing fields take their defaults.
    #[arg(long)]
    params_json: Option<String>,

    /// Directory the modified image is written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Read adjustment commands from stdin instead of saving right away.
    #[arg(short, long)]
    interactive: bool,

    /// Log per-stage render timings.
    #[arg(long)]
    timings: bool,
}

/// Filter selection.
#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    /// No filter.
    None,
    /// Gaussian blur with the `--sigma` slider.
    Gaussian,
    /// Sobel edge magnitude of the luminance.
    Sobel,
}

impl From<Filter> for FilterMode {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::None => Self::None,
            Filter::Gaussian => Self::GaussianBlur,
            Filter::Sobel => Self::SobelEdges,
        }
    }
}

/// Value parser accepting integers within a slider's range.
fn slider(range: RangeInclusive<i32>) -> RangedI64ValueParser<i32> {
    RangedI64ValueParser::<i32>::new().range(i64::from(*range.start())..=i64::from(*range.end()))
}

/// Build slider positions from CLI arguments.
fn sliders_from_cli(cli: &Cli) -> SliderPositions {
    let mut sliders = SliderPositions::default();
    sliders.set_gamma(cli.gamma);
    sliders.set_intensity(cli.intensity);
    sliders.set_brightness(cli.brightness);
    sliders.set_sigma(cli.sigma);
    sliders.set_filter_mode(cli.filter.into());
    sliders
}

/// Parse and validate `--params-json`, if given.
///
/// Returns `None` when the starting parameters come from the slider
/// flags instead.
fn parameters_from_cli(cli: &Cli) -> Result<Option<ParameterSet>, String> {
    let Some(ref json) = cli.params_json else {
        return Ok(None);
    };

    let params: ParameterSet =
        serde_json::from_str(json).map_err(|e| format!("Error parsing --params-json: {e}"))?;
    params
        .validate()
        .map_err(|e| format!("Error in --params-json: {e}"))?;
    Ok(Some(params))
}

/// Make `dir` absolute against the current directory.
///
/// Symlinks and `..` components are left as they are.
fn resolve_output_dir(dir: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(dir)
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    let sliders = sliders_from_cli(&cli);
    let params = match parameters_from_cli(&cli) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let source = match retouch_io::load(&cli.image_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "loaded {} ({}x{}, {} channel{})",
        cli.image_path.display(),
        source.width(),
        source.height(),
        source.channel_count(),
        if source.channel_count() == 1 { "" } else { "s" },
    );

    let output_dir = match resolve_output_dir(&cli.output_dir) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error resolving {}: {e}", cli.output_dir.display());
            return ExitCode::FAILURE;
        }
    };

    let path = cli.image_path.clone();
    let opened = match params {
        Some(params) => Session::with_parameters(source, path, sliders, params, cli.timings),
        None => Session::new(source, path, sliders, cli.timings),
    };
    let mut session = match opened {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.interactive {
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        if let Err(e) = interactive::run(&mut session, stdin, stdout, &output_dir) {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    match session.save(&output_dir) {
        Ok(path) => {
            println!("Saved to: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("retouch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_map_to_default_parameters() {
        let cli = parse(&["in.png"]);
        let sliders = sliders_from_cli(&cli);
        assert_eq!(sliders, SliderPositions::default());
        assert_eq!(sliders.to_parameters(), ParameterSet::default());
        assert_eq!(parameters_from_cli(&cli).unwrap(), None);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn default_output_dir_resolves_to_current_dir() {
        let resolved = resolve_output_dir(Path::new(".")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::env::current_dir().unwrap());
    }

    #[test]
    fn relative_output_dir_is_anchored_at_current_dir() {
        let resolved = resolve_output_dir(Path::new("out/renders")).unwrap();
        assert_eq!(resolved, std::env::current_dir().unwrap().join("out/renders"));
    }

    #[test]
    fn absolute_output_dir_is_unchanged() {
        let dir = std::env::temp_dir();
        assert_eq!(resolve_output_dir(&dir).unwrap(), dir);
    }

    #[test]
    fn slider_flags_are_mapped() {
        let cli = parse(&[
            "--gamma", "150", "--brightness", "-51", "--filter", "sobel", "in.png",
        ]);
        let sliders = sliders_from_cli(&cli);
        assert_eq!(sliders.gamma(), 150);
        assert_eq!(sliders.brightness(), -51);
        assert_eq!(sliders.filter_mode(), FilterMode::SobelEdges);
    }

    #[test]
    fn out_of_range_slider_flag_is_a_usage_error() {
        let result = Cli::try_parse_from(["retouch", "--gamma", "300", "in.png"]);
        assert!(result.is_err());
        let result = Cli::try_parse_from(["retouch", "--sigma", "0", "in.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_image_is_a_usage_error() {
        assert!(Cli::try_parse_from(["retouch"]).is_err());
    }

    #[test]
    fn params_json_overrides_sliders() {
        let cli = parse(&[
            "--gamma",
            "150",
            "--params-json",
            r#"{"gamma": 0.8, "filter_mode": "gaussian_blur"}"#,
            "in.png",
        ]);
        let params = parameters_from_cli(&cli).unwrap().unwrap();
        assert!((params.gamma - 0.8).abs() < f32::EPSILON);
        assert_eq!(params.filter_mode, FilterMode::GaussianBlur);
        assert!((params.intensity - ParameterSet::DEFAULT_INTENSITY).abs() < f32::EPSILON);
    }

    #[test]
    fn params_json_is_validated() {
        let cli = parse(&["--params-json", r#"{"brightness": 3.0}"#, "in.png"]);
        let err = parameters_from_cli(&cli).unwrap_err();
        assert!(err.starts_with("Error in --params-json"), "{err}");
    }

    #[test]
    fn malformed_params_json_is_reported() {
        let cli = parse(&["--params-json", "{not json", "in.png"]);
        let err = parameters_from_cli(&cli).unwrap_err();
        assert!(err.starts_with("Error parsing --params-json"), "{err}");
    }
}
