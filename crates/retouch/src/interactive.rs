//! Line-oriented interactive loop over a [`Session`].

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::command::{Command, HELP};
use crate::session::Session;

/// Read commands from `input` until `quit` or end of input.
///
/// Command results, errors included, are written to `output`; a bad
/// command or a failed save never ends the loop.
///
/// # Errors
///
/// Returns an error only if reading `input` or writing `output` fails.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
    output_dir: &Path,
) -> io::Result<()> {
    writeln!(output, "{}", describe(session))?;
    writeln!(output, "type 'help' for commands")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "error: {e}")?;
                continue;
            }
        };
        log::debug!("command: {command:?}");

        let rendered = match command {
            Command::Gamma(n) => session.set_gamma(n),
            Command::Intensity(n) => session.set_intensity(n),
            Command::Brightness(n) => session.set_brightness(n),
            Command::Sigma(n) => session.set_sigma(n),
            Command::Filter(mode) => session.select_filter(mode),
            Command::Reset => session.reset(),
            Command::Show => {
                writeln!(output, "{}", describe(session))?;
                continue;
            }
            Command::Save => {
                match session.save(output_dir) {
                    Ok(path) => writeln!(output, "Saved to: {}", path.display())?,
                    Err(e) => writeln!(output, "error: {e}")?,
                }
                continue;
            }
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        };

        match rendered {
            Ok(()) => writeln!(output, "{}", describe(session))?,
            Err(e) => writeln!(output, "error: {e}")?,
        }
    }

    Ok(())
}

/// One-line summary of the session's controls and parameters.
fn describe(session: &Session) -> String {
    let sliders = session.sliders();
    let params = serde_json::to_string(session.parameters())
        .unwrap_or_else(|e| format!("<unserializable: {e}>"));
    format!(
        "{}: gamma={} intensity={} brightness={} sigma={} filter={}\n  {params}",
        session.source_path().display(),
        sliders.gamma(),
        sliders.intensity(),
        sliders.brightness(),
        sliders.sigma(),
        session.parameters().filter_mode,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use image::Rgb;
    use retouch_pipeline::{FilterMode, RgbImage, SliderPositions, SourceImage};

    use super::*;

    fn session() -> Session {
        Session::new(
            SourceImage::Rgb(RgbImage::from_pixel(6, 6, Rgb([100, 150, 200]))),
            PathBuf::from("shot.png"),
            SliderPositions::default(),
            false,
        )
        .unwrap()
    }

    fn drive(session: &mut Session, script: &str, dir: &Path) -> String {
        let mut out = Vec::new();
        run(session, Cursor::new(script), &mut out, dir).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn adjustments_apply_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        drive(&mut s, "gamma 150\nbrightness -20\nfilter gaussian\nsigma 7\n", dir.path());
        assert_eq!(s.sliders().gamma(), 150);
        assert_eq!(s.sliders().brightness(), -20);
        assert_eq!(s.sliders().sigma(), 7);
        assert_eq!(s.parameters().filter_mode, FilterMode::GaussianBlur);
    }

    #[test]
    fn bad_commands_are_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        let out = drive(&mut s, "wobble\ngamma x\ngamma 60\n", dir.path());
        assert!(out.contains("error: unknown command 'wobble'"));
        assert!(out.contains("error: 'gamma' expects an integer, got 'x'"));
        assert_eq!(s.sliders().gamma(), 60);
    }

    #[test]
    fn quit_stops_reading() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        drive(&mut s, "quit\ngamma 60\n", dir.path());
        assert_eq!(s.sliders().gamma(), 100);
    }

    #[test]
    fn save_prints_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        let out = drive(&mut s, "filter sobel\nsave\n", dir.path());
        let expected = dir.path().join("modified_shot.png");
        assert!(out.contains(&format!("Saved to: {}", expected.display())));
        assert!(expected.is_file());
    }

    #[test]
    fn failed_save_keeps_the_loop_running() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut s = session();
        let out = drive(&mut s, "save\nintensity 80\n", &missing);
        assert!(out.contains("error: failed to write"));
        assert_eq!(s.sliders().intensity(), 80);
    }

    #[test]
    fn show_and_help_leave_state_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        let before = s.rendered().clone();
        let out = drive(&mut s, "show\nhelp\n\n", dir.path());
        assert!(out.contains("gamma=100 intensity=100 brightness=0 sigma=20 filter=none"));
        assert!(out.contains("commands:"));
        assert_eq!(s.rendered(), &before);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        drive(&mut s, "gamma 70\nfilter sobel\nreset\n", dir.path());
        assert_eq!(s.sliders(), &SliderPositions::default());
    }
}
