//! Line commands for interactive mode.
//!
//! One command per line, keyword first, case-insensitive:
//!
//! ```text
//! gamma 120
//! filter sobel
//! save
//! ```

use std::str::FromStr;

use retouch_pipeline::FilterMode;

/// Usage summary printed by `help`.
pub const HELP: &str = "\
commands:
  gamma N           gamma slider, 50..=200 (100 = 1.0)
  intensity N       intensity slider, 50..=200 (100 = 1.0)
  brightness N      brightness slider, -255..=255
  sigma N           blur sigma slider, 1..=50 (20 = 2.0)
  filter NAME       none, gaussian or sobel
  reset             restore all defaults
  show              print current settings
  save              write the current render
  help              print this text
  quit              leave";

/// A parsed interactive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the gamma slider.
    Gamma(i32),
    /// Move the intensity slider.
    Intensity(i32),
    /// Move the brightness slider.
    Brightness(i32),
    /// Move the blur sigma slider.
    Sigma(i32),
    /// Select a filter.
    Filter(FilterMode),
    /// Restore every control to its default.
    Reset,
    /// Print the current controls and parameters.
    Show,
    /// Write the current render.
    Save,
    /// Print the command summary.
    Help,
    /// Leave the loop.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    /// The line held only whitespace.
    #[error("empty command")]
    Empty,

    /// The first word is not a known keyword.
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// A slider or filter command was given without its value.
    #[error("'{0}' needs a value")]
    MissingValue(&'static str),

    /// A slider value is not an integer.
    #[error("'{command}' expects an integer, got '{value}'")]
    InvalidNumber {
        /// Keyword of the slider command.
        command: &'static str,
        /// Text that failed to parse.
        value: String,
    },

    /// The filter name is not one of the known filters.
    #[error("unknown filter '{0}': expected none, gaussian or sobel")]
    UnknownFilter(String),

    /// More words followed the command than it accepts.
    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(&'static str),
}

/// Map a filter name to a [`FilterMode`].
///
/// Accepts the short names used on the command line.
#[must_use]
pub fn parse_filter(name: &str) -> Option<FilterMode> {
    match name.to_ascii_lowercase().as_str() {
        "none" | "off" => Some(FilterMode::None),
        "gaussian" | "blur" => Some(FilterMode::GaussianBlur),
        "sobel" | "edges" => Some(FilterMode::SobelEdges),
        _ => None,
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words
            .next()
            .ok_or(ParseCommandError::Empty)?
            .to_ascii_lowercase();
        let argument = words.next();
        let extra = words.next();

        let command = match keyword.as_str() {
            "gamma" => Self::Gamma(number("gamma", argument)?),
            "intensity" => Self::Intensity(number("intensity", argument)?),
            "brightness" => Self::Brightness(number("brightness", argument)?),
            "sigma" => Self::Sigma(number("sigma", argument)?),
            "filter" => {
                let name = argument.ok_or(ParseCommandError::MissingValue("filter"))?;
                Self::Filter(
                    parse_filter(name)
                        .ok_or_else(|| ParseCommandError::UnknownFilter(name.to_owned()))?,
                )
            }
            "reset" => no_argument(Self::Reset, "reset", argument)?,
            "show" => no_argument(Self::Show, "show", argument)?,
            "save" => no_argument(Self::Save, "save", argument)?,
            "help" | "?" => no_argument(Self::Help, "help", argument)?,
            "quit" | "exit" | "q" => no_argument(Self::Quit, "quit", argument)?,
            _ => return Err(ParseCommandError::Unknown(keyword)),
        };

        if extra.is_some() {
            return Err(ParseCommandError::UnexpectedArgument(command.keyword()));
        }
        Ok(command)
    }
}

impl Command {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Gamma(_) => "gamma",
            Self::Intensity(_) => "intensity",
            Self::Brightness(_) => "brightness",
            Self::Sigma(_) => "sigma",
            Self::Filter(_) => "filter",
            Self::Reset => "reset",
            Self::Show => "show",
            Self::Save => "save",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

fn number(command: &'static str, argument: Option<&str>) -> Result<i32, ParseCommandError> {
    let value = argument.ok_or(ParseCommandError::MissingValue(command))?;
    value
        .parse()
        .map_err(|_| ParseCommandError::InvalidNumber {
            command,
            value: value.to_owned(),
        })
}

fn no_argument(
    command: Command,
    keyword: &'static str,
    argument: Option<&str>,
) -> Result<Command, ParseCommandError> {
    match argument {
        None => Ok(command),
        Some(_) => Err(ParseCommandError::UnexpectedArgument(keyword)),
    }
}
