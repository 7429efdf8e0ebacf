//! Data structures for command-line arguments.

use std::io;
use std::path::PathBuf;

use lgtm::{ColorParseError, Config, RenderOptions, UnknownValue};
use lgtm::validation::Validation;
use thiserror::Error;


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// The stamp to render.
    pub config: Config,
    /// How to render it.
    pub render: RenderOptions,
    /// Directory to look up the fonts in.
    pub font_directory: Option<PathBuf>,

    /// Where to write the rendered image.
    pub output: Output,
    /// Base URL of the share link to print, if requested.
    pub link_base: Option<String>,
    /// Directory of the store where the config should be saved.
    pub save_directory: Option<PathBuf>,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}


/// Destination of the rendered image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// Standard output.
    Stdout,
    /// Given file.
    File(PathBuf),
    /// File with a generated name in the current directory.
    Generated,
}


/// Error that can occur while parsing of command line arguments.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// General error when parsing the arguments.
    #[error("invalid arguments: {0}")]
    Parse(#[from] clap::Error),
    /// Unknown template, font size, or text position.
    #[error("{0}")]
    Value(#[from] UnknownValue),
    /// Color that's neither a preset nor a hex code.
    #[error("invalid color `{value}`: {source}")]
    Color { value: String, #[source] source: ColorParseError },
    /// Malformed numeric option.
    #[error("invalid value of --{name}: {value}")]
    Number { name: &'static str, value: String },
    /// The --url link doesn't describe a stamp.
    #[error("share link doesn't describe a valid stamp: {0}")]
    Link(String),
    /// The --json file couldn't be read.
    #[error("cannot read {}: {source}", .path.display())]
    JsonIo { path: PathBuf, #[source] source: io::Error },
    /// The --json file isn't a stamp config.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json { path: PathBuf, #[source] source: serde_json::Error },
    /// The resulting stamp is invalid.
    #[error("invalid stamp: {0}")]
    Config(Validation),
}
