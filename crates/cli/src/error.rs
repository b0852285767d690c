//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: color error (unknown space or format, failed conversion)
//! - 11: I/O error (settings file, stdin)
//! - 12: input error (malformed color text, bad settings, empty input)
//! - 13: serialization error

use gradient_core::{ConversionError, FormatError, GradientError, UnsupportedSpaceError};
use std::fmt;
use std::io;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A color-level error (unknown space or format, failed conversion).
    Color(GradientError),
    /// An I/O error (reading settings or stdin).
    Io(String),
    /// A user input error (malformed colors, out-of-bounds settings).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Color(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Color(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<GradientError> for CliError {
    fn from(e: GradientError) -> Self {
        match e {
            GradientError::Format(e) => CliError::Input(e.to_string()),
            other => CliError::Color(other),
        }
    }
}

impl From<FormatError> for CliError {
    fn from(e: FormatError) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<ConversionError> for CliError {
    fn from(e: ConversionError) -> Self {
        CliError::Color(e.into())
    }
}

impl From<UnsupportedSpaceError> for CliError {
    fn from(e: UnsupportedSpaceError) -> Self {
        CliError::Color(e.into())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
