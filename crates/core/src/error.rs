//! Error types for the gradient core.
//!
//! Three recoverable error classes cross the library boundary:
//! [`FormatError`] for malformed text, [`ConversionError`] for transforms
//! that produced non-finite coordinates, and [`UnsupportedSpaceError`] for
//! unknown space or format names. [`GradientError`] wraps all three for hosts
//! that want a single error type.

use crate::color::ColorSpace;
use thiserror::Error;

/// Why a piece of color text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
    /// Hex text was not 3 or 6 digits long after stripping `#`.
    #[error("expected 3 or 6 hex digits, got {0}")]
    HexLength(usize),

    /// Hex text contained a character outside `0-9a-fA-F`.
    #[error("invalid hex digit '{0}'")]
    HexDigit(char),

    /// An RGB segment did not split into exactly three components.
    #[error("expected 3 components, got {0}")]
    ComponentCount(usize),

    /// A component between two commas was blank.
    #[error("empty component")]
    EmptyComponent,

    /// A component could not be parsed as the expected number type.
    #[error("could not parse '{value}' as {expected}")]
    InvalidNumber {
        value: String,
        expected: &'static str,
    },

    /// A component parsed but lies outside the allowed range.
    #[error("component {value} out of range [{min}, {max}]")]
    OutOfRange {
        value: String,
        min: &'static str,
        max: &'static str,
    },

    /// An opening bracket had no matching closing bracket, or vice versa.
    #[error("unbalanced brackets")]
    UnbalancedBrackets,
}

/// Malformed textual color input.
///
/// `line` is the 1-based line of the offending segment when the error came
/// from the multi-line parser, and `None` for single-value codec calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{prefix}{kind} in '{input}'", prefix = line_prefix(.line))]
pub struct FormatError {
    pub line: Option<usize>,
    pub input: String,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub fn new(input: &str, kind: FormatErrorKind) -> Self {
        Self {
            line: None,
            input: input.to_string(),
            kind,
        }
    }

    /// Attaches the 1-based line number the error was found on.
    pub fn at_line(self, line: usize) -> Self {
        Self {
            line: Some(line),
            ..self
        }
    }
}

fn line_prefix(line: &Option<usize>) -> String {
    line.map(|l| format!("line {l}: ")).unwrap_or_default()
}

/// A color-space transform could not produce finite coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConversionError {
    /// The color handed to the converter already held NaN or infinity.
    #[error("non-finite {space} coordinates {coords:?}")]
    NonFiniteInput {
        space: ColorSpace,
        coords: [f64; 3],
    },

    /// The transform itself produced NaN or infinity.
    #[error("conversion from {from} to {to} produced non-finite coordinates")]
    NonFiniteResult { from: ColorSpace, to: ColorSpace },
}

/// An unknown color space or output format name was requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {what}: '{name}'")]
pub struct UnsupportedSpaceError {
    pub what: &'static str,
    pub name: String,
}

impl UnsupportedSpaceError {
    pub(crate) fn space(name: &str) -> Self {
        Self {
            what: "color space",
            name: name.to_string(),
        }
    }

    pub(crate) fn format(name: &str) -> Self {
        Self {
            what: "format",
            name: name.to_string(),
        }
    }
}

/// Any error produced by the gradient core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    UnsupportedSpace(#[from] UnsupportedSpaceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_without_line_has_no_prefix() {
        let err = FormatError::new("12345", FormatErrorKind::HexLength(5));
        let msg = format!("{err}");
        assert!(!msg.starts_with("line"), "unexpected prefix in: {msg}");
        assert!(msg.contains('5'), "missing length in: {msg}");
        assert!(msg.contains("12345"), "missing input in: {msg}");
    }

    #[test]
    fn format_error_at_line_names_the_line() {
        let err = FormatError::new("0.5, 1.5, 0.2", FormatErrorKind::ComponentCount(4)).at_line(3);
        let msg = format!("{err}");
        assert!(msg.starts_with("line 3: "), "missing line prefix in: {msg}");
        assert!(msg.contains("expected 3 components, got 4"), "got: {msg}");
    }

    #[test]
    fn out_of_range_includes_value_and_bounds() {
        let err = FormatError::new(
            "1.5",
            FormatErrorKind::OutOfRange {
                value: "1.5".into(),
                min: "0",
                max: "1",
            },
        );
        let msg = format!("{err}");
        assert!(msg.contains("1.5"), "missing value in: {msg}");
        assert!(msg.contains("[0, 1]"), "missing bounds in: {msg}");
    }

    #[test]
    fn invalid_number_includes_expected_type() {
        let kind = FormatErrorKind::InvalidNumber {
            value: "abc".into(),
            expected: "an integer",
        };
        let msg = format!("{kind}");
        assert!(msg.contains("abc") && msg.contains("an integer"), "got: {msg}");
    }

    #[test]
    fn conversion_error_names_both_spaces() {
        let err = ConversionError::NonFiniteResult {
            from: ColorSpace::OkLch,
            to: ColorSpace::Srgb,
        };
        let msg = format!("{err}");
        assert!(msg.contains("oklch"), "missing source space in: {msg}");
        assert!(msg.contains("srgb"), "missing target space in: {msg}");
    }

    #[test]
    fn unsupported_space_includes_name() {
        let err = UnsupportedSpaceError::space("cmyk");
        let msg = format!("{err}");
        assert!(msg.contains("cmyk"), "missing name in: {msg}");
        assert!(msg.contains("color space"), "missing kind in: {msg}");
    }

    #[test]
    fn gradient_error_is_transparent_over_sources() {
        let inner = UnsupportedSpaceError::format("pdf");
        let err = GradientError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FormatError>();
        assert_send_sync::<ConversionError>();
        assert_send_sync::<UnsupportedSpaceError>();
        assert_send_sync::<GradientError>();
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FormatError>();
        assert_std_error::<GradientError>();
    }
}
