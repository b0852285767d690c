#![deny(unsafe_code)]
//! Color gradient and conversion engine.
//!
//! Provides space-tagged `Color` values with conversion between sRGB, linear
//! sRGB, CIE Lab/LCh, OKLab/OKLCh, HSL and HWB; sRGB gamut fitting; gradient
//! interpolation with shortest-arc hue; a permissive multi-line parser for
//! hex and RGB text; and formatting back to hex, `0–255` and `0–1` notation.
//!
//! Every operation is a pure function. Nothing here reads configuration or
//! touches the filesystem.

pub mod codec;
pub mod color;
pub mod error;
pub mod format;
pub mod gamut;
pub mod interpolate;
pub mod parse;
pub mod transform;

pub use codec::{hex_to_rgb01, hex_to_rgb256, rgb01_to_hex, rgb01_to_rgb256, rgb256_to_rgb01};
pub use codec::{Hex, Rgb01, Rgb256};
pub use color::{convert, Color, ColorSpace};
pub use error::{ConversionError, FormatError, FormatErrorKind, GradientError, UnsupportedSpaceError};
pub use format::{convert_text, format_as, format_as_with, Conversions, Format, Notation};
pub use gamut::GamutMapping;
pub use interpolate::{
    interpolate, interpolate_named, interpolate_three, Gradient, GradientSpace, ThreeColorGradient,
};
pub use parse::{parse_hex, parse_rgb01, parse_rgb256};
