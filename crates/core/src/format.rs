//! Rendering colors as text, and the converter batch.
//!
//! Output of every notation parses back with [`crate::parse`].

use crate::codec::{rgb01_to_hex, rgb01_to_rgb256, Hex, Rgb01, Rgb256};
use crate::error::{FormatError, UnsupportedSpaceError};
use crate::parse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal places used for 0–1 components before trimming.
const RGB01_DECIMALS: usize = 5;

/// A textual color notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `#rrggbb`
    #[default]
    Hex,
    /// `r, g, b` integers in [0, 255].
    Rgb256,
    /// `r, g, b` decimals in [0, 1].
    Rgb01,
}

impl Format {
    /// Resolves a format by name, case-insensitively.
    ///
    /// Accepts `hex`, `rgb256` and `rgb01` as well as the labels `"RGB 256"`
    /// and `"RGB 0-1"`.
    pub fn from_name(name: &str) -> Result<Self, UnsupportedSpaceError> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "hex" => Ok(Format::Hex),
            "rgb256" | "256" => Ok(Format::Rgb256),
            "rgb01" | "01" => Ok(Format::Rgb01),
            _ => Err(UnsupportedSpaceError::format(name)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Hex => "hex",
            Format::Rgb256 => "rgb256",
            Format::Rgb01 => "rgb01",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        &["hex", "rgb256", "rgb01"]
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = UnsupportedSpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_name(s)
    }
}

/// Whether RGB output is wrapped as `rgb(…)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    #[default]
    Bare,
    Functional,
}

impl Notation {
    fn wrap(self, body: String) -> String {
        match self {
            Notation::Bare => body,
            Notation::Functional => format!("rgb({body})"),
        }
    }
}

/// One 0–1 component: five decimals, trailing zeros and point trimmed.
///
/// The leading zero is kept, so `0.5` renders as `"0.5"` and `1.0` as `"1"`.
pub fn format_rgb01_component(v: f64) -> String {
    let s = format!("{:.*}", RGB01_DECIMALS, v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub fn format_rgb01(c: Rgb01) -> String {
    [c.r, c.g, c.b].map(format_rgb01_component).join(", ")
}

pub fn format_rgb256(c: Rgb256) -> String {
    format!("{}, {}, {}", c.r, c.g, c.b)
}

/// Renders hex colors in `format` with bare notation.
pub fn format_as(colors: &[Hex], format: Format) -> Vec<String> {
    format_as_with(colors, format, Notation::Bare)
}

/// Renders hex colors in `format`; `notation` only affects the RGB formats.
pub fn format_as_with(colors: &[Hex], format: Format, notation: Notation) -> Vec<String> {
    colors
        .iter()
        .map(|hex| match format {
            Format::Hex => hex.to_string(),
            Format::Rgb256 => notation.wrap(format_rgb256(hex.to_rgb256())),
            Format::Rgb01 => notation.wrap(format_rgb01(hex.to_rgb01())),
        })
        .collect()
}

/// The same colors written in all three notations, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Conversions {
    pub hex: Vec<String>,
    pub rgb256: Vec<String>,
    pub rgb01: Vec<String>,
}

impl Conversions {
    pub fn len(&self) -> usize {
        self.hex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }

    /// The column for one format.
    pub fn get(&self, format: Format) -> &[String] {
        match format {
            Format::Hex => &self.hex,
            Format::Rgb256 => &self.rgb256,
            Format::Rgb01 => &self.rgb01,
        }
    }

    fn push(&mut self, hex: Hex, rgb256: Rgb256, rgb01: Rgb01) {
        self.hex.push(hex.to_string());
        self.rgb256.push(format_rgb256(rgb256));
        self.rgb01.push(format_rgb01(rgb01));
    }
}

/// Parses `text` in the `source` notation and writes it in all three.
///
/// 0–1 input keeps its own precision in the `rgb01` column rather than
/// being quantized through a byte.
pub fn convert_text(text: &str, source: Format) -> Result<Conversions, FormatError> {
    let mut out = Conversions::default();
    match source {
        Format::Hex => {
            for hex in parse::parse_hex(text)? {
                out.push(hex.clone(), hex.to_rgb256(), hex.to_rgb01());
            }
        }
        Format::Rgb256 => {
            for c in parse::parse_rgb256(text)? {
                let hex = Hex::from(c);
                out.push(hex.clone(), c, hex.to_rgb01());
            }
        }
        Format::Rgb01 => {
            for c in parse::parse_rgb01(text)? {
                out.push(rgb01_to_hex(c), rgb01_to_rgb256(c), c);
            }
        }
    }
    Ok(out)
}
