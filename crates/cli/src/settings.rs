//! Defaults for the `interpolate` command, read from an optional JSON file.
//!
//! The file uses the same keys as saved gradient settings. Any key may be
//! omitted; missing keys take the built-in defaults. The file is never
//! written.

use crate::error::CliError;
use gradient_core::{Format, GradientSpace, Hex, Rgb256};
use serde::Deserialize;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// Bounds on intermediate tiles between A and B.
pub const AB_COUNT_RANGE: RangeInclusive<usize> = 1..=9;
/// Bounds on intermediate tiles in each half of a three-color gradient.
pub const SEGMENT_COUNT_RANGE: RangeInclusive<usize> = 1..=5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gradient space name, e.g. `"oklch"` or `"OKLCH (OKLab LCh)"`.
    pub space: String,
    /// Output format name, e.g. `"hex"` or `"RGB 0-1"`.
    pub format: String,
    pub color_a: Hex,
    pub color_b: Hex,
    pub color_c: Hex,
    pub three_mode: bool,
    /// Tiles between A and B, endpoints excluded.
    pub ab_count: usize,
    /// Tiles between A and C, endpoints excluded.
    pub ac_count: usize,
    /// Tiles between C and B, endpoints excluded.
    pub cb_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            space: "oklch".to_string(),
            format: "hex".to_string(),
            color_a: hex(0xe3, 0x1b, 0x23),
            color_b: hex(0x00, 0xb0, 0xe6),
            color_c: hex(0xff, 0xd4, 0x00),
            three_mode: false,
            ab_count: 3,
            ac_count: 2,
            cb_count: 2,
        }
    }
}

fn hex(r: u8, g: u8, b: u8) -> Hex {
    Hex::from(Rgb256 { r, g, b })
}

impl Settings {
    /// Reads settings from `path`, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
        let settings: Settings = serde_json::from_str(&text)
            .map_err(|e| CliError::Input(format!("invalid settings in {}: {e}", path.display())))?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Checks tile counts against their bounds.
    pub fn validate(&self) -> Result<(), CliError> {
        check_count("ab_count", self.ab_count, &AB_COUNT_RANGE)?;
        check_count("ac_count", self.ac_count, &SEGMENT_COUNT_RANGE)?;
        check_count("cb_count", self.cb_count, &SEGMENT_COUNT_RANGE)
    }

    /// The configured gradient space, `srgb` if the name is unknown.
    pub fn gradient_space(&self) -> GradientSpace {
        GradientSpace::from_name(&self.space).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to srgb");
            GradientSpace::LinearLight
        })
    }

    /// The configured output format, hex if the name is unknown.
    pub fn output_format(&self) -> Format {
        Format::from_name(&self.format).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to hex");
            Format::Hex
        })
    }

    /// Total colors in the A→B gradient, endpoints included.
    pub fn ab_steps(&self) -> usize {
        self.ab_count + 2
    }

    pub fn ac_steps(&self) -> usize {
        self.ac_count + 2
    }

    pub fn cb_steps(&self) -> usize {
        self.cb_count + 2
    }
}

fn check_count(key: &str, value: usize, range: &RangeInclusive<usize>) -> Result<(), CliError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CliError::Input(format!(
            "{key} {value} out of range [{}, {}]",
            range.start(),
            range.end()
        )))
    }
}
