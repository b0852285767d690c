//! Encoding between hex strings, 0–1 triples and 0–255 triples.
//!
//! [`Hex`] is the canonical hex form `#rrggbb` (lowercase, six digits). It can
//! only be obtained by parsing or encoding, so every `Hex` in circulation is
//! canonical. Three-digit shorthand is accepted on input and expanded; it is
//! never produced.

use crate::error::{FormatError, FormatErrorKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical `#rrggbb` hex color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hex(String);

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb01 {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// sRGB color with 8-bit integer components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb256 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Hex {
    /// Parses `"#rgb"`, `"rgb"`, `"#rrggbb"` or `"rrggbb"` (any case).
    ///
    /// No surrounding whitespace is tolerated; the multi-line parser trims
    /// before calling this.
    pub fn parse(s: &str) -> Result<Hex, FormatError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(FormatError::new(s, FormatErrorKind::HexDigit(bad)));
        }
        let canonical = match digits.len() {
            6 => digits.to_ascii_lowercase(),
            3 => digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_lowercase(),
            n => return Err(FormatError::new(s, FormatErrorKind::HexLength(n))),
        };
        Ok(Hex(format!("#{canonical}")))
    }

    /// Returns the canonical `#rrggbb` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the three bytes.
    pub fn to_rgb256(&self) -> Rgb256 {
        // Canonical by construction, so every byte pair is valid hex.
        let byte = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        Rgb256 {
            r: byte(1),
            g: byte(3),
            b: byte(5),
        }
    }

    /// Decodes to 0–1 components.
    pub fn to_rgb01(&self) -> Rgb01 {
        rgb256_to_rgb01(self.to_rgb256())
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Hex {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hex::parse(s)
    }
}

impl AsRef<str> for Hex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hex::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Rgb256> for Hex {
    fn from(c: Rgb256) -> Self {
        Hex(format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
    }
}

/// Parses hex text into 0–1 components.
pub fn hex_to_rgb01(hex: &str) -> Result<Rgb01, FormatError> {
    Hex::parse(hex).map(|h| h.to_rgb01())
}

/// Parses hex text into 8-bit components.
pub fn hex_to_rgb256(hex: &str) -> Result<Rgb256, FormatError> {
    Hex::parse(hex).map(|h| h.to_rgb256())
}

/// Encodes 0–1 components as canonical hex.
///
/// Each channel is scaled by 255, rounded half to even, and silently clamped
/// to [0, 255].
/// This is the terminal write path, so out-of-range and NaN input never
/// errors here (NaN encodes as 0).
pub fn rgb01_to_hex(c: Rgb01) -> Hex {
    Hex::from(rgb01_to_rgb256(c))
}

/// Scales 8-bit components to [0, 1].
pub fn rgb256_to_rgb01(c: Rgb256) -> Rgb01 {
    Rgb01 {
        r: f64::from(c.r) / 255.0,
        g: f64::from(c.g) / 255.0,
        b: f64::from(c.b) / 255.0,
    }
}

/// Scales 0–1 components to bytes, rounding half to even and clamping.
pub fn rgb01_to_rgb256(c: Rgb01) -> Rgb256 {
    Rgb256 {
        r: quantize(c.r),
        g: quantize(c.g),
        b: quantize(c.b),
    }
}

fn quantize(v: f64) -> u8 {
    // `as` saturates and maps NaN to 0.
    (v * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn parse_accepts_hash_and_bare_forms() {
        assert_eq!(Hex::parse("#288ceb").unwrap().as_str(), "#288ceb");
        assert_eq!(Hex::parse("288ceb").unwrap().as_str(), "#288ceb");
    }

    #[test]
    fn parse_lowercases() {
        assert_eq!(Hex::parse("#F8F623").unwrap().as_str(), "#f8f623");
    }

    #[test]
    fn parse_expands_shorthand() {
        assert_eq!(Hex::parse("#fA0").unwrap().as_str(), "#ffaa00");
        assert_eq!(Hex::parse("abc").unwrap().as_str(), "#aabbcc");
    }

    #[test]
    fn parse_rejects_wrong_lengths() {
        for bad in ["", "#", "#ff", "#ffff", "#fffff", "#fffffff", "#ff00ff00"] {
            let err = Hex::parse(bad).unwrap_err();
            assert!(
                matches!(err.kind, FormatErrorKind::HexLength(_)),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_non_hex_characters() {
        let err = Hex::parse("#gggggg").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::HexDigit('g'));
        assert!(Hex::parse("#12 456").is_err());
        assert!(Hex::parse("##123456").is_err());
    }

    #[test]
    fn parse_rejects_multibyte_characters_without_panicking() {
        assert!(Hex::parse("#ffé0").is_err());
    }

    #[test]
    fn hex_to_rgb01_divides_by_255() {
        let c = hex_to_rgb01("#804020").unwrap();
        assert!(approx_eq(c.r, 128.0 / 255.0));
        assert!(approx_eq(c.g, 64.0 / 255.0));
        assert!(approx_eq(c.b, 32.0 / 255.0));
    }

    #[test]
    fn hex_to_rgb256_decodes_bytes() {
        let c = hex_to_rgb256("288ceb").unwrap();
        assert_eq!(c, Rgb256 { r: 40, g: 140, b: 235 });
    }

    #[test]
    fn rgb01_to_hex_rounds_to_nearest() {
        let c = Rgb01 {
            r: 0.5,
            g: 0.0,
            b: 1.0,
        };
        // 127.5 rounds to the even 128
        assert_eq!(rgb01_to_hex(c).as_str(), "#8000ff");
    }

    #[test]
    fn rgb01_to_hex_rounds_ties_to_even() {
        // 76.5, 178.5 and 25.5 exactly
        let c = Rgb01 {
            r: 0.3,
            g: 0.7,
            b: 0.1,
        };
        assert_eq!(rgb01_to_hex(c).as_str(), "#4cb21a");
        assert_eq!(rgb01_to_rgb256(c), Rgb256 { r: 76, g: 178, b: 26 });
    }

    #[test]
    fn rgb01_to_hex_clamps_silently() {
        let c = Rgb01 {
            r: 1.5,
            g: -0.1,
            b: 0.5,
        };
        assert_eq!(rgb01_to_hex(c).as_str(), "#ff0080");
    }

    #[test]
    fn rgb01_to_hex_maps_nan_to_zero() {
        let c = Rgb01 {
            r: f64::NAN,
            g: 1.0,
            b: 1.0,
        };
        assert_eq!(rgb01_to_hex(c).as_str(), "#00ffff");
    }

    #[test]
    fn rgb256_to_rgb01_scales() {
        let c = rgb256_to_rgb01(Rgb256 { r: 255, g: 0, b: 51 });
        assert!(approx_eq(c.r, 1.0));
        assert!(approx_eq(c.g, 0.0));
        assert!(approx_eq(c.b, 0.2));
    }

    #[test]
    fn rgb01_to_rgb256_rounds_components() {
        let c = rgb01_to_rgb256(Rgb01 {
            r: 0.157,
            g: 0.549,
            b: 0.922,
        });
        assert_eq!(c, Rgb256 { r: 40, g: 140, b: 235 });
    }

    #[test]
    fn hex_serializes_as_string() {
        let hex = Hex::parse("#C0FFEE").unwrap();
        assert_eq!(serde_json::to_string(&hex).unwrap(), "\"#c0ffee\"");
    }

    #[test]
    fn hex_deserializes_and_canonicalizes() {
        let hex: Hex = serde_json::from_str("\"0af\"").unwrap();
        assert_eq!(hex.as_str(), "#00aaff");
    }

    #[test]
    fn hex_deserialize_rejects_invalid() {
        let result: Result<Hex, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_rgb01_round_trip_is_identity(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let hex = Hex::from(Rgb256 { r, g, b });
                let back = rgb01_to_hex(hex_to_rgb01(hex.as_str()).unwrap());
                prop_assert_eq!(back, hex);
            }

            #[test]
            fn uppercase_input_round_trips_to_lowercase(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let upper = format!("{r:02X}{g:02X}{b:02X}");
                let back = rgb01_to_hex(hex_to_rgb01(&upper).unwrap());
                prop_assert_eq!(back.as_str(), format!("#{}", upper.to_ascii_lowercase()));
            }

            #[test]
            fn rgb01_to_hex_never_panics(r in proptest::num::f64::ANY, g in proptest::num::f64::ANY, b in proptest::num::f64::ANY) {
                let hex = rgb01_to_hex(Rgb01 { r, g, b });
                prop_assert_eq!(hex.as_str().len(), 7);
            }
        }
    }
}
