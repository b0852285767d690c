//! Space-tagged colors and conversion between spaces.
//!
//! A [`Color`] is three `f64` coordinates plus the [`ColorSpace`] they are
//! expressed in. The coordinates have no meaning without the tag, so the
//! fields are private and every cross-space operation goes through
//! [`Color::convert`]. Conversions never clamp; use [`Color::in_gamut`] and
//! [`Color::fit`] (see [`crate::gamut`]) before rendering.

use crate::codec::{rgb01_to_hex, Hex, Rgb01};
use crate::error::{ConversionError, UnsupportedSpaceError};
use crate::transform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All color spaces the converter understands.
const SPACE_NAMES: &[&str] = &[
    "srgb",
    "srgb-linear",
    "lab",
    "lch",
    "oklab",
    "oklch",
    "hsl",
    "hwb",
];

/// Chroma below which LCh hue is treated as powerless.
const LCH_ACHROMATIC: f64 = 1e-4;
/// Chroma below which OKLCh hue is treated as powerless.
const OKLCH_ACHROMATIC: f64 = 1e-6;
/// Saturation / purity below which HSL and HWB hue is treated as powerless.
const HSL_ACHROMATIC: f64 = 1e-9;

/// A supported color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorSpace {
    /// Gamma-encoded sRGB, channels `(r, g, b)` in [0, 1].
    Srgb,
    /// sRGB with the transfer function removed, `(r, g, b)`.
    #[serde(rename = "srgb-linear")]
    LinearSrgb,
    /// CIE Lab relative to D65, `(l, a, b)` with L in [0, 100].
    Lab,
    /// Polar CIE Lab, `(l, c, h)`.
    Lch,
    /// OKLab, `(l, a, b)` with L in [0, 1].
    #[serde(rename = "oklab")]
    OkLab,
    /// Polar OKLab, `(l, c, h)`.
    #[serde(rename = "oklch")]
    OkLch,
    /// `(h, s, l)` with s and l in [0, 1].
    Hsl,
    /// `(h, w, b)` with w and b in [0, 1].
    Hwb,
}

impl ColorSpace {
    /// Resolves a space by name, case-insensitively.
    ///
    /// Accepts the short identifiers (`"oklch"`, `"lab"`, `"srgb-linear"`, …)
    /// and the friendly labels found in saved settings
    /// (`"OKLCH (OKLab LCh)"`, `"CIE Lab"`, …).
    pub fn from_name(name: &str) -> Result<Self, UnsupportedSpaceError> {
        let key = name.trim().to_ascii_lowercase();
        let space = match key.as_str() {
            "srgb" | "rgb" => ColorSpace::Srgb,
            "srgb-linear" | "srgb_linear" | "linear-srgb" | "linear" => ColorSpace::LinearSrgb,
            "lab" | "cie lab" | "cielab" => ColorSpace::Lab,
            "lch" | "lch (cie lch)" | "cie lch" => ColorSpace::Lch,
            "oklab" => ColorSpace::OkLab,
            "oklch" | "oklch (oklab lch)" => ColorSpace::OkLch,
            _ if key == "hsl" || key.starts_with("hsl (") => ColorSpace::Hsl,
            _ if key == "hwb" || key.starts_with("hwb (") => ColorSpace::Hwb,
            _ => return Err(UnsupportedSpaceError::space(name)),
        };
        Ok(space)
    }

    /// Returns the short identifier of this space.
    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Srgb => "srgb",
            ColorSpace::LinearSrgb => "srgb-linear",
            ColorSpace::Lab => "lab",
            ColorSpace::Lch => "lch",
            ColorSpace::OkLab => "oklab",
            ColorSpace::OkLch => "oklch",
            ColorSpace::Hsl => "hsl",
            ColorSpace::Hwb => "hwb",
        }
    }

    /// Returns the identifiers of every supported space.
    pub fn list_names() -> &'static [&'static str] {
        SPACE_NAMES
    }

    /// Index of the hue coordinate for cylindrical spaces, `None` otherwise.
    pub fn hue_index(self) -> Option<usize> {
        match self {
            ColorSpace::Lch | ColorSpace::OkLch => Some(2),
            ColorSpace::Hsl | ColorSpace::Hwb => Some(0),
            _ => None,
        }
    }

    /// Whether the space has an angular hue coordinate.
    pub fn is_cylindrical(self) -> bool {
        self.hue_index().is_some()
    }

    /// Whether the space is a reshaping of gamma-encoded sRGB.
    fn is_gamma_encoded(self) -> bool {
        matches!(self, ColorSpace::Srgb | ColorSpace::Hsl | ColorSpace::Hwb)
    }

    /// Lightness of the white point for spaces that have a lightness axis.
    pub(crate) fn white_lightness(self) -> Option<f64> {
        match self {
            ColorSpace::Lab | ColorSpace::Lch => Some(100.0),
            ColorSpace::OkLab | ColorSpace::OkLch => Some(1.0),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = UnsupportedSpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorSpace::from_name(s)
    }
}

/// Three coordinates tagged with the space they belong to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    space: ColorSpace,
    coords: [f64; 3],
}

impl Color {
    pub fn new(space: ColorSpace, coords: [f64; 3]) -> Self {
        Self { space, coords }
    }

    /// An sRGB color from 0–1 components.
    pub fn from_rgb01(c: Rgb01) -> Self {
        Self::new(ColorSpace::Srgb, [c.r, c.g, c.b])
    }

    /// An sRGB color from canonical hex.
    pub fn from_hex(hex: &Hex) -> Self {
        Self::from_rgb01(hex.to_rgb01())
    }

    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn coords(&self) -> [f64; 3] {
        self.coords
    }

    /// Converts to another space.
    ///
    /// Returns `ConversionError` if the input holds NaN or infinity, or if
    /// the transform produced one.
    pub fn convert(&self, to: ColorSpace) -> Result<Color, ConversionError> {
        if !self.coords.iter().all(|v| v.is_finite()) {
            return Err(ConversionError::NonFiniteInput {
                space: self.space,
                coords: self.coords,
            });
        }
        if self.space == to {
            return Ok(*self);
        }

        let coords = if self.space.is_gamma_encoded() && to.is_gamma_encoded() {
            from_srgb(to, to_srgb(self.space, self.coords))
        } else {
            from_linear(to, to_linear(self.space, self.coords))
        };

        if coords.iter().all(|v| v.is_finite()) {
            Ok(Color::new(to, coords))
        } else {
            Err(ConversionError::NonFiniteResult {
                from: self.space,
                to,
            })
        }
    }

    /// Converts to gamma-encoded sRGB components, unclamped.
    pub fn to_rgb01(&self) -> Result<Rgb01, ConversionError> {
        let [r, g, b] = self.convert(ColorSpace::Srgb)?.coords;
        Ok(Rgb01 { r, g, b })
    }

    /// Renders as hex. Out-of-gamut channels are clamped, not fitted.
    pub fn to_hex(&self) -> Result<Hex, ConversionError> {
        self.to_rgb01().map(rgb01_to_hex)
    }

    /// Whether the hue coordinate is powerless (a gray in a cylindrical space).
    ///
    /// Always `false` for spaces without a hue.
    pub fn is_achromatic(&self) -> bool {
        let [_, c1, c2] = self.coords;
        match self.space {
            ColorSpace::Lch => c1.abs() < LCH_ACHROMATIC,
            ColorSpace::OkLch => c1.abs() < OKLCH_ACHROMATIC,
            ColorSpace::Hsl => c1.abs() < HSL_ACHROMATIC || c2 <= 0.0 || c2 >= 1.0,
            ColorSpace::Hwb => c1 + c2 >= 1.0 - HSL_ACHROMATIC,
            _ => false,
        }
    }
}

/// Converts raw coordinates from one space to another.
pub fn convert(coords: [f64; 3], from: ColorSpace, to: ColorSpace) -> Result<Color, ConversionError> {
    Color::new(from, coords).convert(to)
}

fn to_srgb(space: ColorSpace, c: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::Srgb => c,
        ColorSpace::Hsl => transform::hsl_to_srgb(c),
        ColorSpace::Hwb => transform::hwb_to_srgb(c),
        other => transform::linear_to_srgb(to_linear(other, c)),
    }
}

fn from_srgb(space: ColorSpace, c: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::Srgb => c,
        ColorSpace::Hsl => transform::srgb_to_hsl(c),
        ColorSpace::Hwb => transform::srgb_to_hwb(c),
        other => from_linear(other, transform::srgb_to_linear(c)),
    }
}

fn to_linear(space: ColorSpace, c: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::LinearSrgb => c,
        ColorSpace::Srgb | ColorSpace::Hsl | ColorSpace::Hwb => {
            transform::srgb_to_linear(to_srgb(space, c))
        }
        ColorSpace::Lab => transform::lab_to_linear(c),
        ColorSpace::Lch => transform::lab_to_linear(transform::polar_to_rect(c)),
        ColorSpace::OkLab => transform::oklab_to_linear(c),
        ColorSpace::OkLch => transform::oklab_to_linear(transform::polar_to_rect(c)),
    }
}

fn from_linear(space: ColorSpace, c: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::LinearSrgb => c,
        ColorSpace::Srgb | ColorSpace::Hsl | ColorSpace::Hwb => {
            from_srgb(space, transform::linear_to_srgb(c))
        }
        ColorSpace::Lab => transform::linear_to_lab(c),
        ColorSpace::Lch => transform::rect_to_polar(transform::linear_to_lab(c), LCH_ACHROMATIC),
        ColorSpace::OkLab => transform::linear_to_oklab(c),
        ColorSpace::OkLch => {
            transform::rect_to_polar(transform::linear_to_oklab(c), OKLCH_ACHROMATIC)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn red() -> Color {
        Color::new(ColorSpace::Srgb, [1.0, 0.0, 0.0])
    }

    // -- ColorSpace --

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(ColorSpace::from_name("OKLCH").unwrap(), ColorSpace::OkLch);
        assert_eq!(ColorSpace::from_name("Lab").unwrap(), ColorSpace::Lab);
        assert_eq!(ColorSpace::from_name(" hwb ").unwrap(), ColorSpace::Hwb);
    }

    #[test]
    fn from_name_accepts_friendly_labels() {
        assert_eq!(
            ColorSpace::from_name("OKLCH (OKLab LCh)").unwrap(),
            ColorSpace::OkLch
        );
        assert_eq!(ColorSpace::from_name("LCh (CIE LCh)").unwrap(), ColorSpace::Lch);
        assert_eq!(ColorSpace::from_name("CIE Lab").unwrap(), ColorSpace::Lab);
        assert_eq!(
            ColorSpace::from_name("HSL (Hue-Saturation-Lightness)").unwrap(),
            ColorSpace::Hsl
        );
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let err = ColorSpace::from_name("cmyk").unwrap_err();
        assert_eq!(err.name, "cmyk");
    }

    #[test]
    fn every_listed_name_resolves_to_itself() {
        for name in ColorSpace::list_names() {
            let space: ColorSpace = name.parse().unwrap();
            assert_eq!(space.name(), *name);
        }
    }

    #[test]
    fn hue_index_follows_channel_order() {
        assert_eq!(ColorSpace::OkLch.hue_index(), Some(2));
        assert_eq!(ColorSpace::Lch.hue_index(), Some(2));
        assert_eq!(ColorSpace::Hsl.hue_index(), Some(0));
        assert_eq!(ColorSpace::Hwb.hue_index(), Some(0));
        assert!(!ColorSpace::Lab.is_cylindrical());
        assert!(!ColorSpace::Srgb.is_cylindrical());
    }

    #[test]
    fn color_space_serializes_by_name() {
        let json = serde_json::to_string(&ColorSpace::LinearSrgb).unwrap();
        assert_eq!(json, "\"srgb-linear\"");
        let space: ColorSpace = serde_json::from_str("\"oklch\"").unwrap();
        assert_eq!(space, ColorSpace::OkLch);
    }

    // -- conversion --

    #[test]
    fn convert_to_same_space_is_identity() {
        let c = Color::new(ColorSpace::Lab, [50.0, 10.0, -20.0]);
        assert_eq!(c.convert(ColorSpace::Lab).unwrap(), c);
    }

    #[test]
    fn convert_red_to_oklch() {
        let lch = red().convert(ColorSpace::OkLch).unwrap().coords();
        assert!((lch[0] - 0.628).abs() < 1e-3, "L {}", lch[0]);
        assert!((lch[1] - 0.2577).abs() < 1e-3, "C {}", lch[1]);
        assert!((lch[2] - 29.23).abs() < 0.1, "h {}", lch[2]);
    }

    #[test]
    fn convert_red_to_hsl_stays_in_gamma_space() {
        let hsl = red().convert(ColorSpace::Hsl).unwrap().coords();
        assert_eq!(hsl, [0.0, 1.0, 0.5]);
    }

    #[test]
    fn convert_hsl_to_hwb() {
        let hwb = convert([300.0, 1.0, 0.5], ColorSpace::Hsl, ColorSpace::Hwb)
            .unwrap()
            .coords();
        assert!(approx_eq(hwb[0], 300.0));
        assert!(approx_eq(hwb[1], 0.0));
        assert!(approx_eq(hwb[2], 0.0));
    }

    #[test]
    fn every_space_round_trips_through_srgb() {
        let original = Color::new(ColorSpace::Srgb, [0.157, 0.549, 0.922]);
        for name in ColorSpace::list_names() {
            let space = ColorSpace::from_name(name).unwrap();
            let back = original
                .convert(space)
                .and_then(|c| c.convert(ColorSpace::Srgb))
                .unwrap();
            for i in 0..3 {
                assert!(
                    (back.coords()[i] - original.coords()[i]).abs() < 1e-6,
                    "{name}: {:?}",
                    back.coords()
                );
            }
        }
    }

    #[test]
    fn convert_rejects_non_finite_input() {
        let c = Color::new(ColorSpace::OkLch, [0.5, f64::NAN, 30.0]);
        assert!(matches!(
            c.convert(ColorSpace::Srgb),
            Err(ConversionError::NonFiniteInput { .. })
        ));
    }

    #[test]
    fn convert_reports_non_finite_result() {
        // Finite but enormous Lab lightness overflows when cubed.
        let c = Color::new(ColorSpace::Lab, [1e300, 0.0, 0.0]);
        assert!(matches!(
            c.convert(ColorSpace::Srgb),
            Err(ConversionError::NonFiniteResult { .. })
        ));
    }

    #[test]
    fn to_hex_clamps_out_of_gamut() {
        let c = Color::new(ColorSpace::Srgb, [1.2, -0.3, 0.5]);
        assert_eq!(c.to_hex().unwrap().as_str(), "#ff0080");
    }

    #[test]
    fn from_hex_round_trips() {
        let hex = Hex::parse("#c0ffee").unwrap();
        assert_eq!(Color::from_hex(&hex).to_hex().unwrap(), hex);
    }

    // -- achromatic detection --

    #[test]
    fn grays_are_achromatic_in_every_cylindrical_space() {
        let gray = Color::new(ColorSpace::Srgb, [0.5, 0.5, 0.5]);
        for space in [ColorSpace::Lch, ColorSpace::OkLch, ColorSpace::Hsl, ColorSpace::Hwb] {
            let c = gray.convert(space).unwrap();
            assert!(c.is_achromatic(), "{space}: {:?}", c.coords());
        }
    }

    #[test]
    fn saturated_colors_are_not_achromatic() {
        for space in [ColorSpace::Lch, ColorSpace::OkLch, ColorSpace::Hsl, ColorSpace::Hwb] {
            let c = red().convert(space).unwrap();
            assert!(!c.is_achromatic(), "{space}: {:?}", c.coords());
        }
    }

    #[test]
    fn rectangular_spaces_are_never_achromatic() {
        assert!(!Color::new(ColorSpace::OkLab, [0.5, 0.0, 0.0]).is_achromatic());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn unit() -> impl Strategy<Value = f64> {
            0.0_f64..=1.0
        }

        proptest! {
            #[test]
            fn srgb_round_trip_through_any_space(
                r in unit(),
                g in unit(),
                b in unit(),
                idx in 0usize..8,
            ) {
                let space = ColorSpace::from_name(ColorSpace::list_names()[idx]).unwrap();
                let original = Color::new(ColorSpace::Srgb, [r, g, b]);
                let back = original.convert(space).and_then(|c| c.convert(ColorSpace::Srgb)).unwrap();
                for i in 0..3 {
                    prop_assert!(
                        (back.coords()[i] - original.coords()[i]).abs() < 1e-5,
                        "{}: {:?} vs {:?}", space, back.coords(), original.coords()
                    );
                }
            }

            #[test]
            fn hex_survives_round_trip_through_any_space(
                r in any::<u8>(),
                g in any::<u8>(),
                b in any::<u8>(),
                idx in 0usize..8,
            ) {
                let space = ColorSpace::from_name(ColorSpace::list_names()[idx]).unwrap();
                let hex = Hex::from(crate::codec::Rgb256 { r, g, b });
                let back = Color::from_hex(&hex).convert(space).unwrap().to_hex().unwrap();
                prop_assert_eq!(back, hex);
            }
        }
    }
}
