//! sRGB gamut testing and gamut mapping ("fitting").
//!
//! Fitting works in the color's own space and keeps what that space defines
//! as perceptually important. For LCh and OKLCh that means lightness and hue
//! are held while chroma is reduced (the CSS Color 4 binary search, accepting
//! a clipped candidate once it is within a just-noticeable difference). Every
//! other space is clipped per channel in sRGB and converted back.
//!
//! Fitting is not the same as the byte clamp in [`crate::codec::rgb01_to_hex`]:
//! a fitted color is a real in-gamut color in the source space.

use crate::color::{Color, ColorSpace};
use crate::error::ConversionError;
use crate::transform;

/// Tolerance for the [0, 1] channel test.
pub const GAMUT_EPSILON: f64 = 1e-4;

/// Just-noticeable difference in ΔE_OK.
const JND: f64 = 0.02;

/// How an out-of-gamut color is brought back inside sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamutMapping {
    /// Per-channel clip in sRGB.
    Clip,
    /// Chroma reduction in the color's polar space, keeping lightness and hue.
    /// Falls back to `Clip` for spaces without a chroma axis.
    Chroma,
}

impl GamutMapping {
    /// The default strategy for a space.
    pub fn for_space(space: ColorSpace) -> Self {
        match space {
            ColorSpace::Lch | ColorSpace::OkLch => GamutMapping::Chroma,
            _ => GamutMapping::Clip,
        }
    }
}

/// Whether `rgb` lies in the unit cube within [`GAMUT_EPSILON`].
fn in_unit_cube(rgb: [f64; 3]) -> bool {
    rgb.iter()
        .all(|&v| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&v))
}

fn clip(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|v| v.clamp(0.0, 1.0))
}

/// ΔE_OK between two sRGB triples.
fn delta_eok(a: [f64; 3], b: [f64; 3]) -> f64 {
    let a = transform::linear_to_oklab(transform::srgb_to_linear(a));
    let b = transform::linear_to_oklab(transform::srgb_to_linear(b));
    let dl = a[0] - b[0];
    let da = a[1] - b[1];
    let db = a[2] - b[2];
    (dl * dl + da * da + db * db).sqrt()
}

impl Color {
    /// Whether the color is displayable in sRGB.
    pub fn in_gamut(&self) -> Result<bool, ConversionError> {
        let rgb = self.convert(ColorSpace::Srgb)?.coords();
        Ok(in_unit_cube(rgb))
    }

    /// Maps the color into sRGB gamut with the default strategy for its space.
    ///
    /// The result stays in the color's own space. In-gamut colors are
    /// returned unchanged.
    pub fn fit(&self) -> Result<Color, ConversionError> {
        self.fit_with(GamutMapping::for_space(self.space()))
    }

    /// Maps the color into sRGB gamut with an explicit strategy.
    pub fn fit_with(&self, mapping: GamutMapping) -> Result<Color, ConversionError> {
        if self.in_gamut()? {
            return Ok(*self);
        }
        let fitted = match (mapping, self.space()) {
            (GamutMapping::Chroma, ColorSpace::Lch | ColorSpace::OkLch) => self.reduce_chroma()?,
            (GamutMapping::Chroma, ColorSpace::Lab) => {
                Color::new(ColorSpace::Lch, lab_to_lch(self.coords())).reduce_chroma()?
            }
            (GamutMapping::Chroma, ColorSpace::OkLab) => {
                Color::new(ColorSpace::OkLch, lab_to_lch(self.coords())).reduce_chroma()?
            }
            _ => self.clip()?,
        };
        tracing::debug!(
            space = %self.space(),
            from = ?self.coords(),
            to = ?fitted.coords(),
            ?mapping,
            "gamut-fitted color"
        );
        fitted.convert(self.space())
    }

    /// Clips in sRGB and returns the result in sRGB.
    fn clip(&self) -> Result<Color, ConversionError> {
        let rgb = self.convert(ColorSpace::Srgb)?.coords();
        Ok(Color::new(ColorSpace::Srgb, clip(rgb)))
    }

    /// CSS Color 4 chroma-reduction search for a polar color (`l, c, h`).
    ///
    /// Returns an sRGB color.
    fn reduce_chroma(&self) -> Result<Color, ConversionError> {
        let space = self.space();
        let [l, c, h] = self.coords();
        let white = space.white_lightness().unwrap_or(1.0);
        // Chroma resolution scales with the lightness range of the space.
        let epsilon = 1e-5 * white;

        if l >= white - epsilon {
            return Ok(Color::new(ColorSpace::Srgb, [1.0, 1.0, 1.0]));
        }
        if l <= epsilon {
            return Ok(Color::new(ColorSpace::Srgb, [0.0, 0.0, 0.0]));
        }

        let mut min = 0.0;
        let mut max = c.max(0.0);
        let mut current = [l, max, h];
        while max - min > epsilon {
            let chroma = (min + max) / 2.0;
            current[1] = chroma;
            let rgb = Color::new(space, current).convert(ColorSpace::Srgb)?.coords();
            if in_unit_cube(rgb) {
                min = chroma;
                continue;
            }
            let clipped = clip(rgb);
            if delta_eok(clipped, rgb) < JND {
                return Ok(Color::new(ColorSpace::Srgb, clipped));
            }
            max = chroma;
        }

        current[1] = min;
        let rgb = Color::new(space, current).convert(ColorSpace::Srgb)?.coords();
        Ok(Color::new(ColorSpace::Srgb, clip(rgb)))
    }
}

/// Polar form of a rectangular Lab-like triple, hue kept even at low chroma.
fn lab_to_lch(c: [f64; 3]) -> [f64; 3] {
    transform::rect_to_polar(c, 0.0)
}
