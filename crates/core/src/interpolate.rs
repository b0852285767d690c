//! Gradients between two (or three) endpoint colors.
//!
//! Channels are interpolated linearly in the chosen space. Cylindrical spaces
//! interpolate their hue along the shortest arc, so a ramp from 350° to 10°
//! passes through 0° instead of sweeping the whole wheel. The `srgb` mode is
//! different: it blends in linear light and never visits the generic
//! converter.

use crate::codec::{rgb01_to_hex, Hex, Rgb01};
use crate::color::{Color, ColorSpace};
use crate::error::{ConversionError, UnsupportedSpaceError};
use crate::transform;
use std::fmt;

/// Where a gradient is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientSpace {
    /// Blend linearized sRGB and re-encode each step.
    LinearLight,
    /// Convert both endpoints into a color space and blend its coordinates.
    Space(ColorSpace),
}

impl GradientSpace {
    /// Resolves a gradient space by name, case-insensitively.
    ///
    /// `srgb` and `rgb` select the linear-light path; every other name is
    /// resolved with [`ColorSpace::from_name`].
    pub fn from_name(name: &str) -> Result<Self, UnsupportedSpaceError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "srgb" | "rgb" => Ok(GradientSpace::LinearLight),
            _ => ColorSpace::from_name(name).map(GradientSpace::Space),
        }
    }

    /// Returns the names accepted for gradients, in display order.
    pub fn list_names() -> &'static [&'static str] {
        &["oklch", "oklab", "lch", "lab", "srgb", "hsl", "hwb"]
    }

    pub fn name(self) -> &'static str {
        match self {
            GradientSpace::LinearLight => "srgb",
            GradientSpace::Space(space) => space.name(),
        }
    }
}

impl Default for GradientSpace {
    fn default() -> Self {
        GradientSpace::Space(ColorSpace::OkLch)
    }
}

impl fmt::Display for GradientSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The colors of one gradient plus a record of any steps that fell back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    colors: Vec<Hex>,
    fallbacks: Vec<usize>,
}

impl Gradient {
    pub fn colors(&self) -> &[Hex] {
        &self.colors
    }

    pub fn into_colors(self) -> Vec<Hex> {
        self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Indices of steps that could not be converted and were replaced by
    /// the nearer endpoint.
    pub fn fallbacks(&self) -> &[usize] {
        &self.fallbacks
    }

    /// One-line note for the host's status area, `None` if every step
    /// converted cleanly.
    pub fn status_note(&self) -> Option<String> {
        match self.fallbacks.len() {
            0 => None,
            1 => Some(format!(
                "step {} could not be converted and was replaced by an endpoint",
                self.fallbacks[0]
            )),
            n => Some(format!(
                "{n} of {} steps could not be converted and were replaced by endpoints",
                self.colors.len()
            )),
        }
    }
}

/// The two segments of a three-color gradient, A→C and C→B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreeColorGradient {
    pub ac: Gradient,
    pub cb: Gradient,
}

impl ThreeColorGradient {
    /// Both segments as one sequence, with the shared midpoint listed once.
    pub fn combined(&self) -> Vec<Hex> {
        let ac = self.ac.colors();
        let head = if self.cb.is_empty() {
            ac
        } else {
            &ac[..ac.len().saturating_sub(1)]
        };
        head.iter().chain(self.cb.colors()).cloned().collect()
    }
}

/// Linear interpolation `a + (b - a) * t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Shortest-arc hue interpolation in degrees, result in [0, 360).
pub fn interpolate_hue(a: f64, b: f64, t: f64) -> f64 {
    let delta = (b - a + 180.0).rem_euclid(360.0) - 180.0;
    transform::normalize_hue(a + delta * t)
}

/// Parameter of step `i` in a gradient of `steps` colors.
fn step_t(i: usize, steps: usize) -> f64 {
    if steps < 2 {
        0.0
    } else {
        i as f64 / (steps - 1) as f64
    }
}

/// Builds a gradient of `steps` colors from `a` to `b` in `space`.
///
/// `steps == 0` gives an empty gradient and `steps == 1` gives `[a]`. From
/// two steps on, the first color is `a` and the last is `b`. A step whose
/// conversion fails is replaced by `a` (first half) or `b` (second half) and
/// recorded in [`Gradient::fallbacks`].
pub fn interpolate(a: &Hex, b: &Hex, steps: usize, space: GradientSpace) -> Gradient {
    match space {
        GradientSpace::LinearLight => interpolate_linear_light(a, b, steps),
        GradientSpace::Space(space) => interpolate_in(a, b, steps, space),
    }
}

/// Like [`interpolate`], resolving the space by name first.
pub fn interpolate_named(
    a: &Hex,
    b: &Hex,
    steps: usize,
    name: &str,
) -> Result<Gradient, UnsupportedSpaceError> {
    let space = GradientSpace::from_name(name)?;
    Ok(interpolate(a, b, steps, space))
}

/// Builds the two segments A→C and C→B, sharing C.
pub fn interpolate_three(
    a: &Hex,
    c: &Hex,
    b: &Hex,
    ac_steps: usize,
    cb_steps: usize,
    space: GradientSpace,
) -> ThreeColorGradient {
    ThreeColorGradient {
        ac: interpolate(a, c, ac_steps, space),
        cb: interpolate(c, b, cb_steps, space),
    }
}

fn interpolate_linear_light(a: &Hex, b: &Hex, steps: usize) -> Gradient {
    let to_linear = |h: &Hex| {
        let c = h.to_rgb01();
        transform::srgb_to_linear([c.r, c.g, c.b])
    };
    let la = to_linear(a);
    let lb = to_linear(b);

    let colors = (0..steps)
        .map(|i| {
            let t = step_t(i, steps);
            let mixed = [
                lerp(la[0], lb[0], t),
                lerp(la[1], lb[1], t),
                lerp(la[2], lb[2], t),
            ];
            let [r, g, b] = transform::linear_to_srgb(mixed);
            rgb01_to_hex(Rgb01 { r, g, b })
        })
        .collect();

    Gradient {
        colors,
        fallbacks: Vec::new(),
    }
}

fn interpolate_in(a: &Hex, b: &Hex, steps: usize, space: ColorSpace) -> Gradient {
    let _span = tracing::debug_span!("interpolate", %space).entered();
    let endpoints = endpoints_in(a, b, space);
    collect_steps(a, b, steps, |t| {
        endpoints.and_then(|(ca, cb)| render_step(ca, cb, t, space))
    })
}

/// The endpoint that stands in for a failed step at `t`.
fn fallback_endpoint<'a>(t: f64, a: &'a Hex, b: &'a Hex) -> &'a Hex {
    if t < 0.5 {
        a
    } else {
        b
    }
}

/// Runs `step` for every `t`, replacing failures with the nearer endpoint.
fn collect_steps<F>(a: &Hex, b: &Hex, steps: usize, mut step: F) -> Gradient
where
    F: FnMut(f64) -> Result<Hex, ConversionError>,
{
    let mut colors = Vec::with_capacity(steps);
    let mut fallbacks = Vec::new();

    for i in 0..steps {
        let t = step_t(i, steps);
        match step(t) {
            Ok(hex) => colors.push(hex),
            Err(err) => {
                let fallback = fallback_endpoint(t, a, b);
                tracing::warn!(
                    step = i,
                    t,
                    error = %err,
                    fallback = %fallback,
                    "gradient step fell back to endpoint"
                );
                fallbacks.push(i);
                colors.push(fallback.clone());
            }
        }
    }

    Gradient { colors, fallbacks }
}

/// Both endpoints in `space`, with a powerless hue borrowed from the other end.
fn endpoints_in(a: &Hex, b: &Hex, space: ColorSpace) -> Result<([f64; 3], [f64; 3]), ConversionError> {
    let ca = Color::from_hex(a).convert(space)?;
    let cb = Color::from_hex(b).convert(space)?;
    let mut pa = ca.coords();
    let mut pb = cb.coords();

    if let Some(h) = space.hue_index() {
        match (ca.is_achromatic(), cb.is_achromatic()) {
            (true, false) => pa[h] = pb[h],
            (false, true) => pb[h] = pa[h],
            _ => {}
        }
    }
    Ok((pa, pb))
}

fn render_step(a: [f64; 3], b: [f64; 3], t: f64, space: ColorSpace) -> Result<Hex, ConversionError> {
    let hue = space.hue_index();
    let mut coords = [0.0; 3];
    for (i, c) in coords.iter_mut().enumerate() {
        *c = if Some(i) == hue {
            interpolate_hue(a[i], b[i], t)
        } else {
            lerp(a[i], b[i], t)
        };
    }
    Color::new(space, coords).fit()?.to_hex()
}
