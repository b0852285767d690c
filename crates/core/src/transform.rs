//! Pure per-space transforms on raw `[f64; 3]` coordinates.
//!
//! Linear sRGB is the hub: every perceptual space converts to and from it.
//! HSL and HWB are reshapings of gamma-encoded sRGB and convert to and from
//! sRGB directly. Nothing here clamps; out-of-gamut values pass through so
//! the gamut module can decide what to do with them.
//!
//! Channel order follows each space's usual notation: Lab/OKLab `(l, a, b)`,
//! LCh/OKLCh `(l, c, h)`, HSL `(h, s, l)`, HWB `(h, w, b)`. Hues are degrees.

// Single-letter channel names are the colour-science convention.
#![allow(clippy::many_single_char_names)]

/// D65 reference white in XYZ, derived from the chromaticity (0.3127, 0.3290).
pub const D65_WHITE: [f64; 3] = [0.3127 / 0.3290, 1.0, (1.0 - 0.3127 - 0.3290) / 0.3290];

/// CIE ε = 216/24389.
const CIE_EPSILON: f64 = 216.0 / 24389.0;
/// CIE κ = 24389/27.
const CIE_KAPPA: f64 = 24389.0 / 27.0;

const LINEAR_SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.41239079926595934, 0.357584339383878, 0.1804807884018343],
    [0.21263900587151027, 0.715168678767756, 0.07219231536073371],
    [0.01933081871559182, 0.11919477979462598, 0.9505321522496607],
];

const XYZ_TO_LINEAR_SRGB: [[f64; 3]; 3] = [
    [3.2409699419045226, -1.537383177570094, -0.4986107602930034],
    [-0.9692436362808796, 1.8759675015077202, 0.04155505740717559],
    [0.05563007969699366, -0.20397695888897652, 1.0569715142428786],
];

fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

// -- sRGB transfer function (IEC 61966-2-1) --

/// Applies inverse sRGB gamma to a single component.
pub fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to a single linear component.
pub fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

pub fn srgb_to_linear(c: [f64; 3]) -> [f64; 3] {
    c.map(srgb_component_to_linear)
}

pub fn linear_to_srgb(c: [f64; 3]) -> [f64; 3] {
    c.map(linear_component_to_srgb)
}

// -- CIE Lab (D65) --

pub fn linear_to_xyz(c: [f64; 3]) -> [f64; 3] {
    mul(&LINEAR_SRGB_TO_XYZ, c)
}

pub fn xyz_to_linear(c: [f64; 3]) -> [f64; 3] {
    mul(&XYZ_TO_LINEAR_SRGB, c)
}

/// Converts D65 XYZ to CIE Lab relative to the D65 white.
pub fn xyz_to_lab(xyz: [f64; 3]) -> [f64; 3] {
    let f = |t: f64| {
        if t > CIE_EPSILON {
            t.cbrt()
        } else {
            (CIE_KAPPA * t + 16.0) / 116.0
        }
    };
    let fx = f(xyz[0] / D65_WHITE[0]);
    let fy = f(xyz[1] / D65_WHITE[1]);
    let fz = f(xyz[2] / D65_WHITE[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Converts CIE Lab (D65) back to XYZ.
pub fn lab_to_xyz(lab: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab;
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let cube_or_linear = |f: f64| {
        let f3 = f * f * f;
        if f3 > CIE_EPSILON {
            f3
        } else {
            (116.0 * f - 16.0) / CIE_KAPPA
        }
    };
    let yr = if l > CIE_KAPPA * CIE_EPSILON {
        fy * fy * fy
    } else {
        l / CIE_KAPPA
    };
    [
        cube_or_linear(fx) * D65_WHITE[0],
        yr * D65_WHITE[1],
        cube_or_linear(fz) * D65_WHITE[2],
    ]
}

pub fn linear_to_lab(c: [f64; 3]) -> [f64; 3] {
    xyz_to_lab(linear_to_xyz(c))
}

pub fn lab_to_linear(c: [f64; 3]) -> [f64; 3] {
    xyz_to_linear(lab_to_xyz(c))
}

// -- OKLab --

/// Converts linear sRGB to OKLab via the OKLab matrix transform.
pub fn linear_to_oklab(c: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = c;
    let l_ = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m_ = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s_ = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    [
        0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    ]
}

/// Converts OKLab to linear sRGB via the inverse OKLab matrix transform.
pub fn oklab_to_linear(c: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = c;
    let l_ = l + 0.3963377774 * a + 0.2158037573 * b;
    let m_ = l - 0.1055613458 * a - 0.0638541728 * b;
    let s_ = l - 0.0894841775 * a - 1.2914855480 * b;

    let l3 = l_ * l_ * l_;
    let m3 = m_ * m_ * m_;
    let s3 = s_ * s_ * s_;

    [
        4.0767416621 * l3 - 3.3077115913 * m3 + 0.2309699292 * s3,
        -1.2684380046 * l3 + 2.6097574011 * m3 - 0.3413193965 * s3,
        -0.0041960863 * l3 - 0.7034186147 * m3 + 1.7076147010 * s3,
    ]
}

// -- Polar forms (LCh, OKLCh) --

/// Converts rectangular `(l, a, b)` to polar `(l, c, h)`.
///
/// When chroma is below `achromatic` the hue is indeterminate and is set to
/// 0.0 instead of whatever `atan2` makes of rounding noise.
pub fn rect_to_polar(c: [f64; 3], achromatic: f64) -> [f64; 3] {
    let [l, a, b] = c;
    let chroma = a.hypot(b);
    let h = if chroma < achromatic {
        0.0
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    [l, chroma, h]
}

/// Converts polar `(l, c, h)` to rectangular `(l, a, b)`.
pub fn polar_to_rect(c: [f64; 3]) -> [f64; 3] {
    let [l, chroma, h] = c;
    let h_rad = h.to_radians();
    [l, chroma * h_rad.cos(), chroma * h_rad.sin()]
}

// -- HSL / HWB (CSS Color 4) --

/// Hue plus min and max of an sRGB triple. Hue is 0.0 for grays.
fn rgb_to_hue_min_max(c: [f64; 3]) -> (f64, f64, f64) {
    let [r, g, b] = c;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta + if g < b { 6.0 } else { 0.0 })
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    (normalize_hue(hue), min, max)
}

pub fn srgb_to_hsl(c: [f64; 3]) -> [f64; 3] {
    let (hue, min, max) = rgb_to_hue_min_max(c);
    let l = (min + max) / 2.0;
    let delta = max - min;
    let s = if delta == 0.0 || l <= 0.0 || l >= 1.0 {
        0.0
    } else {
        (max - l) / l.min(1.0 - l)
    };
    [hue, s, l]
}

pub fn hsl_to_srgb(c: [f64; 3]) -> [f64; 3] {
    let [h, s, l] = c;
    let channel = |n: f64| {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let a = s * l.min(1.0 - l);
        l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    [channel(0.0), channel(8.0), channel(4.0)]
}

pub fn srgb_to_hwb(c: [f64; 3]) -> [f64; 3] {
    let (hue, min, max) = rgb_to_hue_min_max(c);
    [hue, min, 1.0 - max]
}

pub fn hwb_to_srgb(c: [f64; 3]) -> [f64; 3] {
    let [h, w, b] = c;
    if w + b >= 1.0 {
        let gray = w / (w + b);
        return [gray, gray, gray];
    }
    hsl_to_srgb([h, 1.0, 0.5]).map(|v| v * (1.0 - w - b) + w)
}

/// Normalizes a hue angle to [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}
