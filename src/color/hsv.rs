//! HSV <-> RGB conversion
//!
//! Hue, saturation and value are all normalized to `[0, 1]`. The formulas
//! follow the classic six-sector conversion and truncate when scaling back
//! to 8-bit components.

use crate::color::Rgb;

/// Color in the HSV space, every component in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HsvColor {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl HsvColor {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// Convert an HSV color to RGB.
///
/// `h == 1.0` lands in sector 6 which wraps to sector 0, so it renders
/// the same as `h == 0.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hsv: HsvColor) -> Rgb {
    let HsvColor { h, s, v } = hsv;

    let sector = libm::floor(h * 6.0);
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb {
        r: (r * 255.0) as u8,
        g: (g * 255.0) as u8,
        b: (b * 255.0) as u8,
    }
}

/// Convert an RGB color to HSV.
///
/// When several components share the maximum, red wins over green and
/// green wins over blue when picking the hue sector.
#[allow(clippy::float_cmp)]
pub fn rgb_to_hsv(rgb: Rgb) -> HsvColor {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g.max(b));
    let min = r.min(g.min(b));
    let d = max - min;

    let s = if max == 0.0 { 0.0 } else { d / max };

    let h = if max == min {
        // achromatic
        0.0
    } else if max == r {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if max == g {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };

    HsvColor { h, s, v: max }
}
