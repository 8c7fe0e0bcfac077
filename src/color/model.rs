//! RGB colors with derived HSL components and a hue-weighted perceptual distance

use crate::io::configuration::{
    HUE_DISTANCE_SCALE, HUE_DISTANCE_WEIGHT, LIGHTNESS_DISTANCE_WEIGHT, RGB_DISTANCE_WEIGHT,
    SATURATION_DISTANCE_WEIGHT,
};
use std::fmt;

/// Immutable color value
///
/// The HSL components are derived from the RGB channels when the color is
/// built and cannot be set independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    h: f64,
    s: f64,
    l: f64,
}

impl Color {
    /// Build a color from its RGB channels
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (h, s, l) = rgb_to_hsl(r, g, b);
        Self { r, g, b, h, s, l }
    }

    /// Build a color from an `[r, g, b]` triple
    pub fn from_channels(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb;
        Self::from_rgb(r, g, b)
    }

    /// Red channel
    pub const fn r(&self) -> u8 {
        self.r
    }

    /// Green channel
    pub const fn g(&self) -> u8 {
        self.g
    }

    /// Blue channel
    pub const fn b(&self) -> u8 {
        self.b
    }

    /// Hue in degrees, `[0, 360)`
    pub const fn hue(&self) -> f64 {
        self.h
    }

    /// Saturation, `[0, 100]`
    pub const fn saturation(&self) -> f64 {
        self.s
    }

    /// Lightness, `[0, 100]`
    pub const fn lightness(&self) -> f64 {
        self.l
    }

    /// RGB channels as a triple
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({:>3},{:>3},{:>3})", self.r, self.g, self.b)
    }
}

/// Convert RGB channels to `(hue, saturation, lightness)`
///
/// Hue is in degrees `[0, 360)`, saturation and lightness in `[0, 100]`.
/// Achromatic colors (all channels equal) have hue and saturation 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let delta = max - min;
    if delta <= 0.0 {
        return (0.0, 0.0, l * 100.0);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    // Branch on the channel holding the maximum, red first
    let sector = if (max - r).abs() < f64::EPSILON {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let h = (sector / 6.0 * 360.0) % 360.0;

    (h, s * 100.0, l * 100.0)
}

/// Shortest angular distance between two hues in degrees
pub fn hue_difference(h1: f64, h2: f64) -> f64 {
    let diff = (h1 - h2).abs();
    diff.min(360.0 - diff)
}

/// Perceptual distance between two colors
///
/// Weighted sum of the squared RGB distance, the scaled squared circular hue
/// distance and the squared saturation and lightness differences. Hue carries
/// the largest weight, so colors of one hue at different brightness stay close.
/// Only relative ordering is meaningful.
pub fn color_distance(c1: &Color, c2: &Color) -> f64 {
    let dr = f64::from(c1.r) - f64::from(c2.r);
    let dg = f64::from(c1.g) - f64::from(c2.g);
    let db = f64::from(c1.b) - f64::from(c2.b);
    let rgb = dr.mul_add(dr, dg.mul_add(dg, db * db));

    let dh = hue_difference(c1.h, c2.h);
    let ds = c1.s - c2.s;
    let dl = c1.l - c2.l;

    let weighted = RGB_DISTANCE_WEIGHT.mul_add(
        rgb,
        HUE_DISTANCE_WEIGHT.mul_add(
            dh * dh * HUE_DISTANCE_SCALE,
            SATURATION_DISTANCE_WEIGHT.mul_add(ds * ds, LIGHTNESS_DISTANCE_WEIGHT * dl * dl),
        ),
    );

    weighted.sqrt()
}
