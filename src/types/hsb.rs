//! Hue, saturation and brightness color representation.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ColorComponents, RgbColor};
use crate::errors::Error;

/// A hue-saturation-brightness color with each component in `[0, 1]`.
///
/// The range is a convention, not an invariant: arithmetic may leave it and
/// nothing clamps. Hue is circular, so `0.0` and `1.0` are the same point on
/// the color wheel.
///
/// The default is fully saturated red at full brightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsbColor {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Default for HsbColor {
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }
}

impl HsbColor {
    pub const fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Convert to RGB.
    ///
    /// The wheel is split into six segments and each segment picks its RGB
    /// pattern from the segment index alone. The index is reduced with a
    /// Euclidean modulo, so a hue of exactly `1.0` lands in segment 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use lights_rs::{ColorComponents, HsbColor, RgbColor};
    ///
    /// let red = HsbColor::new(0.0, 1.0, 1.0).to_rgb();
    /// assert!(red.approximately(&RgbColor::new(1.0, 0.0, 0.0)));
    ///
    /// let wrapped = HsbColor::new(1.0, 1.0, 1.0).to_rgb();
    /// assert!(wrapped.approximately(&red));
    /// ```
    pub fn to_rgb(&self) -> RgbColor {
        let chroma = self.brightness * self.saturation;
        let segment = ((self.hue * 6.0).floor() as i64).rem_euclid(6);
        let x = chroma * (1.0 - ((segment % 2) as f64 - 1.0).abs());
        let m = self.brightness - chroma;

        let (r, g, b) = match segment {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        RgbColor::new(r + m, g + m, b + m)
    }
}

impl ColorComponents for HsbColor {
    fn components(&self) -> [f64; 3] {
        [self.hue, self.saturation, self.brightness]
    }
}

impl Add for HsbColor {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.hue + other.hue,
            self.saturation + other.saturation,
            self.brightness + other.brightness,
        )
    }
}

impl Sub for HsbColor {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.hue - other.hue,
            self.saturation - other.saturation,
            self.brightness - other.brightness,
        )
    }
}

impl Mul<f64> for HsbColor {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(
            self.hue * factor,
            self.saturation * factor,
            self.brightness * factor,
        )
    }
}

impl From<&HsbColor> for RgbColor {
    fn from(hsb: &HsbColor) -> Self {
        hsb.to_rgb()
    }
}

impl fmt::Display for HsbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(hue={:.3}, saturation={:.3}, brightness={:.3})",
            self.hue, self.saturation, self.brightness
        )
    }
}

impl FromStr for HsbColor {
    type Err = Error;

    /// Parse from comma-separated string (e.g., "0.5,1,0.8").
    fn from_str(s: &str) -> Result<Self, Error> {
        let [hue, saturation, brightness] = super::parse_triplet(s, "h,s,b")?;
        Ok(Self::new(hue, saturation, brightness))
    }
}
