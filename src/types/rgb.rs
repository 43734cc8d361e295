//! RGB color representation.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ColorComponents;
use crate::errors::Error;

/// A red-green-blue color with each component in `[0, 1]`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl RgbColor {
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Clamp each component to `[0, 1]` and scale it to a byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use lights_rs::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(1.0, 0.5, -0.2).to_bytes(), (255, 128, 0));
    /// ```
    pub fn to_bytes(&self) -> (u8, u8, u8) {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (byte(self.red), byte(self.green), byte(self.blue))
    }

    /// Render as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl ColorComponents for RgbColor {
    fn components(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }
}

impl Add for RgbColor {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.red + other.red,
            self.green + other.green,
            self.blue + other.blue,
        )
    }
}

impl Sub for RgbColor {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.red - other.red,
            self.green - other.green,
            self.blue - other.blue,
        )
    }
}

impl Mul<f64> for RgbColor {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.red * factor, self.green * factor, self.blue * factor)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(red={:.3}, green={:.3}, blue={:.3})",
            self.red, self.green, self.blue
        )
    }
}

impl FromStr for RgbColor {
    type Err = Error;

    /// Parse from comma-separated string (e.g., "1,0.5,0").
    fn from_str(s: &str) -> Result<Self, Error> {
        let [red, green, blue] = super::parse_triplet(s, "r,g,b")?;
        Ok(Self::new(red, green, blue))
    }
}
