//! Value types for colors and light control parameters.

use std::ops::{Add, Mul, Sub};

use crate::errors::Error;

mod brightness;
mod color;
mod hsb;
mod palette;
mod power;
mod rgb;
mod temperature;

pub use brightness::Brightness;
pub use color::{Color, ColorKind, add_colors, scale_color};
pub use hsb::HsbColor;
pub use palette::{HSB_COLORS, RGB_COLORS, hsb_color, rgb_color};
pub use power::PowerMode;
pub use rgb::RgbColor;
pub use temperature::Temperature;

/// Default tolerance for [`ColorComponents::approximately`].
pub const DEFAULT_EPSILON: f64 = 0.001;

/// Shared arithmetic over three-component colors.
///
/// The operators come from `Add`, `Sub` and `Mul<f64>`, so combining an
/// [`HsbColor`] with an [`RgbColor`] does not compile. Everything else is
/// derived from [`components`](ColorComponents::components).
///
/// # Examples
///
/// ```
/// use lights_rs::{ColorComponents, RgbColor};
///
/// let gray = RgbColor::new(0.5, 0.5, 0.5);
/// let white = RgbColor::new(1.0, 1.0, 1.0);
/// assert!(white.average(&RgbColor::default()).approximately(&gray));
/// assert!((white.norm() - 3f64.sqrt()).abs() < 1e-12);
/// ```
pub trait ColorComponents:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    /// The three raw components in declaration order.
    fn components(&self) -> [f64; 3];

    /// Euclidean norm of the components. Only useful for comparisons.
    fn norm(&self) -> f64 {
        self.components().iter().map(|c| c * c).sum::<f64>().sqrt()
    }

    /// Euclidean distance to another color of the same kind.
    fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    /// Whether the distance to `other` is below [`DEFAULT_EPSILON`].
    fn approximately(&self, other: &Self) -> bool {
        self.approximately_within(other, DEFAULT_EPSILON)
    }

    fn approximately_within(&self, other: &Self, eps: f64) -> bool {
        self.distance(other) < eps
    }

    /// Component-wise arithmetic mean.
    fn average(&self, other: &Self) -> Self {
        (*self + *other) * 0.5
    }

    /// Linear interpolation, `self` at `factor == 0` and `other` at `factor == 1`.
    fn lerp(&self, other: &Self, factor: f64) -> Self {
        *self * (1.0 - factor) + *other * factor
    }
}

/// Parse three comma-separated numbers. `format` names them in the error.
fn parse_triplet(s: &str, format: &str) -> Result<[f64; 3], Error> {
    let invalid = || Error::invalid_input(format!("expected format: {format}, got {s:?}"));

    let parts = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    <[f64; 3]>::try_from(parts).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triplet() {
        assert_eq!(parse_triplet(" 1, 0.5 ,0", "r,g,b").unwrap(), [1.0, 0.5, 0.0]);
        assert_eq!(
            parse_triplet("0.5,1", "h,s,b").unwrap_err().to_string(),
            "invalid input: expected format: h,s,b, got \"0.5,1\""
        );
        assert!(parse_triplet("1,2,3,4", "r,g,b").is_err());
        assert!(parse_triplet("a,b,c", "r,g,b").is_err());
    }
}
