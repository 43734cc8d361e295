//! White color temperature as a blend between the cold and warm palette entries.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::palette::{COLD, WARM};
use super::{ColorComponents, HsbColor};
use crate::errors::Error;

/// Color temperature as a percentage from 0 (cold) to 100 (warm).
///
/// Lower values produce the bluish `cold` white, higher values the yellowish
/// `warm` white; anything between is a linear blend of the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub(crate) percent: f64,
}

impl Default for Temperature {
    fn default() -> Self {
        Temperature {
            percent: Self::DEFAULT,
        }
    }
}

impl Temperature {
    const MIN: f64 = 0.0;
    const MAX: f64 = 100.0;
    const DEFAULT: f64 = 50.0;

    /// Returns `None` if the percentage is outside 0-100.
    ///
    /// # Examples
    ///
    /// ```
    /// use lights_rs::Temperature;
    ///
    /// assert!(Temperature::create(0.0).is_some());
    /// assert!(Temperature::create(100.0).is_some());
    /// assert!(Temperature::create(100.1).is_none());
    /// ```
    pub fn create(percent: f64) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&percent) {
            Some(Temperature { percent })
        } else {
            None
        }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// The warm share of the blend, in `[0, 1]`.
    pub fn factor(&self) -> f64 {
        self.percent / Self::MAX
    }

    /// The HSB color for this temperature.
    pub fn color(&self) -> HsbColor {
        COLD.lerp(&WARM, self.factor())
    }
}

impl FromStr for Temperature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::create)
            .ok_or_else(|| {
                Error::invalid_input("please enter a temperature between 0 (cold) and 100 (warm)")
            })
    }
}
