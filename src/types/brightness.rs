//! Brightness percentage parsing for the `dim` command.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Brightness level from 0 to 100 percent.
///
/// Percentages outside that range are rejected rather than clamped.
/// [`Dimmable`](crate::Dimmable) itself does not validate, so this is the
/// place out of range input gets caught.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brightness {
    pub(crate) percent: f64,
}

impl Default for Brightness {
    fn default() -> Self {
        Brightness { percent: Self::MAX }
    }
}

impl Brightness {
    const MIN: f64 = 0.0;
    const MAX: f64 = 100.0;

    /// Returns None if the percentage is outside 0-100 or not a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use lights_rs::Brightness;
    ///
    /// assert!(Brightness::create(0.0).is_some());
    /// assert!(Brightness::create(100.0).is_some());
    /// assert!(Brightness::create(-1.0).is_none());
    /// assert!(Brightness::create(100.5).is_none());
    /// assert!(Brightness::create(f64::NAN).is_none());
    /// ```
    pub fn create(percent: f64) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&percent) {
            Some(Brightness { percent })
        } else {
            None
        }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// The brightness on the `[0, 1]` scale lights use.
    pub fn value(&self) -> f64 {
        self.percent / Self::MAX
    }
}

impl FromStr for Brightness {
    type Err = Error;

    /// # Examples
    ///
    /// ```
    /// use lights_rs::Brightness;
    ///
    /// assert_eq!("50".parse::<Brightness>().unwrap().value(), 0.5);
    /// assert!("bright".parse::<Brightness>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Error> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::create)
            .ok_or_else(|| Error::invalid_input("please enter a number between 0 and 100"))
    }
}
