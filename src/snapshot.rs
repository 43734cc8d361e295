//! Point-in-time readings of a light.

use std::fmt;

use serde::Serialize;

use crate::errors::Error;
use crate::light::Light;
use crate::types::HsbColor;

type Result<T> = std::result::Result<T, Error>;

/// The state of a light as read at one moment.
///
/// Fields are `None` when the light lacks the capability.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LightSnapshot {
    pub name: String,
    pub on: Option<bool>,
    pub brightness: Option<f64>,
    pub color: Option<HsbColor>,
    /// The color as `#rrggbb`.
    pub hex: Option<String>,
}

impl LightSnapshot {
    /// Read every supported capability of `light`.
    ///
    /// # Example
    ///
    /// ```
    /// use lights_rs::{Capability, LightSnapshot, MemoryLight};
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() {
    ///     let light = MemoryLight::new("Desk").without(Capability::Color);
    ///     let snapshot = LightSnapshot::capture(&light).await.unwrap();
    ///     assert_eq!(snapshot.on, Some(false));
    ///     assert_eq!(snapshot.brightness, Some(1.0));
    ///     assert_eq!(snapshot.color, None);
    /// }
    /// ```
    pub async fn capture(light: &dyn Light) -> Result<Self> {
        let on = match light.as_switchable() {
            Some(switch) => Some(switch.is_on().await?),
            None => None,
        };
        let brightness = match light.as_dimmable() {
            Some(dimmer) => Some(dimmer.brightness().await?),
            None => None,
        };
        let color = match light.as_colorable() {
            Some(colorable) => Some(colorable.color().await?),
            None => None,
        };

        Ok(Self {
            name: light.name().to_string(),
            on,
            brightness,
            hex: color.map(|c| c.to_rgb().to_hex()),
            color,
        })
    }
}

impl fmt::Display for LightSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on = match self.on {
            Some(on) => format!("on={on}"),
            None => "on=-".to_string(),
        };
        write!(f, "{:>15} ({:<8}, brightness=", self.name, on)?;
        match self.brightness {
            Some(brightness) => write!(f, "{brightness:.2}")?,
            None => write!(f, "-")?,
        }
        match (&self.color, &self.hex) {
            (Some(color), Some(hex)) => write!(f, ", color={color} {hex})"),
            _ => write!(f, ", color=-)"),
        }
    }
}
