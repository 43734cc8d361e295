//! State update payload for Hue lights.

use serde::Serialize;

use crate::types::HsbColor;

/// Bridge units per unit of hue.
pub const HUE_FACTOR: f64 = 56635.0;
/// Bridge units per unit of saturation.
pub const SATURATION_FACTOR: f64 = 254.0;
/// Bridge units per unit of brightness.
pub const BRIGHTNESS_FACTOR: f64 = 254.0;

/// Convert a unit value to bridge units. Truncates toward zero.
pub(crate) fn to_native(value: f64, factor: f64) -> i64 {
    (value * factor) as i64
}

pub(crate) fn from_native(value: i64, factor: f64) -> f64 {
    value as f64 / factor
}

/// The body of a `PUT /api/<user>/lights/<id>/state` request.
///
/// Only the attributes that were set are sent, so a brightness write leaves
/// power and color alone.
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Clone, PartialEq)]
pub(crate) struct StateUpdate {
    on: Option<bool>,
    bri: Option<i64>,
    hue: Option<i64>,
    sat: Option<i64>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.on.is_some() || self.bri.is_some() || self.hue.is_some() || self.sat.is_some()
    }

    pub fn power(&mut self, on: bool) -> &mut Self {
        self.on = Some(on);
        self
    }

    pub fn brightness(&mut self, brightness: f64) -> &mut Self {
        self.bri = Some(to_native(brightness, BRIGHTNESS_FACTOR));
        self
    }

    /// Hue, saturation and brightness go out in the same request.
    pub fn color(&mut self, color: &HsbColor) -> &mut Self {
        self.hue = Some(to_native(color.hue, HUE_FACTOR));
        self.sat = Some(to_native(color.saturation, SATURATION_FACTOR));
        self.brightness(color.brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_native_truncates() {
        assert_eq!(to_native(0.5, BRIGHTNESS_FACTOR), 127);
        assert_eq!(to_native(1.0, BRIGHTNESS_FACTOR), 254);
        assert_eq!(to_native(0.999, SATURATION_FACTOR), 253);
        assert_eq!(to_native(0.5, HUE_FACTOR), 28317);
        assert_eq!(to_native(0.0, HUE_FACTOR), 0);
    }

    #[test]
    fn test_from_native() {
        assert_eq!(from_native(254, BRIGHTNESS_FACTOR), 1.0);
        assert_eq!(from_native(127, BRIGHTNESS_FACTOR), 0.5);
        assert_eq!(from_native(0, HUE_FACTOR), 0.0);
    }

    #[test]
    fn test_only_set_fields_are_sent() {
        let mut update = StateUpdate::new();
        assert!(!update.is_valid());
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");

        update.brightness(0.5);
        assert!(update.is_valid());
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"bri":127}"#);

        let mut update = StateUpdate::new();
        update.power(false);
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"on":false}"#);
    }

    #[test]
    fn test_color_sends_all_three() {
        let mut update = StateUpdate::new();
        update.color(&HsbColor::new(0.5, 1.0, 0.5));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"bri": 127, "hue": 28317, "sat": 254})
        );
    }
}
