//! Hue bridge response types.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// A light as listed by `GET /api/<user>/lights[/<id>]`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct LightInfo {
    pub name: String,
    #[serde(default)]
    pub state: LightState,
}

/// The `state` object of a light. Absent fields mean the light lacks the feature.
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct LightState {
    pub on: Option<bool>,
    pub bri: Option<i64>,
    pub hue: Option<i64>,
    pub sat: Option<i64>,
}

impl LightState {
    pub fn has_power(&self) -> bool {
        self.on.is_some()
    }

    pub fn has_brightness(&self) -> bool {
        self.bri.is_some()
    }

    pub fn has_color(&self) -> bool {
        self.hue.is_some() && self.sat.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct BridgeError {
    #[serde(rename = "type")]
    kind: u16,
    #[serde(default)]
    address: String,
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Entry {
    Success(Value),
    Error(BridgeError),
}

/// Fail on the first error entry of a bridge response.
///
/// The bridge answers failures with HTTP 200 and a list of entries such as
/// `[{"error": {"type": 1, "address": "/", "description": "unauthorized user"}}]`.
pub(crate) fn check(response: Value) -> Result<Value> {
    if let Some(entries) = response.as_array() {
        for entry in entries {
            if let Ok(Entry::Error(err)) = Entry::deserialize(entry) {
                return Err(Error::Bridge {
                    kind: err.kind,
                    address: err.address,
                    description: err.description,
                });
            }
        }
    }
    Ok(response)
}

/// Extract the username from a pairing response.
pub(crate) fn parse_username(response: Value) -> Result<String> {
    let entries: Vec<Entry> = serde_json::from_value(check(response)?).map_err(Error::JsonLoad)?;
    entries
        .into_iter()
        .find_map(|entry| match entry {
            Entry::Success(value) => value
                .get("username")
                .and_then(Value::as_str)
                .map(String::from),
            Entry::Error(_) => None,
        })
        .ok_or_else(|| Error::invalid_input("pairing response carried no username"))
}

/// Parse the light listing, ordered by numeric id.
pub(crate) fn parse_lights(response: Value) -> Result<Vec<(String, LightInfo)>> {
    let lights: serde_json::Map<String, Value> =
        serde_json::from_value(check(response)?).map_err(Error::JsonLoad)?;

    let mut parsed = lights
        .into_iter()
        .map(|(id, info)| Ok((id, serde_json::from_value(info).map_err(Error::JsonLoad)?)))
        .collect::<Result<Vec<(String, LightInfo)>>>()?;

    parsed.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    });
    Ok(parsed)
}

pub(crate) fn parse_light(response: Value) -> Result<LightInfo> {
    serde_json::from_value(check(response)?).map_err(Error::JsonLoad)
}
