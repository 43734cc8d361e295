//! Configuration file loading.
//!
//! The configuration is a JSON file naming a default light and the light
//! systems to combine:
//!
//! ```json
//! {
//!   "default-light": "Desk",
//!   "systems": [
//!     { "type": "hue", "bridge-ip": "192.168.1.2", "username": "83b7780291a6ceffbe0bd049104df" }
//!   ]
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::system::{CombinedLightSystem, HueSystem};

type Result<T> = std::result::Result<T, Error>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Light used when no name is given on the command line.
    #[serde(default)]
    pub default_light: Option<String>,

    /// Light systems, combined in this order.
    #[serde(default)]
    pub systems: Vec<SystemConfig>,
}

/// One light system entry, selected by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SystemConfig {
    /// A Philips Hue bridge.
    Hue {
        #[serde(rename = "bridge-ip")]
        bridge_ip: String,
        /// Omit to pair on connect.
        #[serde(default)]
        username: Option<String>,
    },
}

impl SystemConfig {
    fn build(&self) -> HueSystem {
        match self {
            SystemConfig::Hue {
                bridge_ip,
                username,
            } => HueSystem::new(bridge_ip, username.clone()),
        }
    }
}

impl Config {
    /// Load the configuration at `path`.
    ///
    /// A missing file yields the empty configuration.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => content.parse(),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(Error::Config {
                path: path.to_path_buf(),
                err,
            }),
        }
    }

    /// A [`CombinedLightSystem`] with one child per entry, in file order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lights_rs::Config;
    ///
    /// let config: Config = r#"{"systems": [{"type": "hue", "bridge-ip": "10.0.0.2"}]}"#
    ///     .parse()
    ///     .unwrap();
    /// assert_eq!(config.build_system().len(), 1);
    /// ```
    pub fn build_system(&self) -> CombinedLightSystem {
        let mut system = CombinedLightSystem::new();
        for entry in &self.systems {
            system.add(entry.build());
        }
        system
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(Error::JsonLoad)
    }
}
