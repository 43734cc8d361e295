//! Individual light control.
//!
//! A light is split into capabilities. Every light has a [`Light::name`];
//! power, brightness and color are separate traits that a backend implements
//! only when the device supports them. Callers can ask with
//! [`Light::supports`] before writing, or go through the fallible accessors
//! ([`Light::switchable`] and friends) which return
//! [`Error::NotSupported`] instead.

use async_trait::async_trait;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::errors::Error;
use crate::types::HsbColor;

type Result<T> = std::result::Result<T, Error>;

/// A controllable property of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Capability {
    Power,
    Brightness,
    Color,
}

/// A light that can be switched on and off.
#[async_trait]
pub trait Switchable: Send + Sync {
    /// Reads the current power state from the device.
    async fn is_on(&self) -> Result<bool>;

    async fn set_on(&self, on: bool) -> Result<()>;

    /// Inverts the power state and returns the new one.
    ///
    /// The current state is read from the device first, so changes made
    /// elsewhere since the last read are respected.
    async fn toggle(&self) -> Result<bool> {
        let on = !self.is_on().await?;
        self.set_on(on).await?;
        Ok(on)
    }
}

/// A light with adjustable brightness on a `[0, 1]` scale.
///
/// Values outside the range are handed to the backend untouched.
#[async_trait]
pub trait Dimmable: Send + Sync {
    async fn brightness(&self) -> Result<f64>;

    async fn set_brightness(&self, brightness: f64) -> Result<()>;
}

/// A light whose color can be read and set.
#[async_trait]
pub trait ColorCapable: Send + Sync {
    async fn color(&self) -> Result<HsbColor>;

    async fn set_color(&self, color: HsbColor) -> Result<()>;
}

/// A single light, as exposed by a [`LightSystem`](crate::LightSystem).
///
/// # Example
///
/// ```
/// use lights_rs::{Capability, Light, MemoryLight};
///
/// let light = MemoryLight::new("Desk").without(Capability::Color);
/// assert_eq!(light.name(), "Desk");
/// assert!(light.supports(Capability::Brightness));
/// assert!(light.colorable().is_err());
/// ```
pub trait Light: Send + Sync {
    /// The name of the light. Stable for the lifetime of the handle.
    fn name(&self) -> &str;

    fn as_switchable(&self) -> Option<&dyn Switchable> {
        None
    }

    fn as_dimmable(&self) -> Option<&dyn Dimmable> {
        None
    }

    fn as_colorable(&self) -> Option<&dyn ColorCapable> {
        None
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Power => self.as_switchable().is_some(),
            Capability::Brightness => self.as_dimmable().is_some(),
            Capability::Color => self.as_colorable().is_some(),
        }
    }

    fn capabilities(&self) -> Vec<Capability> {
        Capability::iter().filter(|c| self.supports(*c)).collect()
    }

    fn switchable(&self) -> Result<&dyn Switchable> {
        self.as_switchable()
            .ok_or_else(|| Error::not_supported(self.name(), Capability::Power))
    }

    fn dimmable(&self) -> Result<&dyn Dimmable> {
        self.as_dimmable()
            .ok_or_else(|| Error::not_supported(self.name(), Capability::Brightness))
    }

    fn colorable(&self) -> Result<&dyn ColorCapable> {
        self.as_colorable()
            .ok_or_else(|| Error::not_supported(self.name(), Capability::Color))
    }
}

impl std::fmt::Debug for dyn Light {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Light")
            .field("name", &self.name())
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
