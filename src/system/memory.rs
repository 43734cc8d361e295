//! In-memory light system for tests and demos.
//!
//! [`MemorySystem`] and [`MemoryLight`] implement the same traits as the Hue
//! backend, with state held in process. Light handles share their state, so
//! a test can keep a handle, change the state behind the system's back, and
//! check that callers observe the change.
//!
//! # Features
//!
//! - **Capability selection**: drop power, brightness or color per light
//! - **Failure injection**: make `connect` fail with a given reason
//! - **Call counting**: observe how often `connect` ran

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use crate::errors::Error;
use crate::light::{Capability, ColorCapable, Dimmable, Light, Switchable};
use crate::system::LightSystem;
use crate::types::HsbColor;

type Result<T> = std::result::Result<T, Error>;

/// The state behind a [`MemoryLight`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryState {
    pub on: bool,
    pub brightness: f64,
    pub color: HsbColor,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            on: false,
            brightness: 1.0,
            color: HsbColor::default(),
        }
    }
}

/// A light whose state lives in memory.
///
/// Clones share state.
#[derive(Clone)]
pub struct MemoryLight {
    name: String,
    state: Arc<RwLock<MemoryState>>,
    power: bool,
    dimming: bool,
    color: bool,
}

impl std::fmt::Debug for MemoryLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLight")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

impl MemoryLight {
    /// Create a light supporting every capability, switched off.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(RwLock::new(MemoryState::default())),
            power: true,
            dimming: true,
            color: true,
        }
    }

    /// Drop a capability from this light.
    pub fn without(mut self, capability: Capability) -> Self {
        match capability {
            Capability::Power => self.power = false,
            Capability::Brightness => self.dimming = false,
            Capability::Color => self.color = false,
        }
        self
    }

    /// Replace the initial state.
    pub fn with_state(self, state: MemoryState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            ..self
        }
    }

    pub async fn state(&self) -> MemoryState {
        self.state.read().await.clone()
    }

    /// Overwrite the state, as if another controller had changed the device.
    pub async fn set_state(&self, state: MemoryState) {
        *self.state.write().await = state;
    }
}

impl Light for MemoryLight {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_switchable(&self) -> Option<&dyn Switchable> {
        self.power.then_some(self as &dyn Switchable)
    }

    fn as_dimmable(&self) -> Option<&dyn Dimmable> {
        self.dimming.then_some(self as &dyn Dimmable)
    }

    fn as_colorable(&self) -> Option<&dyn ColorCapable> {
        self.color.then_some(self as &dyn ColorCapable)
    }
}

#[async_trait]
impl Switchable for MemoryLight {
    async fn is_on(&self) -> Result<bool> {
        Ok(self.state.read().await.on)
    }

    async fn set_on(&self, on: bool) -> Result<()> {
        debug!("{}: on={}", self.name, on);
        self.state.write().await.on = on;
        Ok(())
    }
}

#[async_trait]
impl Dimmable for MemoryLight {
    async fn brightness(&self) -> Result<f64> {
        Ok(self.state.read().await.brightness)
    }

    async fn set_brightness(&self, brightness: f64) -> Result<()> {
        debug!("{}: brightness={}", self.name, brightness);
        self.state.write().await.brightness = brightness;
        Ok(())
    }
}

#[async_trait]
impl ColorCapable for MemoryLight {
    async fn color(&self) -> Result<HsbColor> {
        Ok(self.state.read().await.color)
    }

    async fn set_color(&self, color: HsbColor) -> Result<()> {
        debug!("{}: color={}", self.name, color);
        self.state.write().await.color = color;
        Ok(())
    }
}

/// A light system holding [`MemoryLight`]s.
///
/// # Example
///
/// ```
/// use lights_rs::{Light, LightSystem, MemoryLight, MemorySystem};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let mut system = MemorySystem::new("test", vec![MemoryLight::new("Kitchen")]);
///     system.connect().await.unwrap();
///
///     let lights = system.lights_with_name("Kitchen").await.unwrap();
///     lights[0].switchable().unwrap().set_on(true).await.unwrap();
///     assert!(lights[0].switchable().unwrap().is_on().await.unwrap());
/// }
/// ```
pub struct MemorySystem {
    name: String,
    lights: RwLock<Vec<MemoryLight>>,
    connected: AtomicBool,
    connect_count: AtomicU32,
    connect_failure: Option<String>,
}

impl std::fmt::Debug for MemorySystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySystem")
            .field("name", &self.name)
            .field("connected", &self.connected.load(Ordering::Relaxed))
            .finish()
    }
}

impl MemorySystem {
    pub fn new(name: &str, lights: Vec<MemoryLight>) -> Self {
        Self {
            name: name.to_string(),
            lights: RwLock::new(lights),
            connected: AtomicBool::new(false),
            connect_count: AtomicU32::new(0),
            connect_failure: None,
        }
    }

    /// Make every `connect` call fail with the given reason.
    pub fn failing_connect(mut self, reason: &str) -> Self {
        self.connect_failure = Some(reason.to_string());
        self
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// How many times `connect` has been called, successful or not.
    pub fn connect_count(&self) -> u32 {
        self.connect_count.load(Ordering::Relaxed)
    }

    pub async fn add_light(&self, light: MemoryLight) {
        self.lights.write().await.push(light);
    }

    /// Remove every light with the given name. Returns how many were removed.
    pub async fn remove_light(&self, name: &str) -> usize {
        let mut lights = self.lights.write().await;
        let before = lights.len();
        lights.retain(|light| light.name != name);
        before - lights.len()
    }
}

#[async_trait]
impl LightSystem for MemorySystem {
    fn name(&self) -> &str {
        &self.name
    }

    async fn connect(&mut self) -> Result<()> {
        self.connect_count.fetch_add(1, Ordering::Relaxed);

        if let Some(reason) = &self.connect_failure {
            return Err(Error::connect(&self.name, reason.as_str()));
        }
        if !self.connected.swap(true, Ordering::Relaxed) {
            debug!("{}: connected", self.name);
        }
        Ok(())
    }

    async fn lights(&self) -> Result<Vec<Box<dyn Light>>> {
        Ok(self
            .lights
            .read()
            .await
            .iter()
            .map(|light| Box::new(light.clone()) as Box<dyn Light>)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(lights: &[Box<dyn Light>]) -> Vec<&str> {
        lights.iter().map(|l| l.name()).collect()
    }

    #[tokio::test]
    async fn test_lights_with_name_not_found() {
        let system = MemorySystem::new(
            "test",
            vec![MemoryLight::new("Kitchen"), MemoryLight::new("Bedroom")],
        );
        let err = system.lights_with_name("Nonexistent").await.unwrap_err();
        assert_eq!(err, Error::LightNotFound("Nonexistent".to_string()));
    }

    #[tokio::test]
    async fn test_lights_with_name_is_case_sensitive() {
        let system = MemorySystem::new(
            "test",
            vec![
                MemoryLight::new("Lamp"),
                MemoryLight::new("lamp"),
                MemoryLight::new("Lamp"),
            ],
        );
        let found = system.lights_with_name("Lamp").await.unwrap();
        assert_eq!(names(&found), ["Lamp", "Lamp"]);
    }

    #[tokio::test]
    async fn test_toggle_rereads_state() {
        let light = MemoryLight::new("Desk").with_state(MemoryState {
            on: true,
            ..MemoryState::default()
        });
        let system = MemorySystem::new("test", vec![light.clone()]);
        let lights = system.lights().await.unwrap();
        let switch = lights[0].switchable().unwrap();

        assert!(!switch.toggle().await.unwrap());
        assert!(!light.state().await.on);

        assert!(switch.toggle().await.unwrap());
        assert!(light.state().await.on);

        // Someone else turns it off; toggling must turn it back on.
        light
            .set_state(MemoryState {
                on: false,
                ..light.state().await
            })
            .await;
        assert!(switch.toggle().await.unwrap());
        assert!(light.state().await.on);
    }

    #[tokio::test]
    async fn test_lights_are_recomputed() {
        let system = MemorySystem::new("test", vec![MemoryLight::new("A")]);
        assert_eq!(system.lights().await.unwrap().len(), 1);

        system.add_light(MemoryLight::new("B")).await;
        assert_eq!(names(&system.lights().await.unwrap()), ["A", "B"]);

        assert_eq!(system.remove_light("A").await, 1);
        assert_eq!(names(&system.lights().await.unwrap()), ["B"]);
    }

    #[tokio::test]
    async fn test_connect_is_idempotent() {
        let mut system = MemorySystem::new("test", vec![]);
        system.connect().await.unwrap();
        system.connect().await.unwrap();
        assert!(system.is_connected());
        assert_eq!(system.connect_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_capability() {
        let light = MemoryLight::new("Plug").without(Capability::Color);
        assert_eq!(light.capabilities(), [Capability::Power, Capability::Brightness]);
        assert_eq!(
            light.colorable().err(),
            Some(Error::not_supported("Plug", Capability::Color))
        );
    }

    #[tokio::test]
    async fn test_brightness_passes_through() {
        let light = MemoryLight::new("Desk");
        light.dimmable().unwrap().set_brightness(1.5).await.unwrap();
        assert_eq!(light.dimmable().unwrap().brightness().await.unwrap(), 1.5);
    }
}
