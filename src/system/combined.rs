//! Aggregation of several light systems behind one.

use async_trait::async_trait;
use log::{debug, info};

use crate::errors::Error;
use crate::light::Light;
use crate::system::LightSystem;

type Result<T> = std::result::Result<T, Error>;

/// A light system made of other light systems.
///
/// Children keep the order they were added in, and
/// [`lights`](LightSystem::lights) concatenates their lights in that order.
///
/// # Example
///
/// ```
/// use lights_rs::{CombinedLightSystem, Light, LightSystem, MemoryLight, MemorySystem};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let mut system = CombinedLightSystem::new();
///     system.add(MemorySystem::new("upstairs", vec![MemoryLight::new("A"), MemoryLight::new("B")]));
///     system.add(MemorySystem::new("downstairs", vec![MemoryLight::new("C")]));
///     system.connect().await.unwrap();
///
///     let names: Vec<String> = system
///         .lights()
///         .await
///         .unwrap()
///         .iter()
///         .map(|l| l.name().to_string())
///         .collect();
///     assert_eq!(names, ["A", "B", "C"]);
/// }
/// ```
#[derive(Default)]
pub struct CombinedLightSystem {
    systems: Vec<Box<dyn LightSystem>>,
}

impl CombinedLightSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system. Its lights come after those of earlier systems.
    pub fn add(&mut self, system: impl LightSystem + 'static) {
        self.add_boxed(Box::new(system));
    }

    pub fn add_boxed(&mut self, system: Box<dyn LightSystem>) {
        debug!("adding light system {}", system.name());
        self.systems.push(system);
    }

    /// Number of child systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// The child systems, in addition order.
    pub fn systems(&self) -> impl Iterator<Item = &dyn LightSystem> {
        self.systems.iter().map(|s| s.as_ref())
    }
}

#[async_trait]
impl LightSystem for CombinedLightSystem {
    fn name(&self) -> &str {
        "combined"
    }

    /// Connect every child in addition order.
    ///
    /// Stops at the first failure and returns it. Children before the failing
    /// one stay connected, children after it are never tried.
    async fn connect(&mut self) -> Result<()> {
        for system in &mut self.systems {
            info!("connecting to {}", system.name());
            system.connect().await?;
        }
        Ok(())
    }

    async fn lights(&self) -> Result<Vec<Box<dyn Light>>> {
        let mut lights = Vec::new();
        for system in &self.systems {
            lights.extend(system.lights().await?);
        }
        Ok(lights)
    }
}
