//! Light systems: connectable collections of lights.

use async_trait::async_trait;

use crate::errors::Error;
use crate::light::Light;

mod combined;
pub mod hue;
mod memory;

pub use combined::CombinedLightSystem;
pub use hue::HueSystem;
pub use memory::{MemoryLight, MemoryState, MemorySystem};

type Result<T> = std::result::Result<T, Error>;

/// A connectable collection of lights.
///
/// [`lights`](LightSystem::lights) queries the backend on every call and
/// nothing is cached. Call it once and keep the result when a stable
/// selection is needed.
#[async_trait]
pub trait LightSystem: Send + Sync {
    /// A short label for logs and error messages.
    fn name(&self) -> &str;

    /// Establish connectivity with the backend.
    ///
    /// Calling this on a connected system is a no-op. The default does
    /// nothing, for backends that need no connection.
    async fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    /// The lights currently known to the backend, in backend order.
    async fn lights(&self) -> Result<Vec<Box<dyn Light>>>;

    /// All lights whose name matches exactly (case-sensitive).
    ///
    /// Returns [`Error::LightNotFound`] rather than an empty list.
    async fn lights_with_name(&self, name: &str) -> Result<Vec<Box<dyn Light>>> {
        let matching: Vec<_> = self
            .lights()
            .await?
            .into_iter()
            .filter(|light| light.name() == name)
            .collect();

        if matching.is_empty() {
            return Err(Error::LightNotFound(name.to_string()));
        }
        Ok(matching)
    }
}
