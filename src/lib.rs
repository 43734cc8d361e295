//! # lights_rs
//!
//! An async Rust library for controlling smart lights at home.
//!
//! Lights are reached through a [`LightSystem`]. Several systems can be
//! combined into one with [`CombinedLightSystem`], which lists the lights of
//! its children in the order they were added. Each [`Light`] exposes only the
//! capabilities its device has: power ([`Switchable`]), brightness
//! ([`Dimmable`]) and color ([`ColorCapable`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use lights_rs::{CombinedLightSystem, HueSystem, Light, LightSystem, hsb_color};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut system = CombinedLightSystem::new();
//!     system.add(HueSystem::new("192.168.1.2", Some("83b7780291a6ceffbe0bd049104df".into())));
//!     system.connect().await?;
//!
//!     for light in system.lights_with_name("Desk").await? {
//!         light.switchable()?.set_on(true).await?;
//!         light.colorable()?.set_color(hsb_color("warm")?).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Colors**: [`HsbColor`] and [`RgbColor`] with conversion, interpolation
//!   and approximate comparison through [`ColorComponents`]
//! - **Palettes**: named colors via [`hsb_color`] and [`rgb_color`]
//! - **Hue bridges**: [`HueSystem`] talks to a Philips Hue bridge over HTTP
//! - **In-memory lights**: [`MemorySystem`] for tests and demos
//! - **Commands**: [`Command`] runs user-level actions over a [`Selection`]
//! - **Configuration**: [`Config`] loads the JSON configuration file
//!
//! ## Cargo Features
//!
//! - `cli` (default): builds the `lights` binary

mod command;
mod config;
mod errors;
mod light;
mod snapshot;
pub mod system;
mod types;

// Re-export public API
pub use command::{Command, DEFAULT_COLOR, Selection};
pub use config::{Config, SystemConfig};
pub use errors::Error;
pub use light::{Capability, ColorCapable, Dimmable, Light, Switchable};
pub use snapshot::LightSnapshot;
pub use system::{
    CombinedLightSystem, HueSystem, LightSystem, MemoryLight, MemoryState, MemorySystem,
};
pub use types::{
    Brightness, Color, ColorComponents, ColorKind, DEFAULT_EPSILON, HSB_COLORS, HsbColor,
    PowerMode, RGB_COLORS, RgbColor, Temperature, add_colors, hsb_color, rgb_color, scale_color,
};
