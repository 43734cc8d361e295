//! User-level commands over a light system.
//!
//! A [`Command`] runs against the lights picked by a [`Selection`]. Distinct
//! lights are driven concurrently; the writes to any one light happen in
//! order inside a single future.

use futures::future::try_join_all;
use log::{debug, warn};

use crate::errors::Error;
use crate::light::{Light, Switchable};
use crate::snapshot::LightSnapshot;
use crate::system::LightSystem;
use crate::types::{Brightness, HsbColor, PowerMode, Temperature, hsb_color};

type Result<T> = std::result::Result<T, Error>;

/// Palette entry used by `color` without an argument.
pub const DEFAULT_COLOR: &str = "default";

/// Which lights a command acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Named(String),
    Nothing,
}

impl Selection {
    /// `all` wins over a name.
    pub fn new(all: bool, name: Option<String>) -> Self {
        match (all, name) {
            (true, _) => Selection::All,
            (false, Some(name)) => Selection::Named(name),
            (false, None) => Selection::Nothing,
        }
    }

    pub async fn select(&self, system: &dyn LightSystem) -> Result<Vec<Box<dyn Light>>> {
        match self {
            Selection::All => system.lights().await,
            Selection::Named(name) => system.lights_with_name(name).await,
            Selection::Nothing => {
                warn!(
                    "no lights selected (you can set a specific light with -n or pick all with --all)"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read every light, ignoring the selection.
    List,
    On,
    Off,
    Toggle,
    Dim(Brightness),
    Color(HsbColor),
    Temperature(Temperature),
}

impl Command {
    /// Build a `color` command from a palette name or an `h,s,b` triplet.
    ///
    /// # Examples
    ///
    /// ```
    /// use lights_rs::{Command, HsbColor};
    ///
    /// assert_eq!(
    ///     Command::color(Some("white")).unwrap(),
    ///     Command::Color(HsbColor::new(0.0, 0.0, 1.0))
    /// );
    /// assert_eq!(
    ///     Command::color(Some("0.5,1,1")).unwrap(),
    ///     Command::Color(HsbColor::new(0.5, 1.0, 1.0))
    /// );
    /// assert!(Command::color(Some("chartreuse")).is_err());
    /// ```
    pub fn color(arg: Option<&str>) -> Result<Self> {
        let arg = arg.unwrap_or(DEFAULT_COLOR);
        let color = match hsb_color(arg) {
            Ok(color) => color,
            Err(err) if arg.contains(',') => {
                debug!("{arg:?} is not a palette name, parsing as h,s,b: {err}");
                arg.parse()?
            }
            Err(err) => return Err(err),
        };
        Ok(Command::Color(color))
    }

    /// Run the command and return snapshots of the lights it touched.
    ///
    /// Snapshots follow the order of the selected lights. The first failure
    /// aborts the command; writes already made to other lights stay.
    pub async fn execute(
        &self,
        system: &dyn LightSystem,
        selection: &Selection,
    ) -> Result<Vec<LightSnapshot>> {
        let lights = match self {
            Command::List => system.lights().await?,
            _ => selection.select(system).await?,
        };
        debug!("{:?} on {} light(s)", self, lights.len());

        try_join_all(lights.iter().map(|light| self.apply(light.as_ref()))).await
    }

    async fn apply(&self, light: &dyn Light) -> Result<LightSnapshot> {
        match self {
            Command::List => {}
            Command::On => set_power(light.switchable()?, PowerMode::On).await?,
            Command::Off => set_power(light.switchable()?, PowerMode::Off).await?,
            Command::Toggle => set_power(light.switchable()?, PowerMode::Toggle).await?,
            Command::Dim(brightness) => {
                light.dimmable()?.set_brightness(brightness.value()).await?
            }
            Command::Color(color) => light.colorable()?.set_color(*color).await?,
            Command::Temperature(temperature) => {
                light.colorable()?.set_color(temperature.color()).await?
            }
        }
        LightSnapshot::capture(light).await
    }
}

async fn set_power(switch: &dyn Switchable, mode: PowerMode) -> Result<()> {
    match mode {
        PowerMode::On => switch.set_on(true).await,
        PowerMode::Off => switch.set_on(false).await,
        PowerMode::Toggle => switch.toggle().await.map(|_| ()),
    }
}
