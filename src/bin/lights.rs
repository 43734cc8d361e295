//! Command-line interface for controlling lights.
//!
//! Run with: lights --help

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lights_rs::{Brightness, Command, Config, LightSystem, Selection, Temperature};

#[derive(Parser)]
#[command(name = "lights")]
#[command(about = "Lets you control your smart lamps at home", long_about = None)]
struct Cli {
    /// Path to a config.json file [default: ~/.config/lights/config.json]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// A single, selected light's name. Falls back to default-light in the config
    #[arg(short, long, env = "LIGHTS_NAME", global = true)]
    name: Option<String>,

    /// Select all lights
    #[arg(short, long, global = true)]
    all: bool,

    /// Print light states as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every light with its state
    List,

    /// Turn the selected lights on
    On,

    /// Turn the selected lights off
    Off,

    /// Toggle the selected lights on/off
    Toggle,

    /// Set brightness (0-100)
    Dim {
        /// Brightness in percent (0-100)
        percent: Brightness,
    },

    /// Set a named color or an h,s,b triplet (each 0-1)
    Color {
        /// Palette name (e.g. warm, cold, red) or h,s,b [default: default]
        color: Option<String>,
    },

    /// Set the color temperature (0 = cold, 100 = warm)
    Temp {
        /// Temperature in percent (0-100)
        percent: Temperature,
    },
}

impl Commands {
    fn into_command(self) -> Result<Command, lights_rs::Error> {
        Ok(match self {
            Commands::List => Command::List,
            Commands::On => Command::On,
            Commands::Off => Command::Off,
            Commands::Toggle => Command::Toggle,
            Commands::Dim { percent } => Command::Dim(percent),
            Commands::Color { color } => Command::color(color.as_deref())?,
            Commands::Temp { percent } => Command::Temperature(percent),
        })
    }
}

fn default_config_path() -> Result<PathBuf, &'static str> {
    dirs::home_dir()
        .map(|home| home.join(".config").join("lights").join("config.json"))
        .ok_or("cannot locate the home directory, use --config")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&path)?;

    let command = cli.command.into_command()?;
    let selection = Selection::new(cli.all, cli.name.or(config.default_light.clone()));

    let mut system = config.build_system();
    system.connect().await?;

    let snapshots = command.execute(&system, &selection).await?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        for snapshot in &snapshots {
            println!("{snapshot}");
        }
    }

    Ok(())
}
