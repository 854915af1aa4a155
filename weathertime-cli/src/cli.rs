use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weathertime_core::{Config, Lookup, LookupFlow, TimeLookup, WeatherLookup, location};

use crate::app::App;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathertime", version, about = "City weather & local time lookup")]
pub struct Cli {
    /// Without a subcommand the tool starts the interactive session.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API keys used by the lookups.
    Configure,

    /// Print current weather for one of the supported cities.
    Weather {
        /// City label, e.g. "London" or "New-York".
        city: String,
    },

    /// Print the local time for one of the supported cities.
    Time {
        /// City label, e.g. "London" or "New-York".
        city: String,
    },

    /// List the supported cities.
    Cities,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            None => App::new(Config::load()?.credentials()).run().await,
            Some(Command::Configure) => configure(),
            Some(Command::Weather { city }) => one_shot(Box::new(WeatherLookup), &city).await,
            Some(Command::Time { city }) => one_shot(Box::new(TimeLookup), &city).await,
            Some(Command::Cities) => {
                for city in location::CITIES {
                    println!("{city}");
                }
                Ok(())
            }
        }
    }
}

/// Run a single lookup for `city` and print its output. The city must be
/// one of the supported labels; anything else is rejected before any
/// network traffic.
async fn one_shot(lookup: Box<dyn Lookup>, city: &str) -> Result<()> {
    let city = location::resolve(city)?;
    let flow = LookupFlow::new(lookup, Config::load()?.credentials());

    if let Some(text) = flow.execute(city).await {
        println!("{text}");
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut cfg = Config::load().unwrap_or_default();

    cfg.weather_api_key = prompt_key("WeatherAPI.com API key:", &cfg.weather_api_key)?;
    cfg.timezone_api_key = prompt_key("TimezoneDB API key:", &cfg.timezone_api_key)?;
    cfg.save()?;

    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}

fn prompt_key(message: &str, current: &str) -> Result<String> {
    let entered = Password::new(message)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    // Empty input keeps the already-configured value.
    Ok(if entered.is_empty() { current.to_string() } else { entered })
}
