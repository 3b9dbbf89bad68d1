use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use weather_screen_core::{
    Config, Coordinates, ScreenError, ScreenOptions, TemperatureUnit, WeatherScreen,
    api_from_config, geolocation::locator_for, render::render,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-screen", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and preferred unit.
    Configure,

    /// Show weather for a city name.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: String,

        #[command(flatten)]
        unit: UnitArgs,
    },

    /// Show weather for the current position.
    Here {
        /// Latitude; falls back to `home` in the config file.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; falls back to `home` in the config file.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[command(flatten)]
        unit: UnitArgs,
    },

    /// Interactive search with a candidate list.
    Search {
        #[command(flatten)]
        unit: UnitArgs,
    },
}

#[derive(Debug, Args)]
pub struct UnitArgs {
    /// Display temperatures in Fahrenheit.
    #[arg(long, short = 'f')]
    fahrenheit: bool,
}

impl UnitArgs {
    fn resolve(&self, config: &Config) -> TemperatureUnit {
        if self.fahrenheit { TemperatureUnit::Fahrenheit } else { config.unit }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, unit } => show(&city, &unit).await,
            Command::Here { lat, lon, unit } => {
                let position = lat.zip(lon).map(|(lat, lon)| Coordinates { lat, lon });
                here(position, &unit).await
            }
            Command::Search { unit } => search(&unit).await,
        }
    }
}

fn build_screen(config: &Config, unit: &UnitArgs) -> anyhow::Result<WeatherScreen> {
    let api = api_from_config(config)?;
    Ok(WeatherScreen::new(api, ScreenOptions::from(config)).with_unit(unit.resolve(config)))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("API key prompt aborted")?;
    config.set_api_key(key.trim().to_string());

    let units = vec![TemperatureUnit::Celsius.label(), TemperatureUnit::Fahrenheit.label()];
    let start = usize::from(config.unit == TemperatureUnit::Fahrenheit);
    let choice = Select::new("Default unit:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Unit prompt aborted")?;
    config.unit = if choice == TemperatureUnit::Fahrenheit.label() {
        TemperatureUnit::Fahrenheit
    } else {
        TemperatureUnit::Celsius
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: &str, unit: &UnitArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let screen = build_screen(&config, unit)?;

    let result = screen.fetch_by_name(city).await;
    print!("{}", render(&screen.state()));

    result.map_err(Into::into)
}

async fn here(position: Option<Coordinates>, unit: &UnitArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let screen = build_screen(&config, unit)?;
    let locator = locator_for(position.or(config.home));

    match screen.fetch_by_geolocation(locator.as_ref()).await {
        Ok(()) => print!("{}", render(&screen.state())),
        Err(ScreenError::GeolocationUnavailable) => {
            eprintln!("No position available. Pass --lat/--lon or set `home` in the config file.");
        }
        Err(err) => tracing::info!(error = %err, "position forecast unavailable"),
    }

    Ok(())
}

async fn search(unit: &UnitArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let screen = build_screen(&config, unit)?;

    if screen.fetch_by_geolocation(locator_for(config.home).as_ref()).await.is_ok() {
        print!("{}", render(&screen.state()));
    }

    loop {
        let Some(input) = Text::new("City:")
            .with_help_message(":u toggles the unit, empty input quits")
            .prompt_skippable()?
        else {
            break;
        };

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        if input == ":u" {
            screen.toggle_unit();
            print!("{}", render(&screen.state()));
            continue;
        }

        screen.search(input).await.context("search task failed")?;

        let candidates = screen.state().candidates;
        if !candidates.is_empty() {
            let labels: Vec<String> = candidates
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}. {}", i + 1, c.label()))
                .collect();

            let picked = Select::new("Pick a city (Esc keeps the current result):", labels.clone())
                .prompt_skippable()?;

            if let Some(pos) = picked.and_then(|p| labels.iter().position(|l| *l == p)) {
                // The state already carries the error, if any.
                let _ = screen.select_candidate(&candidates[pos]).await;
            }
        }

        print!("{}", render(&screen.state()));
    }

    Ok(())
}
