//! Core library for the weather lookup screen.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherApi`] trait
//! - The screen controller (search, debounce, fetch lifecycle)
//! - Pure formatting, icon mapping and text rendering
//!
//! It is used by `weather-screen`, but any renderer can drive a
//! [`WeatherScreen`] and read its [`DisplayState`].

pub mod config;
pub mod debounce;
pub mod error;
pub mod format;
pub mod geolocation;
pub mod icon;
pub mod model;
pub mod provider;
pub mod render;
pub mod screen;

pub use config::Config;
pub use error::ScreenError;
pub use geolocation::{FixedLocation, Geolocator, NoGeolocation};
pub use icon::{WeatherIcon, map_icon};
pub use model::{CityCandidate, Coordinates, DisplayState, TemperatureUnit, WeatherSnapshot};
pub use provider::{WeatherApi, api_from_config, openweather::OpenWeatherClient};
pub use screen::{ScreenOptions, WeatherScreen};
