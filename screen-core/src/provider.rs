use crate::{
    Config,
    model::{CityCandidate, Coordinates, Forecast, ResolvedCity},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// The three remote endpoints the screen consumes.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Resolve a city name to its canonical name and coordinates.
    async fn resolve_city(&self, name: &str) -> anyhow::Result<ResolvedCity>;

    /// Current conditions and daily forecast for a position.
    async fn forecast(&self, coordinates: Coordinates) -> anyhow::Result<Forecast>;

    /// Fuzzy search for cities matching `name`, most populous first.
    async fn find_cities(&self, name: &str) -> anyhow::Result<Vec<CityCandidate>>;
}

/// Construct the API client from config.
pub fn api_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherApi>> {
    let api_key = config.api_key()?;

    let client = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherClient::with_base_url(api_key.to_owned(), base_url),
        None => OpenWeatherClient::new(api_key.to_owned()),
    };

    Ok(Arc::new(client))
}
