use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::fmt;

use crate::model::{
    CityCandidate, Condition, Coordinates, CurrentConditions, DailyForecast, Forecast,
    ResolvedCity, WeatherSnapshot,
};

use super::WeatherApi;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        what: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        tracing::debug!(%url, what, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .query(params)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse OpenWeather {what} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

impl From<OwCoord> for Coordinates {
    fn from(c: OwCoord) -> Self {
        Coordinates { lat: c.lat, lon: c.lon }
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

impl From<OwWeather> for Condition {
    fn from(w: OwWeather) -> Self {
        Condition { description: w.description, icon: w.icon }
    }
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwLookupResponse {
    id: Option<u64>,
    name: String,
    coord: OwCoord,
    sys: Option<OwSys>,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    dt: i64,
    temp: f64,
    humidity: u8,
    wind_speed: f64,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwDailyTemp {
    day: f64,
}

#[derive(Debug, Deserialize)]
struct OwDaily {
    dt: i64,
    temp: OwDailyTemp,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    timezone: String,
    current: OwCurrent,
    #[serde(default)]
    daily: Vec<OwDaily>,
}

#[derive(Debug, Deserialize)]
struct OwFindEntry {
    id: u64,
    name: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
    sys: Option<OwSys>,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwFindResponse {
    #[serde(default)]
    list: Vec<OwFindEntry>,
}

fn conditions(weather: Vec<OwWeather>) -> Vec<Condition> {
    weather.into_iter().map(Condition::from).collect()
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity> {
        let parsed: OwLookupResponse = self.get_json("weather", "lookup", &[("q", name)]).await?;

        Ok(ResolvedCity {
            id: parsed.id,
            name: parsed.name,
            country: parsed.sys.and_then(|s| s.country),
            coordinates: parsed.coord.into(),
        })
    }

    async fn forecast(&self, coordinates: Coordinates) -> Result<Forecast> {
        let lat = coordinates.lat.to_string();
        let lon = coordinates.lon.to_string();

        let parsed: OwOneCallResponse = self
            .get_json("onecall", "forecast", &[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await?;

        let current = CurrentConditions {
            timestamp: parsed.current.dt,
            temperature_c: parsed.current.temp,
            humidity: parsed.current.humidity,
            wind_speed: parsed.current.wind_speed,
            conditions: conditions(parsed.current.weather),
        };

        let daily = parsed
            .daily
            .into_iter()
            .map(|d| DailyForecast {
                timestamp: d.dt,
                day_temperature_c: d.temp.day,
                conditions: conditions(d.weather),
            })
            .collect();

        Ok(Forecast {
            snapshot: WeatherSnapshot { current, daily },
            timezone: parsed.timezone,
        })
    }

    async fn find_cities(&self, name: &str) -> Result<Vec<CityCandidate>> {
        let parsed: OwFindResponse = self
            .get_json("find", "find", &[("q", name), ("type", "like"), ("sort", "population")])
            .await?;

        let candidates = parsed
            .list
            .into_iter()
            .map(|e| CityCandidate {
                id: e.id,
                name: e.name,
                state: e.state,
                country: e.country.or(e.sys.and_then(|s| s.country)).unwrap_or_default(),
                coordinates: e.coord.into(),
            })
            .collect();

        Ok(candidates)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
