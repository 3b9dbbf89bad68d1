use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One entry of the provider's `weather` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Unix seconds.
    pub timestamp: i64,
    pub temperature_c: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub timestamp: i64,
    pub day_temperature_c: f64,
    pub conditions: Vec<Condition>,
}

/// Full forecast for one resolved location. Replaced wholesale on every
/// successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}

/// Result of the forecast-by-coordinates call.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub snapshot: WeatherSnapshot,
    /// IANA zone name reported by the provider, e.g. "Europe/London".
    pub timezone: String,
}

/// A city returned by the fuzzy find endpoint, pending user selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCandidate {
    pub id: u64,
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub coordinates: Coordinates,
}

impl CityCandidate {
    /// Line shown in the candidate list, e.g. "London, GB".
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Result of the lookup-by-name call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCity {
    pub id: Option<u64>,
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Coordinates,
}

impl ResolvedCity {
    pub fn to_candidate(&self) -> CityCandidate {
        CityCandidate {
            id: self.id.unwrap_or_default(),
            name: self.name.clone(),
            state: None,
            country: self.country.clone().unwrap_or_default(),
            coordinates: self.coordinates,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

/// Entire mutable state of the screen.
///
/// After a settled by-name fetch, `error` and `snapshot` are never both set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayState {
    pub query: String,
    pub resolved_city_label: String,
    pub snapshot: Option<WeatherSnapshot>,
    pub error: Option<String>,
    pub is_loading: bool,
    pub unit: TemperatureUnit,
    pub candidates: Vec<CityCandidate>,
    pub selected_city: Option<CityCandidate>,
}

impl DisplayState {
    pub fn unit_is_celsius(&self) -> bool {
        self.unit == TemperatureUnit::Celsius
    }
}
