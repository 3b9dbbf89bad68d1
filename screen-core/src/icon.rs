//! Provider icon codes mapped to weather-icons CSS classes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherIcon {
    DaySunny,
    DayCloudy,
    Cloud,
    DayRain,
    DayThunderstorm,
    DaySnow,
    DayFog,
    NightClear,
    NightCloudy,
    NightCloudyHigh,
    NightRain,
    NightThunderstorm,
    NightSnow,
    NightFog,
    /// Any code outside the table. Renders no distinguishing class.
    Unknown,
}

impl WeatherIcon {
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" => WeatherIcon::DaySunny,
            "02d" => WeatherIcon::DayCloudy,
            "03d" | "04d" => WeatherIcon::Cloud,
            "09d" => WeatherIcon::DayRain,
            "11d" => WeatherIcon::DayThunderstorm,
            "13d" => WeatherIcon::DaySnow,
            "50d" => WeatherIcon::DayFog,
            "01n" => WeatherIcon::NightClear,
            "02n" => WeatherIcon::NightCloudy,
            "03n" => WeatherIcon::NightCloudyHigh,
            "09n" => WeatherIcon::NightRain,
            "11n" => WeatherIcon::NightThunderstorm,
            "13n" => WeatherIcon::NightSnow,
            "50n" => WeatherIcon::NightFog,
            _ => WeatherIcon::Unknown,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            WeatherIcon::DaySunny => "wi-day-sunny",
            WeatherIcon::DayCloudy => "wi-day-cloudy",
            WeatherIcon::Cloud => "wi-cloud",
            WeatherIcon::DayRain => "wi-day-rain",
            WeatherIcon::DayThunderstorm => "wi-day-thunderstorm",
            WeatherIcon::DaySnow => "wi-day-snow",
            WeatherIcon::DayFog => "wi-day-fog",
            WeatherIcon::NightClear => "wi-night-clear",
            WeatherIcon::NightCloudy => "wi-night-alt-cloudy",
            WeatherIcon::NightCloudyHigh => "wi-night-alt-cloudy-high",
            WeatherIcon::NightRain => "wi-night-alt-rain",
            WeatherIcon::NightThunderstorm => "wi-night-alt-thunderstorm",
            WeatherIcon::NightSnow => "wi-night-alt-snow",
            WeatherIcon::NightFog => "wi-night-fog",
            WeatherIcon::Unknown => "",
        }
    }
}

/// Class for a raw provider code; empty for unrecognized codes.
pub fn map_icon(code: &str) -> &'static str {
    WeatherIcon::from_code(code).css_class()
}
