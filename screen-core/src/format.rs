//! Pure presentation helpers. No state, no I/O.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

use crate::model::TemperatureUnit;

const DATE_FORMAT: &str = "%b %-d, %Y";

/// Round half up, so that -0.5 becomes 0 rather than -1.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn to_fahrenheit(celsius: f64) -> i64 {
    round_half_up(celsius * 1.8 + 32.0)
}

pub fn to_celsius(celsius: f64) -> i64 {
    round_half_up(celsius)
}

/// Temperature in the requested unit; the provider always reports Celsius.
pub fn display_temperature(celsius: f64, unit: TemperatureUnit) -> i64 {
    match unit {
        TemperatureUnit::Celsius => to_celsius(celsius),
        TemperatureUnit::Fahrenheit => to_fahrenheit(celsius),
    }
}

pub fn temperature_label(celsius: f64, unit: TemperatureUnit) -> String {
    format!("{}°{}", display_temperature(celsius, unit), unit.symbol())
}

/// "MMM D, YYYY" in the viewer's local time zone.
pub fn format_date(unix_seconds: i64) -> Option<String> {
    format_date_in(unix_seconds, &Local)
}

pub fn format_date_in<Tz>(unix_seconds: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let utc: DateTime<Utc> = DateTime::from_timestamp(unix_seconds, 0)?;
    Some(utc.with_timezone(tz).format(DATE_FORMAT).to_string())
}

/// Display label for a provider time zone: the segment after the first '/'.
///
/// "Europe/London" gives "London"; a zone without a separator is returned whole.
pub fn label_from_timezone(timezone: &str) -> String {
    timezone.split('/').nth(1).unwrap_or(timezone).to_string()
}

pub fn icon_image_url(code: &str) -> String {
    format!("http://openweathermap.org/img/wn/{code}.png")
}
