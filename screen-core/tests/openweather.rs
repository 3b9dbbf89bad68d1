//! Integration tests for OpenWeatherClient and WeatherScreen using wiremock.

use std::sync::Arc;

use weather_screen_core::{
    Coordinates, FixedLocation, OpenWeatherClient, ScreenOptions, WeatherApi, WeatherScreen,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url("TEST_KEY".into(), &format!("{}/data/2.5", server.uri()))
}

fn lookup_body() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 11.2},
        "sys": {"country": "GB"},
        "id": 2643743,
        "name": "London",
        "cod": 200
    })
}

fn onecall_body() -> serde_json::Value {
    serde_json::json!({
        "lat": 51.5085,
        "lon": -0.1257,
        "timezone": "Europe/London",
        "timezone_offset": 0,
        "current": {
            "dt": 1678017600,
            "temp": 11.2,
            "humidity": 81,
            "wind_speed": 4.12,
            "weather": [{"id": 803, "description": "broken clouds", "icon": "04d"}]
        },
        "daily": [
            {"dt": 1678017600, "temp": {"day": 11.9, "min": 6.0}, "weather": [{"description": "light rain", "icon": "10d"}]},
            {"dt": 1678104000, "temp": {"day": 8.4, "min": 3.1}, "weather": [{"description": "snow", "icon": "13d"}]}
        ]
    })
}

async fn mount_london(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/onecall"))
        .and(query_param("lat", "51.5085"))
        .and(query_param("lon", "-0.1257"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolve_city_returns_name_and_coordinates() {
    let server = MockServer::start().await;
    mount_london(&server).await;

    let city = client(&server).resolve_city("London").await.unwrap();

    assert_eq!(city.name, "London");
    assert_eq!(city.id, Some(2643743));
    assert_eq!(city.country.as_deref(), Some("GB"));
    assert_eq!(city.coordinates, Coordinates { lat: 51.5085, lon: -0.1257 });
}

#[tokio::test]
async fn forecast_maps_current_and_daily() {
    let server = MockServer::start().await;
    mount_london(&server).await;

    let forecast = client(&server)
        .forecast(Coordinates { lat: 51.5085, lon: -0.1257 })
        .await
        .unwrap();

    assert_eq!(forecast.timezone, "Europe/London");
    let current = &forecast.snapshot.current;
    assert_eq!(current.timestamp, 1678017600);
    assert_eq!(current.temperature_c, 11.2);
    assert_eq!(current.humidity, 81);
    assert_eq!(current.wind_speed, 4.12);
    assert_eq!(current.conditions[0].icon, "04d");

    let daily = &forecast.snapshot.daily;
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[1].day_temperature_c, 8.4);
    assert_eq!(daily[1].conditions[0].description, "snow");
}

#[tokio::test]
async fn find_cities_sends_fuzzy_params_and_reads_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/find"))
        .and(query_param("q", "Spring"))
        .and(query_param("type", "like"))
        .and(query_param("sort", "population"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "like",
            "cod": "200",
            "count": 2,
            "list": [
                {"id": 4409896, "name": "Springfield", "coord": {"lat": 37.2153, "lon": -93.2982}, "sys": {"country": "US"}},
                {"id": 4250542, "name": "Springfield", "state": "IL", "country": "US", "coord": {"lat": 39.8017, "lon": -89.6437}}
            ]
        })))
        .mount(&server)
        .await;

    let found = client(&server).find_cities("Spring").await.unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].label(), "Springfield, US");
    assert_eq!(found[0].state, None);
    assert_eq!(found[1].state.as_deref(), Some("IL"));
    assert_eq!(found[1].country, "US");
}

#[tokio::test]
async fn not_found_status_is_an_error_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"cod":"404","message":"city not found"}"#),
        )
        .mount(&server)
        .await;

    let err = client(&server).resolve_city("Atlantis").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("404"));
    assert!(msg.contains("city not found"));
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .forecast(Coordinates { lat: 0.0, lon: 0.0 })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to parse OpenWeather forecast JSON"));
}

#[tokio::test]
async fn screen_fetches_by_name_against_http_backend() {
    let server = MockServer::start().await;
    mount_london(&server).await;

    let screen = WeatherScreen::new(Arc::new(client(&server)), ScreenOptions::default());
    screen.fetch_by_name("London").await.unwrap();

    let state = screen.state();
    assert_eq!(state.resolved_city_label, "London");
    assert_eq!(state.snapshot.as_ref().map(|s| s.daily.len()), Some(2));
    assert!(state.error.is_none());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn screen_reports_city_not_found_on_http_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let screen = WeatherScreen::new(Arc::new(client(&server)), ScreenOptions::default());
    assert!(screen.fetch_by_name("Nowhere").await.is_err());

    let state = screen.state();
    assert_eq!(state.error.as_deref(), Some("City not found"));
    assert!(state.snapshot.is_none());
}

#[tokio::test]
async fn screen_geolocation_skips_name_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_body()))
        .expect(0)
        .mount(&server)
        .await;

    let screen = WeatherScreen::new(Arc::new(client(&server)), ScreenOptions::default());
    let here = FixedLocation(Coordinates { lat: 51.5085, lon: -0.1257 });
    screen.fetch_by_geolocation(&here).await.unwrap();

    assert_eq!(screen.state().resolved_city_label, "London");
}
