//! The screen controller: search input, candidate list, and forecast fetches.
//!
//! All mutable state lives in one [`DisplayState`] owned by [`WeatherScreen`].
//! Fetches are not coordinated with each other: by default whichever response
//! settles last is what the screen shows, even if it belongs to an older
//! request. [`ScreenOptions::discard_stale`] turns on an epoch check that
//! drops those late responses instead.

use parking_lot::Mutex;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::task::JoinHandle;

use crate::{
    Config,
    debounce::Debouncer,
    error::ScreenError,
    format::label_from_timezone,
    geolocation::Geolocator,
    model::{CityCandidate, DisplayState, Forecast, ResolvedCity, TemperatureUnit},
    provider::WeatherApi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    /// Quiet period before a typed query is looked up.
    pub debounce: Duration,
    /// Ignore responses from fetches that a newer fetch has superseded.
    pub discard_stale: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(crate::config::DEFAULT_DEBOUNCE_MS),
            discard_stale: false,
        }
    }
}

impl From<&Config> for ScreenOptions {
    fn from(config: &Config) -> Self {
        Self {
            debounce: config.debounce(),
            discard_stale: config.discard_stale,
        }
    }
}

/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone)]
pub struct WeatherScreen {
    api: Arc<dyn WeatherApi>,
    state: Arc<Mutex<DisplayState>>,
    debouncer: Debouncer,
    epoch: Arc<AtomicU64>,
    /// Counts only the fetches that raise the loading flag.
    loading_epoch: Arc<AtomicU64>,
    options: ScreenOptions,
}

impl WeatherScreen {
    pub fn new(api: Arc<dyn WeatherApi>, options: ScreenOptions) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(DisplayState::default())),
            debouncer: Debouncer::new(options.debounce),
            epoch: Arc::new(AtomicU64::new(0)),
            loading_epoch: Arc::new(AtomicU64::new(0)),
            options,
        }
    }

    pub fn with_unit(self, unit: TemperatureUnit) -> Self {
        self.state.lock().unit = unit;
        self
    }

    /// Read-only copy of the current display state.
    pub fn state(&self) -> DisplayState {
        self.state.lock().clone()
    }

    pub fn toggle_unit(&self) {
        let mut state = self.state.lock();
        state.unit = state.unit.toggled();
    }

    /// Keystroke handler. Updates the query immediately and schedules a
    /// debounced lookup; an earlier pending lookup is superseded.
    ///
    /// When the quiet period settles, the candidate list is refreshed and the
    /// weather for the typed name is fetched. The returned handle resolves
    /// once this keystroke's timer has either settled or been superseded.
    /// Must be called within a tokio runtime.
    pub fn search(&self, text: &str) -> JoinHandle<()> {
        self.state.lock().query = text.to_string();

        let screen = self.clone();
        let query = text.to_string();
        self.debouncer.schedule(async move {
            screen.settle_query(&query).await;
        })
    }

    async fn settle_query(&self, query: &str) {
        tracing::debug!(query, "search settled");
        // Both outcomes are already reflected in the state.
        let _ = tokio::join!(self.refresh_candidates(query), self.fetch_by_name(query));
    }

    /// Replace the candidate list with matches for `query`.
    ///
    /// On failure the list is left as it was and nothing is shown to the user.
    pub async fn refresh_candidates(&self, query: &str) -> Result<(), ScreenError> {
        match self.api.find_cities(query).await {
            Ok(candidates) => {
                tracing::debug!(query, count = candidates.len(), "candidates updated");
                self.state.lock().candidates = candidates;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(query, error = %format!("{err:#}"), "candidate lookup failed");
                Err(ScreenError::LookupFailed)
            }
        }
    }

    /// Pick a candidate: the query becomes its name and its weather is
    /// fetched right away. The candidate list is left untouched.
    pub async fn select_candidate(&self, candidate: &CityCandidate) -> Result<(), ScreenError> {
        self.state.lock().query = candidate.name.clone();
        self.fetch_by_name(&candidate.name).await
    }

    /// Resolve `name` to coordinates, then fetch the forecast there.
    ///
    /// Loading is raised before the first call and released once the second
    /// settles, whatever the outcome. Any failure becomes "City not found"
    /// and clears the snapshot.
    pub async fn fetch_by_name(&self, name: &str) -> Result<(), ScreenError> {
        let (epoch, loading_epoch) = {
            let mut state = self.state.lock();
            state.is_loading = true;
            let loading_epoch = self.loading_epoch.fetch_add(1, Ordering::SeqCst) + 1;
            (self.epoch.fetch_add(1, Ordering::SeqCst) + 1, loading_epoch)
        };
        tracing::debug!(name, epoch, "fetching weather by name");

        let result = self.resolve_and_forecast(name).await;

        let mut state = self.state.lock();
        if self.is_stale(epoch) {
            tracing::debug!(name, epoch, "discarding stale response");
            // A position fetch does not own the loading flag, so release it
            // unless a newer by-name fetch is still pending.
            if self.loading_epoch.load(Ordering::SeqCst) == loading_epoch {
                state.is_loading = false;
            }
            return result.map(|_| ()).map_err(|_| ScreenError::ForecastFailed);
        }

        state.is_loading = false;
        match result {
            Ok((city, forecast)) => {
                state.snapshot = Some(forecast.snapshot);
                state.resolved_city_label = city.name.clone();
                state.selected_city = Some(city.to_candidate());
                state.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(name, error = %format!("{err:#}"), "weather fetch failed");
                state.error = Some(ScreenError::ForecastFailed.to_string());
                state.snapshot = None;
                state.selected_city = None;
                Err(ScreenError::ForecastFailed)
            }
        }
    }

    async fn resolve_and_forecast(&self, name: &str) -> anyhow::Result<(ResolvedCity, Forecast)> {
        let city = self.api.resolve_city(name).await?;
        let forecast = self.api.forecast(city.coordinates).await?;
        Ok((city, forecast))
    }

    /// Startup path: fetch the forecast for the device position, skipping
    /// name resolution. The label comes from the forecast's time zone.
    ///
    /// On success the error and the selected city are cleared. Neither a
    /// missing position nor a failed forecast touches the state.
    pub async fn fetch_by_geolocation(&self, locator: &dyn Geolocator) -> Result<(), ScreenError> {
        let coordinates = match locator.current_position().await {
            Ok(coordinates) => coordinates,
            Err(err) => {
                tracing::debug!(error = %err, "no device position");
                return Err(err);
            }
        };

        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(?coordinates, epoch, "fetching weather by position");

        let forecast = match self.api.forecast(coordinates).await {
            Ok(forecast) => forecast,
            Err(err) => {
                tracing::debug!(error = %format!("{err:#}"), "position forecast failed");
                return Err(ScreenError::ForecastFailed);
            }
        };

        let mut state = self.state.lock();
        if self.is_stale(epoch) {
            tracing::debug!(epoch, "discarding stale response");
            return Ok(());
        }

        state.resolved_city_label = label_from_timezone(&forecast.timezone);
        state.snapshot = Some(forecast.snapshot);
        state.selected_city = None;
        state.error = None;
        Ok(())
    }

    fn is_stale(&self, epoch: u64) -> bool {
        self.options.discard_stale && self.epoch.load(Ordering::SeqCst) != epoch
    }
}
