use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::ScreenError, model::Coordinates};

/// Source of the device position used on startup.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, ScreenError>;
}

/// A position known up front (configuration or command-line flags).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, ScreenError> {
        Ok(self.0)
    }
}

/// No position source on this device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinates, ScreenError> {
        Err(ScreenError::GeolocationUnavailable)
    }
}

/// Pick a locator: a known position if there is one, otherwise none.
pub fn locator_for(home: Option<Coordinates>) -> Box<dyn Geolocator> {
    match home {
        Some(coordinates) => Box::new(FixedLocation(coordinates)),
        None => Box::new(NoGeolocation),
    }
}
