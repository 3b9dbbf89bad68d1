use thiserror::Error;

/// Every failure the screen can observe. Nothing is retried; each variant is
/// terminal for the attempt that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// Candidate lookup failed. Never shown to the user.
    #[error("City lookup failed")]
    LookupFailed,

    /// Name resolution or forecast failed. Clears the snapshot.
    #[error("City not found")]
    ForecastFailed,

    /// No device position is available. Silent no-op.
    #[error("Geolocation is unavailable")]
    GeolocationUnavailable,
}
