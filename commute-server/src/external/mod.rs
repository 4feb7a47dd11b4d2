//! Upstream data sources.
//!
//! [`ExternalData`] is the single seam between the board and the network:
//! production wires in [`Providers`] (Open-Meteo plus TfL), tests wire in a
//! canned implementation.

#[cfg(test)]
pub(crate) mod mock;

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tracing::warn;

use crate::domain::{AirQuality, Conditions, Coordinate, CurrentWeather, Forecast, LineStatus, LiveArrival};
use crate::openmeteo::OpenMeteoClient;
use crate::tfl::TflClient;

/// Longest body excerpt kept in an error message.
const MAX_ERROR_BODY: usize = 500;

/// Which upstream lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    CurrentWeather,
    Forecast,
    AirQuality,
    LineStatus,
    LiveArrivals,
}

impl FetchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::CurrentWeather => "current weather",
            FetchKind::Forecast => "forecast",
            FetchKind::AirQuality => "air quality",
            FetchKind::LineStatus => "line status",
            FetchKind::LiveArrivals => "live arrivals",
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from an upstream fetch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("{kind} request timed out")]
    Timeout { kind: FetchKind },

    #[error("{kind} request failed: {message}")]
    Transport { kind: FetchKind, message: String },

    #[error("{kind} response malformed: {message}")]
    Malformed { kind: FetchKind, message: String },

    #[error("{kind} request returned {status}: {message}")]
    Status {
        kind: FetchKind,
        status: u16,
        message: String,
    },
}

impl FetchError {
    /// Classify a reqwest failure.
    pub fn from_reqwest(kind: FetchKind, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { kind }
        } else if err.is_decode() {
            FetchError::Malformed {
                kind,
                message: err.to_string(),
            }
        } else {
            FetchError::Transport {
                kind,
                message: err.to_string(),
            }
        }
    }

    /// A JSON body that did not match the expected shape.
    pub fn malformed(kind: FetchKind, err: &serde_json::Error, body: &str) -> Self {
        let excerpt: String = body.chars().take(MAX_ERROR_BODY).collect();
        FetchError::Malformed {
            kind,
            message: format!("{err} (body: {excerpt})"),
        }
    }

    /// A non-success HTTP status.
    pub fn status(kind: FetchKind, status: u16, body: &str) -> Self {
        FetchError::Status {
            kind,
            status,
            message: body.chars().take(MAX_ERROR_BODY).collect(),
        }
    }

    pub fn kind(&self) -> FetchKind {
        match self {
            FetchError::Timeout { kind }
            | FetchError::Transport { kind, .. }
            | FetchError::Malformed { kind, .. }
            | FetchError::Status { kind, .. } => *kind,
        }
    }
}

/// Everything the board needs from the outside world.
///
/// Implementations must be cheap to call concurrently; the board never
/// holds a lock while awaiting one of these.
pub trait ExternalData: Send + Sync + 'static {
    /// Current weather plus air quality at a point.
    fn current_conditions(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<Conditions, FetchError>> + Send;

    /// Current weather plus a `days`-day daily outlook.
    fn forecast(
        &self,
        at: Coordinate,
        days: u8,
    ) -> impl Future<Output = Result<Forecast, FetchError>> + Send;

    /// Live arrivals at a TfL stop point.
    fn live_arrivals(
        &self,
        stop_id: &str,
    ) -> impl Future<Output = Result<Vec<LiveArrival>, FetchError>> + Send;

    /// Status of every tube line.
    fn line_status(&self) -> impl Future<Output = Result<Vec<LineStatus>, FetchError>> + Send;
}

/// Production data sources.
#[derive(Debug, Clone)]
pub struct Providers {
    pub weather: OpenMeteoClient,
    pub tfl: TflClient,
}

impl Providers {
    pub fn new(weather: OpenMeteoClient, tfl: TflClient) -> Self {
        Self { weather, tfl }
    }
}

impl ExternalData for Providers {
    /// Weather and air quality are fetched concurrently. Only a weather
    /// failure fails the lookup; missing air quality reads as the fallback.
    async fn current_conditions(&self, at: Coordinate) -> Result<Conditions, FetchError> {
        let (weather, air) = tokio::join!(
            self.weather.current_weather(at),
            self.weather.air_quality(at)
        );

        let weather: CurrentWeather = weather?;
        let air = air.unwrap_or_else(|e| {
            warn!(%at, error = %e, "air quality unavailable, using fallback");
            AirQuality::fallback()
        });

        Ok(Conditions { weather, air })
    }

    async fn forecast(&self, at: Coordinate, days: u8) -> Result<Forecast, FetchError> {
        self.weather.forecast(at, days).await
    }

    async fn live_arrivals(&self, stop_id: &str) -> Result<Vec<LiveArrival>, FetchError> {
        self.tfl.arrivals(stop_id).await
    }

    async fn line_status(&self) -> Result<Vec<LineStatus>, FetchError> {
        self.tfl.line_status().await
    }
}
