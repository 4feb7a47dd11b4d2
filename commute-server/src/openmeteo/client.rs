//! Open-Meteo HTTP client.
//!
//! Open-Meteo needs no credentials. Current weather, forecasts and air
//! quality come from two hosts; each call kind has its own timeout because
//! forecast responses are much larger than current-conditions ones.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{AirQuality, Coordinate, CurrentWeather, Forecast};
use crate::external::{FetchError, FetchKind};

use super::convert::{convert_air_quality, convert_current, convert_forecast};
use super::types::{AirQualityResponse, ForecastResponse};

/// Default base URL for the forecast API.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Default base URL for the air-quality API.
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com";

/// Variables requested in the `current` block.
const CURRENT_VARS: &str =
    "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m,surface_pressure,visibility";

/// Variables requested in the `daily` block.
const DAILY_VARS: &str = "temperature_2m_max,temperature_2m_min,weather_code,precipitation_probability_max,wind_speed_10m_max";

/// Variables requested from the air-quality API.
const AIR_QUALITY_VARS: &str = "us_aqi,pm10,pm2_5";

/// Longest outlook Open-Meteo serves.
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Configuration for the Open-Meteo client.
#[derive(Debug, Clone)]
pub struct OpenMeteoConfig {
    /// Base URL for the forecast API
    pub base_url: String,
    /// Base URL for the air-quality API
    pub air_quality_url: String,
    /// Timeout for current weather and air quality requests
    pub current_timeout: Duration,
    /// Timeout for forecast requests
    pub forecast_timeout: Duration,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_string(),
            current_timeout: Duration::from_secs(5),
            forecast_timeout: Duration::from_secs(10),
        }
    }
}

impl OpenMeteoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom forecast base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom air-quality base URL (for testing).
    pub fn with_air_quality_url(mut self, url: impl Into<String>) -> Self {
        self.air_quality_url = url.into();
        self
    }

    pub fn with_current_timeout(mut self, timeout: Duration) -> Self {
        self.current_timeout = timeout;
        self
    }

    pub fn with_forecast_timeout(mut self, timeout: Duration) -> Self {
        self.forecast_timeout = timeout;
        self
    }
}

/// Open-Meteo API client.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    config: OpenMeteoConfig,
}

impl OpenMeteoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OpenMeteoConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::from_reqwest(FetchKind::CurrentWeather, e))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OpenMeteoConfig {
        &self.config
    }

    /// Current weather at a point.
    pub async fn current_weather(&self, at: Coordinate) -> Result<CurrentWeather, FetchError> {
        let url = format!("{}/v1/forecast", self.config.base_url);
        let response: ForecastResponse = self
            .get_json(
                FetchKind::CurrentWeather,
                &url,
                &[
                    ("latitude", at.lat.to_string()),
                    ("longitude", at.lon.to_string()),
                    ("current", CURRENT_VARS.to_string()),
                    ("temperature_unit", "celsius".to_string()),
                    ("wind_speed_unit", "kmh".to_string()),
                ],
                self.config.current_timeout,
            )
            .await?;

        let weather = convert_current(&response.current);
        debug!(%at, temperature_c = weather.temperature_c, condition = weather.condition.label(), "fetched weather");
        Ok(weather)
    }

    /// Current weather plus a daily outlook of up to [`MAX_FORECAST_DAYS`].
    pub async fn forecast(&self, at: Coordinate, days: u8) -> Result<Forecast, FetchError> {
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        let url = format!("{}/v1/forecast", self.config.base_url);
        let response: ForecastResponse = self
            .get_json(
                FetchKind::Forecast,
                &url,
                &[
                    ("latitude", at.lat.to_string()),
                    ("longitude", at.lon.to_string()),
                    ("current", CURRENT_VARS.to_string()),
                    ("daily", DAILY_VARS.to_string()),
                    ("temperature_unit", "celsius".to_string()),
                    ("wind_speed_unit", "kmh".to_string()),
                    ("forecast_days", days.to_string()),
                ],
                self.config.forecast_timeout,
            )
            .await?;

        convert_forecast(&response, days).map_err(|e| FetchError::Malformed {
            kind: FetchKind::Forecast,
            message: e.to_string(),
        })
    }

    /// Current US AQI at a point.
    pub async fn air_quality(&self, at: Coordinate) -> Result<AirQuality, FetchError> {
        let url = format!("{}/v1/air-quality", self.config.air_quality_url);
        let response: AirQualityResponse = self
            .get_json(
                FetchKind::AirQuality,
                &url,
                &[
                    ("latitude", at.lat.to_string()),
                    ("longitude", at.lon.to_string()),
                    ("current", AIR_QUALITY_VARS.to_string()),
                ],
                self.config.current_timeout,
            )
            .await?;

        let air = convert_air_quality(&response.current);
        debug!(%at, aqi = air.aqi, level = air.level.label(), "fetched air quality");
        Ok(air)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        kind: FetchKind,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(kind, e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::status(kind, status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(kind, e))?;

        serde_json::from_str(&body).map_err(|e| FetchError::malformed(kind, &e, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = OpenMeteoConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.air_quality_url, DEFAULT_AIR_QUALITY_URL);
        assert_eq!(config.current_timeout, Duration::from_secs(5));
        assert_eq!(config.forecast_timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_builder() {
        let config = OpenMeteoConfig::new()
            .with_base_url("http://localhost:9000")
            .with_air_quality_url("http://localhost:9001")
            .with_current_timeout(Duration::from_millis(200))
            .with_forecast_timeout(Duration::from_secs(1));

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.air_quality_url, "http://localhost:9001");
        assert_eq!(config.current_timeout, Duration::from_millis(200));
        assert_eq!(config.forecast_timeout, Duration::from_secs(1));
    }

    #[test]
    fn client_creation() {
        let client = OpenMeteoClient::new(OpenMeteoConfig::default()).unwrap();
        assert_eq!(client.config().base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_or_timeout() {
        // Port 9 (discard) on localhost is closed on any sane test machine
        let config = OpenMeteoConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .with_current_timeout(Duration::from_secs(2));
        let client = OpenMeteoClient::new(config).unwrap();

        let err = client
            .current_weather(Coordinate::new(37.8, -122.27))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchKind::CurrentWeather);
        assert!(matches!(
            err,
            FetchError::Transport { .. } | FetchError::Timeout { .. }
        ));
    }
}
