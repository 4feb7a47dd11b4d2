//! Open-Meteo response DTOs.
//!
//! Open-Meteo omits variables it has no data for, so every measurement is
//! optional; defaults are applied during conversion.

use serde::Deserialize;

/// Response from `/v1/forecast`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: CurrentBlock,

    /// Only present when `daily=` variables were requested.
    pub daily: Option<DailyBlock>,
}

/// The `current` block of a forecast response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentBlock {
    /// °C
    pub temperature_2m: Option<f64>,

    /// Percent.
    pub relative_humidity_2m: Option<f64>,

    /// WMO weather interpretation code.
    pub weather_code: Option<f64>,

    /// km/h
    pub wind_speed_10m: Option<f64>,

    /// hPa
    pub surface_pressure: Option<f64>,

    /// Metres.
    pub visibility: Option<f64>,
}

/// The `daily` block of a forecast response. Parallel arrays indexed by day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    /// ISO dates, `YYYY-MM-DD`.
    #[serde(default)]
    pub time: Vec<String>,

    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,

    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,

    #[serde(default)]
    pub weather_code: Vec<Option<f64>>,

    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,

    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Response from the air-quality API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQualityResponse {
    #[serde(default)]
    pub current: AirQualityBlock,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQualityBlock {
    pub us_aqi: Option<f64>,

    /// µg/m³
    pub pm10: Option<f64>,

    /// µg/m³
    pub pm2_5: Option<f64>,
}
