//! Open-Meteo weather, forecast and air-quality client.
//!
//! Responses are normalized into the fixed records in [`crate::domain`]:
//! - measurements are rounded to one decimal place
//! - visibility is converted from metres to kilometres
//! - missing measurements take documented defaults rather than failing
//! - a zero or missing US AQI is derived from PM2.5

mod client;
mod convert;
mod types;

pub use client::{
    DEFAULT_AIR_QUALITY_URL, DEFAULT_BASE_URL, MAX_FORECAST_DAYS, OpenMeteoClient, OpenMeteoConfig,
};
pub use convert::{
    ConversionError, convert_air_quality, convert_current, convert_daily, convert_forecast,
};
pub use types::{AirQualityBlock, AirQualityResponse, CurrentBlock, DailyBlock, ForecastResponse};
