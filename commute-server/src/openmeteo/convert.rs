//! Conversion from Open-Meteo DTOs to domain records.

use chrono::NaiveDate;

use crate::domain::{
    AirQuality, CurrentWeather, DailyForecast, Forecast, WeatherCondition, round1,
};

use super::types::{AirQualityBlock, CurrentBlock, DailyBlock, ForecastResponse};

const DEFAULT_TEMPERATURE_C: f64 = 20.0;
const DEFAULT_HUMIDITY_PCT: f64 = 65.0;
const DEFAULT_WIND_KMH: f64 = 10.0;
const DEFAULT_VISIBILITY_M: f64 = 10_000.0;
const DEFAULT_PRESSURE_HPA: f64 = 1013.0;

const DEFAULT_DAY_MAX_C: f64 = 20.0;
const DEFAULT_DAY_MIN_C: f64 = 15.0;

/// PM2.5 assumed when the air-quality response has neither AQI nor PM2.5.
const DEFAULT_PM25: f64 = 10.0;

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid forecast date: {0}")]
    InvalidDate(String),
}

fn weather_code(code: Option<f64>) -> WeatherCondition {
    let code = code.unwrap_or(0.0);
    if (0.0..=f64::from(u16::MAX)).contains(&code) {
        WeatherCondition::from_wmo_code(code as u16)
    } else {
        WeatherCondition::from_wmo_code(u16::MAX)
    }
}

fn percent(value: f64) -> u8 {
    value.clamp(0.0, 100.0) as u8
}

/// Convert the `current` block, filling missing measurements with defaults.
pub fn convert_current(current: &CurrentBlock) -> CurrentWeather {
    CurrentWeather {
        temperature_c: round1(current.temperature_2m.unwrap_or(DEFAULT_TEMPERATURE_C)),
        condition: weather_code(current.weather_code),
        humidity_pct: percent(current.relative_humidity_2m.unwrap_or(DEFAULT_HUMIDITY_PCT)),
        wind_speed_kmh: round1(current.wind_speed_10m.unwrap_or(DEFAULT_WIND_KMH)),
        visibility_km: round1(current.visibility.unwrap_or(DEFAULT_VISIBILITY_M) / 1000.0),
        pressure_hpa: current
            .surface_pressure
            .unwrap_or(DEFAULT_PRESSURE_HPA)
            .clamp(0.0, f64::from(u16::MAX)) as u16,
    }
}

/// Convert the `daily` block, keeping at most `days` entries.
///
/// Days are driven by the `time` array; a missing value in any other array
/// takes that measurement's default.
pub fn convert_daily(daily: &DailyBlock, days: u8) -> Result<Vec<DailyForecast>, ConversionError> {
    let at = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    daily
        .time
        .iter()
        .take(usize::from(days))
        .enumerate()
        .map(|(i, date)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| ConversionError::InvalidDate(date.clone()))?;

            Ok(DailyForecast {
                date,
                temp_max_c: round1(at(&daily.temperature_2m_max, i).unwrap_or(DEFAULT_DAY_MAX_C)),
                temp_min_c: round1(at(&daily.temperature_2m_min, i).unwrap_or(DEFAULT_DAY_MIN_C)),
                condition: weather_code(at(&daily.weather_code, i)),
                precipitation_pct: percent(at(&daily.precipitation_probability_max, i).unwrap_or(0.0)),
                wind_speed_kmh: round1(at(&daily.wind_speed_10m_max, i).unwrap_or(DEFAULT_WIND_KMH)),
            })
        })
        .collect()
}

/// Convert a full forecast response.
pub fn convert_forecast(response: &ForecastResponse, days: u8) -> Result<Forecast, ConversionError> {
    let days = match &response.daily {
        Some(daily) => convert_daily(daily, days)?,
        None => Vec::new(),
    };

    Ok(Forecast {
        current: convert_current(&response.current),
        days,
    })
}

/// Convert the air-quality block.
///
/// A zero or absent `us_aqi` is treated as missing and the index is derived
/// from PM2.5 instead.
pub fn convert_air_quality(current: &AirQualityBlock) -> AirQuality {
    match current.us_aqi {
        Some(aqi) if aqi > 0.0 => AirQuality::new(aqi.min(f64::from(u16::MAX)) as u16),
        _ => AirQuality::from_pm25(current.pm2_5.unwrap_or(DEFAULT_PM25)),
    }
}
