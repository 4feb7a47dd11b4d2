//! Weather and air-quality records.
//!
//! Every upstream provider must normalize into these shapes. They are fixed
//! records rather than open maps, so a missing field is a compile error in
//! the converter instead of a runtime default lookup in the handler.

use chrono::{Days, NaiveDate};

/// Condition label derived from a WMO weather interpretation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    ClearSky,
    PartlyCloudy,
    Overcast,
    Foggy,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    Thunderstorm,
    Clear,
}

impl WeatherCondition {
    /// Map a WMO weather code. Unrecognised codes read as `Clear`.
    pub fn from_wmo_code(code: u16) -> Self {
        match code {
            0 => WeatherCondition::ClearSky,
            1 | 2 => WeatherCondition::PartlyCloudy,
            3 => WeatherCondition::Overcast,
            45 | 48 => WeatherCondition::Foggy,
            51 | 53 | 55 => WeatherCondition::Drizzle,
            61 | 63 | 65 => WeatherCondition::Rain,
            71 | 73 | 75 => WeatherCondition::Snow,
            80..=82 => WeatherCondition::RainShowers,
            95 | 96 | 99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Clear,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::ClearSky => "Clear Sky",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Overcast => "Overcast",
            WeatherCondition::Foggy => "Foggy",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::RainShowers => "Rain Showers",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Clear => "Clear",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::ClearSky => "☀️",
            WeatherCondition::PartlyCloudy => "⛅",
            WeatherCondition::Overcast => "☁️",
            WeatherCondition::Foggy => "🌫️",
            WeatherCondition::Drizzle => "🌦️",
            WeatherCondition::Rain | WeatherCondition::RainShowers => "🌧️",
            WeatherCondition::Snow => "🌨️",
            WeatherCondition::Thunderstorm => "⛈️",
            WeatherCondition::Clear => "🌤️",
        }
    }
}

/// US EPA air quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => AqiLevel::Good,
            51..=100 => AqiLevel::Moderate,
            101..=150 => AqiLevel::UnhealthyForSensitive,
            151..=200 => AqiLevel::Unhealthy,
            201..=300 => AqiLevel::VeryUnhealthy,
            _ => AqiLevel::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitive => "Unhealthy for Sensitive",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AqiLevel::Good => "#10b981",
            AqiLevel::Moderate => "#f59e0b",
            AqiLevel::UnhealthyForSensitive => "#f97316",
            AqiLevel::Unhealthy => "#ef4444",
            AqiLevel::VeryUnhealthy => "#991b1b",
            AqiLevel::Hazardous => "#7f1d1d",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AqiLevel::Good => "😊",
            AqiLevel::Moderate => "😐",
            AqiLevel::UnhealthyForSensitive => "😷",
            AqiLevel::Unhealthy => "😨",
            AqiLevel::VeryUnhealthy => "🚨",
            AqiLevel::Hazardous => "☠️",
        }
    }
}

/// Highest value on the US AQI scale.
pub const MAX_AQI: u16 = 500;

/// Air quality index with its derived band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQuality {
    pub aqi: u16,
    pub level: AqiLevel,
}

impl AirQuality {
    /// Clamps to the 0..=500 scale.
    pub fn new(aqi: u16) -> Self {
        let aqi = aqi.min(MAX_AQI);
        Self {
            aqi,
            level: AqiLevel::from_aqi(aqi),
        }
    }

    /// Approximate US AQI from a PM2.5 concentration (µg/m³).
    ///
    /// Uses the piecewise-linear EPA breakpoints; the result is truncated
    /// and clamped to the AQI scale.
    pub fn from_pm25(pm25: f64) -> Self {
        let aqi = if pm25 <= 12.0 {
            (50.0 / 12.0) * pm25
        } else if pm25 <= 35.4 {
            50.0 + ((100.0 - 50.0) / (35.4 - 12.1)) * (pm25 - 12.1)
        } else if pm25 <= 55.4 {
            100.0 + ((150.0 - 100.0) / (55.4 - 35.5)) * (pm25 - 35.5)
        } else if pm25 <= 150.4 {
            150.0 + ((200.0 - 150.0) / (150.4 - 55.5)) * (pm25 - 55.5)
        } else {
            200.0 + ((300.0 - 200.0) / (250.4 - 150.5)) * (pm25 - 150.5)
        };
        Self::new(aqi.trunc().clamp(0.0, MAX_AQI as f64) as u16)
    }

    /// Used when the air-quality provider is unavailable.
    pub fn fallback() -> Self {
        Self::new(50)
    }
}

/// Current weather at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Degrees Celsius, one decimal place.
    pub temperature_c: f64,
    pub condition: WeatherCondition,
    /// Relative humidity, percent.
    pub humidity_pct: u8,
    /// Kilometres per hour, one decimal place.
    pub wind_speed_kmh: f64,
    /// Kilometres, one decimal place.
    pub visibility_km: f64,
    /// Surface pressure, hectopascals.
    pub pressure_hpa: u16,
}

impl CurrentWeather {
    /// Used when the weather provider is unavailable.
    pub fn fallback() -> Self {
        Self {
            temperature_c: 20.0,
            condition: WeatherCondition::PartlyCloudy,
            humidity_pct: 65,
            wind_speed_kmh: 10.0,
            visibility_km: 10.0,
            pressure_hpa: 1013,
        }
    }
}

/// Weather plus air quality: the record attached to every arrival group.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub weather: CurrentWeather,
    pub air: AirQuality,
}

impl Conditions {
    /// The static record substituted when nothing fresh or stale is available.
    pub fn fallback() -> Self {
        Self {
            weather: CurrentWeather::fallback(),
            air: AirQuality::fallback(),
        }
    }
}

/// One day of a forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub condition: WeatherCondition,
    /// Maximum precipitation probability, percent.
    pub precipitation_pct: u8,
    /// Maximum wind speed, km/h.
    pub wind_speed_kmh: f64,
}

/// Current weather plus a multi-day outlook.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub current: CurrentWeather,
    pub days: Vec<DailyForecast>,
}

impl Forecast {
    /// Static outlook starting at `today`, used when the provider is unavailable.
    pub fn fallback(today: NaiveDate, days: u8) -> Self {
        let days = (0..u64::from(days))
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .map(|date| DailyForecast {
                date,
                temp_max_c: 22.0,
                temp_min_c: 15.0,
                condition: WeatherCondition::PartlyCloudy,
                precipitation_pct: 10,
                wind_speed_kmh: 10.0,
            })
            .collect();

        Self {
            current: CurrentWeather::fallback(),
            days,
        }
    }
}

/// Round to one decimal place, the precision shown to riders.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wmo_code_mapping() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::ClearSky);
        assert_eq!(WeatherCondition::from_wmo_code(2), WeatherCondition::PartlyCloudy);
        assert_eq!(WeatherCondition::from_wmo_code(3), WeatherCondition::Overcast);
        assert_eq!(WeatherCondition::from_wmo_code(48), WeatherCondition::Foggy);
        assert_eq!(WeatherCondition::from_wmo_code(53), WeatherCondition::Drizzle);
        assert_eq!(WeatherCondition::from_wmo_code(65), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(71), WeatherCondition::Snow);
        assert_eq!(WeatherCondition::from_wmo_code(81), WeatherCondition::RainShowers);
        assert_eq!(WeatherCondition::from_wmo_code(99), WeatherCondition::Thunderstorm);
        // Codes in gaps of the table fall through to Clear
        assert_eq!(WeatherCondition::from_wmo_code(4), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_wmo_code(56), WeatherCondition::Clear);
    }

    #[test]
    fn condition_labels_and_icons() {
        assert_eq!(WeatherCondition::ClearSky.label(), "Clear Sky");
        assert_eq!(WeatherCondition::ClearSky.icon(), "☀️");
        assert_eq!(WeatherCondition::RainShowers.label(), "Rain Showers");
        assert_eq!(WeatherCondition::RainShowers.icon(), "🌧️");
        assert_eq!(WeatherCondition::Clear.icon(), "🌤️");
    }

    #[test]
    fn aqi_band_boundaries() {
        assert_eq!(AqiLevel::from_aqi(0), AqiLevel::Good);
        assert_eq!(AqiLevel::from_aqi(50), AqiLevel::Good);
        assert_eq!(AqiLevel::from_aqi(51), AqiLevel::Moderate);
        assert_eq!(AqiLevel::from_aqi(100), AqiLevel::Moderate);
        assert_eq!(AqiLevel::from_aqi(150), AqiLevel::UnhealthyForSensitive);
        assert_eq!(AqiLevel::from_aqi(200), AqiLevel::Unhealthy);
        assert_eq!(AqiLevel::from_aqi(300), AqiLevel::VeryUnhealthy);
        assert_eq!(AqiLevel::from_aqi(301), AqiLevel::Hazardous);
    }

    #[test]
    fn aqi_level_presentation() {
        assert_eq!(AqiLevel::Moderate.label(), "Moderate");
        assert_eq!(AqiLevel::Moderate.color(), "#f59e0b");
        assert_eq!(AqiLevel::Hazardous.icon(), "☠️");
    }

    #[test]
    fn air_quality_clamps_to_scale() {
        assert_eq!(AirQuality::new(900).aqi, 500);
        assert_eq!(AirQuality::new(900).level, AqiLevel::Hazardous);
    }

    #[test]
    fn pm25_conversion() {
        assert_eq!(AirQuality::from_pm25(0.0).aqi, 0);
        assert_eq!(AirQuality::from_pm25(6.0).aqi, 25);
        assert_eq!(AirQuality::from_pm25(12.0).aqi, 50);
        // 50 + (50 / 23.3) * (20.0 - 12.1) = 66.95...
        assert_eq!(AirQuality::from_pm25(20.0).aqi, 66);
        // 100 + (50 / 19.9) * (40.0 - 35.5) = 111.3...
        assert_eq!(AirQuality::from_pm25(40.0).aqi, 111);
        assert_eq!(AirQuality::from_pm25(1000.0).aqi, 500);
    }

    #[test]
    fn fallback_record_is_static() {
        let a = Conditions::fallback();
        let b = Conditions::fallback();
        assert_eq!(a, b);
        assert_eq!(a.weather.temperature_c, 20.0);
        assert_eq!(a.weather.condition, WeatherCondition::PartlyCloudy);
        assert_eq!(a.weather.humidity_pct, 65);
        assert_eq!(a.weather.pressure_hpa, 1013);
        assert_eq!(a.air.aqi, 50);
        assert_eq!(a.air.level, AqiLevel::Good);
    }

    #[test]
    fn fallback_forecast_dates_are_consecutive() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let forecast = Forecast::fallback(today, 4);
        let dates: Vec<String> = forecast.days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2024-12-30", "2024-12-31", "2025-01-01", "2025-01-02"]
        );
    }

    #[test]
    fn round_to_one_decimal() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.36), 12.4);
        assert_eq!(round1(-0.04), -0.0);
    }
}
