//! Canned data source for tests.
//!
//! Serves fixed records without touching the network, counts calls per
//! kind, and can be switched into a failing mode at any point.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::{Days, NaiveDate};

use crate::domain::{
    AirQuality, Conditions, Coordinate, CurrentWeather, DailyForecast, Forecast, LineStatus,
    LiveArrival, WeatherCondition,
};

use super::{ExternalData, FetchError, FetchKind};

#[derive(Default)]
pub struct MockExternalData {
    arrivals: Vec<LiveArrival>,
    lines: Vec<LineStatus>,
    failing: AtomicBool,
    conditions_calls: AtomicUsize,
    forecast_calls: AtomicUsize,
    requested_stops: Mutex<Vec<String>>,
}

impl MockExternalData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arrivals(mut self, arrivals: Vec<LiveArrival>) -> Self {
        self.arrivals = arrivals;
        self
    }

    pub fn with_lines(mut self, lines: Vec<LineStatus>) -> Self {
        self.lines = lines;
        self
    }

    pub fn failing() -> Self {
        let mock = Self::default();
        mock.set_failing(true);
        mock
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn conditions_calls(&self) -> usize {
        self.conditions_calls.load(Ordering::SeqCst)
    }

    pub fn forecast_calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }

    /// Stop ids passed to `live_arrivals`, in call order.
    pub fn requested_stops(&self) -> Vec<String> {
        self.requested_stops.lock().unwrap().clone()
    }

    fn check(&self, kind: FetchKind) -> Result<(), FetchError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(FetchError::Timeout { kind })
        } else {
            Ok(())
        }
    }

    /// The record served for every location. Distinct from the fallback.
    pub fn sample_conditions() -> Conditions {
        Conditions {
            weather: sample_weather(),
            air: AirQuality::new(32),
        }
    }

    /// First day of every served forecast.
    pub fn forecast_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default()
    }
}

fn sample_weather() -> CurrentWeather {
    CurrentWeather {
        temperature_c: 14.5,
        condition: WeatherCondition::Overcast,
        humidity_pct: 81,
        wind_speed_kmh: 12.3,
        visibility_km: 24.1,
        pressure_hpa: 1016,
    }
}

/// Build an arrival with the fields tests usually vary.
pub fn arrival(line: &str, destination: &str, seconds: i64) -> LiveArrival {
    LiveArrival {
        destination: destination.to_string(),
        line: line.to_string(),
        platform: "1".to_string(),
        seconds_to_station: seconds,
        current_location: "At Platform".to_string(),
        towards: destination.to_string(),
        vehicle_id: format!("{line}-{seconds}"),
    }
}

impl ExternalData for MockExternalData {
    async fn current_conditions(&self, _at: Coordinate) -> Result<Conditions, FetchError> {
        self.conditions_calls.fetch_add(1, Ordering::SeqCst);
        self.check(FetchKind::CurrentWeather)?;
        Ok(Self::sample_conditions())
    }

    async fn forecast(&self, _at: Coordinate, days: u8) -> Result<Forecast, FetchError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        self.check(FetchKind::Forecast)?;

        let start = Self::forecast_start();
        let days = (0..u64::from(days))
            .filter_map(|i| start.checked_add_days(Days::new(i)))
            .map(|date| DailyForecast {
                date,
                temp_max_c: 18.0,
                temp_min_c: 9.0,
                condition: WeatherCondition::Rain,
                precipitation_pct: 70,
                wind_speed_kmh: 20.0,
            })
            .collect();

        Ok(Forecast {
            current: sample_weather(),
            days,
        })
    }

    async fn live_arrivals(&self, stop_id: &str) -> Result<Vec<LiveArrival>, FetchError> {
        self.requested_stops.lock().unwrap().push(stop_id.to_string());
        self.check(FetchKind::LiveArrivals)?;
        Ok(self.arrivals.clone())
    }

    async fn line_status(&self) -> Result<Vec<LineStatus>, FetchError> {
        self.check(FetchKind::LineStatus)?;
        Ok(self.lines.clone())
    }
}
