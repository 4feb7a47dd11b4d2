//! Domain types for the commute board.
//!
//! This module contains the core domain model types: validated station
//! codes, destination routes, and the normalized weather and tube records
//! every upstream provider converts into. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod arrival;
mod error;
mod route;
mod station;
mod tube;
mod weather;

pub use arrival::DisplayMinutes;
pub use error::DomainError;
pub use route::{DestinationRoute, Direction, Headway, Line};
pub use station::{Coordinate, InvalidStationCode, Station, StationCode};
pub use tube::{Facilities, GOOD_SERVICE_SEVERITY, LineStatus, LiveArrival, TubeStation};
pub use weather::{
    AirQuality, AqiLevel, Conditions, CurrentWeather, DailyForecast, Forecast, MAX_AQI,
    WeatherCondition, round1,
};
