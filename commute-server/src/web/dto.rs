//! Data transfer objects for web requests and responses.
//!
//! Response shapes follow the BART ETD API (`root.station[].etd[]`) so
//! existing BART clients can read the board, with a `weather` object added
//! to each destination.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::board::{CityForecast, DestinationArrivalGroup, StationArrivals, TubeBoard, TubeGroup};
use crate::domain::{
    Conditions, CurrentWeather, DailyForecast, Facilities, LineStatus, TubeStation,
};
use crate::registry::line_color;

/// Shown instead of a minute count for a BART train at the platform.
pub const BART_NOW_LABEL: &str = "Leaving";

/// Shown instead of a minute count for a tube train at the platform.
pub const TUBE_NOW_LABEL: &str = "Arriving";

/// Query for `/api/bart`.
#[derive(Debug, Deserialize)]
pub struct BartQuery {
    /// Station code (defaults to the default station)
    pub station: Option<String>,

    /// Compass direction, or `all`
    pub direction: Option<String>,
}

/// Query for `/api/tfl`.
#[derive(Debug, Deserialize)]
pub struct TflQuery {
    /// NaPTAN stop point id
    pub station: Option<String>,
}

/// Query for `/api/weather`.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,

    /// Clamped to 1..=16
    pub days: Option<i64>,
}

/// Weather plus air quality, as attached to every destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub temp: f64,
    pub condition: &'static str,
    pub icon: &'static str,
    pub humidity: u8,
    pub wind_speed: f64,
    pub visibility: f64,
    pub pressure: u16,
    pub aqi: u16,
    pub aqi_level: &'static str,
    pub aqi_color: &'static str,
    pub aqi_icon: &'static str,
}

impl WeatherResult {
    pub fn from_conditions(conditions: &Conditions) -> Self {
        let weather = &conditions.weather;
        let level = conditions.air.level;
        Self {
            temp: weather.temperature_c,
            condition: weather.condition.label(),
            icon: weather.condition.icon(),
            humidity: weather.humidity_pct,
            wind_speed: weather.wind_speed_kmh,
            visibility: weather.visibility_km,
            pressure: weather.pressure_hpa,
            aqi: conditions.air.aqi,
            aqi_level: level.label(),
            aqi_color: level.color(),
            aqi_icon: level.icon(),
        }
    }
}

/// Top level of the BART ETD response.
#[derive(Debug, Serialize)]
pub struct BartResponse {
    pub root: BartRoot,
}

#[derive(Debug, Serialize)]
pub struct BartRoot {
    pub uri: BartUri,
    /// `MM/DD/YYYY`
    pub date: String,
    /// `HH:MM:SS AM`
    pub time: String,
    pub station: Vec<BartStation>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct BartUri {
    #[serde(rename = "#cdata-section")]
    pub cdata_section: String,
}

#[derive(Debug, Serialize)]
pub struct BartStation {
    pub name: String,
    pub abbr: String,
    pub etd: Vec<BartEtd>,
}

/// Departures toward one destination.
#[derive(Debug, Serialize)]
pub struct BartEtd {
    pub destination: String,
    pub abbreviation: String,
    pub limited: &'static str,
    pub estimate: Vec<BartEstimate>,
    pub weather: WeatherResult,
}

/// BART's API sends every value as a string; so do we.
#[derive(Debug, Serialize)]
pub struct BartEstimate {
    pub minutes: String,
    pub platform: String,
    pub direction: &'static str,
    pub length: String,
    pub color: String,
    pub hexcolor: String,
    pub bikeflag: &'static str,
    pub delay: String,
}

impl BartEtd {
    pub fn from_group(group: &DestinationArrivalGroup) -> Self {
        let route = &group.route;
        let estimate = group
            .estimates
            .iter()
            .map(|e| BartEstimate {
                minutes: e.minutes.render(BART_NOW_LABEL),
                platform: e.platform.to_string(),
                direction: route.direction.as_str(),
                length: e.car_length.to_string(),
                color: route.line.name.clone(),
                hexcolor: route.line.hexcolor.clone(),
                bikeflag: "1",
                delay: e.delay_mins.to_string(),
            })
            .collect();

        Self {
            destination: route.destination_name.clone(),
            abbreviation: route.destination.to_string(),
            limited: "0",
            estimate,
            weather: WeatherResult::from_conditions(&group.conditions),
        }
    }
}

impl BartResponse {
    /// Build the response, stamping it with `now` in local time.
    pub fn from_arrivals(arrivals: &StationArrivals, now: DateTime<Local>) -> Self {
        let code = arrivals.station.code.as_str();
        Self {
            root: BartRoot {
                uri: BartUri {
                    cdata_section: format!("http://api.bart.gov/api/etd.aspx?cmd=etd&orig={code}"),
                },
                date: now.format("%m/%d/%Y").to_string(),
                time: now.format("%I:%M:%S %p").to_string(),
                station: vec![BartStation {
                    name: arrivals.station.name.clone(),
                    abbr: code.to_string(),
                    etd: arrivals.groups.iter().map(BartEtd::from_group).collect(),
                }],
                message: String::new(),
            },
        }
    }
}

/// Current weather without air quality, as used by forecasts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeatherResult {
    pub temp: f64,
    pub condition: &'static str,
    pub icon: &'static str,
    pub humidity: u8,
    pub wind_speed: f64,
    pub visibility: f64,
    pub pressure: u16,
}

impl CurrentWeatherResult {
    pub fn from_weather(weather: &CurrentWeather) -> Self {
        Self {
            temp: weather.temperature_c,
            condition: weather.condition.label(),
            icon: weather.condition.icon(),
            humidity: weather.humidity_pct,
            wind_speed: weather.wind_speed_kmh,
            visibility: weather.visibility_km,
            pressure: weather.pressure_hpa,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastResult {
    /// `YYYY-MM-DD`
    pub date: String,
    pub temp_max: f64,
    pub temp_min: f64,
    pub condition: &'static str,
    pub icon: &'static str,
    pub precip_prob: u8,
    pub wind_speed: f64,
}

impl DailyForecastResult {
    pub fn from_day(day: &DailyForecast) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            temp_max: day.temp_max_c,
            temp_min: day.temp_min_c,
            condition: day.condition.label(),
            icon: day.condition.icon(),
            precip_prob: day.precipitation_pct,
            wind_speed: day.wind_speed_kmh,
        }
    }
}

/// Response for `/api/weather`.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub city: String,
    pub current: CurrentWeatherResult,
    pub forecast: Vec<DailyForecastResult>,
}

impl ForecastResponse {
    pub fn from_city(city: &CityForecast) -> Self {
        Self {
            city: city.city.clone(),
            current: CurrentWeatherResult::from_weather(&city.forecast.current),
            forecast: city
                .forecast
                .days
                .iter()
                .map(DailyForecastResult::from_day)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TubeStationResult {
    pub name: String,
    pub id: String,
    pub facilities: Facilities,
}

impl TubeStationResult {
    pub fn from_station(station: &TubeStation) -> Self {
        Self {
            name: station.name.clone(),
            id: station.id.clone(),
            facilities: station.facilities,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TubeEstimateResult {
    pub minutes: String,
    pub platform: String,
    pub current_location: String,
    pub crowding: &'static str,
    pub vehicle_id: String,
}

/// Arrivals for one line and destination.
#[derive(Debug, Serialize)]
pub struct TubeTrainResult {
    pub destination: String,
    pub line: String,
    pub color: &'static str,
    pub weather: WeatherResult,
    pub towards: String,
    pub estimates: Vec<TubeEstimateResult>,
}

impl TubeTrainResult {
    pub fn from_group(group: &TubeGroup, weather: &WeatherResult) -> Self {
        Self {
            destination: group.destination.clone(),
            line: group.line.clone(),
            color: group.color,
            weather: weather.clone(),
            towards: group.towards.clone(),
            estimates: group
                .estimates
                .iter()
                .map(|e| TubeEstimateResult {
                    minutes: e.minutes.render(TUBE_NOW_LABEL),
                    platform: e.platform.clone(),
                    current_location: e.current_location.clone(),
                    crowding: e.crowding.label(),
                    vehicle_id: e.vehicle_id.clone(),
                })
                .collect(),
        }
    }
}

/// Response for `/api/tfl`.
#[derive(Debug, Serialize)]
pub struct TubeResponse {
    pub station: TubeStationResult,
    pub trains: Vec<TubeTrainResult>,
    pub weather: WeatherResult,
}

impl TubeResponse {
    pub fn from_board(board: &TubeBoard) -> Self {
        let weather = WeatherResult::from_conditions(&board.conditions);
        Self {
            station: TubeStationResult::from_station(&board.station),
            trains: board
                .groups
                .iter()
                .map(|g| TubeTrainResult::from_group(g, &weather))
                .collect(),
            weather,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LineStatusResult {
    pub id: String,
    pub name: String,
    pub color: &'static str,
    pub severity: i32,
    pub status: String,
}

impl LineStatusResult {
    pub fn from_status(status: &LineStatus) -> Self {
        Self {
            id: status.id.clone(),
            name: status.name.clone(),
            color: line_color(&status.name),
            severity: status.severity,
            status: status.status.clone(),
        }
    }
}

/// Response for `/api/tfl-status`.
#[derive(Debug, Serialize)]
pub struct LineStatusResponse {
    pub lines: Vec<LineStatusResult>,
}

/// Response for `/api/reset`.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub status: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
