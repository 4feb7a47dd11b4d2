//! London Underground records from the TfL Unified API.

use serde::Serialize;

use super::station::Coordinate;

/// Amenities at a tube station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facilities {
    pub step_free: bool,
    pub wifi: bool,
    pub toilets: bool,
}

/// A tube station, identified by its NaPTAN stop point id (`940GZZLUKSX`).
#[derive(Debug, Clone, PartialEq)]
pub struct TubeStation {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub facilities: Facilities,
}

/// A vehicle predicted to arrive at a stop point.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveArrival {
    pub destination: String,
    pub line: String,
    /// Platform with the `Platform ` prefix removed.
    pub platform: String,
    /// Predicted seconds until the vehicle reaches the platform.
    pub seconds_to_station: i64,
    pub current_location: String,
    pub towards: String,
    pub vehicle_id: String,
}

/// Service status of one tube line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStatus {
    pub id: String,
    pub name: String,
    /// TfL severity scale; 10 is good service.
    pub severity: i32,
    /// Disruption reason when present, otherwise the severity description.
    pub status: String,
}

/// Severity TfL reports for normal running.
pub const GOOD_SERVICE_SEVERITY: i32 = 10;
