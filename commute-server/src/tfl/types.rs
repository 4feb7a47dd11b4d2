//! TfL Unified API response DTOs.

use serde::Deserialize;

/// One entry from `/StopPoint/{id}/Arrivals`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalPrediction {
    pub destination_name: Option<String>,
    pub line_name: Option<String>,

    /// E.g. `"Platform 2"` or `"Westbound - Platform 1"`.
    pub platform_name: Option<String>,

    /// Seconds until the vehicle reaches the stop.
    #[serde(default)]
    pub time_to_station: i64,

    pub current_location: Option<String>,
    pub towards: Option<String>,
    pub vehicle_id: Option<String>,
}

/// One line from `/Line/Mode/tube/Status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusItem {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub line_statuses: Vec<LineStatusEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusEntry {
    pub status_severity: Option<i32>,
    pub status_severity_description: Option<String>,

    /// Free-text disruption explanation; absent during good service.
    pub reason: Option<String>,
}
