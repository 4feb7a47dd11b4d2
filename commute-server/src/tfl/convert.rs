//! Conversion from TfL DTOs to domain records.

use crate::domain::{GOOD_SERVICE_SEVERITY, LineStatus, LiveArrival};

use super::types::{ArrivalPrediction, LineStatusItem};

const UNKNOWN: &str = "Unknown";
const GOOD_SERVICE: &str = "Good service";

/// Remove the `"Platform "` marker: `"Platform 2"` becomes `"2"`.
pub fn platform_label(name: &str) -> String {
    name.replace("Platform ", "")
}

pub fn convert_arrival(prediction: &ArrivalPrediction) -> LiveArrival {
    let destination = prediction
        .destination_name
        .clone()
        .unwrap_or_else(|| UNKNOWN.to_string());
    let towards = prediction
        .towards
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| destination.clone());

    LiveArrival {
        line: prediction
            .line_name
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        platform: platform_label(prediction.platform_name.as_deref().unwrap_or("Platform")),
        seconds_to_station: prediction.time_to_station,
        current_location: prediction.current_location.clone().unwrap_or_default(),
        vehicle_id: prediction.vehicle_id.clone().unwrap_or_default(),
        destination,
        towards,
    }
}

/// Only the first listed status counts. A disruption reason, when present,
/// replaces the severity description.
pub fn convert_line_status(item: &LineStatusItem) -> LineStatus {
    let first = item.line_statuses.first();

    let severity = first
        .and_then(|s| s.status_severity)
        .unwrap_or(GOOD_SERVICE_SEVERITY);
    let status = first
        .and_then(|s| s.reason.clone().or_else(|| s.status_severity_description.clone()))
        .unwrap_or_else(|| GOOD_SERVICE.to_string());

    LineStatus {
        id: item.id.clone(),
        name: item.name.clone(),
        severity,
        status,
    }
}
