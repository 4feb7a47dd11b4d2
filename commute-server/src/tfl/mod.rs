//! TfL Unified API client.
//!
//! Two read-only endpoints are used: live arrival predictions for a stop
//! point and the status of every tube line. Neither needs an API key.

mod client;
mod convert;
mod types;

pub use client::{DEFAULT_BASE_URL, TflClient, TflConfig};
pub use convert::{convert_arrival, convert_line_status, platform_label};
pub use types::{ArrivalPrediction, LineStatusEntry, LineStatusItem};
