//! Simulated arrival schedule.
//!
//! There is no live vehicle feed behind the BART board. Instead, once per
//! epoch, [`generate`] lays out a set of headway-spaced trains for every
//! route of every station, and [`project_station`] re-projects those fixed
//! offsets against the time elapsed since the epoch. Trains that have
//! already arrived wrap forward to their next recurrence, so the schedule
//! behaves as an infinite periodic timetable anchored at the epoch.
//!
//! Everything here is a pure function of its inputs; shared state and
//! locking live in [`crate::board`].

mod generator;
mod projection;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{DestinationRoute, DomainError, Headway, StationCode};

pub use generator::{CAR_LENGTHS, DELAY_CHOICES, FIRST_OFFSET_MINS, PLATFORMS, TRAINS_PER_ROUTE, generate};
pub use projection::{
    ArrivalEstimate, DISPLAY_WINDOW_MINS, ProjectedGroup, WRAP_THRESHOLD_MINS, display_minutes,
    project_station, project_train, wrap_remaining,
};

/// One simulated vehicle. Immutable for the lifetime of its schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTrain {
    /// Unique within its station's schedule, e.g. `EMBR_PITT_2`.
    pub id: String,

    /// The route this train serves. Shared by every train on the route.
    pub route: Arc<DestinationRoute>,

    /// Minutes after the epoch at which this train's reference arrival occurs.
    pub initial_offset_mins: u32,

    /// Copied from the route.
    pub headway: Headway,

    pub platform: u8,

    /// Number of cars.
    pub car_length: u8,

    /// Minutes added to every projected arrival, shown alongside it.
    pub delay_mins: u32,
}

/// A complete generated schedule and the epoch it is anchored to.
///
/// The epoch and trains are only ever replaced together, so a reader that
/// holds an `Arc<Schedule>` always sees a consistent pair.
#[derive(Debug, Clone)]
pub struct Schedule {
    epoch: DateTime<Utc>,
    trains: HashMap<StationCode, Vec<ScheduledTrain>>,
}

impl Schedule {
    pub fn new(epoch: DateTime<Utc>, trains: HashMap<StationCode, Vec<ScheduledTrain>>) -> Self {
        Self { epoch, trains }
    }

    /// When this schedule was generated.
    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Minutes (fractional) since the epoch.
    pub fn elapsed_mins(&self, now: DateTime<Utc>) -> f64 {
        (now - self.epoch).num_milliseconds() as f64 / 60_000.0
    }

    /// Trains scheduled at a station.
    pub fn trains_at(&self, station: &StationCode) -> Result<&[ScheduledTrain], DomainError> {
        self.trains
            .get(station)
            .map(Vec::as_slice)
            .ok_or(DomainError::EmptySchedule(*station))
    }

    /// Number of stations covered.
    pub fn station_count(&self) -> usize {
        self.trains.len()
    }

    /// Total trains across all stations.
    pub fn train_count(&self) -> usize {
        self.trains.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn elapsed_is_fractional_minutes() {
        let epoch = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let schedule = Schedule::new(epoch, HashMap::new());

        assert_eq!(schedule.elapsed_mins(epoch), 0.0);
        assert_eq!(schedule.elapsed_mins(epoch + Duration::seconds(90)), 1.5);
        assert_eq!(schedule.elapsed_mins(epoch - Duration::minutes(2)), -2.0);
    }

    #[test]
    fn missing_station_is_empty_schedule() {
        let epoch = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let schedule = Schedule::new(epoch, HashMap::new());
        let code = StationCode::parse("EMBR").unwrap();

        assert_eq!(
            schedule.trains_at(&code).unwrap_err(),
            DomainError::EmptySchedule(code)
        );
    }
}
