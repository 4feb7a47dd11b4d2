//! Arrival projection.
//!
//! Turns fixed train offsets into the minutes-until-arrival a rider sees,
//! given how long ago the schedule was generated.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{Schedule, ScheduledTrain};
use crate::domain::{DestinationRoute, DisplayMinutes, DomainError, StationCode};

/// Trains further away than this are not shown.
pub const DISPLAY_WINDOW_MINS: f64 = 30.0;

/// A train wraps to its next recurrence once it is more than this many
/// minutes past its arrival. Until then it keeps showing as leaving.
pub const WRAP_THRESHOLD_MINS: f64 = -1.0;

/// Projected arrival of one train.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalEstimate {
    pub train_id: String,
    pub minutes: DisplayMinutes,
    pub platform: u8,
    pub car_length: u8,
    pub delay_mins: u32,
}

/// Estimates for one destination route, soonest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedGroup {
    pub route: Arc<DestinationRoute>,
    pub estimates: Vec<ArrivalEstimate>,
}

/// Roll `remaining` forward by whole headways until it is no longer below
/// [`WRAP_THRESHOLD_MINS`].
///
/// Equivalent to repeatedly adding `headway` while `remaining < -1`, but
/// jumps directly so a schedule that has been running for days costs the
/// same as a fresh one.
pub fn wrap_remaining(remaining: f64, headway_mins: u32) -> f64 {
    let headway = f64::from(headway_mins.max(1));
    let mut remaining = remaining;

    if remaining < WRAP_THRESHOLD_MINS {
        let cycles = ((WRAP_THRESHOLD_MINS - remaining) / headway).floor();
        remaining += cycles * headway;
    }
    // Float rounding in the jump can leave us a hair short.
    while remaining < WRAP_THRESHOLD_MINS {
        remaining += headway;
    }
    remaining
}

/// Displayed value for a wrapped `remaining`.
pub fn display_minutes(remaining: f64) -> DisplayMinutes {
    if remaining <= 0.0 {
        DisplayMinutes::Now
    } else {
        DisplayMinutes::In(remaining.floor() as u32)
    }
}

/// Project a single train, or `None` if it is outside the display window.
pub fn project_train(train: &ScheduledTrain, elapsed_mins: f64) -> Option<ArrivalEstimate> {
    let remaining = f64::from(train.initial_offset_mins) - elapsed_mins;
    let remaining = wrap_remaining(remaining, train.headway.minutes());

    if remaining > DISPLAY_WINDOW_MINS {
        return None;
    }

    Some(ArrivalEstimate {
        train_id: train.id.clone(),
        minutes: display_minutes(remaining),
        platform: train.platform,
        car_length: train.car_length,
        delay_mins: train.delay_mins,
    })
}

/// Project every train at `station` and group by destination route.
///
/// Groups appear in the order their routes were first seen in the
/// schedule; routes with no train in the window are omitted. Within a
/// group, estimates are ascending with the "now" sentinel first.
pub fn project_station(
    schedule: &Schedule,
    station: &StationCode,
    now: DateTime<Utc>,
) -> Result<Vec<ProjectedGroup>, DomainError> {
    let elapsed = schedule.elapsed_mins(now);
    let mut groups: Vec<ProjectedGroup> = Vec::new();

    for train in schedule.trains_at(station)? {
        let Some(estimate) = project_train(train, elapsed) else {
            continue;
        };

        match groups
            .iter_mut()
            .find(|g| g.route.destination == train.route.destination)
        {
            Some(group) => group.estimates.push(estimate),
            None => groups.push(ProjectedGroup {
                route: Arc::clone(&train.route),
                estimates: vec![estimate],
            }),
        }
    }

    for group in &mut groups {
        group.estimates.sort_by_key(|e| e.minutes);
    }

    Ok(groups)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::registry::StationRegistry;
    use crate::schedule::generate;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    proptest! {
        /// Wrapping always terminates at or above the threshold, and only
        /// moves a value that was below it, by less than one headway.
        #[test]
        fn wrap_bounds(remaining in -100_000.0f64..200.0, headway in 1u32..60) {
            let wrapped = wrap_remaining(remaining, headway);
            prop_assert!(wrapped >= WRAP_THRESHOLD_MINS);

            if remaining < WRAP_THRESHOLD_MINS {
                prop_assert!(wrapped < WRAP_THRESHOLD_MINS + f64::from(headway) + 1e-6);
                let cycles = (wrapped - remaining) / f64::from(headway);
                prop_assert!((cycles - cycles.round()).abs() < 1e-6);
            } else {
                prop_assert_eq!(wrapped, remaining);
            }
        }

        /// Estimates within a group are non-decreasing with the sentinel first.
        #[test]
        fn groups_are_sorted(seed in any::<u64>(), elapsed_secs in 0i64..(7 * 24 * 3600)) {
            let registry = StationRegistry::bart().unwrap();
            let epoch = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
            let schedule = generate(&registry, &mut StdRng::seed_from_u64(seed), epoch);
            let now = epoch + Duration::seconds(elapsed_secs);

            for station in registry.stations() {
                let groups = project_station(&schedule, &station.code, now).unwrap();
                for group in &groups {
                    prop_assert!(!group.estimates.is_empty());
                    for pair in group.estimates.windows(2) {
                        prop_assert!(pair[0].minutes <= pair[1].minutes);
                    }
                    let now_count = group
                        .estimates
                        .iter()
                        .take_while(|e| e.minutes == DisplayMinutes::Now)
                        .count();
                    let total_now = group
                        .estimates
                        .iter()
                        .filter(|e| e.minutes == DisplayMinutes::Now)
                        .count();
                    prop_assert_eq!(now_count, total_now);
                }
            }
        }

        /// Every station always has something on the board: each route's
        /// headway is inside the display window, so at least one train is visible.
        #[test]
        fn board_never_empty(seed in any::<u64>(), elapsed_secs in 0i64..(7 * 24 * 3600)) {
            let registry = StationRegistry::bart().unwrap();
            let epoch = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
            let schedule = generate(&registry, &mut StdRng::seed_from_u64(seed), epoch);
            let now = epoch + Duration::seconds(elapsed_secs);

            for station in registry.stations() {
                let groups = project_station(&schedule, &station.code, now).unwrap();
                prop_assert!(!groups.is_empty());
            }
        }
    }
}
