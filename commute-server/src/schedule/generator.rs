//! Schedule generation.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{Schedule, ScheduledTrain};
use crate::registry::StationRegistry;

/// Trains generated per route. Enough to keep the 30-minute window filled
/// even on the longest headways.
pub const TRAINS_PER_ROUTE: RangeInclusive<u32> = 4..=6;

/// Window for the first train's offset on each route, in minutes.
pub const FIRST_OFFSET_MINS: RangeInclusive<u32> = 2..=5;

pub const PLATFORMS: RangeInclusive<u8> = 1..=4;

pub const CAR_LENGTHS: [u8; 4] = [6, 8, 9, 10];

/// Drawn uniformly, so two thirds of trains run on time.
pub const DELAY_CHOICES: [u32; 6] = [0, 0, 0, 0, 1, 2];

/// Generate a fresh schedule for every station in the registry.
///
/// Each route gets a random number of trains; the first is jittered within
/// [`FIRST_OFFSET_MINS`] and each successor follows one headway later, so
/// arrivals recur periodically per route without lining up across routes.
/// Platform, car length and delay are drawn independently per train.
///
/// Content depends on `rng`; structure does not. Headways are validated
/// when the registry is built, so generation cannot fail.
pub fn generate<R: Rng>(
    registry: &StationRegistry,
    rng: &mut R,
    epoch: DateTime<Utc>,
) -> Schedule {
    let mut trains = HashMap::with_capacity(registry.len());

    for station in registry.stations() {
        let mut station_trains = Vec::new();

        for route in registry.routes_for(&station.code) {
            let route = Arc::new(route.clone());
            let count = rng.random_range(TRAINS_PER_ROUTE);
            let jitter = rng.random_range(FIRST_OFFSET_MINS);

            for i in 0..count {
                station_trains.push(ScheduledTrain {
                    id: format!("{}_{}_{}", station.code, route.destination, i),
                    route: Arc::clone(&route),
                    initial_offset_mins: jitter + i * route.headway.minutes(),
                    headway: route.headway,
                    platform: rng.random_range(PLATFORMS),
                    car_length: CAR_LENGTHS[rng.random_range(0..CAR_LENGTHS.len())],
                    delay_mins: DELAY_CHOICES[rng.random_range(0..DELAY_CHOICES.len())],
                });
            }
        }

        trains.insert(station.code, station_trains);
    }

    Schedule::new(epoch, trains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationCode;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn covers_every_station() {
        let registry = StationRegistry::bart().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let schedule = generate(&registry, &mut rng, epoch());

        assert_eq!(schedule.station_count(), registry.len());
        assert_eq!(schedule.epoch(), epoch());
        for station in registry.stations() {
            assert!(!schedule.trains_at(&station.code).unwrap().is_empty());
        }
    }

    #[test]
    fn same_seed_same_schedule() {
        let registry = StationRegistry::bart().unwrap();
        let a = generate(&registry, &mut StdRng::seed_from_u64(42), epoch());
        let b = generate(&registry, &mut StdRng::seed_from_u64(42), epoch());

        let embr = code("EMBR");
        assert_eq!(a.trains_at(&embr).unwrap(), b.trains_at(&embr).unwrap());
    }

    #[test]
    fn train_ids_unique_per_station() {
        let registry = StationRegistry::bart().unwrap();
        let schedule = generate(&registry, &mut StdRng::seed_from_u64(3), epoch());

        for station in registry.stations() {
            let trains = schedule.trains_at(&station.code).unwrap();
            let mut ids: Vec<&str> = trains.iter().map(|t| t.id.as_str()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), trains.len());
        }
    }

    #[test]
    fn train_ids_name_station_and_destination() {
        let registry = StationRegistry::bart().unwrap();
        let schedule = generate(&registry, &mut StdRng::seed_from_u64(3), epoch());

        let first = &schedule.trains_at(&code("SBRN")).unwrap()[0];
        assert_eq!(first.id, "SBRN_MLBR_0");
    }
}
