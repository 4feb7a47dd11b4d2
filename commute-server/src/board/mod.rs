//! The arrival board service.
//!
//! [`ArrivalBoard`] owns every piece of long-lived mutable state: the
//! current schedule with its epoch, the random source used to regenerate
//! it, and the conditions and forecast caches. It is built once at startup
//! and shared by reference with request handlers.
//!
//! Lock discipline:
//! - The schedule and its random source sit behind one `RwLock`. Readers
//!   clone the `Arc<Schedule>` and release the lock before projecting, and
//!   regeneration swaps the `Arc` under the write lock, so a projection sees
//!   either the whole old schedule or the whole new one.
//! - Cache lookups happen only after the schedule lock is released, and the
//!   cache never holds its own lock across an upstream fetch.

mod tube;

use std::sync::Arc;

use chrono::{DateTime, Local, Timelike, Utc};
use futures::future::join_all;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::{CacheConfig, TtlCache};
use crate::domain::{
    Conditions, Coordinate, DestinationRoute, Direction, DomainError, Forecast, LineStatus,
    Station, StationCode, TubeStation,
};
use crate::external::{ExternalData, FetchError};
use crate::openmeteo::MAX_FORECAST_DAYS;
use crate::registry::{
    DEFAULT_CITY, StationRegistry, UNKNOWN_TUBE_STATION_NAME, city_coordinate,
    city_coordinate_or_default, tube_station_or_unknown,
};
use crate::schedule::{ArrivalEstimate, Schedule, generate, project_station};

pub use tube::{Crowding, TUBE_WINDOW_MINS, TubeEstimate, TubeGroup, group_arrivals, tube_minutes};

/// Default forecast length in days.
pub const DEFAULT_FORECAST_DAYS: u8 = 7;

/// Configuration for an [`ArrivalBoard`].
#[derive(Debug, Clone, Default)]
pub struct BoardConfig {
    /// Cache for current weather and air quality.
    pub conditions: CacheConfig,

    /// Cache for city forecasts.
    pub forecasts: CacheConfig,

    /// Fixed seed for the schedule random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl BoardConfig {
    pub fn with_conditions_cache(mut self, config: CacheConfig) -> Self {
        self.conditions = config;
        self
    }

    pub fn with_forecast_cache(mut self, config: CacheConfig) -> Self {
        self.forecasts = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Key for the conditions cache.
///
/// BART lookups key by station code; tube lookups key by coordinate, held
/// in micro-degrees so the key is hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocationKey {
    Station(StationCode),
    Point { lat_e6: i64, lon_e6: i64 },
}

impl LocationKey {
    pub fn point(at: Coordinate) -> Self {
        LocationKey::Point {
            lat_e6: (at.lat * 1e6).round() as i64,
            lon_e6: (at.lon * 1e6).round() as i64,
        }
    }
}

/// Key for the forecast cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastKey {
    pub city: String,
    pub days: u8,
}

/// Projected arrivals for one destination, with the weather there.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationArrivalGroup {
    pub route: Arc<DestinationRoute>,
    /// Non-empty; ascending with the `Now` sentinel first.
    pub estimates: Vec<ArrivalEstimate>,
    pub conditions: Conditions,
}

/// Everything shown on one station's board.
#[derive(Debug, Clone)]
pub struct StationArrivals {
    /// The station actually projected; the default if the requested code was unknown.
    pub station: Station,
    pub epoch: DateTime<Utc>,
    pub elapsed_mins: f64,
    pub groups: Vec<DestinationArrivalGroup>,
}

/// A city forecast as served.
#[derive(Debug, Clone, PartialEq)]
pub struct CityForecast {
    /// The city as requested.
    pub city: String,
    pub forecast: Forecast,
}

/// Live tube arrivals at one station.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeBoard {
    pub station: TubeStation,
    pub groups: Vec<TubeGroup>,
    pub conditions: Conditions,
}

struct ScheduleState {
    rng: StdRng,
    current: Option<Arc<Schedule>>,
}

/// Shared arrival-board state.
pub struct ArrivalBoard<S> {
    registry: StationRegistry,
    schedule: RwLock<ScheduleState>,
    conditions: TtlCache<LocationKey, Conditions>,
    forecasts: TtlCache<ForecastKey, Forecast>,
    source: S,
}

impl<S: ExternalData> ArrivalBoard<S> {
    /// Create a board. No schedule exists until first use or [`reset`](Self::reset).
    pub fn new(registry: StationRegistry, source: S, config: &BoardConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            registry,
            schedule: RwLock::new(ScheduleState { rng, current: None }),
            conditions: TtlCache::new(&config.conditions),
            forecasts: TtlCache::new(&config.forecasts),
            source,
        }
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The current schedule, generating one anchored at `now` if none exists.
    pub async fn schedule(&self, now: DateTime<Utc>) -> Arc<Schedule> {
        let current = self.schedule.read().await.current.clone();
        if let Some(schedule) = current {
            return schedule;
        }

        let mut state = self.schedule.write().await;
        // Another request may have generated while we waited for the write lock
        if let Some(schedule) = &state.current {
            return Arc::clone(schedule);
        }
        self.install(&mut state, now)
    }

    /// Replace the schedule with a fresh one anchored at `now`.
    pub async fn regenerate(&self, now: DateTime<Utc>) -> Arc<Schedule> {
        let mut state = self.schedule.write().await;
        self.install(&mut state, now)
    }

    fn install(&self, state: &mut ScheduleState, now: DateTime<Utc>) -> Arc<Schedule> {
        let schedule = Arc::new(generate(&self.registry, &mut state.rng, now));
        info!(
            stations = schedule.station_count(),
            trains = schedule.train_count(),
            epoch = %now,
            "generated schedule"
        );
        state.current = Some(Arc::clone(&schedule));
        schedule
    }

    /// Regenerate the schedule and empty both caches.
    pub async fn reset(&self, now: DateTime<Utc>) {
        self.regenerate(now).await;
        self.conditions.clear();
        self.forecasts.clear();
        info!("schedule and caches reset");
    }

    /// Projected arrivals at a station, grouped by destination.
    ///
    /// Unknown codes are answered for the default station. Weather failures
    /// never fail the call; each group carries fresh, stale or fallback
    /// conditions.
    pub async fn get_arrivals(
        &self,
        code: &StationCode,
        now: DateTime<Utc>,
    ) -> Result<StationArrivals, DomainError> {
        self.get_arrivals_toward(code, None, now).await
    }

    /// [`get_arrivals`](Self::get_arrivals), keeping only routes heading in `direction`.
    pub async fn get_arrivals_toward(
        &self,
        code: &StationCode,
        direction: Option<Direction>,
        now: DateTime<Utc>,
    ) -> Result<StationArrivals, DomainError> {
        let station = match self.registry.resolve(code) {
            Ok(station) => station,
            Err(e) => {
                let default = self.registry.default_station();
                warn!(error = %e, using = %default.code, "using default station");
                default
            }
        };

        let schedule = self.schedule(now).await;
        let elapsed_mins = schedule.elapsed_mins(now);

        let projected: Vec<_> = project_station(&schedule, &station.code, now)?
            .into_iter()
            .filter(|g| direction.is_none_or(|d| g.route.direction == d))
            .collect();

        let conditions = join_all(
            projected
                .iter()
                .map(|g| self.conditions_for_station(&g.route.destination, now)),
        )
        .await;

        let groups: Vec<DestinationArrivalGroup> = projected
            .into_iter()
            .zip(conditions)
            .map(|(group, conditions)| DestinationArrivalGroup {
                route: group.route,
                estimates: group.estimates,
                conditions,
            })
            .collect();

        info!(
            station = %station.code,
            elapsed_mins = format_args!("{elapsed_mins:.1}"),
            destinations = groups.len(),
            "projected arrivals"
        );

        Ok(StationArrivals {
            station: station.clone(),
            epoch: schedule.epoch(),
            elapsed_mins,
            groups,
        })
    }

    /// Conditions at a station, keyed by its code.
    pub async fn conditions_for_station(&self, code: &StationCode, now: DateTime<Utc>) -> Conditions {
        let at = self.registry.coordinate_of(code);
        self.cached_conditions(LocationKey::Station(*code), at, now)
            .await
    }

    /// Conditions at an arbitrary point, keyed by coordinate.
    pub async fn conditions_at(&self, at: Coordinate, now: DateTime<Utc>) -> Conditions {
        self.cached_conditions(LocationKey::point(at), at, now).await
    }

    async fn cached_conditions(&self, key: LocationKey, at: Coordinate, now: DateTime<Utc>) -> Conditions {
        let result = self
            .conditions
            .lookup(key.clone(), now, self.conditions.ttl(), || {
                self.source.current_conditions(at)
            })
            .await;

        match result {
            Ok(lookup) => lookup.into_value(),
            Err(e) => {
                warn!(?key, error = %e, "conditions unavailable, using fallback");
                Conditions::fallback()
            }
        }
    }

    /// Forecast for a named city. `days` is clamped to 1..=16.
    ///
    /// Unknown cities get the default city's forecast under the requested
    /// name. Never fails: falls back to a static outlook from today.
    pub async fn forecast(&self, city: &str, days: u8, now: DateTime<Utc>) -> CityForecast {
        let days = days.clamp(1, MAX_FORECAST_DAYS);

        let (resolved, at) = match city_coordinate(city) {
            Some(at) => (city, at),
            None => {
                warn!(city, "unknown city, using default");
                (DEFAULT_CITY, city_coordinate_or_default(DEFAULT_CITY))
            }
        };

        let key = ForecastKey {
            city: resolved.to_string(),
            days,
        };

        let result = self
            .forecasts
            .lookup(key, now, self.forecasts.ttl(), || self.source.forecast(at, days))
            .await;

        let forecast = match result {
            Ok(lookup) => lookup.into_value(),
            Err(e) => {
                warn!(city, error = %e, "forecast unavailable, using fallback");
                Forecast::fallback(now.date_naive(), days)
            }
        };

        CityForecast {
            city: city.to_string(),
            forecast,
        }
    }

    /// Live arrivals at a tube station, grouped by line and destination.
    ///
    /// Arrivals are always fetched for `stop_id` itself. Stop points missing
    /// from the station table get placeholder display data and central
    /// London weather. Fails only if the arrivals cannot be fetched.
    pub async fn tube_board(&self, stop_id: &str, now: DateTime<Utc>) -> Result<TubeBoard, FetchError> {
        let station = tube_station_or_unknown(stop_id);
        if station.name == UNKNOWN_TUBE_STATION_NAME {
            warn!(stop_id, "stop point not in station table");
        }

        let (arrivals, conditions) = tokio::join!(
            self.source.live_arrivals(&station.id),
            self.conditions_at(station.coordinate, now)
        );
        let arrivals = arrivals?;

        let hour = now.with_timezone(&Local).hour();
        let groups = group_arrivals(&arrivals, hour, &mut rand::rng());

        info!(station = %station.id, arrivals = arrivals.len(), groups = groups.len(), "tube board");

        Ok(TubeBoard {
            station,
            groups,
            conditions,
        })
    }

    /// Status of every tube line. Not cached.
    pub async fn line_status(&self) -> Result<Vec<LineStatus>, FetchError> {
        self.source.line_status().await
    }
}
