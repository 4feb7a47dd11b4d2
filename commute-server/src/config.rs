//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::board::BoardConfig;
use crate::cache::CacheConfig;
use crate::openmeteo::OpenMeteoConfig;
use crate::tfl::TflConfig;

pub const BIND_ADDR: &str = "COMMUTE_BIND_ADDR";
pub const STATIC_DIR: &str = "COMMUTE_STATIC_DIR";
pub const WEATHER_TTL_SECS: &str = "COMMUTE_WEATHER_TTL_SECS";
pub const FORECAST_TTL_SECS: &str = "COMMUTE_FORECAST_TTL_SECS";
pub const CACHE_CAPACITY: &str = "COMMUTE_CACHE_CAPACITY";
pub const SCHEDULE_SEED: &str = "COMMUTE_SCHEDULE_SEED";
pub const WEATHER_TIMEOUT_SECS: &str = "COMMUTE_WEATHER_TIMEOUT_SECS";
pub const FORECAST_TIMEOUT_SECS: &str = "COMMUTE_FORECAST_TIMEOUT_SECS";
pub const TFL_TIMEOUT_SECS: &str = "COMMUTE_TFL_TIMEOUT_SECS";
pub const OPEN_METEO_BASE_URL: &str = "OPEN_METEO_BASE_URL";
pub const OPEN_METEO_AIR_QUALITY_URL: &str = "OPEN_METEO_AIR_QUALITY_URL";
pub const TFL_BASE_URL: &str = "TFL_BASE_URL";

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8000);
const DEFAULT_STATIC_DIR: &str = "static";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub board: BoardConfig,
    pub open_meteo: OpenMeteoConfig,
    pub tfl: TflConfig,
}

impl ServerConfig {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read using `lookup` to resolve variable names. Unset variables take
    /// their defaults; set but unparseable ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let bind_addr = env
            .parse::<SocketAddr>(BIND_ADDR)?
            .unwrap_or(SocketAddr::from(DEFAULT_BIND_ADDR));

        let static_dir = env
            .string(STATIC_DIR)
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
            .into();

        let defaults = CacheConfig::default();
        let capacity = env.parse(CACHE_CAPACITY)?.unwrap_or(defaults.max_capacity);

        let conditions = CacheConfig::default()
            .with_ttl(env.secs(WEATHER_TTL_SECS)?.unwrap_or(defaults.ttl))
            .with_max_capacity(capacity);
        let forecasts = CacheConfig::default()
            .with_ttl(env.secs(FORECAST_TTL_SECS)?.unwrap_or(defaults.ttl))
            .with_max_capacity(capacity);

        let mut board = BoardConfig::default()
            .with_conditions_cache(conditions)
            .with_forecast_cache(forecasts);
        if let Some(seed) = env.parse(SCHEDULE_SEED)? {
            board = board.with_seed(seed);
        }

        let mut open_meteo = OpenMeteoConfig::new();
        if let Some(url) = env.string(OPEN_METEO_BASE_URL) {
            open_meteo = open_meteo.with_base_url(url);
        }
        if let Some(url) = env.string(OPEN_METEO_AIR_QUALITY_URL) {
            open_meteo = open_meteo.with_air_quality_url(url);
        }
        if let Some(timeout) = env.secs(WEATHER_TIMEOUT_SECS)? {
            open_meteo = open_meteo.with_current_timeout(timeout);
        }
        if let Some(timeout) = env.secs(FORECAST_TIMEOUT_SECS)? {
            open_meteo = open_meteo.with_forecast_timeout(timeout);
        }

        let mut tfl = TflConfig::new();
        if let Some(url) = env.string(TFL_BASE_URL) {
            tfl = tfl.with_base_url(url);
        }
        if let Some(timeout) = env.secs(TFL_TIMEOUT_SECS)? {
            tfl = tfl.with_timeout(timeout);
        }

        Ok(Self {
            bind_addr,
            static_dir,
            board,
            open_meteo,
            tfl,
        })
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Set and non-blank.
    fn string(&self, var: &str) -> Option<String> {
        (self.0)(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, var: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.string(var)
            .map(|value| {
                value.parse().map_err(|e: T::Err| ConfigError {
                    var,
                    reason: e.to_string(),
                    value,
                })
            })
            .transpose()
    }

    /// Whole seconds; zero is rejected.
    fn secs(&self, var: &'static str) -> Result<Option<Duration>, ConfigError> {
        match self.parse::<u64>(var)? {
            Some(0) => Err(ConfigError {
                var,
                value: "0".to_string(),
                reason: "must be at least 1 second".to_string(),
            }),
            secs => Ok(secs.map(Duration::from_secs)),
        }
    }
}
