//! Destination routes served from an origin station.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::Serialize;

use super::error::DomainError;
use super::station::StationCode;

/// Compass direction a route heads in from its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    /// Case-insensitive; accepts the full word or its initial.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            _ => Err(()),
        }
    }
}

/// Minutes between successive trains on one route. Always positive.
///
/// A zero headway would make the projection wrap-around step loop forever,
/// so it is rejected when the registry is built rather than at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Headway(NonZeroU32);

impl Headway {
    pub fn from_minutes(minutes: u32) -> Result<Self, DomainError> {
        NonZeroU32::new(minutes)
            .map(Headway)
            .ok_or(DomainError::InvalidHeadway(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0.get()
    }
}

impl Serialize for Headway {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.minutes())
    }
}

/// A line as shown on the platform display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Line {
    /// Line name, e.g. `YELLOW`.
    pub name: String,
    /// Hex colour without the leading `#`, e.g. `ffff33`.
    pub hexcolor: String,
}

/// A destination served from an origin station.
///
/// Scoped to its origin: the same destination may be reached on different
/// lines or headways from different origins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationRoute {
    /// Display name of the terminus (`Antioch`, `SFO Airport`).
    pub destination_name: String,
    /// Station code of the terminus, used for weather lookup.
    pub destination: StationCode,
    pub direction: Direction,
    pub line: Line,
    pub headway: Headway,
}

impl DestinationRoute {
    pub fn new(
        destination_name: impl Into<String>,
        destination: StationCode,
        direction: Direction,
        line: Line,
        headway: Headway,
    ) -> Self {
        Self {
            destination_name: destination_name.into(),
            destination,
            direction,
            line,
            headway,
        }
    }
}
