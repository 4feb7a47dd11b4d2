//! Static station registry.
//!
//! Station codes, names, coordinates and the destination topology for the
//! simulated BART network, plus lookup tables for London Underground
//! stations and the forecast city list. Pure data: nothing here changes
//! after startup.

mod bart;
mod cities;
mod london;

use std::collections::HashMap;

use crate::domain::{
    Coordinate, DestinationRoute, DomainError, Headway, Line, Station, StationCode,
};

pub use cities::{DEFAULT_CITY, city_coordinate, city_coordinate_or_default};
pub use london::{
    DEFAULT_LINE_COLOR, DEFAULT_TUBE_STATION, UNKNOWN_TUBE_STATION_NAME, line_color, tube_station,
    tube_station_or_unknown,
};

/// Known stations and the routes served from each.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    /// Stations in table order.
    stations: Vec<Station>,

    /// Code → index into `stations`.
    index: HashMap<StationCode, usize>,

    /// Routes configured per origin.
    routes: HashMap<StationCode, Vec<DestinationRoute>>,

    /// Substituted for unknown codes; its routes serve unconfigured origins.
    default_station: StationCode,
}

impl StationRegistry {
    /// Build a registry, validating its topology.
    ///
    /// Fails if the default station is missing, if it has no routes of its
    /// own, or if any origin lists the same destination twice.
    pub fn new(
        stations: Vec<Station>,
        routes: HashMap<StationCode, Vec<DestinationRoute>>,
        default_station: StationCode,
    ) -> Result<Self, DomainError> {
        let index: HashMap<StationCode, usize> = stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.code, i))
            .collect();

        if !index.contains_key(&default_station) {
            return Err(DomainError::UnknownStationCode(default_station.to_string()));
        }

        if routes.get(&default_station).is_none_or(|r| r.is_empty()) {
            return Err(DomainError::EmptySchedule(default_station));
        }

        for (origin, origin_routes) in &routes {
            for (i, route) in origin_routes.iter().enumerate() {
                if origin_routes[..i]
                    .iter()
                    .any(|r| r.destination == route.destination)
                {
                    return Err(DomainError::DuplicateRoute {
                        origin: *origin,
                        destination: route.destination,
                    });
                }
            }
        }

        Ok(Self {
            stations,
            index,
            routes,
            default_station,
        })
    }

    /// The simulated BART network.
    pub fn bart() -> Result<Self, DomainError> {
        let stations = bart::STATIONS
            .iter()
            .map(|&(code, name, lat, lon)| {
                Ok(Station {
                    code: parse_code(code)?,
                    name: name.to_string(),
                    coordinate: Coordinate::new(lat, lon),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let mut routes = HashMap::new();
        for &(origin, rows) in bart::DESTINATIONS {
            let origin_routes = rows
                .iter()
                .map(|&(name, dest, direction, line, hexcolor, headway)| {
                    Ok(DestinationRoute::new(
                        name,
                        parse_code(dest)?,
                        direction,
                        Line {
                            name: line.to_string(),
                            hexcolor: hexcolor.to_string(),
                        },
                        Headway::from_minutes(headway)?,
                    ))
                })
                .collect::<Result<Vec<_>, DomainError>>()?;
            routes.insert(parse_code(origin)?, origin_routes);
        }

        Self::new(stations, routes, parse_code(bart::DEFAULT_STATION)?)
    }

    /// All stations, in table order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, code: &StationCode) -> Option<&Station> {
        self.index.get(code).map(|&i| &self.stations[i])
    }

    /// Look up a station, failing for codes not in the registry.
    pub fn resolve(&self, code: &StationCode) -> Result<&Station, DomainError> {
        self.get(code)
            .ok_or_else(|| DomainError::UnknownStationCode(code.to_string()))
    }

    pub fn default_station(&self) -> &Station {
        // Presence checked in `new`.
        &self.stations[self.index[&self.default_station]]
    }

    /// Look up a station, substituting the default for unknown codes.
    pub fn resolve_or_default(&self, code: &StationCode) -> &Station {
        self.get(code).unwrap_or_else(|| self.default_station())
    }

    /// Routes served from `origin`, or the default station's routes if
    /// `origin` has none configured.
    pub fn routes_for(&self, origin: &StationCode) -> &[DestinationRoute] {
        self.routes
            .get(origin)
            .or_else(|| self.routes.get(&self.default_station))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Coordinate of a station, or of the default station if unknown.
    pub fn coordinate_of(&self, code: &StationCode) -> Coordinate {
        self.resolve_or_default(code).coordinate
    }
}

fn parse_code(code: &str) -> Result<StationCode, DomainError> {
    StationCode::parse(code).map_err(|_| DomainError::UnknownStationCode(code.to_string()))
}
