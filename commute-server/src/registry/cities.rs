//! Cities offered by the forecast lookup.

use crate::domain::Coordinate;

/// City used when a forecast names an unknown city.
pub const DEFAULT_CITY: &str = "San Francisco";

const CITIES: &[(&str, f64, f64)] = &[
    // Bay Area
    ("San Francisco", 37.7749, -122.4194),
    ("Oakland", 37.8044, -122.2712),
    ("Berkeley", 37.8715, -122.2730),
    ("San Jose", 37.3382, -121.8863),
    // Other US
    ("New York", 40.7128, -74.0060),
    ("Los Angeles", 34.0522, -118.2437),
    ("Chicago", 41.8781, -87.6298),
    ("Seattle", 47.6062, -122.3321),
    // India
    ("Delhi", 28.6139, 77.2090),
    ("Mumbai", 19.0760, 72.8777),
    ("Bangalore", 12.9716, 77.5946),
    ("Chennai", 13.0827, 80.2707),
    ("Kolkata", 22.5726, 88.3639),
    ("Hyderabad", 17.3850, 78.4867),
    // Europe
    ("London", 51.5074, -0.1278),
    ("Paris", 48.8566, 2.3522),
    ("Berlin", 52.5200, 13.4050),
    ("Amsterdam", 52.3676, 4.9041),
    // Asia Pacific
    ("Tokyo", 35.6762, 139.6503),
    ("Singapore", 1.3521, 103.8198),
    ("Hong Kong", 22.3193, 114.1694),
    ("Sydney", -33.8688, 151.2093),
    // Middle East
    ("Dubai", 25.2048, 55.2708),
];

/// Coordinate of a named city. Matching is exact, as cities are picked from a list.
pub fn city_coordinate(name: &str) -> Option<Coordinate> {
    CITIES
        .iter()
        .find(|(city, _, _)| *city == name)
        .map(|(_, lat, lon)| Coordinate::new(*lat, *lon))
}

/// Coordinate of a named city, or of [`DEFAULT_CITY`] if unknown.
pub fn city_coordinate_or_default(name: &str) -> Coordinate {
    city_coordinate(name).unwrap_or(Coordinate::new(37.7749, -122.4194))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_city() {
        let c = city_coordinate("Tokyo").unwrap();
        assert_eq!(c, Coordinate::new(35.6762, 139.6503));
    }

    #[test]
    fn unknown_city_uses_default() {
        assert!(city_coordinate("Atlantis").is_none());
        assert_eq!(
            city_coordinate_or_default("Atlantis"),
            city_coordinate(DEFAULT_CITY).unwrap()
        );
    }

    #[test]
    fn has_all_cities() {
        assert_eq!(CITIES.len(), 23);
    }
}
