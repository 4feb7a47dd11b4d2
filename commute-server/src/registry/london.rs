//! London Underground stations and line colours.

use crate::domain::{Coordinate, Facilities, TubeStation};

/// King's Cross St. Pancras; used when no stop point is requested.
pub const DEFAULT_TUBE_STATION: &str = "940GZZLUKSX";

/// Display name for stop points missing from the table.
pub const UNKNOWN_TUBE_STATION_NAME: &str = "Unknown";

/// Central London; weather location for stop points missing from the table.
const CENTRAL_LONDON: Coordinate = Coordinate {
    lat: 51.5074,
    lon: -0.1278,
};

/// Colour for lines not in [`LINE_COLORS`].
pub const DEFAULT_LINE_COLOR: &str = "#667eea";

/// (id, name, lat, lon, step free, wifi, toilets)
type TubeRow = (&'static str, &'static str, f64, f64, bool, bool, bool);

const TUBE_STATIONS: &[TubeRow] = &[
    // Central
    ("940GZZLUKSX", "King's Cross St. Pancras", 51.5308, -0.1238, true, true, true),
    ("940GZZLUOXC", "Oxford Circus", 51.5152, -0.1419, false, true, false),
    ("940GZZLUPCC", "Piccadilly Circus", 51.5098, -0.1342, false, true, false),
    ("940GZZLULVT", "Liverpool Street", 51.5179, -0.0823, true, true, true),
    ("940GZZLUWLO", "Waterloo", 51.5036, -0.1143, true, true, true),
    ("940GZZLUVIC", "Victoria", 51.4965, -0.1447, true, true, true),
    ("940GZZLUBST", "Baker Street", 51.5226, -0.1571, false, true, true),
    ("940GZZLULGT", "London Bridge", 51.5052, -0.0863, true, true, true),
    // West
    ("940GZZLUPAH", "Paddington", 51.5154, -0.1755, true, true, true),
    ("940GZZLUEAC", "Earl's Court", 51.4920, -0.1941, false, true, false),
    ("940GZZLUHSK", "High Street Kensington", 51.5009, -0.1925, false, true, false),
    // East
    ("940GZZLUCWR", "Canary Wharf", 51.5054, -0.0195, true, true, true),
    ("940GZZLUSTD", "Stratford", 51.5416, -0.0042, true, true, true),
    // North
    ("940GZZLUCMN", "Camden Town", 51.5392, -0.1426, false, true, false),
    ("940GZZLUHGR", "Highgate", 51.5755, -0.1403, false, false, false),
    // South
    ("940GZZLUCPK", "Clapham Common", 51.4616, -0.1384, false, true, false),
    ("940GZZLUBKE", "Brixton", 51.4627, -0.1145, true, true, true),
];

const LINE_COLORS: &[(&str, &str)] = &[
    ("Bakerloo", "#B36305"),
    ("Central", "#E32017"),
    ("Circle", "#FFD300"),
    ("District", "#00782A"),
    ("Hammersmith & City", "#F3A9BB"),
    ("Jubilee", "#A0A5A9"),
    ("Metropolitan", "#9B0056"),
    ("Northern", "#000000"),
    ("Piccadilly", "#003688"),
    ("Victoria", "#0098D4"),
    ("Waterloo & City", "#95CDBA"),
    ("Elizabeth", "#7156A5"),
    ("DLR", "#00A4A7"),
    ("London Overground", "#EE7C0E"),
];

fn to_station(row: &TubeRow) -> TubeStation {
    let (id, name, lat, lon, step_free, wifi, toilets) = *row;
    TubeStation {
        id: id.to_string(),
        name: name.to_string(),
        coordinate: Coordinate::new(lat, lon),
        facilities: Facilities {
            step_free,
            wifi,
            toilets,
        },
    }
}

/// Look up a tube station by stop point id.
pub fn tube_station(id: &str) -> Option<TubeStation> {
    TUBE_STATIONS.iter().find(|row| row.0 == id).map(to_station)
}

/// Look up a tube station. Stop points missing from the table keep their
/// id but get a placeholder name, central London weather and no facilities.
pub fn tube_station_or_unknown(id: &str) -> TubeStation {
    tube_station(id).unwrap_or_else(|| TubeStation {
        id: id.to_string(),
        name: UNKNOWN_TUBE_STATION_NAME.to_string(),
        coordinate: CENTRAL_LONDON,
        facilities: Facilities::default(),
    })
}

/// Official TfL colour for a line name.
pub fn line_color(line_name: &str) -> &'static str {
    LINE_COLORS
        .iter()
        .find(|(name, _)| *name == line_name)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LINE_COLOR)
}
