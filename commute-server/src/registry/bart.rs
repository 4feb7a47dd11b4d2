//! BART station and destination tables.

use crate::domain::Direction::{self, East, North, South, West};

/// Station used when a request names an unknown code, and whose routes
/// serve every station without its own destination table.
pub(super) const DEFAULT_STATION: &str = "12TH";

/// (code, name, latitude, longitude)
pub(super) const STATIONS: &[(&str, &str, f64, f64)] = &[
    ("12TH", "12th St. Oakland City Center", 37.8034, -122.2711),
    ("16TH", "16th St. Mission", 37.7648, -122.4195),
    ("19TH", "19th St. Oakland", 37.8089, -122.2690),
    ("24TH", "24th St. Mission", 37.7524, -122.4181),
    ("ASHB", "Ashby", 37.8531, -122.2700),
    ("BALB", "Balboa Park", 37.7213, -122.4471),
    ("BAYF", "Bay Fair", 37.6975, -122.1269),
    ("CAST", "Castro Valley", 37.6906, -122.0753),
    ("CIVC", "Civic Center/UN Plaza", 37.7795, -122.4135),
    ("COLS", "Coliseum", 37.7544, -122.1969),
    ("COLM", "Colma", 37.6843, -122.4666),
    ("CONC", "Concord", 37.9738, -122.0297),
    ("DALY", "Daly City", 37.7062, -122.4690),
    ("DBRK", "Downtown Berkeley", 37.8700, -122.2680),
    ("DUBL", "Dublin/Pleasanton", 37.7017, -121.9000),
    ("DELN", "El Cerrito del Norte", 37.9253, -122.3173),
    ("PLZA", "El Cerrito Plaza", 37.9030, -122.2989),
    ("EMBR", "Embarcadero", 37.7928, -122.3968),
    ("FRMT", "Fremont", 37.5574, -121.9760),
    ("FTVL", "Fruitvale", 37.7746, -122.2244),
    ("GLEN", "Glen Park", 37.7339, -122.4340),
    ("HAYW", "Hayward", 37.6699, -122.0880),
    ("LAFY", "Lafayette", 37.8933, -122.1238),
    ("LAKE", "Lake Merritt", 37.7974, -122.2654),
    ("MCAR", "MacArthur", 37.8286, -122.2671),
    ("MLBR", "Millbrae", 37.5995, -122.3867),
    ("MONT", "Montgomery St.", 37.7894, -122.4012),
    ("NBRK", "North Berkeley", 37.8739, -122.2834),
    ("NCON", "North Concord/Martinez", 38.0033, -122.0248),
    ("OAKL", "Oakland International Airport", 37.7130, -122.2120),
    ("ORIN", "Orinda", 37.8783, -122.1836),
    ("PITT", "Pittsburg/Bay Point", 38.0187, -121.9451),
    ("PHIL", "Pleasant Hill/Contra Costa Centre", 37.9287, -122.0565),
    ("POWL", "Powell St.", 37.7844, -122.4079),
    ("RICH", "Richmond", 37.9372, -122.3534),
    ("ROCK", "Rockridge", 37.8444, -122.2518),
    ("SBRN", "San Bruno", 37.6374, -122.4160),
    ("SFIA", "San Francisco International Airport", 37.6159, -122.3925),
    ("SANL", "San Leandro", 37.7220, -122.1608),
    ("SHAY", "South Hayward", 37.6347, -122.0575),
    ("SSAN", "South San Francisco", 37.6643, -122.4438),
    ("UCTY", "Union City", 37.5907, -122.0177),
    ("WCRK", "Walnut Creek", 37.9057, -122.0675),
    ("WARM", "Warm Springs/South Fremont", 37.5025, -121.9395),
    ("WDUB", "West Dublin/Pleasanton", 37.6995, -121.9281),
    ("WOAK", "West Oakland", 37.8047, -122.2947),
];

/// (destination name, destination code, direction, line, hex colour, headway minutes)
pub(super) type RouteRow = (&'static str, &'static str, Direction, &'static str, &'static str, u32);

/// Destinations per origin. Origins not listed use [`DEFAULT_STATION`]'s.
pub(super) const DESTINATIONS: &[(&str, &[RouteRow])] = &[
    (
        "SBRN",
        &[
            ("Millbrae", "MLBR", South, "YELLOW", "ffff33", 8),
            ("SFO Airport", "SFIA", South, "YELLOW", "ffff33", 10),
            ("Daly City", "DALY", North, "YELLOW", "ffff33", 12),
            ("Balboa Park", "BALB", North, "YELLOW", "ffff33", 15),
        ],
    ),
    (
        "12TH",
        &[
            ("Antioch", "PITT", North, "YELLOW", "ffff33", 15),
            ("Dublin/Pleasanton", "DUBL", South, "BLUE", "0099cc", 12),
            ("Daly City", "DALY", West, "BLUE", "0099cc", 10),
            ("Richmond", "RICH", North, "ORANGE", "ff9933", 15),
            ("Fremont", "FRMT", South, "ORANGE", "ff9933", 15),
        ],
    ),
    (
        "EMBR",
        &[
            ("Antioch", "PITT", East, "YELLOW", "ffff33", 15),
            ("Dublin/Pleasanton", "DUBL", East, "BLUE", "0099cc", 12),
            ("Richmond", "RICH", North, "RED", "ff0000", 15),
            ("Millbrae", "MLBR", South, "RED", "ff0000", 20),
            ("Warm Springs", "WARM", South, "GREEN", "339933", 15),
        ],
    ),
    (
        "MONT",
        &[
            ("Antioch", "PITT", East, "YELLOW", "ffff33", 15),
            ("Dublin/Pleasanton", "DUBL", East, "BLUE", "0099cc", 12),
            ("Richmond", "RICH", North, "RED", "ff0000", 15),
            ("Daly City", "DALY", South, "RED", "ff0000", 10),
        ],
    ),
    (
        "POWL",
        &[
            ("Antioch", "PITT", East, "YELLOW", "ffff33", 15),
            ("SFO Airport", "SFIA", South, "YELLOW", "ffff33", 20),
            ("Dublin/Pleasanton", "DUBL", East, "BLUE", "0099cc", 12),
            ("Richmond", "RICH", North, "RED", "ff0000", 15),
        ],
    ),
    (
        "SSAN",
        &[
            ("Millbrae", "MLBR", South, "YELLOW", "ffff33", 10),
            ("SFO Airport", "SFIA", South, "YELLOW", "ffff33", 12),
            ("Daly City", "DALY", North, "YELLOW", "ffff33", 10),
            ("Balboa Park", "BALB", North, "YELLOW", "ffff33", 15),
        ],
    ),
];
