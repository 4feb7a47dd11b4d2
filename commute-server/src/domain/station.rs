//! Station code and location types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 4-character BART station abbreviation.
///
/// Codes are exactly 4 uppercase ASCII letters or digits (`12TH`, `EMBR`).
/// Any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use commute_server::domain::StationCode;
///
/// let embr = StationCode::parse("EMBR").unwrap();
/// assert_eq!(embr.as_str(), "EMBR");
///
/// // Digits are allowed
/// assert!(StationCode::parse("12TH").is_ok());
///
/// // Lowercase is rejected unless normalized first
/// assert!(StationCode::parse("embr").is_err());
/// assert!(StationCode::parse_normalized(" embr ").is_ok());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode([u8; 4]);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be exactly 4 characters, each an uppercase ASCII
    /// letter or an ASCII digit.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidStationCode {
                reason: "must be exactly 4 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Parse after trimming whitespace and uppercasing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored, so this cannot fail.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// A station from the static registry. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    pub coordinate: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("EMBR").is_ok());
        assert!(StationCode::parse("12TH").is_ok());
        assert!(StationCode::parse("24TH").is_ok());
        assert!(StationCode::parse("SFIA").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(StationCode::parse("embr").is_err());
        assert!(StationCode::parse("Embr").is_err());
        assert!(StationCode::parse("12th").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("EMB").is_err());
        assert!(StationCode::parse("EMBRR").is_err());
    }

    #[test]
    fn reject_punctuation() {
        assert!(StationCode::parse("EM-R").is_err());
        assert!(StationCode::parse("EM R").is_err());
        assert!(StationCode::parse("EMÖ").is_err());
    }

    #[test]
    fn normalized_trims_and_uppercases() {
        let code = StationCode::parse_normalized("  sbrn\n").unwrap();
        assert_eq!(code.as_str(), "SBRN");
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("MONT").unwrap();
        assert_eq!(format!("{}", code), "MONT");
        assert_eq!(format!("{:?}", code), "StationCode(MONT)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = StationCode::parse("POWL").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"POWL\"");
    }

    #[test]
    fn coordinate_display() {
        let c = Coordinate::new(37.8034, -122.2711);
        assert_eq!(c.to_string(), "37.8034,-122.2711");
    }
}
