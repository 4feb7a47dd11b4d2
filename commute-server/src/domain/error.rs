//! Domain error types.
//!
//! These errors represent validation failures and lookups against the
//! static registry and the in-memory schedule. They are distinct from
//! upstream fetch errors, which live in [`crate::external`].

use super::StationCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A route was configured with a zero headway
    #[error("invalid headway: {0} minutes (must be positive)")]
    InvalidHeadway(u32),

    /// Station code is not in the registry
    #[error("unknown station code: {0}")]
    UnknownStationCode(String),

    /// The schedule has no trains for a station it should cover
    #[error("no schedule generated for station {0}")]
    EmptySchedule(StationCode),

    /// Two routes from one origin share a destination
    #[error("duplicate route from {origin} to {destination}")]
    DuplicateRoute {
        origin: StationCode,
        destination: StationCode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidHeadway(0);
        assert_eq!(err.to_string(), "invalid headway: 0 minutes (must be positive)");

        let err = DomainError::UnknownStationCode("XXXX".into());
        assert_eq!(err.to_string(), "unknown station code: XXXX");

        let code = StationCode::parse("EMBR").unwrap();
        let err = DomainError::EmptySchedule(code);
        assert_eq!(err.to_string(), "no schedule generated for station EMBR");

        let err = DomainError::DuplicateRoute {
            origin: code,
            destination: StationCode::parse("PITT").unwrap(),
        };
        assert_eq!(err.to_string(), "duplicate route from EMBR to PITT");
    }
}
