//! Minutes-until-arrival as shown on a platform display.

use std::fmt;

/// Displayed time until a vehicle reaches the platform.
///
/// `Now` is the "arriving/leaving now" sentinel. It orders below every
/// `In` value, so sorting ascending always puts it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayMinutes {
    Now,
    In(u32),
}

impl DisplayMinutes {
    /// Whole minutes, or `None` for the sentinel.
    pub fn minutes(&self) -> Option<u32> {
        match self {
            DisplayMinutes::Now => None,
            DisplayMinutes::In(m) => Some(*m),
        }
    }

    /// Render with the given sentinel label (`Leaving`, `Arriving`).
    pub fn render(&self, now_label: &str) -> String {
        match self {
            DisplayMinutes::Now => now_label.to_string(),
            DisplayMinutes::In(m) => m.to_string(),
        }
    }
}

impl fmt::Display for DisplayMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMinutes::Now => f.write_str("now"),
            DisplayMinutes::In(m) => write!(f, "{m}"),
        }
    }
}
