//! London Underground board assembly.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::domain::{DisplayMinutes, LiveArrival};
use crate::registry::line_color;

/// Arrivals further out than this many whole minutes are not shown.
pub const TUBE_WINDOW_MINS: i64 = 30;

/// Simulated platform crowding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crowding {
    High,
    Medium,
    Low,
    VeryLow,
}

impl Crowding {
    pub fn label(&self) -> &'static str {
        match self {
            Crowding::High => "High",
            Crowding::Medium => "Medium",
            Crowding::Low => "Low",
            Crowding::VeryLow => "Very Low",
        }
    }

    /// Draw a crowding level for the given local hour.
    ///
    /// Peak hours (07-09, 17-19) read mostly High, the working day and
    /// early evening mostly Medium, and nights mostly Low.
    pub fn simulate<R: Rng>(hour: u32, rng: &mut R) -> Self {
        const PEAK: [Crowding; 3] = [Crowding::High, Crowding::High, Crowding::Medium];
        const SHOULDER: [Crowding; 3] = [Crowding::Medium, Crowding::Medium, Crowding::Low];
        const QUIET: [Crowding; 3] = [Crowding::Low, Crowding::Low, Crowding::VeryLow];

        let choices = match hour {
            7..=9 | 17..=19 => &PEAK,
            6 | 10..=16 | 20..=21 => &SHOULDER,
            _ => &QUIET,
        };
        choices.choose(rng).copied().unwrap_or(Crowding::Medium)
    }
}

/// One predicted tube arrival as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeEstimate {
    pub minutes: DisplayMinutes,
    pub platform: String,
    pub current_location: String,
    pub crowding: Crowding,
    pub vehicle_id: String,
}

/// Arrivals sharing a line and destination.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeGroup {
    pub line: String,
    pub destination: String,
    pub color: &'static str,
    pub towards: String,
    pub estimates: Vec<TubeEstimate>,
}

/// Whole minutes from seconds, truncated toward zero. Zero or less is `Now`.
pub fn tube_minutes(seconds_to_station: i64) -> DisplayMinutes {
    let minutes = seconds_to_station / 60;
    if minutes <= 0 {
        DisplayMinutes::Now
    } else {
        DisplayMinutes::In(minutes.min(i64::from(u32::MAX)) as u32)
    }
}

/// Group live arrivals by (line, destination) in first-seen order.
///
/// Arrivals outside [`TUBE_WINDOW_MINS`] are dropped, and so is any group
/// left without estimates. Within a group, estimates sort ascending with
/// `Now` first; ties keep upstream order.
pub fn group_arrivals<R: Rng>(arrivals: &[LiveArrival], hour: u32, rng: &mut R) -> Vec<TubeGroup> {
    let mut groups: Vec<TubeGroup> = Vec::new();

    for arrival in arrivals {
        if arrival.seconds_to_station / 60 > TUBE_WINDOW_MINS {
            continue;
        }

        let estimate = TubeEstimate {
            minutes: tube_minutes(arrival.seconds_to_station),
            platform: arrival.platform.clone(),
            current_location: arrival.current_location.clone(),
            crowding: Crowding::simulate(hour, rng),
            vehicle_id: arrival.vehicle_id.clone(),
        };

        match groups
            .iter_mut()
            .find(|g| g.line == arrival.line && g.destination == arrival.destination)
        {
            Some(group) => group.estimates.push(estimate),
            None => groups.push(TubeGroup {
                line: arrival.line.clone(),
                destination: arrival.destination.clone(),
                color: line_color(&arrival.line),
                towards: arrival.towards.clone(),
                estimates: vec![estimate],
            }),
        }
    }

    for group in &mut groups {
        group.estimates.sort_by_key(|e| e.minutes);
    }

    groups
}
