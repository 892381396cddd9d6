pub mod calibration;
pub mod rotation_detector;
pub mod search;

use std::fmt;

/// One tri-axial magnetometer reading from the sensor mounted near the pump
/// unit, in arbitrary field units. Timestamps are seconds within one
/// continuous session epoch and must arrive non-decreasing; the upstream log
/// parser is responsible for ordering and cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagSample {
    pub mag_x: f64,
    pub mag_y: f64,
    pub mag_z: f64,
    pub timestamp: f64,
}

impl MagSample {
    pub fn new(mag_x: f64, mag_y: f64, mag_z: f64, timestamp: f64) -> Self {
        Self {
            mag_x,
            mag_y,
            mag_z,
            timestamp,
        }
    }
}

/// Latched answer for "is the pump moving?" / "is the rod rotating?".
///
/// Starts at `Undetermined` and only changes when a search window closes;
/// reads between decisions always return the last decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Undetermined,
    No,
    Yes,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Indicator::Undetermined => "undetermined",
            Indicator::No => "no",
            Indicator::Yes => "yes",
        };
        write!(f, "{}", label)
    }
}
