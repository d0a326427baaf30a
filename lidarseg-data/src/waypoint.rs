#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mission item handed to a flight controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude relative to home, in meters.
    pub altitude_m: f64,
}

impl Waypoint {
    pub fn new(latitude: f64, longitude: f64, altitude_m: f64) -> Waypoint {
        Waypoint {
            latitude,
            longitude,
            altitude_m,
        }
    }
}
