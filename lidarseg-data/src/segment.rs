#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One angular bin of averaged distance readings.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngularSegment {
    /// Center of the bin in degrees, within `[0, 360)` for a full lap.
    pub center_angle_deg: f64,
    /// Arithmetic mean of the distances in the bin, in meters.
    pub mean_distance_m: f64,
}

impl AngularSegment {
    pub fn new(center_angle_deg: f64, mean_distance_m: f64) -> AngularSegment {
        AngularSegment {
            center_angle_deg,
            mean_distance_m,
        }
    }
}
