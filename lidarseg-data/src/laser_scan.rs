#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// LaserScan-like view of one lap of distances.
///
/// Sample `i` is assumed to sit at `angle_min_deg + i * angle_increment_deg`.
/// Nothing upstream verifies that the sensor spreads samples uniformly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaserScan {
    pub angle_min_deg: f64,
    pub angle_max_deg: f64,
    pub angle_increment_deg: f64,
    /// Distances in meters, in the order they were decoded.
    pub ranges: Vec<f64>,
}

impl LaserScan {
    /// Iterates `(angle_deg, distance_m)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, d)| (self.angle_min_deg + (i as f64) * self.angle_increment_deg, *d))
    }
}
