use crate::segment::AngularSegment;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of one request to the sensor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanReport {
    /// Decoded distances in meters, in order of appearance.
    pub distances: Vec<f64>,
    /// Angular bins averaged from `distances`. Empty when too few samples arrived.
    pub segments: Vec<AngularSegment>,
}
