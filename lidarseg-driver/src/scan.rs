use lidarseg_data::LaserScan;

/// Spreads `distances` evenly over `[angle_min_deg, angle_max_deg)`.
///
/// An empty input gives an increment of zero rather than dividing by zero.
pub fn build_laser_scan(distances: Vec<f64>, angle_min_deg: f64, angle_max_deg: f64) -> LaserScan {
    let angle_increment_deg = if distances.is_empty() {
        0.
    } else {
        (angle_max_deg - angle_min_deg) / (distances.len() as f64)
    };
    LaserScan {
        angle_min_deg,
        angle_max_deg,
        angle_increment_deg,
        ranges: distances,
    }
}

/// Full turn, 0 to 360 degrees.
pub fn build_full_turn_scan(distances: Vec<f64>) -> LaserScan {
    build_laser_scan(distances, 0., 360.)
}
