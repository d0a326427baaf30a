pub mod laser_scan;
pub mod report;
pub mod segment;
pub mod waypoint;

pub use laser_scan::LaserScan;
pub use report::ScanReport;
pub use segment::AngularSegment;
pub use waypoint::Waypoint;
