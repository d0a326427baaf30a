pub(crate) const DEFAULT_HOST: &str = "192.168.0.10";
pub(crate) const DEFAULT_PORT: u16 = 2112;
// STX, ASCII command, ETX
pub(crate) const DEFAULT_REQUEST_TOKEN: &[u8] = b"\x02sRN LMDscandata\x03";
pub(crate) const DEFAULT_READ_BUFFER_BYTES: usize = 8192;
pub(crate) const MAX_READ_BUFFER_BYTES: usize = 1 << 20;
// Not verified against a vendor manual
pub(crate) const DEFAULT_DISTANCE_MARKER: &str = "DIST";
pub(crate) const DEFAULT_SEGMENT_SIZE_DEGREES: u32 = 4;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_SERIAL_BAUD_RATE: u32 = 230_400;
pub(crate) const FULL_TURN_DEGREES: u32 = 360;
pub(crate) const MILLIMETERS_PER_METER: f64 = 1000.;
pub(crate) const MAP_HEADER: &str = "Center Angle (deg), Average Distance (m)";
pub(crate) const MAP_COLUMN_SEPARATOR: &str = ", ";
pub(crate) const TABLE_HEADER: &str = "Center Angle (deg) | Average Distance (m)";
pub(crate) const TABLE_COLUMN_GAP: &str = "                | ";
