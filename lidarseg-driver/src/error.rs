use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, LidarError>;

#[derive(Debug, thiserror::Error)]
pub enum LidarError {
    /// Connecting to, or sending a request to, the sensor failed.
    #[error("Connection to the sensor failed: {0}")]
    Connection(#[source] io::Error),
    /// A configured connect or read timeout expired.
    #[error("Operation timed out")]
    Timeout,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("Segment size must be a non-zero divisor of 360 degrees. Actually {0}.")]
    InvalidSegmentSize(u32),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Map file {} does not exist.", .0.display())]
    MapNotFound(PathBuf),
    #[error("Failed to read map: {0}")]
    Csv(#[from] csv::Error),
    #[error("Map row {line} is malformed: {content:?}")]
    MalformedMapRow { line: usize, content: String },
}

impl LidarError {
    /// Maps an I/O error raised while reading, turning timeout kinds into `Timeout`.
    pub(crate) fn from_read(err: io::Error) -> LidarError {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => LidarError::Timeout,
            _ => LidarError::Io(err),
        }
    }

    /// Maps an I/O error raised while connecting or sending.
    pub(crate) fn from_connect(err: io::Error) -> LidarError {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => LidarError::Timeout,
            _ => LidarError::Connection(err),
        }
    }
}
