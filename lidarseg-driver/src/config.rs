//! Configuration for the LiDAR segment pipeline
//!
//! Every component takes its options from [`LidarConfig`] instead of global
//! constants. The struct round-trips through TOML.

use crate::constants::{
    DEFAULT_DISTANCE_MARKER, DEFAULT_HOST, DEFAULT_POLL_INTERVAL_MS, DEFAULT_PORT,
    DEFAULT_READ_BUFFER_BYTES, DEFAULT_REQUEST_TOKEN, DEFAULT_SEGMENT_SIZE_DEGREES,
    FULL_TURN_DEGREES, MAX_READ_BUFFER_BYTES,
};
use crate::error::{LidarError, Result};
use crate::numeric::{escape_bytes, unescape_bytes};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LidarConfig {
    /// Sensor host name or IP address
    pub host: String,
    /// Sensor TCP port
    pub port: u16,
    /// Width of one angular segment in degrees. Must divide 360.
    pub segment_size_degrees: u32,
    /// Upper bound for a single read from the sensor
    pub read_buffer_bytes: usize,
    /// Request sent once per poll, with `\xNN` escapes for control bytes
    ///
    /// Default: `\x02sRN LMDscandata\x03`
    pub request_token: String,
    /// Substring that marks a line carrying distance tokens
    pub distance_marker: String,
    /// Connect timeout. `None` blocks until the OS gives up.
    pub connect_timeout_ms: Option<u64>,
    /// Read timeout. `None` may block forever if the sensor never replies.
    pub read_timeout_ms: Option<u64>,
    /// Pause between two polls of the continuous poller
    pub poll_interval_ms: u64,
}

impl Default for LidarConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            segment_size_degrees: DEFAULT_SEGMENT_SIZE_DEGREES,
            read_buffer_bytes: DEFAULT_READ_BUFFER_BYTES,
            request_token: escape_bytes(DEFAULT_REQUEST_TOKEN),
            distance_marker: DEFAULT_DISTANCE_MARKER.to_string(),
            connect_timeout_ms: None,
            read_timeout_ms: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl LidarConfig {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    ///
    /// # Example
    /// ```no_run
    /// use lidarseg_driver::LidarConfig;
    ///
    /// let config = LidarConfig::from_file("lidar.toml")?;
    /// # Ok::<(), lidarseg_driver::LidarError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: LidarConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let size = self.segment_size_degrees;
        if size == 0 || size > FULL_TURN_DEGREES || FULL_TURN_DEGREES % size != 0 {
            return Err(LidarError::InvalidSegmentSize(size));
        }
        if self.read_buffer_bytes == 0 || self.read_buffer_bytes > MAX_READ_BUFFER_BYTES {
            return Err(LidarError::Config(format!(
                "read_buffer_bytes must be between 1 and {MAX_READ_BUFFER_BYTES}, got {}",
                self.read_buffer_bytes
            )));
        }
        if self.distance_marker.is_empty() {
            return Err(LidarError::Config(
                "distance_marker must not be empty".to_string(),
            ));
        }
        if self.request_bytes()?.is_empty() {
            return Err(LidarError::Config(
                "request_token must not be empty".to_string(),
            ));
        }
        if self.connect_timeout_ms == Some(0) || self.read_timeout_ms == Some(0) {
            return Err(LidarError::Config(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` as passed to the socket layer. IPv6 hosts are bracketed.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// The request token as raw bytes.
    pub fn request_bytes(&self) -> Result<Vec<u8>> {
        unescape_bytes(&self.request_token).ok_or_else(|| {
            LidarError::Config(format!(
                "request_token has a malformed escape: {:?}",
                self.request_token
            ))
        })
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::ToSocketAddrs;

    #[test]
    fn test_default_config() {
        let config = LidarConfig::default();
        assert_eq!(config.address(), "192.168.0.10:2112");
        assert_eq!(config.segment_size_degrees, 4);
        assert_eq!(config.read_buffer_bytes, 8192);
        assert_eq!(config.distance_marker, "DIST");
        assert_eq!(config.connect_timeout(), None);
        assert_eq!(config.read_timeout(), None);
        assert!(config.validate().is_ok());

        let token = config.request_bytes().unwrap();
        assert_eq!(token.len(), 17);
        assert_eq!(token, DEFAULT_REQUEST_TOKEN.to_vec());
        assert_eq!(token, b"\x02sRN LMDscandata\x03".to_vec());
    }

    #[test]
    fn test_validate_segment_size() {
        for size in [1, 2, 3, 4, 5, 6, 8, 10, 12, 45, 90, 180, 360] {
            let config = LidarConfig {
                segment_size_degrees: size,
                ..LidarConfig::default()
            };
            assert!(config.validate().is_ok(), "{size} divides 360");
        }

        for size in [0, 7, 11, 361, 720] {
            let config = LidarConfig {
                segment_size_degrees: size,
                ..LidarConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(LidarError::InvalidSegmentSize(s)) if s == size
            ));
        }
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let config = LidarConfig {
            read_buffer_bytes: 0,
            ..LidarConfig::default()
        };
        assert!(matches!(config.validate(), Err(LidarError::Config(_))));

        let config = LidarConfig {
            request_token: "abc\\x0".to_string(),
            ..LidarConfig::default()
        };
        assert!(matches!(config.validate(), Err(LidarError::Config(_))));

        let config = LidarConfig {
            read_buffer_bytes: MAX_READ_BUFFER_BYTES + 1,
            ..LidarConfig::default()
        };
        assert!(matches!(config.validate(), Err(LidarError::Config(_))));

        let config = LidarConfig {
            read_buffer_bytes: usize::MAX,
            ..LidarConfig::default()
        };
        assert!(matches!(config.validate(), Err(LidarError::Config(_))));

        let config = LidarConfig {
            read_timeout_ms: Some(0),
            ..LidarConfig::default()
        };
        assert!(matches!(config.validate(), Err(LidarError::Config(_))));
    }

    #[test]
    fn test_ipv6_address() {
        let config = LidarConfig {
            host: "::1".to_string(),
            ..LidarConfig::default()
        };
        assert_eq!(config.address(), "[::1]:2112");
        assert!(config.address().to_socket_addrs().is_ok());

        let config = LidarConfig {
            host: "[fe80::1]".to_string(),
            ..LidarConfig::default()
        };
        assert_eq!(config.address(), "[fe80::1]:2112");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
host = "127.0.0.1"
port = 3000
segment_size_degrees = 10
read_timeout_ms = 500
"#;

        let config: LidarConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(config.segment_size_degrees, 10);
        assert_eq!(config.read_timeout(), Some(Duration::from_millis(500)));
        // Unspecified keys fall back to defaults
        assert_eq!(config.read_buffer_bytes, 8192);
        assert_eq!(config.distance_marker, "DIST");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lidar.toml");

        let config = LidarConfig {
            host: "10.0.0.2".to_string(),
            connect_timeout_ms: Some(250),
            ..LidarConfig::default()
        };
        config.to_file(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("host = \"10.0.0.2\""));

        let loaded = LidarConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lidar.toml");
        fs::write(&path, "segment_size_degrees = 7\n").unwrap();

        assert!(matches!(
            LidarConfig::from_file(&path),
            Err(LidarError::InvalidSegmentSize(7))
        ));
    }
}
