use crate::config::LidarConfig;
use crate::error::{LidarError, Result};
use log::{debug, info};
use serialport::SerialPort;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Byte stream to a sensor. The connection is closed when the link is dropped.
pub trait SensorLink: Send {
    /// Writes the whole buffer.
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Performs a single read of at most `max_bytes`.
    ///
    /// Returns whatever arrived, which may be shorter than a full response or
    /// empty if the peer closed the connection.
    fn receive(&mut self, max_bytes: usize) -> Result<Vec<u8>>;
}

impl<L: SensorLink + ?Sized> SensorLink for Box<L> {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        (**self).receive(max_bytes)
    }
}

/// Sends `request` once and returns the raw response of one read.
///
/// Multi-packet responses are not reassembled.
pub fn fetch_raw_frame<L: SensorLink + ?Sized>(
    link: &mut L,
    request: &[u8],
    max_bytes: usize,
) -> Result<Vec<u8>> {
    link.send(request)?;
    let frame = link.receive(max_bytes)?;
    debug!("Received {} of at most {} bytes", frame.len(), max_bytes);
    Ok(frame)
}

pub struct TcpLink {
    stream: TcpStream,
}

impl TcpLink {
    /// Connects to `config.address()`. There is no retry.
    pub fn connect(config: &LidarConfig) -> Result<TcpLink> {
        let address = config.address();
        let stream = match config.connect_timeout() {
            None => TcpStream::connect(&address).map_err(LidarError::from_connect)?,
            Some(timeout) => connect_with_timeout(&address, timeout)?,
        };
        info!("Connected to LiDAR at {}", address);
        TcpLink::from_stream(stream, config.read_timeout())
    }

    pub fn from_stream(stream: TcpStream, read_timeout: Option<Duration>) -> Result<TcpLink> {
        stream.set_read_timeout(read_timeout)?;
        Ok(TcpLink { stream })
    }

    pub fn peer_addr(&self) -> Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }
}

fn connect_with_timeout(address: &str, timeout: Duration) -> Result<TcpStream> {
    let addrs = address
        .to_socket_addrs()
        .map_err(LidarError::Connection)?;
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(match last_err {
        Some(e) => LidarError::from_connect(e),
        None => LidarError::Connection(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{address} did not resolve to any address"),
        )),
    })
}

impl SensorLink for TcpLink {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .write_all(data)
            .map_err(LidarError::from_connect)
    }

    fn receive(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; max_bytes];
        let n_read = self.stream.read(&mut buffer).map_err(LidarError::from_read)?;
        buffer.truncate(n_read);
        Ok(buffer)
    }
}

/// Same request/response exchange over a UART.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

impl SerialLink {
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<SerialLink> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(timeout)
            .open()?;
        info!("Opened LiDAR serial port {} at {} baud", port_name, baud_rate);
        Ok(SerialLink { port })
    }

    pub fn from_port(port: Box<dyn SerialPort>) -> SerialLink {
        SerialLink { port }
    }
}

impl SensorLink for SerialLink {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data).map_err(LidarError::from_connect)?;
        self.port.flush().map_err(LidarError::from_connect)
    }

    fn receive(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; max_bytes];
        let n_read = self.port.read(&mut buffer).map_err(LidarError::from_read)?;
        buffer.truncate(n_read);
        Ok(buffer)
    }
}
