use std::sync::mpsc;

pub mod command;
mod config;
mod constants;
mod decoder;
mod error;
mod link;
mod numeric;
mod poller;
mod scan;
mod segmenter;
mod sink;

use crate::constants::DEFAULT_SERIAL_BAUD_RATE;
use crate::poller::{poll_sensor, scan_once};
use crossbeam_channel::bounded;
use log::info;
use std::time::Duration;

pub use crate::config::LidarConfig;
pub use crate::decoder::decode_distances;
pub use crate::error::{LidarError, Result};
pub use crate::link::{fetch_raw_frame, SensorLink, SerialLink, TcpLink};
pub use crate::poller::{join, PollEvent, PollerThread};
pub use crate::scan::{build_full_turn_scan, build_laser_scan};
pub use crate::segmenter::segment_distances;
pub use crate::sink::{
    format_laser_scan, format_segment_table, load_map, print_segments, save_map,
};
pub use lidarseg_data::{AngularSegment, LaserScan, ScanReport, Waypoint};

/// Sends one request over `link` and turns the response into segments.
///
/// A response without any distance yields an empty report, not an error.
pub fn poll_once<L: SensorLink + ?Sized>(link: &mut L, config: &LidarConfig) -> Result<ScanReport> {
    let request = config.request_bytes()?;
    scan_once(link, &request, config)
}

/// Connects to `config.address()`, polls once and closes the connection.
pub fn connect_and_poll(config: &LidarConfig) -> Result<ScanReport> {
    config.validate()?;
    let mut link = TcpLink::connect(config)?;
    poll_once(&mut link, config)
}

/// Function to launch the LiDAR poller.
/// # Arguments
///
/// * `link` - Connected sensor link. It is moved to the poller thread and
///   closed when the thread ends.
/// * `config` - Poll interval, request token, decoding and segment options.
pub fn run_poller<L: SensorLink + 'static>(
    link: L,
    config: LidarConfig,
) -> Result<(PollerThread, mpsc::Receiver<PollEvent>)> {
    config.validate()?;
    let request = config.request_bytes()?;

    let (terminator_tx, terminator_rx) = bounded(10);
    let (event_tx, event_rx) = mpsc::channel::<PollEvent>();

    info!(
        "Polling every {} ms with {} degree segments",
        config.poll_interval_ms, config.segment_size_degrees
    );
    let poller_thread = Some(std::thread::spawn(move || {
        poll_sensor(link, request, config, event_tx, terminator_rx);
    }));

    let poller_thread = PollerThread {
        terminator_tx,
        poller_thread,
    };

    Ok((poller_thread, event_rx))
}

/// Opens `port_name` for the same request/response exchange as TCP.
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
/// * `baud_rate` - Line speed. `None` selects 230400.
/// * `config` - The read timeout defaults to one second on serial lines.
pub fn open_serial_link(
    port_name: &str,
    baud_rate: Option<u32>,
    config: &LidarConfig,
) -> Result<SerialLink> {
    let timeout = config.read_timeout().unwrap_or(Duration::from_secs(1));
    SerialLink::open(
        port_name,
        baud_rate.unwrap_or(DEFAULT_SERIAL_BAUD_RATE),
        timeout,
    )
}

/// Opens `port_name` and launches the poller on it.
pub fn run_serial_poller(
    port_name: &str,
    baud_rate: Option<u32>,
    config: LidarConfig,
) -> Result<(PollerThread, mpsc::Receiver<PollEvent>)> {
    let link = open_serial_link(port_name, baud_rate, &config)?;
    run_poller(link, config)
}
