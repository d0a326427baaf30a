use crate::config::LidarConfig;
use crate::decoder::decode_distances;
use crate::error::{LidarError, Result};
use crate::link::{fetch_raw_frame, SensorLink};
use crate::segmenter::segment_distances;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use lidarseg_data::ScanReport;
use log::{debug, error, warn};
use std::sync::mpsc;
use std::thread::JoinHandle;

/// Outcome of one iteration of the poller.
#[derive(Debug)]
pub enum PollEvent {
    Scan(ScanReport),
    /// The read timed out. The poller carries on with the next iteration.
    TimedOut,
    /// Any other failure. The poller has stopped.
    Failed(LidarError),
}

/// Handle to the poller thread.
///
/// Dropping it stops and joins the thread. Without a read timeout a read
/// already in progress keeps the drop waiting until the sensor answers or
/// closes the connection.
pub struct PollerThread {
    pub(crate) terminator_tx: Sender<bool>,
    pub(crate) poller_thread: Option<JoinHandle<()>>,
}

/// Fetch, decode and segment once.
pub(crate) fn scan_once<L: SensorLink + ?Sized>(
    link: &mut L,
    request: &[u8],
    config: &LidarConfig,
) -> Result<ScanReport> {
    let frame = fetch_raw_frame(link, request, config.read_buffer_bytes)?;
    let distances = decode_distances(&frame, &config.distance_marker);
    let segments = segment_distances(&distances, config.segment_size_degrees);
    debug!(
        "Decoded {} distances into {} segments",
        distances.len(),
        segments.len()
    );
    Ok(ScanReport {
        distances,
        segments,
    })
}

pub(crate) fn poll_sensor<L: SensorLink>(
    mut link: L,
    request: Vec<u8>,
    config: LidarConfig,
    event_tx: mpsc::Sender<PollEvent>,
    terminator_rx: Receiver<bool>,
) {
    let interval = config.poll_interval();
    loop {
        if do_terminate(&terminator_rx) {
            return;
        }

        let event = match scan_once(&mut link, &request, &config) {
            Ok(report) => PollEvent::Scan(report),
            Err(LidarError::Timeout) => {
                warn!("LiDAR did not answer within the read timeout");
                PollEvent::TimedOut
            }
            Err(e) => {
                error!("Stopping poller: {e}");
                let _ = event_tx.send(PollEvent::Failed(e));
                return;
            }
        };
        if event_tx.send(event).is_err() {
            // nobody is listening anymore
            return;
        }

        match terminator_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            _ => return,
        }
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join the poller thread.
/// This function is automatically called when `poller_thread` is dropped.
pub fn join(poller_thread: &mut PollerThread) {
    let _ = poller_thread.terminator_tx.send(true);

    if let Some(thread) = poller_thread.poller_thread.take() {
        if thread.join().is_err() {
            error!("LiDAR poller thread panicked");
        }
    }
}

impl Drop for PollerThread {
    fn drop(&mut self) {
        join(self);
    }
}
