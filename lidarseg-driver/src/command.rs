//! Flight-controller command boundary
//!
//! The MAVLink connection itself lives behind [`CommandLink`]; this module only
//! sequences commands and waits for their acknowledgments. Every wait is bounded
//! by [`AckPolicy::timeout`] and a command is sent at most
//! [`AckPolicy::max_attempts`] times.

use lidarseg_data::Waypoint;
use log::{debug, info, warn};
use std::io;
use std::time::{Duration, Instant};

pub const MAV_CMD_MISSION_COUNT: u16 = 44;
pub const MAV_CMD_MISSION_CLEAR_ALL: u16 = 45;
pub const MAV_CMD_DO_SET_MODE: u16 = 176;
pub const MAV_CMD_MISSION_START: u16 = 300;
pub const MAV_CMD_COMPONENT_ARM_DISARM: u16 = 400;

pub const AUTO_MODE: &str = "AUTO";

#[derive(Clone, Debug, PartialEq)]
pub enum FlightCommand {
    SetMode(String),
    Arm,
    Disarm,
    MissionStart,
    ClearMission,
    UploadMission(Vec<Waypoint>),
}

impl FlightCommand {
    /// Command id an acknowledgment must carry to match this command.
    pub fn command_id(&self) -> u16 {
        match self {
            FlightCommand::SetMode(_) => MAV_CMD_DO_SET_MODE,
            FlightCommand::Arm | FlightCommand::Disarm => MAV_CMD_COMPONENT_ARM_DISARM,
            FlightCommand::MissionStart => MAV_CMD_MISSION_START,
            FlightCommand::ClearMission => MAV_CMD_MISSION_CLEAR_ALL,
            FlightCommand::UploadMission(_) => MAV_CMD_MISSION_COUNT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AckResult {
    Accepted,
    /// Raw result code reported by the flight controller.
    Rejected(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandAck {
    pub command: u16,
    pub result: AckResult,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Mode {0} is not available on this flight controller")]
    UnknownMode(String),
    #[error("No acknowledgment for command {command} after {attempts} attempt(s)")]
    AckTimedOut { command: u16, attempts: u32 },
    #[error("Command {command} was rejected with result {result}")]
    Rejected { command: u16, result: u8 },
    #[error("Flight controller link error: {0}")]
    Link(#[from] io::Error),
}

/// Connection to a flight controller.
pub trait CommandLink {
    /// Custom mode number for `mode`, if the autopilot supports it.
    fn mode_id(&self, mode: &str) -> Option<u32>;

    fn send(&mut self, command: &FlightCommand) -> Result<(), CommandError>;

    /// Waits up to `timeout` for the next acknowledgment. `None` on timeout.
    fn recv_ack(&mut self, timeout: Duration) -> Result<Option<CommandAck>, CommandError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AckPolicy {
    /// How long to wait for a matching acknowledgment after each send
    pub timeout: Duration,
    /// Total number of sends, including the first one
    pub max_attempts: u32,
}

impl Default for AckPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            max_attempts: 1,
        }
    }
}

/// Sends `command` and waits for an acknowledgment carrying its id.
///
/// Acknowledgments for other commands are skipped. When the timeout expires
/// the command is sent again until `max_attempts` sends have been made.
pub fn send_and_confirm<L: CommandLink + ?Sized>(
    link: &mut L,
    command: &FlightCommand,
    policy: &AckPolicy,
) -> Result<CommandAck, CommandError> {
    let command_id = command.command_id();
    let attempts = policy.max_attempts.max(1);

    for attempt in 1..=attempts {
        link.send(command)?;
        let deadline = Instant::now() + policy.timeout;

        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            match link.recv_ack(remaining)? {
                None => break,
                Some(ack) if ack.command != command_id => {
                    debug!("Skipping acknowledgment for command {}", ack.command);
                }
                Some(ack) => {
                    return match ack.result {
                        AckResult::Accepted => Ok(ack),
                        AckResult::Rejected(result) => Err(CommandError::Rejected {
                            command: command_id,
                            result,
                        }),
                    };
                }
            }
        }
        warn!(
            "No acknowledgment for command {} (attempt {}/{})",
            command_id, attempt, attempts
        );
    }

    Err(CommandError::AckTimedOut {
        command: command_id,
        attempts,
    })
}

pub fn set_mode<L: CommandLink + ?Sized>(
    link: &mut L,
    mode: &str,
    policy: &AckPolicy,
) -> Result<CommandAck, CommandError> {
    if link.mode_id(mode).is_none() {
        return Err(CommandError::UnknownMode(mode.to_string()));
    }
    let ack = send_and_confirm(link, &FlightCommand::SetMode(mode.to_string()), policy)?;
    info!("Flight mode {} confirmed", mode);
    Ok(ack)
}

pub fn arm<L: CommandLink + ?Sized>(
    link: &mut L,
    policy: &AckPolicy,
) -> Result<CommandAck, CommandError> {
    let ack = send_and_confirm(link, &FlightCommand::Arm, policy)?;
    info!("Vehicle armed");
    Ok(ack)
}

pub fn start_mission<L: CommandLink + ?Sized>(
    link: &mut L,
    policy: &AckPolicy,
) -> Result<CommandAck, CommandError> {
    let ack = send_and_confirm(link, &FlightCommand::MissionStart, policy)?;
    info!("Mission started");
    Ok(ack)
}

/// AUTO mode, arm, then start the uploaded mission. Stops at the first failure.
pub fn start_auto_mission<L: CommandLink + ?Sized>(
    link: &mut L,
    policy: &AckPolicy,
) -> Result<(), CommandError> {
    set_mode(link, AUTO_MODE, policy)?;
    arm(link, policy)?;
    start_mission(link, policy)?;
    Ok(())
}

/// Clears the stored mission and sends `waypoints` in order.
///
/// Mission items are not acknowledged one by one; this returns once they have
/// been handed to the link.
pub fn upload_waypoints<L: CommandLink + ?Sized>(
    link: &mut L,
    waypoints: &[Waypoint],
) -> Result<(), CommandError> {
    link.send(&FlightCommand::ClearMission)?;
    link.send(&FlightCommand::UploadMission(waypoints.to_vec()))?;
    for (seq, waypoint) in waypoints.iter().enumerate() {
        debug!(
            "Waypoint {}: lat={}, lon={}, alt={}",
            seq + 1,
            waypoint.latitude,
            waypoint.longitude,
            waypoint.altitude_m
        );
    }
    info!("Uploaded {} waypoints", waypoints.len());
    Ok(())
}
