//! Motion Controller
//!
//! Safety state machine that turns the current [`SystemMode`] and a fresh
//! distance reading into the next mode and the motor/alarm command.
//!
//! # Transitions
//! - obstacle inside the safe distance: emergency stop (motors stopped, alarm
//!   on, no longer moving). Repeated every tick while the obstacle stays.
//! - clear path after a stop: resume (alarm off, moving again), then forward
//! - clear path while moving: forward
//! - disabled: stopped, alarm off, distance never looked at
//!
//! Everything here is a pure function of its inputs; applying the command to
//! the pins is the drivetrain's job.

use crate::system::config::{SafetyConfig, TimeoutPolicy};
use crate::system::distance::Distance;
use crate::system::state::SystemMode;

/// Direction of one drive channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelDirection {
    Forward,
    Stopped,
}

/// Motor and alarm outputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    pub left: ChannelDirection,
    pub right: ChannelDirection,
    /// Buzzer on
    pub alarm: bool,
}

impl MotorCommand {
    /// Both channels forward, buzzer off
    pub const FORWARD: MotorCommand = MotorCommand {
        left: ChannelDirection::Forward,
        right: ChannelDirection::Forward,
        alarm: false,
    };

    /// Both channels stopped, buzzer on
    pub const EMERGENCY_STOP: MotorCommand = MotorCommand {
        left: ChannelDirection::Stopped,
        right: ChannelDirection::Stopped,
        alarm: true,
    };

    /// Both channels stopped, buzzer off
    pub const STOPPED: MotorCommand = MotorCommand {
        left: ChannelDirection::Stopped,
        right: ChannelDirection::Stopped,
        alarm: false,
    };
}

/// What the controller decided this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// Obstacle inside the safe distance
    EmergencyStop,
    /// Path cleared after a stop; alarm released and driving forward again
    Resume,
    /// Path clear, keep driving forward
    Forward,
    /// Rover disabled by the operator
    Stopped,
}

/// Outcome of one controller step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub mode: SystemMode,
    pub decision: Decision,
    pub command: MotorCommand,
}

/// Obstacle classification for a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Path {
    Blocked,
    Clear,
}

/// Safety decision logic
#[derive(Debug, Clone, Copy)]
pub struct MotionController {
    config: SafetyConfig,
}

impl MotionController {
    pub fn new(config: SafetyConfig) -> Self {
        Self { config }
    }

    /// Decides the next step for an enabled rover from a fresh reading
    ///
    /// A disabled mode is routed to [`MotionController::stand_down`] without
    /// looking at the reading.
    pub fn decide(&self, mode: SystemMode, reading: Distance) -> Step {
        if !mode.enabled {
            return self.stand_down(mode);
        }

        match self.classify(reading) {
            Path::Blocked => Step {
                mode: SystemMode {
                    moving: false,
                    alarm: true,
                    ..mode
                },
                decision: Decision::EmergencyStop,
                command: MotorCommand::EMERGENCY_STOP,
            },
            Path::Clear => {
                let decision = if mode.moving {
                    Decision::Forward
                } else {
                    Decision::Resume
                };
                Step {
                    mode: SystemMode {
                        moving: true,
                        alarm: false,
                        ..mode
                    },
                    decision,
                    command: MotorCommand::FORWARD,
                }
            }
        }
    }

    /// Forces the stopped, quiet outputs used while disabled
    pub fn stand_down(&self, mode: SystemMode) -> Step {
        Step {
            mode: SystemMode {
                moving: false,
                alarm: false,
                ..mode
            },
            decision: Decision::Stopped,
            command: MotorCommand::STOPPED,
        }
    }

    fn classify(&self, reading: Distance) -> Path {
        match reading {
            Distance::Measured(cm) if cm > 0.0 && cm < self.config.safe_distance_cm => {
                Path::Blocked
            }
            Distance::Measured(_) => Path::Clear,
            Distance::NoEcho(_) => match self.config.timeout_policy {
                TimeoutPolicy::FailOpen => Path::Clear,
                TimeoutPolicy::FailSafe => Path::Blocked,
            },
        }
    }
}
