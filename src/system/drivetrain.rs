//! Drivetrain Outputs
//!
//! Puts a [`MotorCommand`] onto the pins of the two H-bridge channels and the
//! buzzer.
//!
//! # Hardware
//! - Each channel has a forward and a backward input plus an enable line
//! - Forward: forward input high, backward input low
//! - Stopped: both inputs low (coasting)
//! - Enable lines are driven high once and held, there is no speed control
//! - Buzzer output is active high

use embedded_hal::digital::OutputPin;

use crate::system::error::{Error, Result};
use crate::system::motion::{ChannelDirection, MotorCommand};

/// Anything that can carry out a motor command
pub trait Actuators {
    fn apply(&mut self, command: &MotorCommand) -> Result<()>;
}

/// One H-bridge channel
pub struct Channel<P> {
    forward: P,
    backward: P,
    /// Held high for as long as the channel exists
    _enable: P,
}

impl<P: OutputPin> Channel<P> {
    /// Takes the channel's pins, stopped and enabled
    pub fn new(mut forward: P, mut backward: P, mut enable: P) -> Result<Self> {
        forward.set_low().map_err(Error::pin)?;
        backward.set_low().map_err(Error::pin)?;
        enable.set_high().map_err(Error::pin)?;
        Ok(Self {
            forward,
            backward,
            _enable: enable,
        })
    }

    pub fn drive(&mut self, direction: ChannelDirection) -> Result<()> {
        match direction {
            ChannelDirection::Forward => {
                self.forward.set_high().map_err(Error::pin)?;
                self.backward.set_low().map_err(Error::pin)?;
            }
            ChannelDirection::Stopped => {
                self.forward.set_low().map_err(Error::pin)?;
                self.backward.set_low().map_err(Error::pin)?;
            }
        }
        Ok(())
    }
}

/// Left and right channels plus the buzzer
pub struct Drivetrain<P, A> {
    left: Channel<P>,
    right: Channel<P>,
    alarm: A,
}

impl<P: OutputPin, A: OutputPin> Drivetrain<P, A> {
    /// Starts with both channels stopped and the buzzer off
    pub fn new(left: Channel<P>, right: Channel<P>, mut alarm: A) -> Result<Self> {
        alarm.set_low().map_err(Error::pin)?;
        Ok(Self { left, right, alarm })
    }
}

impl<P: OutputPin, A: OutputPin> Actuators for Drivetrain<P, A> {
    fn apply(&mut self, command: &MotorCommand) -> Result<()> {
        self.left.drive(command.left)?;
        self.right.drive(command.right)?;
        self.alarm
            .set_state(command.alarm.into())
            .map_err(Error::pin)
    }
}
