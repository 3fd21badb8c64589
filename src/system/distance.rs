//! Distance sensor handling
//!
//! Drives an HC-SR04 style trigger/echo pair and converts the echo pulse into
//! a distance.
//!
//! # Sensor Operation
//! - Trigger held low to settle, then pulsed high for 10 µs
//! - The sensor answers with a high pulse on the echo line whose width is the
//!   round trip time of the sound burst
//! - Distance in centimeters is `pulse_us * 0.0343 / 2`
//!
//! # Timeouts
//! - Both the wait for the echo to rise and the wait for it to fall are
//!   bounded (35 ms each)
//! - A timeout produces [`Distance::NoEcho`], never a number. Its diagnostic
//!   value is [`NO_ECHO_CM`], which must not be fed into comparisons
//!
//! A measurement blocks the caller for up to roughly 70 ms.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::system::config::SensorConfig;
use crate::system::error::{Error, Result};
use crate::system::timing::{wait_for_level, Clock};

/// Value reported for a measurement that saw no echo (cm)
pub const NO_ECHO_CM: f32 = 999.0;

/// Which echo wait ran out of time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoPhase {
    /// The echo line never went high: nothing in range, or no sensor
    Rise,
    /// The echo line went high but never came back down
    Fall,
}

/// Result of one distance measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Distance {
    /// Valid echo, distance in centimeters. Zero and near zero are valid.
    Measured(f32),
    /// No complete echo pulse inside the timeout window
    NoEcho(EchoPhase),
}

impl Distance {
    /// Distance in centimeters for display, [`NO_ECHO_CM`] without an echo
    pub fn centimeters(&self) -> f32 {
        match self {
            Distance::Measured(cm) => *cm,
            Distance::NoEcho(_) => NO_ECHO_CM,
        }
    }

    /// True when a complete echo pulse was timed
    pub fn is_measured(&self) -> bool {
        matches!(self, Distance::Measured(_))
    }
}

/// One measurement including the raw echo pulse width
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Echo {
    /// Echo pulse width (µs), zero when no echo was seen
    pub duration_us: u64,
    pub distance: Distance,
}

impl Echo {
    fn missing(phase: EchoPhase) -> Self {
        Self {
            duration_us: 0,
            distance: Distance::NoEcho(phase),
        }
    }
}

/// Anything that can produce a distance reading on demand
///
/// The control loop only needs this; tests substitute a scripted sequence.
pub trait RangeFinder {
    fn measure(&mut self) -> Result<Echo>;
}

/// Converts an echo pulse width into centimeters (round trip halved)
pub fn pulse_to_centimeters(duration_us: u64, sound_speed_cm_per_us: f32) -> f32 {
    duration_us as f32 * sound_speed_cm_per_us / 2.0
}

/// Trigger/echo ultrasonic sensor
pub struct DistanceSensor<T, E, D, C> {
    trigger: T,
    echo: E,
    delay: D,
    clock: C,
    config: SensorConfig,
}

impl<T, E, D, C> DistanceSensor<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: Clock,
{
    /// Takes ownership of the trigger output, echo input, a blocking delay
    /// and a clock
    pub fn new(trigger: T, echo: E, delay: D, clock: C, config: SensorConfig) -> Self {
        Self {
            trigger,
            echo,
            delay,
            clock,
            config,
        }
    }

    /// Sends the trigger pulse and times the echo
    pub fn measure(&mut self) -> Result<Echo> {
        self.fire_trigger()?;

        let timeout = self.config.echo_timeout_us;

        let armed_at = self.clock.now_micros();
        let Some(rise) = wait_for_level(&mut self.echo, &self.clock, true, armed_at, timeout)?
        else {
            return Ok(Echo::missing(EchoPhase::Rise));
        };

        let Some(fall) = wait_for_level(&mut self.echo, &self.clock, false, rise, timeout)? else {
            return Ok(Echo::missing(EchoPhase::Fall));
        };

        let duration_us = fall.saturating_sub(rise);
        Ok(Echo {
            duration_us,
            distance: Distance::Measured(pulse_to_centimeters(
                duration_us,
                self.config.sound_speed_cm_per_us,
            )),
        })
    }

    /// Settle low, pulse high, then give the sensor time to arm
    fn fire_trigger(&mut self) -> Result<()> {
        self.trigger.set_low().map_err(Error::pin)?;
        self.delay.delay_us(self.config.trigger_settle_us);

        self.trigger.set_high().map_err(Error::pin)?;
        self.delay.delay_us(self.config.trigger_pulse_us);
        self.trigger.set_low().map_err(Error::pin)?;

        self.delay.delay_us(self.config.echo_arm_us);
        Ok(())
    }
}

impl<T, E, D, C> RangeFinder for DistanceSensor<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: Clock,
{
    fn measure(&mut self) -> Result<Echo> {
        DistanceSensor::measure(self)
    }
}
