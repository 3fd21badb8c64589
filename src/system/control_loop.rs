//! Control Loop
//!
//! One [`ControlLoop::tick`] is one pass of the rover's fixed-period loop:
//!
//! 1. sample the toggle switch and flip `enabled` on an accepted edge
//! 2. if enabled, measure the distance and let the motion controller decide
//! 3. if disabled, force the stopped outputs without touching the sensor
//! 4. apply the command to the drivetrain
//!
//! Sleeping between ticks is left to the caller (the firmware task awaits a
//! timer for [`ControlLoop::tick_period_ms`]), so a tick never waits except
//! inside the distance measurement.

use embedded_hal::digital::InputPin;

use crate::system::config::Config;
use crate::system::distance::{Echo, RangeFinder};
use crate::system::drivetrain::Actuators;
use crate::system::error::{Error, Result};
use crate::system::motion::{Decision, MotionController, MotorCommand};
use crate::system::state::SystemMode;
use crate::system::timing::Clock;
use crate::system::toggle_switch::ToggleSwitch;

/// What happened during one tick, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// New value of `enabled` if the switch toggled this tick
    pub toggled: Option<bool>,
    /// Sensor result, `None` when disabled (sensor not triggered)
    pub echo: Option<Echo>,
    pub decision: Decision,
    /// Command applied to the drivetrain
    pub command: MotorCommand,
    /// Mode after the tick
    pub mode: SystemMode,
}

/// Owns all rover state and every component
pub struct ControlLoop<R, A, S, C> {
    sensor: R,
    actuators: A,
    switch_pin: S,
    clock: C,
    switch: ToggleSwitch,
    controller: MotionController,
    mode: SystemMode,
    tick_period_ms: u64,
}

impl<R, A, S, C> ControlLoop<R, A, S, C>
where
    R: RangeFinder,
    A: Actuators,
    S: InputPin,
    C: Clock,
{
    /// Starts in [`SystemMode::BOOT`]
    pub fn new(config: &Config, sensor: R, actuators: A, switch_pin: S, clock: C) -> Self {
        Self {
            sensor,
            actuators,
            switch_pin,
            clock,
            switch: ToggleSwitch::new(config.switch),
            controller: MotionController::new(config.safety),
            mode: SystemMode::BOOT,
            tick_period_ms: config.tick_period_ms,
        }
    }

    /// Current mode
    pub fn mode(&self) -> SystemMode {
        self.mode
    }

    /// Time to sleep after each tick (ms)
    pub fn tick_period_ms(&self) -> u64 {
        self.tick_period_ms
    }

    /// Runs one pass of the loop
    pub fn tick(&mut self) -> Result<TickReport> {
        let toggled = self.poll_switch()?;

        let (echo, step) = if self.mode.enabled {
            let echo = self.sensor.measure()?;
            (Some(echo), self.controller.decide(self.mode, echo.distance))
        } else {
            (None, self.controller.stand_down(self.mode))
        };

        self.actuators.apply(&step.command)?;
        self.mode = step.mode;

        Ok(TickReport {
            toggled,
            echo,
            decision: step.decision,
            command: step.command,
            mode: self.mode,
        })
    }

    fn poll_switch(&mut self) -> Result<Option<bool>> {
        let level = self.switch_pin.is_high().map_err(Error::pin)?;
        let now_ms = self.clock.now_millis();
        Ok(self
            .switch
            .poll(level, now_ms)
            .map(|_| self.mode.toggle_enabled()))
    }
}
