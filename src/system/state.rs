//! System State
//!
//! The rover's whole runtime state is three flags, owned by the control loop
//! and handed by value to the motion controller each tick.
//!
//! # State Components
//! - Enabled: operator switch, flipped by each accepted beam toggle
//! - Moving: whether the drivetrain is currently commanded forward
//! - Alarm: buzzer, on while an emergency stop has not been resumed
//!
//! Nothing here survives a power cycle; every run starts from
//! [`SystemMode::BOOT`].

/// Rover runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemMode {
    /// Operator switch
    /// - true: obstacle avoidance running
    /// - false: motors held stopped, sensor idle
    pub enabled: bool,
    /// Drivetrain commanded forward
    /// - cleared by an emergency stop or by disabling
    /// - set again only by a resume on a clear path
    pub moving: bool,
    /// Buzzer asserted by an emergency stop
    pub alarm: bool,
}

impl SystemMode {
    /// Power-up state: enabled, moving, quiet
    pub const BOOT: SystemMode = SystemMode {
        enabled: true,
        moving: true,
        alarm: false,
    };

    /// Flips the operator switch, returns the new value
    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

impl Default for SystemMode {
    fn default() -> Self {
        Self::BOOT
    }
}
