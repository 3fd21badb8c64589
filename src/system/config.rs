//! Tunable Constants
//!
//! Every timing and distance constant the rover uses lives here, grouped by
//! the component that consumes it. [`Config::default`] reproduces the values
//! the rover shipped with.
//!
//! # Units
//! - distances in centimeters
//! - sensor timings in microseconds
//! - switch and loop timings in milliseconds

/// Trigger line settle time before the pulse (µs)
pub const TRIGGER_SETTLE_US: u32 = 5;

/// Trigger pulse width (µs)
pub const TRIGGER_PULSE_US: u32 = 10;

/// Time for the sensor to arm after the trigger pulse (µs)
pub const ECHO_ARM_US: u32 = 5;

/// Bound on each echo wait (rise and fall) (µs)
pub const ECHO_TIMEOUT_US: u64 = 35_000;

/// Speed of sound in air at room temperature (cm/µs)
pub const SOUND_SPEED_CM_PER_US: f32 = 0.0343;

/// Switch quiet interval after an accepted toggle (ms)
pub const DEBOUNCE_MS: u32 = 500;

/// Anything closer than this triggers an emergency stop (cm)
pub const SAFE_DISTANCE_CM: f32 = 15.0;

/// Control loop period (ms)
pub const TICK_PERIOD_MS: u64 = 100;

/// Settling time after power-up before the first tick (ms)
pub const STARTUP_DELAY_MS: u64 = 1000;

/// Complete rover configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub sensor: SensorConfig,
    pub switch: SwitchConfig,
    pub safety: SafetyConfig,
    /// Control loop period (ms), slept in full after every tick
    pub tick_period_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            switch: SwitchConfig::default(),
            safety: SafetyConfig::default(),
            tick_period_ms: TICK_PERIOD_MS,
        }
    }
}

/// Distance sensor protocol timings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Low time on the trigger line before the pulse (µs)
    pub trigger_settle_us: u32,
    /// High time of the trigger pulse (µs)
    pub trigger_pulse_us: u32,
    /// Wait after the pulse before polling the echo line (µs)
    pub echo_arm_us: u32,
    /// Bound on each of the two echo waits (µs)
    pub echo_timeout_us: u64,
    /// Speed of sound used for the round trip conversion (cm/µs)
    pub sound_speed_cm_per_us: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            trigger_settle_us: TRIGGER_SETTLE_US,
            trigger_pulse_us: TRIGGER_PULSE_US,
            echo_arm_us: ECHO_ARM_US,
            echo_timeout_us: ECHO_TIMEOUT_US,
            sound_speed_cm_per_us: SOUND_SPEED_CM_PER_US,
        }
    }
}

/// Toggle switch behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchConfig {
    /// Quiet interval after an accepted toggle (ms)
    pub debounce_ms: u32,
    /// Line level that means "beam broken". The IR module on the rover drives
    /// its output high while something is in front of it.
    pub broken_level: bool,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            broken_level: true,
        }
    }
}

/// What a missing echo means for the safety decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutPolicy {
    /// No echo is treated as a clear path (nothing in range).
    /// A disconnected sensor is indistinguishable from an empty room.
    #[default]
    FailOpen,
    /// No echo is treated as an obstacle and triggers an emergency stop
    FailSafe,
}

/// Obstacle handling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyConfig {
    /// Emergency stop threshold (cm), exclusive
    pub safe_distance_cm: f32,
    pub timeout_policy: TimeoutPolicy,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            safe_distance_cm: SAFE_DISTANCE_CM,
            timeout_policy: TimeoutPolicy::FailOpen,
        }
    }
}
