//! IR Beam Toggle Switch
//!
//! Turns a raw IR beam line into a debounced on/off toggle. The operator waves
//! a hand through the beam; every accepted "beam broken" edge flips the rover
//! between enabled and disabled.
//!
//! # Debounce
//! - After an accepted toggle, the line is ignored for the quiet interval
//!   (500 ms). Changes inside the window are dropped, not delayed.
//! - Only edges into the broken level toggle and restart the window. The
//!   edge back to "beam present" is recorded silently, so holding a hand in
//!   the beam toggles once, not twice.

use crate::system::config::SwitchConfig;

/// Emitted for every accepted "beam broken" edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToggleEvent {
    /// Time of the accepted edge (ms since boot)
    pub at_ms: u32,
}

/// Debounced single-edge toggle
#[derive(Debug, Clone)]
pub struct ToggleSwitch {
    debounce_ms: u32,
    broken_level: bool,
    last_level: bool,
    last_change_ms: u32,
}

impl ToggleSwitch {
    /// Starts with the beam present and the quiet window anchored at boot
    pub fn new(config: SwitchConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            broken_level: config.broken_level,
            last_level: !config.broken_level,
            last_change_ms: 0,
        }
    }

    /// Feeds one raw sample taken at `now_ms`
    pub fn poll(&mut self, level: bool, now_ms: u32) -> Option<ToggleEvent> {
        if now_ms.wrapping_sub(self.last_change_ms) <= self.debounce_ms {
            return None;
        }
        if level == self.last_level {
            return None;
        }

        self.last_level = level;
        if level == self.broken_level {
            self.last_change_ms = now_ms;
            Some(ToggleEvent { at_ms: now_ms })
        } else {
            None
        }
    }

    /// Whether the last accepted level was "beam broken"
    pub fn is_broken(&self) -> bool {
        self.last_level == self.broken_level
    }
}
