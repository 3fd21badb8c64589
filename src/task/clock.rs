//! Embassy time driver as the control logic's clock

use embassy_time::Instant;
use obstacle_rover::system::timing::Clock;

/// Monotonic clock backed by the RP2040 timer
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_micros(&self) -> u64 {
        Instant::now().as_micros()
    }

    fn now_millis(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
