//! Timekeeping
//!
//! The monotonic clock the control logic reads, and the bounded busy-wait the
//! distance sensor uses to time the echo pulse.

use embedded_hal::digital::InputPin;

use crate::system::error::{Error, Result};

/// Monotonic time source
///
/// The firmware backs this with the embassy time driver; tests back it with a
/// simulated counter.
pub trait Clock {
    /// Microseconds since boot
    fn now_micros(&self) -> u64;

    /// Milliseconds since boot, wrapping after ~49 days
    fn now_millis(&self) -> u32 {
        (self.now_micros() / 1_000) as u32
    }
}

/// Busy-polls `pin` until it reads `level`
///
/// Returns the clock reading taken on the poll that observed the level, or
/// `None` once more than `timeout_us` has passed since `since_us`. The elapsed
/// time is checked on every iteration, so a stuck line can hold the caller for
/// at most one timeout window.
///
/// This is the only place the control logic spins. A platform with edge
/// interrupts can replace it without touching the distance math.
pub fn wait_for_level<P, C>(
    pin: &mut P,
    clock: &C,
    level: bool,
    since_us: u64,
    timeout_us: u64,
) -> Result<Option<u64>>
where
    P: InputPin,
    C: Clock,
{
    loop {
        if pin.is_high().map_err(Error::pin)? == level {
            return Ok(Some(clock.now_micros()));
        }
        if clock.now_micros().wrapping_sub(since_us) > timeout_us {
            return Ok(None);
        }
    }
}
