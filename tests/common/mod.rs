//! Simulated hardware for host tests.
//!
//! All sims share one microsecond counter. Reading the echo line costs 1 µs
//! of simulated time, so busy-wait loops make progress and terminate.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use obstacle_rover::system::distance::{Distance, Echo, RangeFinder};
use obstacle_rover::system::drivetrain::Actuators;
use obstacle_rover::system::error::Result;
use obstacle_rover::system::motion::MotorCommand;
use obstacle_rover::system::timing::Clock;

// ── Clock and delay ──────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn starting_at_ms(ms: u64) -> Self {
        Self(Rc::new(Cell::new(ms * 1_000)))
    }

    pub fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1_000);
    }
}

impl Clock for SimClock {
    fn now_micros(&self) -> u64 {
        self.0.get()
    }
}

pub struct SimDelay(pub SimClock);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance_us(u64::from(ns).div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.advance_us(u64::from(us));
    }
}

// ── Output pin ───────────────────────────────────────────────

/// Output pin that records every level change with its timestamp
#[derive(Clone)]
pub struct SimOutput {
    clock: SimClock,
    level: Rc<Cell<bool>>,
    pub history: Rc<RefCell<Vec<(u64, bool)>>>,
}

impl SimOutput {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            level: Rc::new(Cell::new(false)),
            history: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn is_set_high(&self) -> bool {
        self.level.get()
    }

    fn set(&mut self, high: bool) {
        self.level.set(high);
        self.history.borrow_mut().push((self.clock.now_micros(), high));
    }

    /// Time of the most recent high→low edge
    pub fn last_falling_edge(&self) -> Option<u64> {
        self.history
            .borrow()
            .windows(2)
            .rev()
            .find(|w| w[0].1 && !w[1].1)
            .map(|w| w[1].0)
    }
}

impl ErrorType for SimOutput {
    type Error = Infallible;
}

impl OutputPin for SimOutput {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

// ── Echo line ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum EchoProfile {
    /// Goes high `delay_us` after the trigger pulse ends, stays high `width_us`
    Pulse { delay_us: u64, width_us: u64 },
    /// Never rises
    Silent,
    /// Rises `delay_us` after the trigger and never falls
    Stuck { delay_us: u64 },
}

/// Echo input answering the trigger pin it is paired with
pub struct SimEcho {
    clock: SimClock,
    trigger: SimOutput,
    pub profile: Rc<Cell<EchoProfile>>,
    pub reads: Rc<Cell<u64>>,
}

impl SimEcho {
    pub fn new(clock: &SimClock, trigger: &SimOutput, profile: EchoProfile) -> Self {
        Self {
            clock: clock.clone(),
            trigger: trigger.clone(),
            profile: Rc::new(Cell::new(profile)),
            reads: Rc::new(Cell::new(0)),
        }
    }

    fn level_at(&self, t: u64) -> bool {
        let Some(fired) = self.trigger.last_falling_edge() else {
            return false;
        };
        match self.profile.get() {
            EchoProfile::Pulse { delay_us, width_us } => {
                let rise = fired + delay_us;
                t >= rise && t < rise + width_us
            }
            EchoProfile::Silent => false,
            EchoProfile::Stuck { delay_us } => t >= fired + delay_us,
        }
    }
}

impl ErrorType for SimEcho {
    type Error = Infallible;
}

impl InputPin for SimEcho {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        let t = self.clock.now_micros();
        self.clock.advance_us(1);
        self.reads.set(self.reads.get() + 1);
        Ok(self.level_at(t))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

// ── Switch line ──────────────────────────────────────────────

/// Input whose level the test sets directly
#[derive(Clone, Default)]
pub struct SimLine(pub Rc<Cell<bool>>);

impl SimLine {
    pub fn set(&self, high: bool) {
        self.0.set(high);
    }
}

impl ErrorType for SimLine {
    type Error = Infallible;
}

impl InputPin for SimLine {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

// ── Faulty pin ───────────────────────────────────────────────

#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Input that fails every read
pub struct FaultyLine;

impl ErrorType for FaultyLine {
    type Error = PinFault;
}

impl InputPin for FaultyLine {
    fn is_high(&mut self) -> core::result::Result<bool, PinFault> {
        Err(PinFault)
    }

    fn is_low(&mut self) -> core::result::Result<bool, PinFault> {
        Err(PinFault)
    }
}

// ── Scripted sensor and recording actuators ──────────────────

/// Replays a fixed list of distances; counts how often it was asked
pub struct ScriptedRange {
    readings: VecDeque<Distance>,
    pub calls: Rc<Cell<usize>>,
}

impl ScriptedRange {
    pub fn new(readings: impl IntoIterator<Item = Distance>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn centimeters(readings: &[f32]) -> Self {
        Self::new(readings.iter().map(|cm| Distance::Measured(*cm)))
    }
}

impl RangeFinder for ScriptedRange {
    fn measure(&mut self) -> Result<Echo> {
        self.calls.set(self.calls.get() + 1);
        let distance = self
            .readings
            .pop_front()
            .expect("sensor asked for more readings than scripted");
        Ok(Echo {
            duration_us: 0,
            distance,
        })
    }
}

/// Records every command it is given
#[derive(Clone, Default)]
pub struct RecordingActuators(pub Rc<RefCell<Vec<MotorCommand>>>);

impl RecordingActuators {
    pub fn commands(&self) -> Vec<MotorCommand> {
        self.0.borrow().clone()
    }

    pub fn last(&self) -> Option<MotorCommand> {
        self.0.borrow().last().copied()
    }
}

impl Actuators for RecordingActuators {
    fn apply(&mut self, command: &MotorCommand) -> Result<()> {
        self.0.borrow_mut().push(*command);
        Ok(())
    }
}
