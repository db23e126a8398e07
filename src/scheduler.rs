//! Tick scheduling for the game engines.
//!
//! The terminal host pulses us roughly every frame with the current clock
//! reading. A `Scheduler` turns those pulses into engine steps, either one per
//! pulse (variable rate) or one per elapsed interval (fixed rate, accumulator
//! pattern). Nothing here sleeps or owns a thread, so stopping is just a flag
//! flip and can never leak a pending callback.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Longest gap a single pump may consume. A host that stalls (suspended
/// terminal, debugger) resumes at normal speed instead of replaying a burst.
pub const MAX_CATCH_UP: Duration = Duration::from_millis(500);

/// Monotonic time source handed to sessions.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock measured from construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// One step per host pulse; suited to continuous physics.
    Variable,
    /// One step per elapsed interval.
    Fixed(Duration),
}

#[derive(Debug)]
pub struct Scheduler {
    cadence: Cadence,
    running: bool,
    last: Option<Duration>,
    accumulator: Duration,
    generation: u64,
}

impl Scheduler {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            running: false,
            last: None,
            accumulator: Duration::ZERO,
            generation: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Incremented on every real start; lets callers tell runs apart.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin scheduling. Starting a running scheduler is a no-op.
    pub fn start(&mut self, now: Duration) {
        if self.running {
            return;
        }
        self.running = true;
        self.last = Some(now);
        self.accumulator = Duration::ZERO;
        self.generation += 1;
        log::debug!("scheduler started (generation {})", self.generation);
    }

    /// Halt scheduling and drop any partially accumulated interval.
    /// Stopping twice is fine.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last = None;
        self.accumulator = Duration::ZERO;
        log::debug!("scheduler stopped (generation {})", self.generation);
    }

    /// Number of steps due at `now`. Consumes the elapsed time.
    pub fn poll(&mut self, now: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        let delta = match self.last {
            Some(prev) => now.saturating_sub(prev).min(MAX_CATCH_UP),
            None => Duration::ZERO,
        };
        self.last = Some(now);

        match self.cadence {
            Cadence::Variable => 1,
            Cadence::Fixed(interval) => {
                if interval.is_zero() {
                    return 1;
                }
                self.accumulator += delta;
                let steps = (self.accumulator.as_nanos() / interval.as_nanos()) as u32;
                self.accumulator -= interval * steps;
                steps
            }
        }
    }

    /// Run every step due at `now`. A step returning `Break` stops the
    /// scheduler on the spot; remaining due steps are discarded.
    pub fn pump<F>(&mut self, now: Duration, mut step: F) -> u32
    where
        F: FnMut() -> ControlFlow<()>,
    {
        let due = self.poll(now);
        let mut ran = 0;
        for _ in 0..due {
            if !self.running {
                break;
            }
            ran += 1;
            if step().is_break() {
                self.stop();
            }
        }
        ran
    }
}

/// One-shot deadline used for lockouts and delayed advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Cancel a pending deadline. Cancelling an idle timer does nothing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once, on the first call at or after the deadline.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
