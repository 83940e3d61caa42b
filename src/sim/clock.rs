//! Injectable millisecond clock
//!
//! The browser drives the engines from `requestAnimationFrame`; tests and the
//! native demo drive them from a `ManualClock` instead.

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Hand-driven clock. Clones share the same time cell.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at an arbitrary timestamp
    pub fn starting_at(ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(ms)),
        }
    }

    /// Move time forward by `ms` (negative values are ignored)
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.now.set(self.now.get() + ms);
        }
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Clamps a clock reading so the engines never observe time going backwards
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Monotonic {
    last: f64,
}

impl Monotonic {
    pub(crate) fn observe(&mut self, reading: f64) -> f64 {
        if reading > self.last {
            self.last = reading;
        }
        self.last
    }
}
