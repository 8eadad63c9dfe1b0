use chrono::{Duration, Local, NaiveDateTime};
use std::cell::Cell;

/// Display format for transaction timestamps, e.g. `16-10-2026 09:30:00`.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Clock abstracts access to the wall clock so services stay deterministic in tests.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a given instant, optionally advancing by `step` on every read.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Cell<NaiveDateTime>,
    step: Duration,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            current: Cell::new(at),
            step: Duration::zero(),
        }
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
