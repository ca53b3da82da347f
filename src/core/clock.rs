// src/core/clock.rs
use std::{cell::Cell, rc::Rc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of "now" for timestamps and the detection timer.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn advance(&self, by: Duration) {
        let step = TimeDelta::from_std(by).unwrap_or(TimeDelta::zero());
        self.now.set(self.now.get() + step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Fixed-period timer driven by polling. The first period starts at the
/// first poll; a late poll fires once and restarts the period from there.
#[derive(Clone, Debug)]
pub struct Interval {
    period: Duration,
    last: Option<DateTime<Utc>>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True when a full period has elapsed since the last firing.
    pub fn due(&mut self, now: DateTime<Utc>) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return false;
        };
        if self.elapsed(last, now) >= self.period {
            self.last = Some(now);
            true
        } else {
            false
        }
    }

    /// Time left until the next firing (zero when already due).
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.last {
            Some(last) => self.period.saturating_sub(self.elapsed(last, now)),
            None => self.period,
        }
    }

    fn elapsed(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        (now - last).to_std().unwrap_or(Duration::ZERO)
    }
}
