//! The "current instant" capability.
//!
//! Scheduling and due checks never read the system time directly; callers
//! hand them a [`Clock`] (or the instant/day it produced).

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, FixedOffset, Local, Offset, Utc};

use crate::due::StudyDay;

/// Source of the current instant and the learner's calendar offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Offset from UTC used to cut instants into calendar days.
    fn offset(&self) -> FixedOffset {
        Utc.fix()
    }

    /// The calendar day `now` falls on.
    fn today(&self) -> StudyDay {
        StudyDay::of(self.now(), self.offset())
    }
}

/// Where the wall clock cuts days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayBoundary {
    Fixed(FixedOffset),
    /// Host local time, looked up per call so DST changes apply immediately.
    Local,
}

/// Wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    boundary: DayBoundary,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            boundary: DayBoundary::Fixed(offset),
        }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Cut days in the host's local time, whatever its offset is right now.
    pub fn local() -> Self {
        Self {
            boundary: DayBoundary::Local,
        }
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self.boundary {
            DayBoundary::Fixed(offset) => offset,
            DayBoundary::Local => instant.with_timezone(&Local).offset().fix(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset_at(self.now())
    }

    fn today(&self) -> StudyDay {
        let now = self.now();
        StudyDay::of(now, self.offset_at(now))
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            offset: Utc.fix(),
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
