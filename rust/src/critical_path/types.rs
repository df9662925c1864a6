//! Types for critical path scheduling.

use std::fmt;

/// Schedule time unit (whole periods since project start).
pub type Time = i64;

/// An activity: a vertex payload with a fixed duration and the four
/// schedule values the forward and backward passes compute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Activity {
    name: String,
    duration: Time,
    earliest_start: Time,
    earliest_end: Time,
    latest_start: Time,
    latest_end: Time,
}

impl Activity {
    pub fn new(duration: u32) -> Self {
        Self {
            duration: Time::from(duration),
            ..Default::default()
        }
    }

    pub fn named(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            ..Self::new(duration)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn duration(&self) -> Time {
        self.duration
    }

    /// Change the duration. Schedule values are stale until the next
    /// `compute_schedule`.
    pub fn set_duration(&mut self, duration: u32) {
        self.duration = Time::from(duration);
    }

    pub fn earliest_start(&self) -> Time {
        self.earliest_start
    }

    pub(crate) fn set_earliest_start(&mut self, value: Time) {
        self.earliest_start = value;
    }

    pub fn earliest_end(&self) -> Time {
        self.earliest_end
    }

    pub(crate) fn set_earliest_end(&mut self, value: Time) {
        self.earliest_end = value;
    }

    pub fn latest_start(&self) -> Time {
        self.latest_start
    }

    pub(crate) fn set_latest_start(&mut self, value: Time) {
        self.latest_start = value;
    }

    pub fn latest_end(&self) -> Time {
        self.latest_end
    }

    pub(crate) fn set_latest_end(&mut self, value: Time) {
        self.latest_end = value;
    }

    /// Slack = latest_start - earliest_start.
    pub fn slack(&self) -> Time {
        self.latest_start - self.earliest_start
    }

    pub fn is_critical(&self) -> bool {
        self.earliest_start == self.latest_start
    }

    /// Snapshot of the schedule values.
    pub fn timing(&self) -> ActivityTiming {
        ActivityTiming {
            earliest_start: self.earliest_start,
            earliest_end: self.earliest_end,
            latest_start: self.latest_start,
            latest_end: self.latest_end,
        }
    }

    pub(crate) fn apply_timing(&mut self, timing: &ActivityTiming) {
        self.set_earliest_start(timing.earliest_start);
        self.set_earliest_end(timing.earliest_end);
        self.set_latest_start(timing.latest_start);
        self.set_latest_end(timing.latest_end);
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write!(f, "{} ", self.name)?;
        }
        write!(
            f,
            "(duration: {}, earliest start: {}, latest start: {}, earliest end: {}, latest end: {})",
            self.duration, self.earliest_start, self.latest_start, self.earliest_end, self.latest_end
        )
    }
}

/// Per-activity timing produced by one schedule computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: Time,
    /// Earliest possible finish time (from forward pass).
    pub earliest_end: Time,
    /// Latest allowable start time (from backward pass).
    pub latest_start: Time,
    /// Latest allowable finish time (from backward pass).
    pub latest_end: Time,
}

impl ActivityTiming {
    pub fn slack(&self) -> Time {
        self.latest_start - self.earliest_start
    }

    pub fn is_critical(&self) -> bool {
        self.slack() == 0
    }
}
