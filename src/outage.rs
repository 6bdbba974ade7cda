//! Outage state tracking: detects up/down transitions and measures duration

use chrono::{DateTime, Duration, Utc};

/// A state change produced by feeding one reachability verdict to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Connectivity was just lost.
    Down,
    /// Connectivity came back after an outage of the given length.
    Restored { duration: Duration },
}

/// Two-state machine: `Connected` (no outage record) or `Disconnected`
/// (outage start recorded). Starts `Connected`.
#[derive(Debug, Default)]
pub struct OutageTracker {
    down_since: Option<DateTime<Utc>>,
}

impl OutageTracker {
    pub fn new() -> Self {
        Self { down_since: None }
    }

    /// Feed one reachability verdict observed at `now`; returns the
    /// transition it caused, if any. Same-state observations return `None`.
    pub fn observe(&mut self, up: bool, now: DateTime<Utc>) -> Option<Transition> {
        match (self.down_since, up) {
            (None, false) => {
                self.down_since = Some(now);
                Some(Transition::Down)
            }
            (Some(since), true) => {
                self.down_since = None;
                Some(Transition::Restored {
                    duration: now - since,
                })
            }
            _ => None,
        }
    }
}

/// Render an outage duration as `H:MM:SS.ffffff`, hours unpadded and
/// unbounded, the fraction omitted for whole-second durations. Negative
/// durations (clock steps) clamp to zero.
pub fn format_duration(duration: Duration) -> String {
    let total_us = duration.num_microseconds().unwrap_or(i64::MAX).max(0);
    let us = total_us % 1_000_000;
    let total_secs = total_us / 1_000_000;
    let clock = format!(
        "{}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60
    );
    if us == 0 {
        clock
    } else {
        format!("{clock}.{us:06}")
    }
}
