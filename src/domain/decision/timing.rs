//! Change-window and lock timing.
//!
//! Both windows run from the same instant, the first selection of the
//! cycle. Elapsed time is computed once and compared against both.

use chrono::Duration;
use serde::{Serialize, Serializer};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Durations that gate a cycle after its first selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockTimings {
    change_window: Duration,
    lock: Duration,
}

impl LockTimings {
    /// Creates timings, rejecting a lock shorter than the change window.
    pub fn new(change_window: Duration, lock: Duration) -> Result<Self, ValidationError> {
        if change_window <= Duration::zero() {
            return Err(ValidationError::out_of_range(
                "change_window_ms",
                1,
                lock.num_milliseconds(),
                change_window.num_milliseconds(),
            ));
        }
        if lock < change_window {
            return Err(ValidationError::out_of_range(
                "lock_ms",
                change_window.num_milliseconds(),
                i64::MAX,
                lock.num_milliseconds(),
            ));
        }
        Ok(Self {
            change_window,
            lock,
        })
    }

    pub fn change_window(&self) -> Duration {
        self.change_window
    }

    pub fn lock(&self) -> Duration {
        self.lock
    }

    /// Time since the lock started, clamped at zero.
    ///
    /// A wall clock behind the start instant counts as no time elapsed.
    pub fn elapsed(&self, lock_started_at: Option<Timestamp>, now: Timestamp) -> Duration {
        lock_started_at
            .map(|start| now.duration_since(&start).max(Duration::zero()))
            .unwrap_or_else(Duration::zero)
    }

    /// Derived timer fields for a cycle at `now`.
    pub fn view(&self, lock_started_at: Option<Timestamp>, now: Timestamp) -> TimerView {
        let Some(started) = lock_started_at else {
            return TimerView::idle();
        };
        let elapsed = self.elapsed(Some(started), now);
        TimerView {
            elapsed_since_lock: elapsed,
            change_window_remaining: (self.change_window - elapsed).max(Duration::zero()),
            lock_remaining: (self.lock - elapsed).max(Duration::zero()),
            is_change_window_closed: elapsed >= self.change_window,
            is_lock_expired: elapsed >= self.lock,
        }
    }
}

impl Default for LockTimings {
    /// Two minute change window, five minute lock.
    fn default() -> Self {
        Self {
            change_window: Duration::minutes(2),
            lock: Duration::minutes(5),
        }
    }
}

/// Timer fields the presentation layer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    #[serde(rename = "elapsedSinceLockMs", serialize_with = "as_millis")]
    pub elapsed_since_lock: Duration,
    #[serde(rename = "changeWindowRemainingMs", serialize_with = "as_millis")]
    pub change_window_remaining: Duration,
    #[serde(rename = "lockRemainingMs", serialize_with = "as_millis")]
    pub lock_remaining: Duration,
    pub is_change_window_closed: bool,
    pub is_lock_expired: bool,
}

impl TimerView {
    /// Timers of a cycle with no selection yet.
    pub fn idle() -> Self {
        Self {
            elapsed_since_lock: Duration::zero(),
            change_window_remaining: Duration::zero(),
            lock_remaining: Duration::zero(),
            is_change_window_closed: false,
            is_lock_expired: false,
        }
    }

    pub fn change_window_label(&self) -> String {
        if self.is_change_window_closed {
            "Change window closed".to_string()
        } else {
            format!(
                "You can switch for {}",
                format_countdown(self.change_window_remaining)
            )
        }
    }

    pub fn lock_label(&self) -> String {
        if self.is_lock_expired {
            "Lock expired".to_string()
        } else {
            format!("Locked for {}", format_countdown(self.lock_remaining))
        }
    }
}

/// Renders a remaining duration as `m:ss`, flooring partial seconds.
pub fn format_countdown(remaining: Duration) -> String {
    let clamped = remaining.max(Duration::zero());
    let minutes = clamped.num_minutes();
    let seconds = clamped.num_seconds() % 60;
    format!("{}:{:02}", minutes, seconds)
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_milliseconds())
}
