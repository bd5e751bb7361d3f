//! Timing configuration

use chrono::Duration as ChronoDuration;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::decision::LockTimings;

const MAX_TICK_INTERVAL_MS: u64 = 60_000;

/// Change window, lock and tick cadence
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    /// Seconds after the first selection during which the choice may change
    #[serde(default = "default_change_window_secs")]
    pub change_window_secs: u64,

    /// Seconds after the first selection until the reveal
    #[serde(default = "default_lock_secs")]
    pub lock_secs: u64,

    /// How often the scheduler ticks the cycle
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl TimingConfig {
    /// Validate timing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.change_window_secs == 0 {
            return Err(ValidationError::InvalidChangeWindow);
        }
        if self.lock_secs == 0 {
            return Err(ValidationError::InvalidLockDuration);
        }
        if self.lock_secs < self.change_window_secs {
            return Err(ValidationError::LockShorterThanWindow {
                change_window_secs: self.change_window_secs,
                lock_secs: self.lock_secs,
            });
        }
        if self.tick_interval_ms == 0 || self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(ValidationError::InvalidTickInterval(self.tick_interval_ms));
        }
        Ok(())
    }

    /// Engine timings. Call after `validate`.
    pub fn lock_timings(&self) -> Result<LockTimings, ValidationError> {
        let change_window = seconds(self.change_window_secs)?;
        let lock = seconds(self.lock_secs)?;
        LockTimings::new(change_window, lock).map_err(|_| ValidationError::LockShorterThanWindow {
            change_window_secs: self.change_window_secs,
            lock_secs: self.lock_secs,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn seconds(secs: u64) -> Result<ChronoDuration, ValidationError> {
    i64::try_from(secs)
        .ok()
        .filter(|s| *s <= i64::MAX / 1_000)
        .map(ChronoDuration::seconds)
        .ok_or(ValidationError::InvalidLockDuration)
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            change_window_secs: default_change_window_secs(),
            lock_secs: default_lock_secs(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_change_window_secs() -> u64 {
    120
}

fn default_lock_secs() -> u64 {
    300
}

fn default_tick_interval_ms() -> u64 {
    1_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let config = TimingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lock_timings().unwrap(), LockTimings::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let window = TimingConfig {
            change_window_secs: 0,
            ..TimingConfig::default()
        };
        assert_eq!(window.validate(), Err(ValidationError::InvalidChangeWindow));

        let lock = TimingConfig {
            lock_secs: 0,
            ..TimingConfig::default()
        };
        assert_eq!(lock.validate(), Err(ValidationError::InvalidLockDuration));
    }

    #[test]
    fn lock_shorter_than_window_is_rejected() {
        let config = TimingConfig {
            change_window_secs: 300,
            lock_secs: 120,
            ..TimingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::LockShorterThanWindow { .. })
        ));
        assert!(config.lock_timings().is_err());
    }

    #[test]
    fn tick_interval_bounds() {
        let zero = TimingConfig {
            tick_interval_ms: 0,
            ..TimingConfig::default()
        };
        let slow = TimingConfig {
            tick_interval_ms: 60_001,
            ..TimingConfig::default()
        };
        let max = TimingConfig {
            tick_interval_ms: 60_000,
            ..TimingConfig::default()
        };
        assert_eq!(zero.validate(), Err(ValidationError::InvalidTickInterval(0)));
        assert!(slow.validate().is_err());
        assert!(max.validate().is_ok());
    }
}
