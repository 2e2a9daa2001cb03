//! Non-blocking step pacing
//!
//! The clock never waits. Callers poll it with the current time and it
//! answers whether the next animation step is due.

use embassy_time::{Duration, Instant};

use crate::error::ConfigError;

/// Shortest interval any speed may map to
pub const MIN_STEP_INTERVAL: Duration = Duration::from_millis(1);

const DEFAULT_SLOWEST_MS: u64 = 120;
const DEFAULT_FASTEST_MS: u64 = 8;
const DEFAULT_FULL_SPEED: f32 = 255.0;

/// Maps an external speed reading to a step interval
///
/// Zero speed gives `slowest`, `full_speed` and above give `fastest`,
/// linear in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedCurve {
    pub slowest: Duration,
    pub fastest: Duration,
    pub full_speed: f32,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            slowest: Duration::from_millis(DEFAULT_SLOWEST_MS),
            fastest: Duration::from_millis(DEFAULT_FASTEST_MS),
            full_speed: DEFAULT_FULL_SPEED,
        }
    }
}

impl SpeedCurve {
    /// Curve that ignores speed and always steps every `interval`
    pub const fn fixed(interval: Duration) -> Self {
        Self {
            slowest: interval,
            fastest: interval,
            full_speed: DEFAULT_FULL_SPEED,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.full_speed.is_finite() || self.full_speed <= 0.0 {
            return Err(ConfigError::InvalidFullSpeed);
        }
        if self.fastest > self.slowest {
            return Err(ConfigError::InvertedSpeedCurve);
        }
        Ok(())
    }

    /// Step interval for `speed`; higher speed gives a shorter interval
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn interval_for(&self, speed: f32) -> Duration {
        let full_speed = if self.full_speed.is_finite() && self.full_speed > 0.0 {
            self.full_speed
        } else {
            DEFAULT_FULL_SPEED
        };
        let ratio = if speed.is_nan() {
            0.0
        } else {
            (speed / full_speed).clamp(0.0, 1.0)
        };

        let slowest = self.slowest.as_millis();
        let fastest = self.fastest.as_millis().min(slowest);
        let span = (slowest - fastest) as f32;
        let shortened = libm::roundf(span * ratio) as u64;

        let interval = Duration::from_millis(slowest - shortened.min(slowest - fastest));
        interval.max(MIN_STEP_INTERVAL)
    }
}

/// Gate that lets one step through per interval
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationClock {
    last_step: Option<Instant>,
}

impl AnimationClock {
    /// A fresh clock lets the very first poll through
    pub const fn new() -> Self {
        Self { last_step: None }
    }

    pub const fn last_step(&self) -> Option<Instant> {
        self.last_step
    }

    /// Whether `interval` has elapsed since the last committed step
    pub fn should_step(&self, now: Instant, interval: Duration) -> bool {
        match self.last_step {
            None => true,
            Some(last) => elapsed_since(now, last) >= interval.max(MIN_STEP_INTERVAL),
        }
    }

    /// Record that a step happened at `now`
    pub const fn commit(&mut self, now: Instant) {
        self.last_step = Some(now);
    }

    /// Check and commit in one go
    pub fn try_step(&mut self, now: Instant, interval: Duration) -> bool {
        if !self.should_step(now, interval) {
            return false;
        }
        self.commit(now);
        true
    }

    /// Time left until the next step is due, zero if it already is
    pub fn remaining(&self, now: Instant, interval: Duration) -> Duration {
        let Some(last) = self.last_step else {
            return Duration::from_millis(0);
        };
        let interval = interval.max(MIN_STEP_INTERVAL);
        interval
            .checked_sub(elapsed_since(now, last))
            .unwrap_or(Duration::from_millis(0))
    }

    /// Forget the last step; the next poll steps immediately
    pub const fn reset(&mut self) {
        self.last_step = None;
    }
}

/// Elapsed time, treating a clock that went backwards as no time passed
fn elapsed_since(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier)
        .unwrap_or(Duration::from_millis(0))
}
