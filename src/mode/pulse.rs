//! Whole-ring pulse
//!
//! Ramps a single color up to full and back down to black, one level per
//! step, through the gamma curve so the ramp looks even to the eye.

use embassy_time::{Duration, Instant};

use super::{Animation, FrameInputs};
use crate::Frame;
use crate::clock::{AnimationClock, SpeedCurve};
use crate::color::{Rgb, fill};
use crate::error::ConfigError;
use crate::gamma::gamma8;
use crate::math8::{scale8, scale_rgb};

const DEFAULT_SLOWEST_MS: u64 = 12;
const DEFAULT_FASTEST_MS: u64 = 2;
const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseConfig {
    pub speed: SpeedCurve,
    pub color: Rgb,
    /// Level change per step
    pub level_step: u8,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            speed: SpeedCurve {
                slowest: Duration::from_millis(DEFAULT_SLOWEST_MS),
                fastest: Duration::from_millis(DEFAULT_FASTEST_MS),
                ..SpeedCurve::default()
            },
            color: WHITE,
            level_step: 1,
        }
    }
}

impl PulseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level_step == 0 {
            return Err(ConfigError::ParameterOutOfRange("level_step"));
        }
        self.speed.validate()
    }
}

#[derive(Debug, Clone)]
pub struct PulseEngine<const N: usize> {
    speed: SpeedCurve,
    color: Rgb,
    level_step: u8,
    clock: AnimationClock,
    level: u8,
    rising: bool,
    frame: Frame<N>,
}

impl<const N: usize> PulseEngine<N> {
    pub fn new(config: &PulseConfig) -> Self {
        Self {
            speed: config.speed,
            color: config.color,
            level_step: config.level_step.max(1),
            clock: AnimationClock::new(),
            level: 0,
            rising: true,
            frame: [Rgb::default(); N],
        }
    }

    /// Linear pulse level before gamma correction
    pub const fn level(&self) -> u8 {
        self.level
    }

    pub const fn is_rising(&self) -> bool {
        self.rising
    }

    pub fn tick(&mut self, now: Instant, speed: f32, brightness: u8) -> Option<&Frame<N>> {
        if !self.clock.try_step(now, self.speed.interval_for(speed)) {
            return None;
        }

        let scale = scale8(gamma8(self.level), brightness);
        fill(&mut self.frame, scale_rgb(self.color, scale));
        self.advance_level();
        Some(&self.frame)
    }

    fn advance_level(&mut self) {
        if self.rising {
            self.level = self.level.saturating_add(self.level_step);
            if self.level == u8::MAX {
                self.rising = false;
            }
        } else {
            self.level = self.level.saturating_sub(self.level_step);
            if self.level == 0 {
                self.rising = true;
            }
        }
    }

    pub fn next_step_in(&self, now: Instant, speed: f32) -> Duration {
        self.clock.remaining(now, self.speed.interval_for(speed))
    }

    pub fn reset(&mut self) {
        self.level = 0;
        self.rising = true;
        self.clock.reset();
    }
}

impl<const N: usize> Animation<N> for PulseEngine<N> {
    fn poll(&mut self, now: Instant, inputs: FrameInputs) -> Option<&Frame<N>> {
        self.tick(now, inputs.speed, inputs.brightness)
    }

    fn next_step_in(&self, now: Instant, inputs: FrameInputs) -> Duration {
        PulseEngine::next_step_in(self, now, inputs.speed)
    }

    /// The pulse color is fixed by configuration
    fn configure_palette(&mut self, _colors: &[Rgb]) {}

    fn reset(&mut self) {
        PulseEngine::reset(self);
    }
}
