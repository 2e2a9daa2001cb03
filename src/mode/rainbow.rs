//! Rainbow with a white segment running over it
//!
//! The rainbow spans the whole ring once and drifts on its own frame
//! clock. A white segment moves one slot per speed-derived interval in
//! the direction of travel.

use embassy_time::{Duration, Instant};

use super::{Animation, FrameInputs};
use crate::Frame;
use crate::clock::{AnimationClock, SpeedCurve};
use crate::color::{HsvColor, Hue, Rgb, hsv_to_rgb};
use crate::error::ConfigError;
use crate::gamma::gamma_rgb;
use crate::math8::scale_rgb;
use crate::ring::{Direction, RingBuffer};

const DEFAULT_FRAME_MS: u64 = 16;
const DEFAULT_WHITE_LENGTH: usize = 4;
const DEFAULT_HUE_STEP: u16 = 256;
const DEFAULT_SLOWEST_MS: u64 = 150;
const DEFAULT_FASTEST_MS: u64 = 20;
const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainbowConfig {
    /// Rainbow drift cadence, independent of speed
    pub frame_interval: Duration,
    /// Speed curve of the white segment
    pub speed: SpeedCurve,
    /// White segment length, limited to one less than the ring
    pub white_length: usize,
    /// Hue advance per drift frame, 65536 units per turn
    pub hue_step: u16,
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
            speed: SpeedCurve {
                slowest: Duration::from_millis(DEFAULT_SLOWEST_MS),
                fastest: Duration::from_millis(DEFAULT_FASTEST_MS),
                ..SpeedCurve::default()
            },
            white_length: DEFAULT_WHITE_LENGTH,
            hue_step: DEFAULT_HUE_STEP,
        }
    }
}

impl RainbowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval.as_millis() == 0 {
            return Err(ConfigError::ParameterOutOfRange("frame_interval"));
        }
        self.speed.validate()
    }
}

#[derive(Debug, Clone)]
pub struct RainbowEngine<const N: usize> {
    frame_interval: Duration,
    speed: SpeedCurve,
    white_length: usize,
    hue_step: u16,
    drift_clock: AnimationClock,
    white_clock: AnimationClock,
    first_hue: Hue,
    /// Tail of the white segment
    ring: RingBuffer<N>,
    frame: Frame<N>,
}

impl<const N: usize> RainbowEngine<N> {
    pub fn new(config: &RainbowConfig) -> Self {
        Self {
            frame_interval: config.frame_interval,
            speed: config.speed,
            white_length: config.white_length.min(N.saturating_sub(1)),
            hue_step: config.hue_step,
            drift_clock: AnimationClock::new(),
            white_clock: AnimationClock::new(),
            first_hue: Hue::RED,
            ring: RingBuffer::new(),
            frame: [Rgb::default(); N],
        }
    }

    pub const fn first_hue(&self) -> Hue {
        self.first_hue
    }

    /// Physical index where the white segment begins
    pub const fn white_tail(&self) -> usize {
        self.ring.lead()
    }

    pub const fn white_length(&self) -> usize {
        self.white_length
    }

    pub fn tick(
        &mut self,
        now: Instant,
        speed: f32,
        brightness: u8,
        direction: Direction,
    ) -> Option<&Frame<N>> {
        let drift_due = self.drift_clock.try_step(now, self.frame_interval);
        let white_due = self.white_clock.try_step(now, self.speed.interval_for(speed));
        if !drift_due && !white_due {
            return None;
        }

        self.render(brightness, direction);

        if drift_due {
            self.first_hue = Hue(self.first_hue.0.wrapping_add(self.hue_step));
        }
        if white_due {
            self.ring.advance(direction);
        }
        Some(&self.frame)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, brightness: u8, direction: Direction) {
        for (i, led) in self.frame.iter_mut().enumerate() {
            let color = if self.ring.logical_offset_of(i, direction) < self.white_length {
                WHITE
            } else {
                let spread = (i as u64 * 65_536 / N as u64) as u16;
                let hue = Hue(self.first_hue.0.wrapping_add(spread));
                gamma_rgb(hsv_to_rgb(HsvColor::new(hue, 255, 255)))
            };
            *led = scale_rgb(color, brightness);
        }
    }

    pub fn next_step_in(&self, now: Instant, speed: f32) -> Duration {
        let drift = self.drift_clock.remaining(now, self.frame_interval);
        let white = self.white_clock.remaining(now, self.speed.interval_for(speed));
        drift.min(white)
    }

    pub fn reset(&mut self) {
        self.first_hue = Hue::RED;
        self.drift_clock.reset();
        self.white_clock.reset();
    }
}

impl<const N: usize> Animation<N> for RainbowEngine<N> {
    fn poll(&mut self, now: Instant, inputs: FrameInputs) -> Option<&Frame<N>> {
        self.tick(now, inputs.speed, inputs.brightness, inputs.direction)
    }

    fn next_step_in(&self, now: Instant, inputs: FrameInputs) -> Duration {
        RainbowEngine::next_step_in(self, now, inputs.speed)
    }

    /// The rainbow ignores the accent palette
    fn configure_palette(&mut self, _colors: &[Rgb]) {}

    fn set_front_position(&mut self, index: usize) {
        self.ring.set_front(index);
    }

    fn front_position(&self) -> Option<usize> {
        Some(self.ring.lead())
    }

    fn reset(&mut self) {
        RainbowEngine::reset(self);
    }
}
