//! Color wipe
//!
//! Paints one more element per step, starting at the front position and
//! moving in the direction of travel. Once the ring is covered the next
//! active palette color starts wiping over the previous one.

use embassy_time::{Duration, Instant};

use super::{Animation, FrameInputs};
use crate::Frame;
use crate::clock::{AnimationClock, SpeedCurve};
use crate::color::{Palette, Rgb};
use crate::error::ConfigError;
use crate::math8::scale_rgb;
use crate::ring::{Direction, RingBuffer};

const DEFAULT_SLOWEST_MS: u64 = 80;
const DEFAULT_FASTEST_MS: u64 = 10;

/// Wipe tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WipeConfig {
    pub speed: SpeedCurve,
}

impl Default for WipeConfig {
    fn default() -> Self {
        Self {
            speed: SpeedCurve {
                slowest: Duration::from_millis(DEFAULT_SLOWEST_MS),
                fastest: Duration::from_millis(DEFAULT_FASTEST_MS),
                ..SpeedCurve::default()
            },
        }
    }
}

impl WipeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.speed.validate()
    }
}

#[derive(Debug, Clone)]
pub struct WipeEngine<const N: usize> {
    speed: SpeedCurve,
    palette: Palette,
    clock: AnimationClock,
    /// Anchor the wipe starts from
    ring: RingBuffer<N>,
    /// Elements painted with the current color
    filled: usize,
    /// Index into the active palette colors
    color_index: usize,
    painted: Frame<N>,
    frame: Frame<N>,
}

impl<const N: usize> WipeEngine<N> {
    pub fn new(config: &WipeConfig, palette: Palette) -> Self {
        Self {
            speed: config.speed,
            palette,
            clock: AnimationClock::new(),
            ring: RingBuffer::new(),
            filled: 0,
            color_index: 0,
            painted: [Rgb::default(); N],
            frame: [Rgb::default(); N],
        }
    }

    /// Color currently being wiped in; black when no color is active
    pub fn wipe_color(&self) -> Rgb {
        let colors = self.palette.active_rgb();
        if colors.is_empty() {
            return Rgb::default();
        }
        colors[self.color_index % colors.len()]
    }

    /// Elements covered by the current color so far
    pub const fn filled(&self) -> usize {
        self.filled
    }

    pub fn tick(
        &mut self,
        now: Instant,
        speed: f32,
        brightness: u8,
        direction: Direction,
    ) -> Option<&Frame<N>> {
        if N == 0 || !self.clock.try_step(now, self.speed.interval_for(speed)) {
            return None;
        }

        let index = self.ring.physical_index_of(self.filled, direction);
        self.painted[index] = self.wipe_color();
        self.filled += 1;
        if self.filled >= N {
            self.filled = 0;
            self.color_index = self.color_index.wrapping_add(1);
        }

        for (led, painted) in self.frame.iter_mut().zip(self.painted.iter()) {
            *led = scale_rgb(*painted, brightness);
        }
        Some(&self.frame)
    }

    pub fn next_step_in(&self, now: Instant, speed: f32) -> Duration {
        self.clock.remaining(now, self.speed.interval_for(speed))
    }

    pub fn configure_palette(&mut self, colors: &[Rgb]) {
        self.palette.configure(colors);
        self.color_index = 0;
    }

    /// Restart the wipe from `index`
    pub const fn set_front_position(&mut self, index: usize) {
        self.ring.set_front(index);
        self.filled = 0;
    }

    pub fn reset(&mut self) {
        self.filled = 0;
        self.color_index = 0;
        self.painted = [Rgb::default(); N];
        self.clock.reset();
    }
}

impl<const N: usize> Animation<N> for WipeEngine<N> {
    fn poll(&mut self, now: Instant, inputs: FrameInputs) -> Option<&Frame<N>> {
        self.tick(now, inputs.speed, inputs.brightness, inputs.direction)
    }

    fn next_step_in(&self, now: Instant, inputs: FrameInputs) -> Duration {
        WipeEngine::next_step_in(self, now, inputs.speed)
    }

    fn configure_palette(&mut self, colors: &[Rgb]) {
        WipeEngine::configure_palette(self, colors);
    }

    fn set_front_position(&mut self, index: usize) {
        WipeEngine::set_front_position(self, index);
    }

    fn front_position(&self) -> Option<usize> {
        Some(self.ring.lead())
    }

    fn reset(&mut self) {
        WipeEngine::reset(self);
    }
}
