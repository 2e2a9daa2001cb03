//! Per-element sparkle
//!
//! Every element random-walks its brightness around a shared base level.
//! Most new targets are small jitters; occasionally an element takes a
//! deep excursion, which reads as a distinct twinkle against the steady
//! glow. Elements ease towards their target by a fixed fraction per step.

use embassy_time::{Duration, Instant};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::{Animation, FrameInputs};
use crate::Frame;
use crate::clock::{AnimationClock, SpeedCurve};
use crate::color::{Palette, Rgb, hsv_to_rgb};
use crate::error::{ConfigError, check_unit};
use crate::math8::{scale8, unit_to_u8};

const DEFAULT_BASE_LEVEL: f32 = 0.55;
const DEFAULT_JITTER: f32 = 0.08;
const DEFAULT_DEEP_CHANCE: f32 = 0.15;
const DEFAULT_DEEP_MIN: f32 = 0.25;
const DEFAULT_DEEP_MAX: f32 = 0.45;
const DEFAULT_SMOOTHING: f32 = 0.10;
const DEFAULT_EPSILON: f32 = 0.01;
const DEFAULT_STEP_MS: u64 = 30;
const DEFAULT_SEED: u64 = 0x5eed_1e55;

/// Sparkle tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleConfig {
    pub speed: SpeedCurve,
    /// Level every element wanders around, `[0, 1]`
    pub base_level: f32,
    /// Largest ordinary offset from the base
    pub jitter: f32,
    /// Probability that a new target is a deep excursion
    pub deep_chance: f32,
    /// Smallest deep excursion
    pub deep_min: f32,
    /// Largest deep excursion
    pub deep_max: f32,
    /// Fraction of the remaining distance covered each step
    pub smoothing: f32,
    /// Distance at which an element counts as arrived
    pub epsilon: f32,
    pub seed: u64,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            speed: SpeedCurve {
                slowest: Duration::from_millis(DEFAULT_STEP_MS * 2),
                fastest: Duration::from_millis(DEFAULT_STEP_MS / 3),
                ..SpeedCurve::default()
            },
            base_level: DEFAULT_BASE_LEVEL,
            jitter: DEFAULT_JITTER,
            deep_chance: DEFAULT_DEEP_CHANCE,
            deep_min: DEFAULT_DEEP_MIN,
            deep_max: DEFAULT_DEEP_MAX,
            smoothing: DEFAULT_SMOOTHING,
            epsilon: DEFAULT_EPSILON,
            seed: DEFAULT_SEED,
        }
    }
}

impl SparkleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.speed.validate()?;
        check_unit("base_level", self.base_level)?;
        check_unit("jitter", self.jitter)?;
        check_unit("deep_chance", self.deep_chance)?;
        check_unit("deep_min", self.deep_min)?;
        check_unit("deep_max", self.deep_max)?;
        if self.deep_min > self.deep_max {
            return Err(ConfigError::ParameterOutOfRange("deep_min"));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::ParameterOutOfRange("smoothing"));
        }
        if !(self.epsilon > 0.0 && self.epsilon < 1.0) {
            return Err(ConfigError::ParameterOutOfRange("epsilon"));
        }
        Ok(())
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Uniform value in `[0, 1)` from the top 24 bits
#[allow(clippy::cast_precision_loss)]
fn next_unit<R: RngCore>(rng: &mut R) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

fn coin<R: RngCore>(rng: &mut R) -> bool {
    rng.next_u32() & 0x8000_0000 != 0
}

/// Single-hue twinkling around a base brightness
#[derive(Debug, Clone)]
pub struct SparkleEngine<const N: usize, R: RngCore = SmallRng> {
    config: SparkleConfig,
    palette: Palette,
    clock: AnimationClock,
    rng: R,
    current: [f32; N],
    target: [f32; N],
    frame: Frame<N>,
}

impl<const N: usize> SparkleEngine<N> {
    /// Sparkle driven by a small generator seeded from the config
    pub fn new(config: &SparkleConfig, palette: Palette) -> Self {
        Self::with_rng(config, palette, SmallRng::seed_from_u64(config.seed))
    }
}

impl<const N: usize, R: RngCore> SparkleEngine<N, R> {
    pub fn with_rng(config: &SparkleConfig, palette: Palette, rng: R) -> Self {
        let config = Self::sanitize(*config);
        let base = config.base_level;
        Self {
            config,
            palette,
            clock: AnimationClock::new(),
            rng,
            current: [base; N],
            target: [base; N],
            frame: [Rgb::default(); N],
        }
    }

    fn sanitize(mut config: SparkleConfig) -> SparkleConfig {
        config.base_level = clamp_unit(config.base_level);
        config.jitter = clamp_unit(config.jitter);
        config.deep_chance = clamp_unit(config.deep_chance);
        config.deep_min = clamp_unit(config.deep_min);
        config.deep_max = clamp_unit(config.deep_max).max(config.deep_min);
        config.smoothing = if config.smoothing > 0.0 {
            config.smoothing.min(1.0)
        } else {
            DEFAULT_SMOOTHING
        };
        config.epsilon = if config.epsilon > 0.0 {
            config.epsilon.min(1.0)
        } else {
            DEFAULT_EPSILON
        };
        config
    }

    pub fn configure_palette(&mut self, colors: &[Rgb]) {
        self.palette.configure(colors);
    }

    /// Current brightness of every element, `[0, 1]`
    pub const fn levels(&self) -> &[f32; N] {
        &self.current
    }

    /// Brightness every element is heading towards, `[0, 1]`
    pub const fn targets(&self) -> &[f32; N] {
        &self.target
    }

    pub const fn frame(&self) -> &Frame<N> {
        &self.frame
    }

    /// Render the next frame if a step is due
    pub fn tick(&mut self, now: Instant, speed: f32, brightness: u8) -> Option<&Frame<N>> {
        let interval = self.config.speed.interval_for(speed);
        if !self.clock.try_step(now, interval) {
            return None;
        }

        for i in 0..N {
            self.step_element(i);
        }
        self.render(brightness);
        Some(&self.frame)
    }

    pub fn next_step_in(&self, now: Instant, speed: f32) -> Duration {
        self.clock.remaining(now, self.config.speed.interval_for(speed))
    }

    fn step_element(&mut self, i: usize) {
        if libm::fabsf(self.current[i] - self.target[i]) < self.config.epsilon {
            self.target[i] = self.draw_target();
        }
        let current = self.current[i];
        let eased = current + (self.target[i] - current) * self.config.smoothing;
        self.current[i] = clamp_unit(eased);
    }

    /// New target: usually a small jitter, sometimes a deep excursion
    fn draw_target(&mut self) -> f32 {
        let config = self.config;
        let magnitude = next_unit(&mut self.rng);
        let offset = if next_unit(&mut self.rng) < config.deep_chance {
            config.deep_min + (config.deep_max - config.deep_min) * magnitude
        } else {
            config.jitter * magnitude
        };
        let signed = if coin(&mut self.rng) { offset } else { -offset };
        clamp_unit(config.base_level + signed)
    }

    fn render(&mut self, brightness: u8) {
        let primary = self.palette.primary().hsv();
        for (led, level) in self.frame.iter_mut().zip(self.current.iter()) {
            let val = scale8(primary.val, unit_to_u8(*level));
            *led = hsv_to_rgb(primary.with_val(scale8(val, brightness)));
        }
    }

    /// Put every element back on the base level
    pub fn reset(&mut self) {
        let base = self.config.base_level;
        self.current = [base; N];
        self.target = [base; N];
        self.clock.reset();
    }
}

impl<const N: usize, R: RngCore> Animation<N> for SparkleEngine<N, R> {
    fn poll(&mut self, now: Instant, inputs: FrameInputs) -> Option<&Frame<N>> {
        self.tick(now, inputs.speed, inputs.brightness)
    }

    fn next_step_in(&self, now: Instant, inputs: FrameInputs) -> Duration {
        SparkleEngine::next_step_in(self, now, inputs.speed)
    }

    fn configure_palette(&mut self, colors: &[Rgb]) {
        SparkleEngine::configure_palette(self, colors);
    }

    fn reset(&mut self) {
        SparkleEngine::reset(self);
    }
}
