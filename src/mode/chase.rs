//! Rotating gradient chase
//!
//! The palette gradient is anchored to the ring's lead position. Between
//! two lead positions the whole pattern cross-fades towards where it will
//! be after the next advance, using one global progress value, so the
//! gradient appears to slide smoothly one slot per `transition_steps`
//! steps.

use embassy_time::{Duration, Instant};

use super::{Animation, FrameInputs};
use crate::Frame;
use crate::clock::{AnimationClock, SpeedCurve};
use crate::color::{GradientCompositor, HsvColor, Palette, Rgb, blend_hsv, hsv_to_rgb};
use crate::error::ConfigError;
use crate::math8::scale8;
use crate::ring::{Direction, RingBuffer};

const DEFAULT_TRANSITION_STEPS: u16 = 8;

/// Chase tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseConfig {
    /// Speed to step-interval mapping
    pub speed: SpeedCurve,
    /// Steps needed to slide the pattern by one slot
    pub transition_steps: u16,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            speed: SpeedCurve::default(),
            transition_steps: DEFAULT_TRANSITION_STEPS,
        }
    }
}

impl ChaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_steps == 0 {
            return Err(ConfigError::ZeroTransitionSteps);
        }
        self.speed.validate()
    }
}

/// Rotating multi-color gradient
#[derive(Debug, Clone)]
pub struct ChaseEngine<const N: usize> {
    speed: SpeedCurve,
    transition_steps: u16,
    palette: Palette,
    ring: RingBuffer<N>,
    clock: AnimationClock,
    /// Sub-step counter, `0..transition_steps`
    step: u16,
    shades: [HsvColor; N],
    frame: Frame<N>,
}

impl<const N: usize> ChaseEngine<N> {
    pub fn new(config: &ChaseConfig, palette: Palette) -> Self {
        Self {
            speed: config.speed,
            transition_steps: config.transition_steps.max(1),
            palette,
            ring: RingBuffer::new(),
            clock: AnimationClock::new(),
            step: 0,
            shades: [HsvColor::BLACK; N],
            frame: [Rgb::default(); N],
        }
    }

    /// Replace the accent colors; slots past `colors` are switched off
    pub fn configure_palette(&mut self, colors: &[Rgb]) {
        self.palette.configure(colors);
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Re-anchor the lead at an arbitrary physical index
    pub const fn set_front_position(&mut self, index: usize) {
        self.ring.set_front(index);
    }

    pub const fn lead_position(&self) -> usize {
        self.ring.lead()
    }

    pub const fn transition_steps(&self) -> u16 {
        self.transition_steps
    }

    /// Cross-fade progress towards the next slot, `[0, 1)`
    pub fn transition_progress(&self) -> f32 {
        f32::from(self.step) / f32::from(self.transition_steps)
    }

    /// Last rendered frame
    pub const fn frame(&self) -> &Frame<N> {
        &self.frame
    }

    /// Render the next frame if a step is due
    ///
    /// Returns `None` while the current step interval has not elapsed.
    pub fn tick(
        &mut self,
        now: Instant,
        speed: f32,
        brightness: u8,
        direction: Direction,
    ) -> Option<&Frame<N>> {
        let interval = self.speed.interval_for(speed);
        if !self.clock.try_step(now, interval) {
            return None;
        }

        self.render(brightness, direction);
        self.advance_transition(direction);
        Some(&self.frame)
    }

    /// Time until the next step would be accepted
    pub fn next_step_in(&self, now: Instant, speed: f32) -> Duration {
        self.clock.remaining(now, self.speed.interval_for(speed))
    }

    fn render(&mut self, brightness: u8, direction: Direction) {
        GradientCompositor::new(&self.palette).fill_by_offset(&mut self.shades);

        let progress = self.transition_progress();
        for (physical, led) in self.frame.iter_mut().enumerate() {
            let offset = self.ring.logical_offset_of(physical, direction);
            // After the next advance this element sits one slot closer to the lead
            let next_offset = (offset + N - 1) % N;

            let here = self.shades[offset];
            let next = self.shades[next_offset];
            let blended = blend_hsv(here, next, progress);

            *led = hsv_to_rgb(blended.with_val(scale8(blended.val, brightness)));
        }
    }

    /// Step the cross-fade; the lead moves only when it wraps
    fn advance_transition(&mut self, direction: Direction) {
        self.step += 1;
        if self.step >= self.transition_steps {
            self.step = 0;
            self.ring.advance(direction);
        }
    }

    /// Restart from the first sub-step and let the next poll through
    pub fn reset(&mut self) {
        self.step = 0;
        self.clock.reset();
    }
}

impl<const N: usize> Animation<N> for ChaseEngine<N> {
    fn poll(&mut self, now: Instant, inputs: FrameInputs) -> Option<&Frame<N>> {
        self.tick(now, inputs.speed, inputs.brightness, inputs.direction)
    }

    fn next_step_in(&self, now: Instant, inputs: FrameInputs) -> Duration {
        ChaseEngine::next_step_in(self, now, inputs.speed)
    }

    fn configure_palette(&mut self, colors: &[Rgb]) {
        ChaseEngine::configure_palette(self, colors);
    }

    fn set_front_position(&mut self, index: usize) {
        ChaseEngine::set_front_position(self, index);
    }

    fn front_position(&self) -> Option<usize> {
        Some(self.lead_position())
    }

    fn reset(&mut self) {
        ChaseEngine::reset(self);
    }
}
