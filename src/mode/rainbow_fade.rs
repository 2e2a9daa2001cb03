//! Rainbow that fades in and out, followed by white breaths
//!
//! The rainbow runs `rainbow_loops` turns of the color wheel. Its value
//! rises by one fade level per frame during the first turn, stays at full
//! in between and falls again during the last turn. Then the whole ring
//! ramps white up and down `white_loops` times, holding at full for
//! `white_hold`. After `end_pause` the cycle starts over.

use embassy_time::{Duration, Instant};

use super::{Animation, FrameInputs};
use crate::Frame;
use crate::clock::{AnimationClock, MIN_STEP_INTERVAL, SpeedCurve};
use crate::color::{HsvColor, Hue, Rgb, fill, hsv_to_rgb};
use crate::error::ConfigError;
use crate::gamma::{gamma8, gamma_rgb};
use crate::math8::scale_rgb;

/// Fade levels between black and full value
pub const FADE_MAX: u8 = 100;

const HUE_TURN: u32 = 65_536;
const DEFAULT_SLOWEST_MS: u64 = 20;
const DEFAULT_FASTEST_MS: u64 = 2;
const DEFAULT_RAINBOW_LOOPS: u8 = 3;
const DEFAULT_WHITE_LOOPS: u8 = 1;
const DEFAULT_HUE_STEP: u16 = 256;
const DEFAULT_WHITE_HOLD_MS: u64 = 1000;
const DEFAULT_END_PAUSE_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainbowFadeConfig {
    /// Interval between rainbow frames
    pub speed: SpeedCurve,
    /// Turns of the color wheel per cycle
    pub rainbow_loops: u8,
    /// White breaths after the rainbow
    pub white_loops: u8,
    /// Hue advance per rainbow frame, 65536 units per turn
    pub hue_step: u16,
    /// Interval between white ramp levels
    pub ramp_interval: Duration,
    /// Pause at full white before ramping down
    pub white_hold: Duration,
    /// Pause before the next cycle
    pub end_pause: Duration,
}

impl Default for RainbowFadeConfig {
    fn default() -> Self {
        Self {
            speed: SpeedCurve {
                slowest: Duration::from_millis(DEFAULT_SLOWEST_MS),
                fastest: Duration::from_millis(DEFAULT_FASTEST_MS),
                ..SpeedCurve::default()
            },
            rainbow_loops: DEFAULT_RAINBOW_LOOPS,
            white_loops: DEFAULT_WHITE_LOOPS,
            hue_step: DEFAULT_HUE_STEP,
            ramp_interval: MIN_STEP_INTERVAL,
            white_hold: Duration::from_millis(DEFAULT_WHITE_HOLD_MS),
            end_pause: Duration::from_millis(DEFAULT_END_PAUSE_MS),
        }
    }
}

impl RainbowFadeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rainbow_loops == 0 {
            return Err(ConfigError::ParameterOutOfRange("rainbow_loops"));
        }
        if self.hue_step == 0 {
            return Err(ConfigError::ParameterOutOfRange("hue_step"));
        }
        self.speed.validate()
    }
}

/// Part of the cycle the engine is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainbowFadePhase {
    Rainbow,
    WhiteUp,
    WhiteDown,
}

#[derive(Debug, Clone)]
pub struct RainbowFadeEngine<const N: usize> {
    speed: SpeedCurve,
    rainbow_loops: u8,
    white_loops: u8,
    hue_step: u16,
    ramp_interval: Duration,
    white_hold: Duration,
    end_pause: Duration,

    clock: AnimationClock,
    phase: RainbowFadePhase,
    /// Hue of the first element, counted across all turns
    first_hue: u32,
    fade: u8,
    white_level: u8,
    white_loop: u8,
    /// One-off interval before the next step, used for pauses
    wait: Option<Duration>,
    frame: Frame<N>,
}

impl<const N: usize> RainbowFadeEngine<N> {
    pub fn new(config: &RainbowFadeConfig) -> Self {
        Self {
            speed: config.speed,
            rainbow_loops: config.rainbow_loops.max(1),
            white_loops: config.white_loops,
            hue_step: config.hue_step.max(1),
            ramp_interval: config.ramp_interval,
            white_hold: config.white_hold,
            end_pause: config.end_pause,
            clock: AnimationClock::new(),
            phase: RainbowFadePhase::Rainbow,
            first_hue: 0,
            fade: 0,
            white_level: 0,
            white_loop: 0,
            wait: None,
            frame: [Rgb::default(); N],
        }
    }

    pub const fn phase(&self) -> RainbowFadePhase {
        self.phase
    }

    /// Current fade level, `0..=FADE_MAX`
    pub const fn fade(&self) -> u8 {
        self.fade
    }

    pub const fn white_level(&self) -> u8 {
        self.white_level
    }

    fn interval(&self, speed: f32) -> Duration {
        if let Some(wait) = self.wait {
            return wait;
        }
        match self.phase {
            RainbowFadePhase::Rainbow => self.speed.interval_for(speed),
            RainbowFadePhase::WhiteUp | RainbowFadePhase::WhiteDown => self.ramp_interval,
        }
    }

    pub fn tick(&mut self, now: Instant, speed: f32, brightness: u8) -> Option<&Frame<N>> {
        let interval = self.interval(speed);
        if !self.clock.try_step(now, interval) {
            return None;
        }
        self.wait = None;

        match self.phase {
            RainbowFadePhase::Rainbow => {
                self.render_rainbow(brightness);
                self.advance_rainbow(interval);
            }
            RainbowFadePhase::WhiteUp => {
                self.render_white(brightness);
                if self.white_level == u8::MAX {
                    self.phase = RainbowFadePhase::WhiteDown;
                    self.wait = Some(self.white_hold);
                } else {
                    self.white_level += 1;
                }
            }
            RainbowFadePhase::WhiteDown => {
                self.render_white(brightness);
                if self.white_level == 0 {
                    self.finish_white_loop();
                } else {
                    self.white_level -= 1;
                }
            }
        }
        Some(&self.frame)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_rainbow(&mut self, brightness: u8) {
        let val = (u16::from(u8::MAX) * u16::from(self.fade) / u16::from(FADE_MAX)) as u8;
        let base = self.first_hue as u16;
        for (i, led) in self.frame.iter_mut().enumerate() {
            let spread = (i as u64 * u64::from(HUE_TURN) / N as u64) as u16;
            let color = HsvColor::new(Hue(base.wrapping_add(spread)), 255, val);
            *led = scale_rgb(gamma_rgb(hsv_to_rgb(color)), brightness);
        }
    }

    fn render_white(&mut self, brightness: u8) {
        let level = gamma8(self.white_level);
        let white = Rgb {
            r: level,
            g: level,
            b: level,
        };
        fill(&mut self.frame, scale_rgb(white, brightness));
    }

    /// Fade in on the first turn, out on the last, full in between
    fn advance_rainbow(&mut self, interval: Duration) {
        let last_turn = u32::from(self.rainbow_loops - 1) * HUE_TURN;
        if self.first_hue < HUE_TURN {
            self.fade = (self.fade + 1).min(FADE_MAX);
        } else if self.first_hue >= last_turn {
            self.fade = self.fade.saturating_sub(1);
        } else {
            self.fade = FADE_MAX;
        }

        self.first_hue += u32::from(self.hue_step);
        if self.first_hue < u32::from(self.rainbow_loops) * HUE_TURN {
            return;
        }

        if self.white_loops == 0 {
            self.restart();
        } else {
            self.phase = RainbowFadePhase::WhiteUp;
            self.white_level = 0;
            self.white_loop = 0;
            self.wait = Some(interval);
        }
    }

    fn finish_white_loop(&mut self) {
        self.white_loop += 1;
        if self.white_loop < self.white_loops {
            self.phase = RainbowFadePhase::WhiteUp;
        } else {
            self.restart();
        }
    }

    /// Back to a black rainbow after the end pause
    fn restart(&mut self) {
        self.phase = RainbowFadePhase::Rainbow;
        self.first_hue = 0;
        self.fade = 0;
        self.white_level = 0;
        self.white_loop = 0;
        self.wait = Some(self.end_pause);
    }

    pub fn next_step_in(&self, now: Instant, speed: f32) -> Duration {
        self.clock.remaining(now, self.interval(speed))
    }

    pub fn reset(&mut self) {
        self.restart();
        self.wait = None;
        self.clock.reset();
    }
}

impl<const N: usize> Animation<N> for RainbowFadeEngine<N> {
    fn poll(&mut self, now: Instant, inputs: FrameInputs) -> Option<&Frame<N>> {
        self.tick(now, inputs.speed, inputs.brightness)
    }

    fn next_step_in(&self, now: Instant, inputs: FrameInputs) -> Duration {
        RainbowFadeEngine::next_step_in(self, now, inputs.speed)
    }

    /// The rainbow ignores the accent palette
    fn configure_palette(&mut self, _colors: &[Rgb]) {}

    fn reset(&mut self) {
        RainbowFadeEngine::reset(self);
    }
}
