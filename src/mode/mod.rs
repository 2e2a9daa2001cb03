//! Animation modes with compile-time known variants
//!
//! All modes are stored in an enum to avoid heap allocations.
//! Each mode implements the [`Animation`] trait.

mod chase;
mod pulse;
mod rainbow;
mod rainbow_fade;
mod sparkle;
mod wipe;

use embassy_time::{Duration, Instant};

pub use chase::{ChaseConfig, ChaseEngine};
pub use pulse::{PulseConfig, PulseEngine};
pub use rainbow::{RainbowConfig, RainbowEngine};
pub use rainbow_fade::{FADE_MAX, RainbowFadeConfig, RainbowFadeEngine, RainbowFadePhase};
pub use sparkle::{SparkleConfig, SparkleEngine};
pub use wipe::{WipeConfig, WipeEngine};

use crate::Frame;
use crate::color::{Palette, Rgb};
use crate::error::ConfigError;
use crate::ring::Direction;

const MODE_NAME_CHASE: &str = "chase";
const MODE_NAME_SPARKLE: &str = "sparkle";
const MODE_NAME_WIPE: &str = "wipe";
const MODE_NAME_PULSE: &str = "pulse";
const MODE_NAME_RAINBOW: &str = "rainbow";
const MODE_NAME_RAINBOW_FADE: &str = "rainbow_fade";

const MODE_ID_CHASE: u8 = 0;
const MODE_ID_SPARKLE: u8 = 1;
const MODE_ID_WIPE: u8 = 2;
const MODE_ID_PULSE: u8 = 3;
const MODE_ID_RAINBOW: u8 = 4;
const MODE_ID_RAINBOW_FADE: u8 = 5;

/// Per-poll inputs supplied by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// External speed reading, mapped through each mode's speed curve
    pub speed: f32,
    /// Output brightness applied to the value channel
    pub brightness: u8,
    pub direction: Direction,
}

impl Default for FrameInputs {
    fn default() -> Self {
        Self {
            speed: 0.0,
            brightness: 255,
            direction: Direction::Forward,
        }
    }
}

/// A ring animation driven by polling
pub trait Animation<const N: usize> {
    /// Produce the next frame if a step is due, `None` otherwise
    fn poll(&mut self, now: Instant, inputs: FrameInputs) -> Option<&Frame<N>>;

    /// Time until the next step is due
    fn next_step_in(&self, now: Instant, inputs: FrameInputs) -> Duration;

    /// Replace the accent colors
    fn configure_palette(&mut self, colors: &[Rgb]);

    /// Re-anchor the mode's starting point, if it has one
    fn set_front_position(&mut self, _index: usize) {}

    /// Physical index the mode currently treats as its front
    fn front_position(&self) -> Option<usize> {
        None
    }

    /// Reset mode state
    fn reset(&mut self) {}
}

/// Settings for every mode, kept so modes can be rebuilt on switch
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeConfigs {
    pub chase: ChaseConfig,
    pub sparkle: SparkleConfig,
    pub wipe: WipeConfig,
    pub pulse: PulseConfig,
    pub rainbow: RainbowConfig,
    pub rainbow_fade: RainbowFadeConfig,
}

impl ModeConfigs {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chase.validate()?;
        self.sparkle.validate()?;
        self.wipe.validate()?;
        self.pulse.validate()?;
        self.rainbow.validate()?;
        self.rainbow_fade.validate()
    }
}

/// Known mode ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ModeId {
    #[default]
    Chase = MODE_ID_CHASE,
    Sparkle = MODE_ID_SPARKLE,
    Wipe = MODE_ID_WIPE,
    Pulse = MODE_ID_PULSE,
    Rainbow = MODE_ID_RAINBOW,
    RainbowFade = MODE_ID_RAINBOW_FADE,
}

impl ModeId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_CHASE => Self::Chase,
            MODE_ID_SPARKLE => Self::Sparkle,
            MODE_ID_WIPE => Self::Wipe,
            MODE_ID_PULSE => Self::Pulse,
            MODE_ID_RAINBOW => Self::Rainbow,
            MODE_ID_RAINBOW_FADE => Self::RainbowFade,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chase => MODE_NAME_CHASE,
            Self::Sparkle => MODE_NAME_SPARKLE,
            Self::Wipe => MODE_NAME_WIPE,
            Self::Pulse => MODE_NAME_PULSE,
            Self::Rainbow => MODE_NAME_RAINBOW,
            Self::RainbowFade => MODE_NAME_RAINBOW_FADE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_CHASE => Some(Self::Chase),
            MODE_NAME_SPARKLE => Some(Self::Sparkle),
            MODE_NAME_WIPE => Some(Self::Wipe),
            MODE_NAME_PULSE => Some(Self::Pulse),
            MODE_NAME_RAINBOW => Some(Self::Rainbow),
            MODE_NAME_RAINBOW_FADE => Some(Self::RainbowFade),
            _ => None,
        }
    }

    /// Build a fresh mode instance
    pub fn to_slot<const N: usize>(self, configs: &ModeConfigs, palette: Palette) -> ModeSlot<N> {
        match self {
            Self::Chase => ModeSlot::Chase(ChaseEngine::new(&configs.chase, palette)),
            Self::Sparkle => ModeSlot::Sparkle(SparkleEngine::new(&configs.sparkle, palette)),
            Self::Wipe => ModeSlot::Wipe(WipeEngine::new(&configs.wipe, palette)),
            Self::Pulse => ModeSlot::Pulse(PulseEngine::new(&configs.pulse)),
            Self::Rainbow => ModeSlot::Rainbow(RainbowEngine::new(&configs.rainbow)),
            Self::RainbowFade => {
                ModeSlot::RainbowFade(RainbowFadeEngine::new(&configs.rainbow_fade))
            }
        }
    }
}

/// Mode slot - enum containing all possible modes
#[derive(Debug, Clone)]
pub enum ModeSlot<const N: usize> {
    /// Rotating palette gradient
    Chase(ChaseEngine<N>),
    /// Primary color twinkle
    Sparkle(SparkleEngine<N>),
    /// Palette colors painted one element at a time
    Wipe(WipeEngine<N>),
    /// Whole ring breathing one color
    Pulse(PulseEngine<N>),
    /// Rainbow with a white segment running over it
    Rainbow(RainbowEngine<N>),
    /// Rainbow fading in and out, then white breaths
    RainbowFade(RainbowFadeEngine<N>),
}

impl<const N: usize> ModeSlot<N> {
    pub fn id(&self) -> ModeId {
        match self {
            Self::Chase(_) => ModeId::Chase,
            Self::Sparkle(_) => ModeId::Sparkle,
            Self::Wipe(_) => ModeId::Wipe,
            Self::Pulse(_) => ModeId::Pulse,
            Self::Rainbow(_) => ModeId::Rainbow,
            Self::RainbowFade(_) => ModeId::RainbowFade,
        }
    }

    fn animation(&self) -> &dyn Animation<N> {
        match self {
            Self::Chase(mode) => mode,
            Self::Sparkle(mode) => mode,
            Self::Wipe(mode) => mode,
            Self::Pulse(mode) => mode,
            Self::Rainbow(mode) => mode,
            Self::RainbowFade(mode) => mode,
        }
    }

    fn animation_mut(&mut self) -> &mut dyn Animation<N> {
        match self {
            Self::Chase(mode) => mode,
            Self::Sparkle(mode) => mode,
            Self::Wipe(mode) => mode,
            Self::Pulse(mode) => mode,
            Self::Rainbow(mode) => mode,
            Self::RainbowFade(mode) => mode,
        }
    }

    pub fn poll(&mut self, now: Instant, inputs: FrameInputs) -> Option<&Frame<N>> {
        self.animation_mut().poll(now, inputs)
    }

    pub fn next_step_in(&self, now: Instant, inputs: FrameInputs) -> Duration {
        self.animation().next_step_in(now, inputs)
    }

    pub fn configure_palette(&mut self, colors: &[Rgb]) {
        self.animation_mut().configure_palette(colors);
    }

    pub fn set_front_position(&mut self, index: usize) {
        self.animation_mut().set_front_position(index);
    }

    pub fn front_position(&self) -> Option<usize> {
        self.animation().front_position()
    }

    pub fn reset(&mut self) {
        self.animation_mut().reset();
    }
}
