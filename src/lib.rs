#![no_std]

pub mod animator;
pub mod clock;
pub mod color;
pub mod command;
pub mod error;
pub mod frame_scheduler;
pub mod gamma;
pub mod math8;
pub mod mode;
pub mod ring;
pub mod transition;

pub use animator::{Animator, AnimatorConfig};
pub use clock::{AnimationClock, SpeedCurve};
pub use command::{CommandChannel, CommandReceiver, CommandSender, RingCommand};
pub use error::{ConfigError, InvalidDirection};
pub use frame_scheduler::{FrameResult, FrameScheduler, SchedulerConfig};
pub use gamma::gamma8;
pub use mode::{
    Animation, ChaseConfig, ChaseEngine, FrameInputs, ModeConfigs, ModeId, ModeSlot,
    RainbowFadeConfig, RainbowFadeEngine, SparkleConfig, SparkleEngine,
};
pub use ring::{Direction, RingBuffer};

pub use color::{HsvColor, Hue, Palette, Rgb};
pub use embassy_time::{Duration, Instant};

/// One color per physical ring position
pub type Frame<const N: usize> = [Rgb; N];

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
pub trait OutputDriver {
    /// Write colors to the LED ring, indexed by physical position
    fn write(&mut self, colors: &[Rgb]);

    /// Set the hardware-level brightness scale
    fn set_brightness(&mut self, brightness: u8);

    /// Blank every LED; calling it again has no further effect
    fn clear(&mut self);
}
