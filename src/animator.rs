use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::Frame;
use crate::clock::AnimationClock;
use crate::color::{PALETTE_SIZE, Palette, Rgb};
use crate::command::{CommandReceiver, RingCommand};
use crate::error::ConfigError;
use crate::math8::scale_rgb;
use crate::mode::{FrameInputs, ModeConfigs, ModeId, ModeSlot};
use crate::ring::Direction;
use crate::transition::ValueTransition;

const DEFAULT_BRIGHTNESS_FADE_MS: u64 = 250;
const DEFAULT_FADE_FRAME_MS: u64 = 16;

/// Configuration for the animator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorConfig {
    pub mode: ModeId,
    /// Accent colors; black entries are inactive
    pub palette: [Rgb; PALETTE_SIZE],
    pub speed: f32,
    pub brightness: u8,
    pub direction: Direction,
    /// Fade duration for brightness changes
    pub brightness_fade: Duration,
    /// Frame interval while a brightness fade runs and the mode is idle
    pub fade_frame_interval: Duration,
    pub modes: ModeConfigs,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            mode: ModeId::Chase,
            palette: [Rgb::default(); PALETTE_SIZE],
            speed: 0.0,
            brightness: u8::MAX,
            direction: Direction::Forward,
            brightness_fade: Duration::from_millis(DEFAULT_BRIGHTNESS_FADE_MS),
            fade_frame_interval: Duration::from_millis(DEFAULT_FADE_FRAME_MS),
            modes: ModeConfigs::default(),
        }
    }
}

impl AnimatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.modes.validate()
    }
}

/// Animator - owns the active mode and the host inputs feeding it
///
/// Modes render at full brightness. The animator scales their last frame
/// by the current brightness, so a fade keeps producing frames while the
/// mode itself is idle.
pub struct Animator<'a, const N: usize, const COMMAND_CHANNEL_SIZE: usize> {
    commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
    modes: ModeConfigs,
    brightness_fade: Duration,
    fade_frame_interval: Duration,

    palette: Palette,
    current: ModeSlot<N>,
    /// Front carried over to the next mode
    front: usize,
    speed: f32,
    direction: Direction,
    brightness: ValueTransition<u8>,
    fade_clock: AnimationClock,
    /// Last mode frame, unscaled
    raw: Frame<N>,
    frame: Frame<N>,
}

impl<'a, const N: usize, const COMMAND_CHANNEL_SIZE: usize> Animator<'a, N, COMMAND_CHANNEL_SIZE> {
    pub fn new(
        commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
        config: &AnimatorConfig,
    ) -> Result<Self, ConfigError> {
        if N == 0 {
            return Err(ConfigError::EmptyRing);
        }
        config.validate()?;

        let palette = Palette::from_colors(&config.palette);
        Ok(Self {
            commands,
            modes: config.modes,
            brightness_fade: config.brightness_fade,
            fade_frame_interval: config.fade_frame_interval,
            palette,
            current: config.mode.to_slot(&config.modes, palette),
            front: 0,
            speed: config.speed,
            direction: config.direction,
            brightness: ValueTransition::new_u8(config.brightness),
            fade_clock: AnimationClock::new(),
            raw: [Rgb::default(); N],
            frame: [Rgb::default(); N],
        })
    }

    /// Produce the next frame if the mode stepped or a fade frame is due
    ///
    /// Drains pending commands first. Call this continuously.
    pub fn tick(&mut self, now: Instant) -> Option<&Frame<N>> {
        self.process_commands(now);
        let fading = self.brightness.is_transitioning();
        self.brightness.tick(now);

        let inputs = self.inputs();
        let stepped = match self.current.poll(now, inputs) {
            Some(frame) => {
                self.raw = *frame;
                true
            }
            None => false,
        };
        let fade_due = fading && self.fade_clock.try_step(now, self.fade_frame_interval);
        if !stepped && !fade_due {
            return None;
        }
        if stepped {
            self.fade_clock.commit(now);
        }

        let brightness = self.brightness.current();
        for (out, raw) in self.frame.iter_mut().zip(self.raw.iter()) {
            *out = scale_rgb(*raw, brightness);
        }
        Some(&self.frame)
    }

    /// Time until the next frame is due
    pub fn next_step_in(&self, now: Instant) -> Duration {
        let step = self.current.next_step_in(now, self.inputs());
        if self.brightness.is_transitioning() {
            let fade = self.fade_clock.remaining(now, self.fade_frame_interval);
            return step.min(fade);
        }
        step
    }

    /// Modes render unscaled; brightness is applied on the way out
    fn inputs(&self) -> FrameInputs {
        FrameInputs {
            speed: self.speed,
            brightness: u8::MAX,
            direction: self.direction,
        }
    }

    pub fn mode_id(&self) -> ModeId {
        self.current.id()
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Brightness currently applied, mid-fade if one is running
    pub const fn brightness(&self) -> u8 {
        self.brightness.current()
    }

    /// Brightness the running fade ends at
    pub fn target_brightness(&self) -> u8 {
        self.brightness.settled()
    }

    /// Front the active mode is anchored at
    pub fn front_position(&self) -> usize {
        self.current.front_position().unwrap_or(self.front)
    }

    /// Switch mode; the new mode starts from the current front
    pub fn switch_mode(&mut self, id: ModeId) {
        self.front = self.front_position();
        #[cfg(feature = "esp32-log")]
        println!(
            "[Animator.switch_mode] {} -> {} at front {}",
            self.current.id().as_str(),
            id.as_str(),
            self.front
        );
        self.current = id.to_slot(&self.modes, self.palette);
        self.current.reset();
        self.current.set_front_position(self.front);
    }

    /// Replace the accent colors of every mode
    pub fn configure_palette(&mut self, colors: &[Rgb]) {
        #[cfg(feature = "esp32-log")]
        println!("[Animator.configure_palette] {:?}", colors);
        self.palette.configure(colors);
        self.current.configure_palette(colors);
    }

    /// Re-anchor the active mode at a physical index
    pub fn set_front_position(&mut self, index: usize) {
        let index = index % N;
        #[cfg(feature = "esp32-log")]
        println!("[Animator.set_front_position] {}", index);
        self.front = index;
        self.current.set_front_position(index);
    }

    pub const fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub const fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Fade to a new brightness over the configured duration
    pub fn set_brightness(&mut self, brightness: u8, now: Instant) {
        self.brightness.set(brightness, self.brightness_fade, now);
    }

    /// Process pending commands from the channel (non-blocking)
    fn process_commands(&mut self, now: Instant) {
        while let Ok(command) = self.commands.try_receive() {
            match command {
                RingCommand::SetPalette(colors) => self.configure_palette(&colors),
                RingCommand::SwitchMode(id) => self.switch_mode(id),
                RingCommand::SetSpeed(speed) => self.set_speed(speed),
                RingCommand::SetBrightness(brightness) => {
                    self.set_brightness(brightness, now);
                }
                RingCommand::SetDirection(direction) => self.set_direction(direction),
                RingCommand::SetFront(index) => self.set_front_position(index),
            }
        }
    }
}
