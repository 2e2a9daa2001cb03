//! Frame scheduling and output.
//!
//! Drives an [`Animator`] and hands every produced frame to the output
//! driver. Nothing here sleeps: the caller waits for `sleep_duration`
//! between ticks in whatever way its platform does.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::animator::Animator;

/// Driver brightness applied once at start-up.
pub const DEFAULT_GLOBAL_BRIGHTNESS: u8 = 50;

/// Longest the caller should sleep between ticks, so commands sent while
/// idle are picked up reasonably fast.
pub const DEFAULT_IDLE_POLL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Hardware-level brightness scale passed to the driver
    pub global_brightness: u8,
    /// Upper bound on the reported sleep duration
    pub idle_poll: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            global_brightness: DEFAULT_GLOBAL_BRIGHTNESS,
            idle_poll: DEFAULT_IDLE_POLL,
        }
    }
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// Whether a new frame was written to the driver.
    pub written: bool,
    /// How long the caller may wait before the next tick.
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that polls the animator and feeds the driver.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(animator, driver, SchedulerConfig::default());
///
/// loop {
///     let now = Instant::from_millis(get_current_time_ms());
///     let result = scheduler.tick(now);
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, const N: usize, const COMMAND_CHANNEL_SIZE: usize> {
    output: O,
    animator: Animator<'a, N, COMMAND_CHANNEL_SIZE>,
    idle_poll: Duration,
}

impl<'a, O: OutputDriver, const N: usize, const COMMAND_CHANNEL_SIZE: usize>
    FrameScheduler<'a, O, N, COMMAND_CHANNEL_SIZE>
{
    /// Blank the output and apply the global brightness.
    pub fn new(
        animator: Animator<'a, N, COMMAND_CHANNEL_SIZE>,
        mut driver: O,
        config: SchedulerConfig,
    ) -> Self {
        driver.clear();
        driver.set_brightness(config.global_brightness);
        Self {
            output: driver,
            animator,
            idle_poll: config.idle_poll,
        }
    }

    /// Poll the animator once and write a frame if one was produced.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let written = match self.animator.tick(now) {
            Some(frame) => {
                self.output.write(frame);
                true
            }
            None => false,
        };

        let sleep_duration = self.animator.next_step_in(now).min(self.idle_poll);
        FrameResult {
            written,
            sleep_duration,
        }
    }

    /// Blank the output; the animator keeps its state.
    pub fn shutdown(&mut self) {
        self.output.clear();
    }

    pub fn animator(&self) -> &Animator<'a, N, COMMAND_CHANNEL_SIZE> {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator<'a, N, COMMAND_CHANNEL_SIZE> {
        &mut self.animator
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
