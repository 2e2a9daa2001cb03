use embassy_time::{Duration, Instant};

/// Blends two values of type `T` using a progress value (0-255)
pub type ValueBlender<T> = fn(T, T, u8) -> T;

/// Linear blend of two 8-bit values
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let amount = amount_of_b as u32;
    ((a as u32 * (255 - amount) + b as u32 * amount + 127) / 255) as u8
}

/// Calculate progress (0-255) based on elapsed time and duration
#[allow(clippy::cast_possible_truncation)]
const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if duration.as_millis() == 0 {
        return 255;
    }
    if elapsed.as_millis() >= duration.as_millis() {
        return 255;
    }
    ((elapsed.as_millis() * 255) / duration.as_millis()) as u8
}

/// Time-based transition for values of type `T`
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Copy> {
    blend: ValueBlender<T>,
    current: T,
    source: T,
    /// None when no transition is in progress
    target: Option<T>,
    duration: Duration,
    start_time: Instant,
}

impl<T: Copy> ValueTransition<T> {
    pub const fn new(initial: T, blend: ValueBlender<T>) -> Self {
        Self {
            blend,
            current: initial,
            source: initial,
            target: None,
            duration: Duration::from_millis(0),
            start_time: Instant::from_millis(0),
        }
    }

    pub const fn current(&self) -> T {
        self.current
    }

    /// Final value once any running transition completes
    pub fn settled(&self) -> T {
        self.target.unwrap_or(self.current)
    }

    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Move to `value` over `duration`; zero duration jumps immediately
    pub fn set(&mut self, value: T, duration: Duration, start_time: Instant) {
        self.start_time = start_time;
        if duration.as_millis() == 0 {
            self.current = value;
            self.source = value;
            self.target = None;
            self.duration = Duration::from_millis(0);
        } else {
            self.source = self.current;
            self.target = Some(value);
            self.duration = duration;
        }
    }

    /// Update the interpolated value for `now`
    pub fn tick(&mut self, now: Instant) {
        let Some(target) = self.target else {
            return;
        };

        let elapsed = now
            .checked_duration_since(self.start_time)
            .unwrap_or(Duration::from_millis(0));
        if elapsed >= self.duration {
            self.current = target;
            self.source = target;
            self.target = None;
            return;
        }

        let progress = progress8(elapsed, self.duration);
        self.current = (self.blend)(self.source, target, progress);
    }
}

impl ValueTransition<u8> {
    pub const fn new_u8(initial: u8) -> Self {
        Self::new(initial, blend8)
    }
}
