//! Control commands for the animator
//!
//! A bounded queue built on `critical-section` and `heapless::Deque`, so a
//! control task or interrupt handler can hand palette, speed and mode
//! changes to the render loop without sharing the animator itself.
//!
//! Sensor readings arrive faster than the render loop drains them, so
//! [`CommandSender::send_latest`] overwrites a queued reading of the same
//! kind instead of failing once the queue is full.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::color::{PALETTE_SIZE, Rgb};
use crate::mode::ModeId;
use crate::ring::Direction;

/// Requested change to the animation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingCommand {
    /// Replace the accent colors; black slots are inactive
    SetPalette([Rgb; PALETTE_SIZE]),
    /// Switch animation mode, carrying the front position over
    SwitchMode(ModeId),
    /// New external speed reading
    SetSpeed(f32),
    /// New output brightness, faded in over the configured duration
    SetBrightness(u8),
    SetDirection(Direction),
    /// Re-anchor the front of the current mode
    SetFront(usize),
}

impl RingCommand {
    /// Whether `self` makes a queued `other` obsolete
    ///
    /// Only plain readings qualify. Palette, mode and front changes are
    /// ordered against each other and always queue.
    const fn supersedes(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::SetSpeed(_), Self::SetSpeed(_))
                | (Self::SetBrightness(_), Self::SetBrightness(_))
                | (Self::SetDirection(_), Self::SetDirection(_))
        )
    }
}

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded channel guarded by critical sections
///
/// Safe to use from interrupts. Capacity is fixed at `SIZE` entries.
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    /// Create an empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for producers; any number may exist at once.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Handle for the render loop.
    ///
    /// Several receivers compete for entries, so keep one.
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Append a value at the back.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    /// Take the oldest value.
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Channel<RingCommand, SIZE> {
    /// Queue a command, replacing a pending one of the same reading kind
    ///
    /// The replaced entry keeps its place in the queue. Commands without a
    /// pending match are appended like [`Channel::try_send`].
    pub fn send_latest(&self, command: RingCommand) -> Result<(), TrySendError<RingCommand>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            if let Some(queued) = queue.iter_mut().find(|queued| command.supersedes(queued)) {
                *queued = command;
                return Ok(());
            }
            queue.push_back(command).map_err(TrySendError)
        })
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Channel`].
///
/// Borrows the channel; copy it freely.
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// See [`Channel::try_send`].
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

impl<const SIZE: usize> Sender<'_, RingCommand, SIZE> {
    /// See [`Channel::send_latest`].
    pub fn send_latest(&self, command: RingCommand) -> Result<(), TrySendError<RingCommand>> {
        self.channel.send_latest(command)
    }
}

/// A receiver handle for a [`Channel`].
///
/// Borrows the channel; copy it freely.
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// See [`Channel::try_receive`].
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }
}

/// Type alias for the command channel
pub type CommandChannel<const SIZE: usize> = Channel<RingCommand, SIZE>;

/// Type alias for command sender
pub type CommandSender<'a, const SIZE: usize> = Sender<'a, RingCommand, SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, RingCommand, SIZE>;
