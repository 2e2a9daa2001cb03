//! Circular position model
//!
//! The ring keeps a single lead position. Every other element is addressed
//! by its logical offset behind the lead; the direction of travel decides
//! which physical neighbour counts as "behind".

use crate::error::InvalidDirection;

/// Rotational direction of the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Lead moves towards higher physical indices
    #[default]
    Forward,
    /// Lead moves towards lower physical indices
    Reverse,
}

impl Direction {
    pub const fn sign(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = InvalidDirection;

    fn try_from(sign: i8) -> Result<Self, Self::Error> {
        match sign {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Reverse),
            other => Err(InvalidDirection(other)),
        }
    }
}

/// Lead position on a ring of `N` elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingBuffer<const N: usize> {
    lead: usize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    pub const fn new() -> Self {
        Self { lead: 0 }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Physical index of the lead
    pub const fn lead(&self) -> usize {
        self.lead
    }

    /// Re-anchor the lead at `index`, wrapped onto the ring
    pub const fn set_front(&mut self, index: usize) {
        if N == 0 {
            return;
        }
        self.lead = index % N;
    }

    /// Move the lead one step in `direction`
    pub const fn advance(&mut self, direction: Direction) {
        if N == 0 {
            return;
        }
        self.lead = match direction {
            Direction::Forward => (self.lead + 1) % N,
            Direction::Reverse => (self.lead + N - 1) % N,
        };
    }

    /// Physical index of the element `offset` steps behind the lead
    pub const fn physical_index_of(&self, offset: usize, direction: Direction) -> usize {
        if N == 0 {
            return 0;
        }
        let offset = offset % N;
        match direction {
            Direction::Forward => (self.lead + offset) % N,
            Direction::Reverse => (self.lead + N - offset) % N,
        }
    }

    /// Logical offset of a physical index, the inverse of
    /// [`physical_index_of`](Self::physical_index_of)
    pub const fn logical_offset_of(&self, physical: usize, direction: Direction) -> usize {
        if N == 0 {
            return 0;
        }
        let physical = physical % N;
        match direction {
            Direction::Forward => (physical + N - self.lead) % N,
            Direction::Reverse => (self.lead + N - physical) % N,
        }
    }
}
