//! Source intervals over token indices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed range `[start, stop]` of token indices covered by a subtree.
///
/// An interval with `stop < start` spans no tokens. [`Interval::INVALID`] is the
/// canonical "no span" value used for nodes without a token payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// First token index (inclusive).
    pub start: isize,
    /// Last token index (inclusive).
    pub stop: isize,
}

impl Interval {
    /// The "no span" sentinel, `(-1, -2)`.
    pub const INVALID: Interval = Interval::new(-1, -2);

    /// Creates a new interval.
    #[inline]
    pub const fn new(start: isize, stop: isize) -> Self {
        Self { start, stop }
    }

    /// Creates an interval covering a single token index.
    #[inline]
    pub const fn of(index: isize) -> Self {
        Self::new(index, index)
    }

    /// Returns true if the interval covers at least one token.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.start <= self.stop
    }

    /// Returns the number of token indices covered.
    #[inline]
    pub const fn len(&self) -> usize {
        if self.is_valid() {
            (self.stop - self.start + 1) as usize
        } else {
            0
        }
    }

    /// Returns true if the interval covers no tokens.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    /// Returns true if this interval contains the given token index.
    #[inline]
    pub const fn contains(&self, index: isize) -> bool {
        self.start <= index && index <= self.stop
    }

    /// Returns the smallest interval covering both.
    ///
    /// An empty side contributes nothing, so the union of a valid interval with
    /// [`Interval::INVALID`] is the valid interval unchanged.
    #[inline]
    pub const fn union(&self, other: &Interval) -> Interval {
        if !self.is_valid() {
            return *other;
        }
        if !other.is_valid() {
            return *self;
        }
        Interval {
            start: if self.start < other.start {
                self.start
            } else {
                other.start
            },
            stop: if self.stop > other.stop {
                self.stop
            } else {
                other.stop
            },
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.stop)
    }
}
