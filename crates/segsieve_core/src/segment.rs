//! Segment partitioning and per-segment marking buffers.
//!
//! `[2, N]` is cut into consecutive closed ranges of a fixed width. The
//! boundaries depend only on the width and `N`, never on the number of
//! workers, so sequential and parallel runs sieve identical segments.

use crate::error::{CoreError, CoreResult};
use crate::Number;

/// A closed range `[low, high]` of candidates sieved as one unit.
///
/// Always satisfies `2 <= low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    index: usize,
    low: Number,
    high: Number,
}

impl Segment {
    /// Creates a segment outside of a [`SegmentPlan`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] unless `2 <= low <= high`.
    pub fn new(index: usize, low: Number, high: Number) -> CoreResult<Self> {
        if low < 2 {
            return Err(CoreError::invalid_config(format!(
                "segment must start at 2 or above, got {low}"
            )));
        }
        if high < low {
            return Err(CoreError::invalid_config(format!(
                "segment [{low}, {high}] is empty"
            )));
        }
        Ok(Self { index, low, high })
    }

    /// Position of the segment in its plan, starting at 0.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// First candidate in the segment.
    #[must_use]
    pub fn low(&self) -> Number {
        self.low
    }

    /// Last candidate in the segment (inclusive).
    #[must_use]
    pub fn high(&self) -> Number {
        self.high
    }

    /// Number of candidates covered.
    #[must_use]
    pub fn width(&self) -> Number {
        self.high - self.low + 1
    }

    /// Returns true if `n` lies in the segment.
    #[must_use]
    pub fn contains(&self, n: Number) -> bool {
        (self.low..=self.high).contains(&n)
    }

    /// Smallest odd candidate `>= low`.
    #[must_use]
    pub fn first_odd(&self) -> Number {
        self.low | 1
    }

    /// Number of odd candidates in the segment.
    #[must_use]
    pub fn odd_count(&self) -> usize {
        let first = self.first_odd();
        if first > self.high {
            0
        } else {
            ((self.high - first) / 2 + 1) as usize
        }
    }

    /// Buffer slot tracking the odd candidate `n`.
    #[inline]
    #[must_use]
    pub fn slot_of(&self, n: Number) -> usize {
        ((n - self.first_odd()) / 2) as usize
    }

    /// Candidate tracked by buffer slot `slot`.
    #[inline]
    #[must_use]
    pub fn value_at(&self, slot: usize) -> Number {
        self.first_odd() + 2 * slot as Number
    }
}

/// Deterministic partition of `[2, limit]` into segments of `width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPlan {
    limit: Number,
    width: Number,
    count: usize,
}

impl SegmentPlan {
    /// Plans the segments for `[2, limit]`.
    ///
    /// A limit below 2 yields an empty plan.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `width` is not positive.
    pub fn new(limit: Number, width: Number) -> CoreResult<Self> {
        if width < 1 {
            return Err(CoreError::invalid_config(format!(
                "segment width must be positive, got {width}"
            )));
        }
        let count = if limit < 2 {
            0
        } else {
            ((limit - 2) / width) as usize + 1
        };
        Ok(Self {
            limit,
            width,
            count,
        })
    }

    /// Upper bound of the plan.
    #[must_use]
    pub fn limit(&self) -> Number {
        self.limit
    }

    /// Width of every segment but possibly the last.
    #[must_use]
    pub fn width(&self) -> Number {
        self.width
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the plan covers no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns segment `index`.
    ///
    /// `index` must be below [`SegmentPlan::len`].
    #[must_use]
    pub fn segment(&self, index: usize) -> Segment {
        debug_assert!(index < self.count);
        let low = 2 + index as Number * self.width;
        let high = low.saturating_add(self.width - 1).min(self.limit);
        Segment { index, low, high }
    }

    /// Iterates over the segments in ascending order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Segment> + '_ {
        (0..self.count).map(|index| self.segment(index))
    }
}

/// Odd-only primality marks for one segment, packed one bit per slot.
///
/// Every slot starts as "prime"; sieving clears the slots of composites.
#[derive(Debug, Clone)]
pub struct MarkingBuffer {
    words: Vec<u64>,
    slots: usize,
}

impl MarkingBuffer {
    /// Creates a buffer with `slots` slots, all marked prime.
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            words: vec![u64::MAX; slots.div_ceil(64)],
            slots,
        }
    }

    /// Creates a buffer sized for `segment`: `ceil(width / 2) + 1` slots.
    #[must_use]
    pub fn for_segment(segment: &Segment) -> Self {
        let width = segment.width() as usize;
        Self::new(width.div_ceil(2) + 1)
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
    }

    /// Returns true if the buffer has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots == 0
    }

    /// Marks `slot` composite.
    #[inline]
    pub fn mark_composite(&mut self, slot: usize) {
        self.words[slot / 64] &= !(1u64 << (slot % 64));
    }

    /// Returns true if `slot` is still marked prime.
    #[inline]
    #[must_use]
    pub fn is_prime(&self, slot: usize) -> bool {
        self.words[slot / 64] & (1u64 << (slot % 64)) != 0
    }
}
