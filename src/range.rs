use {
    crate::{
        keyspace::{self, RingPoint},
        RingPosition,
    },
    std::fmt,
};

/// A closed range of ring points, inclusive on both ends i.e.
/// `[left..=right]`.
///
/// If `left > right`, the range is wrapping and is equivalent to the union of
/// `[left..=MAX]` and `[MIN..=right]`. A range with `left == right` holds a
/// single point. Ranges are compared border by border, so two ranges covering
/// the same points but written differently are not equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashRange<Idx = RingPosition> {
    pub left: Idx,
    pub right: Idx,
}

impl<Idx> HashRange<Idx> {
    /// Creates a new range.
    pub const fn new(left: Idx, right: Idx) -> Self {
        Self { left, right }
    }
}

impl<Idx: RingPoint> HashRange<Idx> {
    /// Creates a range covering exactly one point.
    pub fn point(point: Idx) -> Self {
        Self::new(point, point)
    }

    /// Returns `true` if the range crosses the wraparound point.
    pub fn is_wrapping(&self) -> bool {
        self.left > self.right
    }

    /// Returns `true` if the range covers every point of the ring.
    pub fn covers_whole_ring(&self) -> bool {
        keyspace::successor(self.right) == self.left
    }

    /// Returns `true` if `item` is contained in the range.
    pub fn contains(&self, item: &Idx) -> bool {
        keyspace::in_range(*item, self.left, self.right)
    }

    /// Returns `true` if the range shares at least one point with `other`.
    pub fn is_overlapping(&self, other: &Self) -> bool {
        self.contains(&other.left) || other.contains(&self.left)
    }

    /// Returns `true` if `other` starts right after this range ends, so that
    /// the two can be concatenated clockwise into a single range.
    pub fn is_continuous(&self, other: &Self) -> bool {
        if self.covers_whole_ring() || other.covers_whole_ring() {
            return false;
        }
        keyspace::successor(self.right) == other.left
    }

    /// Returns the clockwise concatenation of `self` followed by `other`, or
    /// `None` if `other` does not start right after `self`.
    pub fn merged(&self, other: &Self) -> Option<Self> {
        self.is_continuous(other).then(|| Self::new(self.left, other.right))
    }
}

impl HashRange<RingPosition> {
    /// Number of points in the range.
    pub fn size(&self) -> u128 {
        keyspace::distance(self.left, self.right) as u64 as u128 + 1
    }
}

impl<Idx: fmt::Display> fmt::Display for HashRange<Idx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}
