use {
    num_traits::{PrimInt, WrappingAdd, WrappingSub},
    std::{fmt::Debug, hash::Hash},
};

/// Point of a circular keyspace.
///
/// Any primitive integer works: the value after `MAX` is `MIN`, and all
/// ordering that matters for ring placement is modular.
pub trait RingPoint: PrimInt + WrappingAdd + WrappingSub + Hash + Debug {}

impl<T> RingPoint for T where T: PrimInt + WrappingAdd + WrappingSub + Hash + Debug {}

/// Returns the point immediately clockwise of `point`.
#[inline]
pub fn successor<P: RingPoint>(point: P) -> P {
    point.wrapping_add(&P::one())
}

/// Returns the point immediately counter-clockwise of `point`.
#[inline]
pub fn predecessor<P: RingPoint>(point: P) -> P {
    point.wrapping_sub(&P::one())
}

/// Returns `true` if `point` lies within the closed circular interval
/// `[left, right]`.
///
/// When `left > right` the interval crosses the wraparound point.
#[inline]
pub fn in_range<P: RingPoint>(point: P, left: P, right: P) -> bool {
    if left <= right {
        left <= point && point <= right
    } else {
        point >= left || point <= right
    }
}

/// Number of clockwise steps needed to get from `from` to `to`.
///
/// The result is the wrapped difference `to - from`; for signed points it has
/// to be read as the unsigned bit pattern of the same width.
#[inline]
pub fn distance<P: RingPoint>(from: P, to: P) -> P {
    to.wrapping_sub(&from)
}
