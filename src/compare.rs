//! Ordering primitive consumed by the queue sort.

use core::cmp::Ordering;

/// Three-way comparison over raw payload bytes.
///
/// Any `Fn(&[u8], &[u8]) -> Ordering` closure is a comparator, so callers can
/// inject custom orderings without defining a type.
pub trait Comparator {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

/// Byte-lexicographic order: the first differing byte decides, and a proper
/// prefix sorts before the longer string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteOrder;

impl Comparator for ByteOrder {
    #[inline]
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }
}

impl<F> Comparator for F
where
    F: Fn(&[u8], &[u8]) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        self(a, b)
    }
}
