//! Recursive merge sort over the queue's index links.
//!
//! Works directly on the `next` column of the node arena: a sub-list is named
//! by its head index and ends at the first [`NONE`] link. Sorting relinks
//! existing nodes only, so the auxiliary heap use is zero and the auxiliary
//! stack depth is O(log n).
//!
//! # Split
//!
//! ```text
//!   slow starts at head, fast one link ahead; fast moves 2, slow moves 1.
//!
//!   [a] -> [b] -> [c] -> [d] -> [e] -> NONE
//!    s      f
//!           s             f
//!                  s                    f = NONE   (stop)
//!
//!   cut after slow:   left  = a -> b -> c -> NONE
//!                     right = d -> e -> NONE
//! ```
//!
//! # Merge
//!
//! The left run holds the earlier-occurring elements, so taking left whenever
//! it is not strictly greater than right keeps equal keys in their original
//! order (the sort is stable).

use core::cmp::Ordering;

use crate::compare::Comparator;
use crate::queue::NONE;

/// Sorts the chain starting at `head` and returns the new head.
///
/// `payload[i]` must be `Some` for every index reachable from `head`.
pub(crate) fn sort_chain<C>(
    next: &mut [u32],
    payload: &[Option<Box<[u8]>>],
    head: u32,
    cmp: &C,
) -> u32
where
    C: Comparator + ?Sized,
{
    if head == NONE || next[head as usize] == NONE {
        return head;
    }

    let right = split(next, head);
    let left = sort_chain(next, payload, head, cmp);
    let right = sort_chain(next, payload, right, cmp);

    merge(next, payload, left, right, cmp)
}

/// Cuts the chain at its midpoint and returns the head of the right half.
///
/// Requires at least two nodes. The left half keeps the extra node when the
/// length is odd.
fn split(next: &mut [u32], head: u32) -> u32 {
    let mut slow = head;
    let mut fast = next[head as usize];
    debug_assert!(fast != NONE, "split needs at least two nodes");

    while fast != NONE && next[fast as usize] != NONE {
        fast = next[next[fast as usize] as usize];
        slow = next[slow as usize];
    }

    let right = next[slow as usize];
    next[slow as usize] = NONE;
    right
}

fn merge<C>(
    next: &mut [u32],
    payload: &[Option<Box<[u8]>>],
    mut left: u32,
    mut right: u32,
    cmp: &C,
) -> u32
where
    C: Comparator + ?Sized,
{
    let mut head = NONE;
    let mut last = NONE;

    while left != NONE && right != NONE {
        let take = if cmp.compare(key(payload, left), key(payload, right)) != Ordering::Greater {
            let take = left;
            left = next[left as usize];
            take
        } else {
            let take = right;
            right = next[right as usize];
            take
        };

        append(next, &mut head, &mut last, take);
    }

    // One side is exhausted; the other is already sorted and terminated.
    let rest = if left != NONE { left } else { right };
    if rest != NONE {
        append(next, &mut head, &mut last, rest);
    }

    head
}

#[inline]
fn append(next: &mut [u32], head: &mut u32, last: &mut u32, node: u32) {
    if *last == NONE {
        *head = node;
    } else {
        next[*last as usize] = node;
    }
    *last = node;
}

#[inline]
fn key(payload: &[Option<Box<[u8]>>], idx: u32) -> &[u8] {
    let slot = &payload[idx as usize];
    debug_assert!(slot.is_some(), "linked node {idx} has no payload");
    slot.as_deref().unwrap_or_default()
}
