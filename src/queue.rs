//! Singly-linked FIFO/LIFO queue of owned byte strings.
//!
//! Nodes live in an index arena owned by the queue. Links are `u32` indices
//! with [`NONE`] as the end-of-chain sentinel, so relinking during reversal
//! and sort never aliases anything.
//!
//! # Layout
//!
//! ```text
//!   head=2                             tail=5
//!     |                                  |
//!     v                                  v
//!   +------------+    +------------+    +------------+
//!   | slot 2     |    | slot 0     |    | slot 5     |
//!   | payload=A  |--->| payload=B  |--->| payload=C  |---> NONE
//!   | next=0     |    | next=5     |    | next=--    |
//!   +------------+    +------------+    +------------+
//!
//!   free_head=1 -> 3 -> 4 -> NONE   (payload=None, links reuse `next`)
//! ```
//!
//! # Ownership
//!
//! Each payload is owned by exactly one arena slot. Removing an element drops
//! its payload immediately and threads the slot onto the free list; dropping
//! the queue drops every remaining payload and both columns.
//!
//! # Invariants
//!
//! - `len == 0` iff `head == NONE` iff `tail == NONE`.
//! - Following `next` from `head` visits exactly `len` nodes and ends at
//!   `tail`, whose `next` is `NONE`.
//! - Linked slots hold `Some` payload; free slots hold `None`.

use core::fmt;
use core::iter::FusedIterator;

use crate::compare::{ByteOrder, Comparator};
use crate::copy::copy_truncated;
use crate::error::QueueError;
use crate::merge_sort::sort_chain;

/// End-of-chain sentinel for node links.
pub(crate) const NONE: u32 = u32::MAX;

// Compile-time: the sentinel must never be a valid slot index.
const _: () = assert!(NONE == u32::MAX);

/// Queue of owned byte strings backed by a singly-linked list.
///
/// Supports insertion at both ends, removal at the head, in-place reversal
/// and stable merge sort. Element count is capped at `u32::MAX - 1`.
pub struct Queue {
    // Arena columns (SoA). `next` doubles as the free-list link for free slots.
    next: Vec<u32>,
    payload: Vec<Option<Box<[u8]>>>,
    free_head: u32,

    head: u32,
    tail: u32,
    len: u32,
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Queue {
    /// Creates an empty queue. Does not allocate.
    pub const fn new() -> Self {
        Self {
            next: Vec::new(),
            payload: Vec::new(),
            free_head: NONE,
            head: NONE,
            tail: NONE,
            len: 0,
        }
    }

    /// Releases every element and the queue itself. Same as dropping it.
    pub fn destroy(self) {
        tracing::trace!(len = self.len, "destroying queue");
        drop(self);
    }

    /// Number of elements. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert!((self.len == 0) == (self.head == NONE));
        debug_assert!((self.len == 0) == (self.tail == NONE));

        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        let empty = self.head == NONE;
        debug_assert!(empty == (self.tail == NONE));
        debug_assert!(empty == (self.len == 0));

        empty
    }

    /// Number of arena slots ever allocated (live plus free).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.next.len()
    }

    /// Borrows the first payload.
    pub fn peek_head(&self) -> Option<&[u8]> {
        self.payload_at(self.head)
    }

    /// Borrows the last payload.
    pub fn peek_tail(&self) -> Option<&[u8]> {
        self.payload_at(self.tail)
    }

    /// Copies `value` into a new element placed before the current head.
    ///
    /// On failure the queue is unchanged and nothing allocated by this call
    /// is retained.
    pub fn insert_head<S>(&mut self, value: &S) -> Result<(), QueueError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        let idx = self.alloc_node(value.as_ref())?;
        let old_len = self.len;

        self.next[idx as usize] = self.head;
        self.head = idx;
        if self.tail == NONE {
            debug_assert!(old_len == 0);
            self.tail = idx;
        }
        self.len += 1;

        debug_assert!(self.len == old_len + 1);
        Ok(())
    }

    /// Copies `value` into a new element placed after the current tail.
    ///
    /// On failure the queue is unchanged and nothing allocated by this call
    /// is retained.
    pub fn insert_tail<S>(&mut self, value: &S) -> Result<(), QueueError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        let idx = self.alloc_node(value.as_ref())?;
        let old_len = self.len;

        match self.tail {
            NONE => {
                debug_assert!(self.head == NONE);
                debug_assert!(old_len == 0);

                self.head = idx;
            }
            tail => {
                debug_assert!(self.next[tail as usize] == NONE);

                self.next[tail as usize] = idx;
            }
        }
        self.tail = idx;
        self.len += 1;

        debug_assert!(self.len == old_len + 1);
        Ok(())
    }

    /// Removes the head element, copying its payload into `buf`.
    ///
    /// At most `buf.len() - 1` bytes are copied and a NUL terminator always
    /// follows them inside `buf`. Returns the number of payload bytes copied.
    ///
    /// # Errors
    /// - [`QueueError::Empty`] if there is nothing to remove.
    /// - [`QueueError::ZeroCapacity`] if `buf` is empty; `buf` is not written.
    ///
    /// The queue is unchanged on error.
    pub fn remove_head(&mut self, buf: &mut [u8]) -> Result<usize, QueueError> {
        let head = self.peek_head().ok_or(QueueError::Empty)?;
        let copied = copy_truncated(head, buf).ok_or(QueueError::ZeroCapacity)?;

        let removed = self.pop_head();
        debug_assert!(removed.is_some());

        Ok(copied)
    }

    /// Removes the head element and hands its payload to the caller.
    pub fn pop_head(&mut self) -> Option<Box<[u8]>> {
        if self.head == NONE {
            return None;
        }
        let old_len = self.len;
        let idx = self.head;

        self.head = self.next[idx as usize];
        if self.head == NONE {
            // Queue is now empty.
            self.tail = NONE;
        }
        self.len -= 1;

        let payload = self.release_slot(idx);

        debug_assert!(self.len == old_len - 1);
        debug_assert!((self.head == NONE) == (self.tail == NONE));
        debug_assert!(payload.is_some(), "head slot {idx} had no payload");
        payload
    }

    /// Reverses the chain in place. The old tail becomes the head.
    ///
    /// ```text
    ///   before: A -> B -> C -> NONE      head=A tail=C
    ///   after:  C -> B -> A -> NONE      head=C tail=A
    /// ```
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }
        tracing::trace!(len = self.len, "reversing queue");

        let mut prev = NONE;
        let mut cur = self.head;
        self.tail = self.head;

        while cur != NONE {
            let next = self.next[cur as usize];
            self.next[cur as usize] = prev;
            prev = cur;
            cur = next;
        }
        self.head = prev;

        debug_assert!(self.next[self.tail as usize] == NONE);
    }

    /// Sorts ascending in byte-lexicographic order. Stable.
    pub fn sort(&mut self) {
        self.sort_by(&ByteOrder);
    }

    /// Sorts ascending under `cmp`. Stable: equal elements keep their order.
    ///
    /// Relinks existing nodes only; no element is allocated or freed.
    pub fn sort_by<C>(&mut self, cmp: &C)
    where
        C: Comparator + ?Sized,
    {
        if self.len < 2 {
            return;
        }
        tracing::trace!(len = self.len, "sorting queue");

        self.head = sort_chain(&mut self.next, &self.payload, self.head, cmp);

        let mut last = self.head;
        while self.next[last as usize] != NONE {
            last = self.next[last as usize];
        }
        self.tail = last;
    }

    /// Drops every element, keeping the arena's capacity.
    pub fn clear(&mut self) {
        self.next.clear();
        self.payload.clear();
        self.free_head = NONE;
        self.head = NONE;
        self.tail = NONE;
        self.len = 0;
    }

    /// Iterates payloads from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            cursor: self.head,
            remaining: self.len as usize,
        }
    }

    /// Panics if internal invariants are violated. O(slots).
    ///
    /// Intended for tests and debugging.
    pub fn check_invariants(&self) {
        assert_eq!(self.next.len(), self.payload.len(), "column length mismatch");

        if self.len == 0 {
            assert!(self.head == NONE, "len=0 but head is set");
            assert!(self.tail == NONE, "len=0 but tail is set");
        } else {
            assert!(self.head != NONE, "len>0 but head is NONE");
            assert!(self.tail != NONE, "len>0 but tail is NONE");
        }

        // Walk the chain and count.
        let mut count: u32 = 0;
        let mut last = NONE;
        let mut cur = self.head;
        while cur != NONE {
            count += 1;
            assert!(count <= self.len, "cycle or more nodes than len");
            assert!(
                self.payload[cur as usize].is_some(),
                "linked slot {cur} has no payload"
            );
            last = cur;
            cur = self.next[cur as usize];
        }
        assert_eq!(count, self.len, "counted {count} nodes but len is {}", self.len);
        assert!(last == self.tail, "last node is not tail");

        // Every other slot must be on the free list.
        let mut free: usize = 0;
        let mut cur = self.free_head;
        while cur != NONE {
            free += 1;
            assert!(free <= self.next.len(), "cycle in free list");
            assert!(
                self.payload[cur as usize].is_none(),
                "free slot {cur} still owns a payload"
            );
            cur = self.next[cur as usize];
        }
        assert_eq!(
            free + self.len as usize,
            self.next.len(),
            "slots leaked: neither linked nor free"
        );
    }

    fn payload_at(&self, idx: u32) -> Option<&[u8]> {
        if idx == NONE {
            return None;
        }
        self.payload[idx as usize].as_deref()
    }

    /// Copies `value` and stores it in a fresh slot whose link is `NONE`.
    ///
    /// The payload copy happens first so a failed slot reservation simply
    /// drops it again.
    fn alloc_node(&mut self, value: &[u8]) -> Result<u32, QueueError> {
        if self.len == NONE - 1 {
            return Err(QueueError::NodeLimit);
        }

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(value.len())?;
        bytes.extend_from_slice(value);

        let idx = self.acquire_slot()?;
        self.next[idx as usize] = NONE;
        self.payload[idx as usize] = Some(bytes.into_boxed_slice());
        Ok(idx)
    }

    fn acquire_slot(&mut self) -> Result<u32, QueueError> {
        if self.free_head != NONE {
            let idx = self.free_head;
            self.free_head = self.next[idx as usize];
            debug_assert!(self.payload[idx as usize].is_none());
            return Ok(idx);
        }

        let idx = self.next.len();
        if idx >= NONE as usize {
            return Err(QueueError::NodeLimit);
        }
        self.next.try_reserve(1)?;
        self.payload.try_reserve(1)?;
        self.next.push(NONE);
        self.payload.push(None);

        Ok(idx as u32)
    }

    fn release_slot(&mut self, idx: u32) -> Option<Box<[u8]>> {
        let payload = self.payload[idx as usize].take();
        self.next[idx as usize] = self.free_head;
        self.free_head = idx;
        payload
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a [u8];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over queue payloads.
pub struct Iter<'a> {
    queue: &'a Queue,
    cursor: u32,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NONE {
            return None;
        }
        let idx = self.cursor;
        self.cursor = self.queue.next[idx as usize];
        self.remaining -= 1;
        self.queue.payload_at(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
