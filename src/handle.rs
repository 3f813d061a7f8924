//! Procedural API over optional queue handles.
//!
//! Mirrors the boundary a driver programs against: every argument may be
//! absent, and absence is reported through [`QueueError`] (or treated as a
//! no-op where the operation has nothing to report). Drivers that hold a
//! queue which may have been freed keep it as `Option<Box<Queue>>` and pass
//! `as_deref_mut()` here.

use crate::error::QueueError;
use crate::queue::Queue;

/// Creates a new empty queue handle.
pub fn create() -> Option<Box<Queue>> {
    Some(Box::new(Queue::new()))
}

/// Releases every element and the handle. No-op when `q` is absent.
pub fn destroy(q: Option<Box<Queue>>) {
    if let Some(q) = q {
        q.destroy();
    }
}

/// Inserts a copy of `s` at the head.
///
/// # Errors
/// [`QueueError::MissingQueue`] / [`QueueError::MissingValue`] for absent
/// arguments, or the allocation errors of [`Queue::insert_head`].
pub fn insert_head(q: Option<&mut Queue>, s: Option<&[u8]>) -> Result<(), QueueError> {
    let q = q.ok_or(QueueError::MissingQueue)?;
    let s = s.ok_or(QueueError::MissingValue)?;
    q.insert_head(s)
}

/// Inserts a copy of `s` at the tail.
pub fn insert_tail(q: Option<&mut Queue>, s: Option<&[u8]>) -> Result<(), QueueError> {
    let q = q.ok_or(QueueError::MissingQueue)?;
    let s = s.ok_or(QueueError::MissingValue)?;
    q.insert_tail(s)
}

/// Removes the head, copying at most `buf.len() - 1` bytes plus a NUL
/// terminator into `buf`. Returns the number of payload bytes copied.
///
/// Checks run in order: absent queue, empty queue, absent buffer, zero
/// capacity. Nothing is mutated or written when any of them fails.
pub fn remove_head(q: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Result<usize, QueueError> {
    let q = q.ok_or(QueueError::MissingQueue)?;
    if q.is_empty() {
        return Err(QueueError::Empty);
    }
    let buf = buf.ok_or(QueueError::MissingBuffer)?;
    q.remove_head(buf)
}

/// Element count, or 0 when `q` is absent.
pub fn size(q: Option<&Queue>) -> usize {
    q.map_or(0, Queue::len)
}

/// Reverses in place. No-op when `q` is absent.
pub fn reverse(q: Option<&mut Queue>) {
    if let Some(q) = q {
        q.reverse();
    }
}

/// Sorts ascending by bytes. No-op when `q` is absent.
pub fn sort(q: Option<&mut Queue>) {
    if let Some(q) = q {
        q.sort();
    }
}
