//! Singly-linked queue of owned byte strings.
//!
//! ## Scope
//! A queue handle over a singly-linked chain of heap-owned payloads, tracking
//! head, tail and element count. Supports insertion at either end, removal at
//! the head into a caller buffer, in-place reversal, and a stable merge sort
//! that works purely by relinking nodes.
//!
//! ## Key invariants
//! - `len == 0` iff head and tail are both absent.
//! - The chain from head reaches tail in exactly `len` nodes, with no cycles.
//! - Reversal and sort never allocate or free an element.
//! - A failed operation leaves the queue exactly as it was.
//!
//! ## Notable entry points
//! - [`Queue`]: the data structure itself.
//! - [`handle`]: procedural API over optional handles (`create`, `destroy`,
//!   `insert_head`, `insert_tail`, `remove_head`, `size`, `reverse`, `sort`).
//! - [`Shell`]: command interpreter used by the `qshell` binary.
//! - [`Comparator`] / [`ByteOrder`]: ordering injected into [`Queue::sort_by`].

pub mod compare;
pub mod copy;
pub mod error;
pub mod handle;
pub mod queue;
pub mod shell;

mod merge_sort;

pub use compare::{ByteOrder, Comparator};
pub use copy::{copy_truncated, TERMINATOR};
pub use error::QueueError;
pub use queue::{Iter, Queue};
pub use shell::{Flow, Shell, ShellConfig, ShellError, ShellReport};
