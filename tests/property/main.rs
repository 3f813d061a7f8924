//! Property-based tests for the queue.
//!
//! Run with: `cargo test --test property`

mod queue_model;
mod sort_order;
