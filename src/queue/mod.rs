//! Queue implementations
//!
//! This module provides the blocking bounded queue at the heart of Sluice.
//!
//! ## Available Queues
//!
//! - [`BoundedQueue`]: Multi-producer, multi-consumer bounded blocking queue
//!
//! ## Design
//!
//! - **Monitor-based**: one mutex guards all state, two condition variables
//!   signal "not full" and "not empty"
//! - **Predicate loops**: every wait rechecks its condition on wake, so
//!   spurious wakeups and notify races are harmless
//! - **Cooperative shutdown**: a broadcast on both condition variables
//!   unblocks every waiter; enqueued items are never discarded
//! - **Comprehensive testing**: unit tests, stress tests, property tests,
//!   and loom interleaving models
//!
//! ## Examples
//!
//! ```rust
//! use sluice::queue::BoundedQueue;
//!
//! let queue: BoundedQueue<u64> = BoundedQueue::new(1000).unwrap();
//! queue.push(7).unwrap();
//! assert_eq!(queue.pop(), Some(7));
//! ```
pub mod bounded;

// Re-export main types for convenience
pub use bounded::BoundedQueue;


#[cfg(test)]
mod proptests;
