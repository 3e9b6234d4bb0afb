//! # Sluice
//!
//! A bounded, blocking multi-producer/multi-consumer FIFO queue with
//! cooperative shutdown.
//!
//! ## Features
//!
//! - **Bounded capacity**: a fixed-size ring buffer chosen at construction
//! - **Blocking operations**: producers park when the queue is full,
//!   consumers park when it is empty — no busy-waiting
//! - **Cooperative shutdown**: one call wakes every blocked thread and
//!   drains the queue without losing already-enqueued items
//!
//! ## Philosophy
//!
//! Sluice is a classic monitor: one mutex guards all queue state, and two
//! condition variables partition wakeups into "a slot freed up" and "an item
//! arrived". There are no lock-free fast paths and no unsafe code; the
//! predicate-loop discipline around every wait is what makes the queue
//! immune to spurious and stolen wakeups.
//!
//! ## Quick Start
//!
//! ```rust
//! use sluice::queue::BoundedQueue;
//!
//! let queue: BoundedQueue<i32> = BoundedQueue::new(100).unwrap();
//! queue.push(42).unwrap();
//! assert_eq!(queue.pop(), Some(42));
//! ```
//!
//! ## Shutdown
//!
//! Consumers treat `pop()` returning `None` as end-of-stream: the queue is
//! shut down and permanently drained. Producers learn of shutdown through
//! [`Error::Shutdown`].
//!
//! ```rust
//! use sluice::queue::BoundedQueue;
//! use sluice::Error;
//!
//! let queue: BoundedQueue<&str> = BoundedQueue::new(4).unwrap();
//! queue.push("last item").unwrap();
//! queue.shutdown();
//!
//! assert_eq!(queue.push("too late"), Err(Error::Shutdown));
//! assert_eq!(queue.pop(), Some("last item")); // shutdown never drops data
//! assert_eq!(queue.pop(), None);              // closed and drained
//! ```
//!
//! ## Thread Safety
//!
//! [`BoundedQueue`](queue::BoundedQueue) is safe to share across any number
//! of producer and consumer threads, typically behind an `Arc`.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod queue;
pub mod stats;

pub use crate::queue::BoundedQueue;
pub use crate::stats::{QueueStats, StatsSource};

/// Error type for Sluice queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Queue construction was attempted with a capacity of zero
    ZeroCapacity,
    /// Non-blocking push found the queue full
    Full,
    /// The queue has been shut down and rejects new items
    Shutdown,
    /// A timed operation expired before the queue state allowed progress
    Timeout,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "queue capacity must be greater than zero"),
            Error::Full => write!(f, "queue is full"),
            Error::Shutdown => write!(f, "queue is shut down"),
            Error::Timeout => write!(f, "operation timed out"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for Sluice queue operations
pub type Result<T> = core::result::Result<T, Error>;
