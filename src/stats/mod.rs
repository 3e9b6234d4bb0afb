//! Operation statistics
//!
//! Lightweight counters describing how a queue has been used: how many
//! elements flowed through it, how many pushes were turned away by
//! shutdown, and how often threads had to park waiting for space or items.
//! All counters are relaxed atomics updated on the operation paths; reading
//! them never takes the queue lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// A point-in-time snapshot of a queue's operation counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    /// Elements accepted into the queue
    pub enqueued: u64,
    /// Elements handed out of the queue
    pub dequeued: u64,
    /// Push attempts rejected because the queue was shut down
    pub rejected: u64,
    /// Times a producer parked waiting for a free slot
    pub producer_waits: u64,
    /// Times a consumer parked waiting for an element
    pub consumer_waits: u64,
}

impl QueueStats {
    /// Total completed push and pop operations, rejections included
    pub fn total_operations(&self) -> u64 {
        self.enqueued + self.dequeued + self.rejected
    }

    /// Fraction of operations that had to park at least once, in `[0, 1]`
    ///
    /// A value near zero means producers and consumers rarely contend for
    /// space or items; a value near one means the queue is a bottleneck in
    /// one direction or the other.
    pub fn wait_rate(&self) -> f64 {
        let total = self.total_operations();
        if total == 0 {
            0.0
        } else {
            (self.producer_waits + self.consumer_waits) as f64 / total as f64
        }
    }
}

/// Internal atomic counters, one set per queue.
///
/// Relaxed ordering throughout: the counters are advisory and never
/// synchronize with queue state, which has its own lock.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    enqueued: AtomicU64,
    dequeued: AtomicU64,
    rejected: AtomicU64,
    producer_waits: AtomicU64,
    consumer_waits: AtomicU64,
}

impl Counters {
    pub(crate) fn record_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dequeued(&self) {
        self.dequeued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_producer_wait(&self) {
        self.producer_waits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_consumer_wait(&self) {
        self.consumer_waits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> QueueStats {
        QueueStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            dequeued: self.dequeued.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            producer_waits: self.producer_waits.load(Ordering::Relaxed),
            consumer_waits: self.consumer_waits.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.dequeued.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.producer_waits.store(0, Ordering::Relaxed);
        self.consumer_waits.store(0, Ordering::Relaxed);
    }
}

/// Trait for queues that expose operation statistics
pub trait StatsSource {
    /// Get a snapshot of the current counters
    fn stats(&self) -> QueueStats;

    /// Reset all counters to zero
    fn reset_stats(&self);
}
