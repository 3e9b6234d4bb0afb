//! Bounded blocking MPMC queue
//!
//! This module implements a fixed-capacity FIFO queue for multi-producer,
//! multi-consumer use, built on the classic monitor pattern.
//!
//! ## Design
//!
//! All queue state lives in a single ring struct guarded by one
//! `parking_lot::Mutex`. Two condition variables partition wakeups:
//!
//! - `not_full`: a slot was freed, or shutdown began
//! - `not_empty`: an item arrived, or shutdown began
//!
//! Every blocking operation follows the same discipline:
//!
//! ```text
//! lock
//! while !predicate && !shutdown { wait(condvar) }   // releases the lock
//! act, or bail out on shutdown
//! notify the opposite condvar
//! unlock (guard drop)
//! ```
//!
//! Rechecking the predicate in a loop is what makes the queue correct:
//! spurious wakeups and wakeups stolen by a faster thread both land back in
//! the wait. Which condvar fired never matters for correctness, only for
//! avoiding needless wakeups.
//!
//! ## Shutdown protocol
//!
//! [`BoundedQueue::shutdown`] sets a monotonic flag and broadcasts on both
//! condition variables. Blocked producers wake and return
//! [`Error::Shutdown`]; blocked consumers wake and either drain a remaining
//! item or return `None` once the queue is empty. Items enqueued before
//! shutdown are never discarded.
//!
//! ## Ring buffer
//!
//! Storage is a boxed slice of `Option<T>` with `front`/`rear` cursors
//! advanced modulo the capacity:
//!
//! ```text
//! Empty:  len == 0            (no slot holds a value)
//! Full:   len == capacity     (every slot holds a value)
//! ```
//!
//! The occupied slots are always the contiguous run of `len` slots starting
//! at `front`, wrapping at the end of the buffer.

use crate::stats::{Counters, QueueStats, StatsSource};
use crate::{Error, Result};
use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// A multi-producer, multi-consumer bounded blocking queue
///
/// The queue holds at most `capacity` elements. [`push`](Self::push) blocks
/// while the queue is full and [`pop`](Self::pop) blocks while it is empty;
/// both are released promptly by [`shutdown`](Self::shutdown). Elements are
/// opaque to the queue: it stores and transfers them without inspecting
/// their contents.
///
/// # FIFO Ordering
///
/// Elements leave the queue in the order they entered it. No ordering is
/// guaranteed among concurrently blocked producers or consumers: each
/// successful operation wakes one waiter, and any parked thread may win.
///
/// # Examples
///
/// ```rust
/// use sluice::queue::BoundedQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue: Arc<BoundedQueue<i32>> = Arc::new(BoundedQueue::new(10).unwrap());
///
/// let producer = thread::spawn({
///     let queue = Arc::clone(&queue);
///     move || {
///         for i in 0..100 {
///             queue.push(i).unwrap();
///         }
///         queue.shutdown();
///     }
/// });
///
/// let consumer = thread::spawn({
///     let queue = Arc::clone(&queue);
///     move || {
///         let mut sum = 0;
///         while let Some(value) = queue.pop() {
///             sum += value;
///         }
///         sum
///     }
/// });
///
/// producer.join().unwrap();
/// assert_eq!(consumer.join().unwrap(), 4950);
/// ```
///
/// # Thread Safety
///
/// All operations take `&self` and are safe to call from any number of
/// threads simultaneously, typically through an `Arc<BoundedQueue<T>>`.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    inner: Mutex<Ring<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
    counters: Counters,
}

/// Queue state protected by the mutex.
///
/// Invariants, holding whenever the lock is not held mid-operation:
/// - `len <= slots.len()`
/// - exactly the `len` slots starting at `front` (wrapping) are `Some`
/// - `(rear + slots.len() - front) % slots.len() == len % slots.len()`
/// - `shutdown` only ever transitions from `false` to `true`
#[derive(Debug)]
struct Ring<T> {
    slots: Box<[Option<T>]>,
    front: usize,
    rear: usize,
    len: usize,
    shutdown: bool,
}

impl<T> Ring<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            front: 0,
            rear: 0,
            len: 0,
            shutdown: false,
        }
    }

    /// Write a value at `rear` and advance the cursor. Caller must have
    /// verified the queue is not full.
    fn put(&mut self, value: T) {
        debug_assert!(self.len < self.slots.len());
        debug_assert!(self.slots[self.rear].is_none());
        self.slots[self.rear] = Some(value);
        self.rear = (self.rear + 1) % self.slots.len();
        self.len += 1;
    }

    /// Take the value at `front` and advance the cursor. Caller must have
    /// verified the queue is not empty.
    fn take(&mut self) -> T {
        debug_assert!(self.len > 0);
        let value = self.slots[self.front]
            .take()
            .expect("front slot of a non-empty ring must hold a value");
        self.front = (self.front + 1) % self.slots.len();
        self.len -= 1;
        value
    }
}

impl<T> BoundedQueue<T> {
    /// Create a new bounded queue with the given capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of elements the queue can hold
    ///
    /// # Returns
    ///
    /// * `Ok(queue)` - an empty, active queue
    /// * `Err(Error::ZeroCapacity)` - if `capacity` is 0
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::queue::BoundedQueue;
    /// use sluice::Error;
    ///
    /// let queue: BoundedQueue<i32> = BoundedQueue::new(5).unwrap();
    /// assert!(queue.is_empty());
    /// assert!(!queue.is_shutdown());
    /// assert_eq!(queue.capacity(), 5);
    ///
    /// assert_eq!(BoundedQueue::<i32>::new(0).err(), Some(Error::ZeroCapacity));
    /// ```
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            inner: Mutex::new(Ring::with_capacity(capacity)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
            counters: Counters::default(),
        })
    }

    /// Push an element, blocking while the queue is full
    ///
    /// Blocks until a slot is free or the queue is shut down. On shutdown
    /// the element is not inserted and is released when the error is
    /// returned; callers that need it back should check
    /// [`is_shutdown`](Self::is_shutdown) before pushing or clone ahead of
    /// the call.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - the element was enqueued
    /// * `Err(Error::Shutdown)` - the queue was shut down before the element
    ///   could be accepted
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::queue::BoundedQueue;
    /// use sluice::Error;
    ///
    /// let queue: BoundedQueue<i32> = BoundedQueue::new(2).unwrap();
    /// assert_eq!(queue.push(1), Ok(()));
    ///
    /// queue.shutdown();
    /// assert_eq!(queue.push(2), Err(Error::Shutdown));
    /// ```
    pub fn push(&self, value: T) -> Result<()> {
        let mut ring = self.inner.lock();
        while ring.len == self.capacity && !ring.shutdown {
            self.counters.record_producer_wait();
            self.not_full.wait(&mut ring);
        }

        if ring.shutdown {
            self.counters.record_rejected();
            return Err(Error::Shutdown);
        }

        ring.put(value);
        self.counters.record_enqueued();
        self.not_empty.notify_one();
        Ok(())
    }

    /// Pop an element, blocking while the queue is empty
    ///
    /// Blocks until an element is available or the queue is shut down and
    /// drained. A shutdown queue keeps yielding its remaining elements;
    /// `None` is only returned once the queue is both shut down and empty,
    /// and from then on forever. Consumer loops treat `None` as
    /// end-of-stream.
    ///
    /// # Returns
    ///
    /// * `Some(value)` - the oldest element in the queue
    /// * `None` - the queue is shut down and permanently drained
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::queue::BoundedQueue;
    ///
    /// let queue: BoundedQueue<i32> = BoundedQueue::new(5).unwrap();
    /// queue.push(1).unwrap();
    /// queue.push(2).unwrap();
    /// queue.shutdown();
    ///
    /// assert_eq!(queue.pop(), Some(1));
    /// assert_eq!(queue.pop(), Some(2));
    /// assert_eq!(queue.pop(), None);
    /// ```
    pub fn pop(&self) -> Option<T> {
        let mut ring = self.inner.lock();
        while ring.len == 0 && !ring.shutdown {
            self.counters.record_consumer_wait();
            self.not_empty.wait(&mut ring);
        }

        if ring.len == 0 {
            // Shut down and drained.
            return None;
        }

        let value = ring.take();
        self.counters.record_dequeued();
        self.not_full.notify_one();
        Some(value)
    }

    /// Push an element without blocking
    ///
    /// # Returns
    ///
    /// * `Ok(())` - the element was enqueued
    /// * `Err(Error::Full)` - the queue is at capacity
    /// * `Err(Error::Shutdown)` - the queue was shut down
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::queue::BoundedQueue;
    /// use sluice::Error;
    ///
    /// let queue: BoundedQueue<i32> = BoundedQueue::new(1).unwrap();
    /// assert_eq!(queue.try_push(1), Ok(()));
    /// assert_eq!(queue.try_push(2), Err(Error::Full));
    /// ```
    pub fn try_push(&self, value: T) -> Result<()> {
        let mut ring = self.inner.lock();
        if ring.shutdown {
            self.counters.record_rejected();
            return Err(Error::Shutdown);
        }
        if ring.len == self.capacity {
            return Err(Error::Full);
        }

        ring.put(value);
        self.counters.record_enqueued();
        self.not_empty.notify_one();
        Ok(())
    }

    /// Pop an element without blocking
    ///
    /// Returns `None` when nothing is available right now, whether because
    /// the queue is momentarily empty or because it is shut down and
    /// drained. Use [`is_shutdown`](Self::is_shutdown) to tell the two
    /// apart.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::queue::BoundedQueue;
    ///
    /// let queue: BoundedQueue<i32> = BoundedQueue::new(5).unwrap();
    /// assert_eq!(queue.try_pop(), None);
    /// queue.push(9).unwrap();
    /// assert_eq!(queue.try_pop(), Some(9));
    /// ```
    pub fn try_pop(&self) -> Option<T> {
        let mut ring = self.inner.lock();
        if ring.len == 0 {
            return None;
        }

        let value = ring.take();
        self.counters.record_dequeued();
        self.not_full.notify_one();
        Some(value)
    }

    /// Push an element, blocking at most `timeout`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - the element was enqueued
    /// * `Err(Error::Timeout)` - the queue stayed full past the deadline
    /// * `Err(Error::Shutdown)` - the queue was shut down
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::queue::BoundedQueue;
    /// use sluice::Error;
    /// use std::time::Duration;
    ///
    /// let queue: BoundedQueue<i32> = BoundedQueue::new(1).unwrap();
    /// queue.push(1).unwrap();
    ///
    /// let result = queue.push_timeout(2, Duration::from_millis(20));
    /// assert_eq!(result, Err(Error::Timeout));
    /// ```
    pub fn push_timeout(&self, value: T, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut ring = self.inner.lock();
        while ring.len == self.capacity && !ring.shutdown {
            let now = Instant::now();
            if now >= deadline {
                return Err(Error::Timeout);
            }
            self.counters.record_producer_wait();
            self.not_full.wait_for(&mut ring, deadline - now);
        }

        if ring.shutdown {
            self.counters.record_rejected();
            return Err(Error::Shutdown);
        }

        ring.put(value);
        self.counters.record_enqueued();
        self.not_empty.notify_one();
        Ok(())
    }

    /// Pop an element, blocking at most `timeout`
    ///
    /// # Returns
    ///
    /// * `Some(value)` - the oldest element in the queue
    /// * `None` - the deadline passed with the queue still empty, or the
    ///   queue is shut down and drained
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::queue::BoundedQueue;
    /// use std::time::Duration;
    ///
    /// let queue: BoundedQueue<i32> = BoundedQueue::new(5).unwrap();
    /// assert_eq!(queue.pop_timeout(Duration::from_millis(20)), None);
    /// ```
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut ring = self.inner.lock();
        while ring.len == 0 && !ring.shutdown {
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            self.counters.record_consumer_wait();
            self.not_empty.wait_for(&mut ring, deadline - now);
        }

        if ring.len == 0 {
            return None;
        }

        let value = ring.take();
        self.counters.record_dequeued();
        self.not_full.notify_one();
        Some(value)
    }

    /// Shut the queue down, waking every blocked thread
    ///
    /// After shutdown no new elements are accepted, but elements already in
    /// the queue remain poppable until drained. Idempotent: repeated or
    /// concurrent calls only re-broadcast the wakeup, which is harmless.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::queue::BoundedQueue;
    ///
    /// let queue: BoundedQueue<i32> = BoundedQueue::new(1).unwrap();
    /// queue.shutdown();
    /// queue.shutdown(); // no effect beyond the first call
    /// assert!(queue.is_shutdown());
    /// ```
    pub fn shutdown(&self) {
        let mut ring = self.inner.lock();
        ring.shutdown = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Check whether the queue is empty
    ///
    /// Advisory: the answer may be stale the instant the internal lock is
    /// released if other threads are pushing or popping concurrently.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().len == 0
    }

    /// Check whether the queue is at capacity
    ///
    /// Advisory, like [`is_empty`](Self::is_empty).
    pub fn is_full(&self) -> bool {
        self.inner.lock().len == self.capacity
    }

    /// Check whether the queue has been shut down
    ///
    /// The shutdown flag is monotonic, so once this returns `true` it
    /// returns `true` for the rest of the queue's lifetime.
    pub fn is_shutdown(&self) -> bool {
        self.inner.lock().shutdown
    }

    /// Get the current number of elements in the queue
    ///
    /// Advisory snapshot taken under the lock; may be stale immediately
    /// under concurrent mutation.
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    /// Get the capacity of the queue
    ///
    /// The capacity is fixed at construction and never changes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> StatsSource for BoundedQueue<T> {
    fn stats(&self) -> QueueStats {
        self.counters.snapshot()
    }

    fn reset_stats(&self) {
        self.counters.reset();
    }
}
