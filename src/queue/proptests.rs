//! Property-based tests for the bounded queue using proptest
//!
//! These tests verify that the queue maintains its invariants across
//! arbitrary operation sequences and capacities.

use crate::queue::BoundedQueue;
use crate::Error;
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

proptest! {
    /// FIFO ordering is preserved for any sequence of values.
    #[test]
    fn test_fifo_ordering_single_thread(
        values in prop::collection::vec(any::<i32>(), 1..50)
    ) {
        let queue: BoundedQueue<i32> = BoundedQueue::new(values.len()).unwrap();

        for &value in &values {
            prop_assert_eq!(queue.try_push(value), Ok(()));
        }
        for &expected in &values {
            prop_assert_eq!(queue.pop(), Some(expected));
        }
        prop_assert!(queue.is_empty());
    }

    /// `len` never exceeds capacity, and exactly the accepted pushes come
    /// back out.
    #[test]
    fn test_capacity_invariant(
        capacity in 1usize..50,
        values in prop::collection::vec(any::<i32>(), 1..100)
    ) {
        let queue: BoundedQueue<i32> = BoundedQueue::new(capacity).unwrap();
        let mut accepted = 0;

        for &value in &values {
            match queue.try_push(value) {
                Ok(()) => accepted += 1,
                Err(Error::Full) => {}
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
            prop_assert!(queue.len() <= capacity);
        }

        prop_assert_eq!(queue.len(), accepted);

        let mut popped = 0;
        while queue.try_pop().is_some() {
            popped += 1;
        }
        prop_assert_eq!(popped, accepted);
    }

    /// Interleaved pushes and pops keep `len` consistent with the
    /// operation history.
    #[test]
    fn test_len_tracks_operations(
        capacity in 1usize..50,
        ops in prop::collection::vec(prop::bool::weighted(0.6), 1..200)
    ) {
        let queue: BoundedQueue<u32> = BoundedQueue::new(capacity).unwrap();
        let mut expected_len = 0usize;
        let mut counter = 0u32;

        for &is_push in &ops {
            if is_push {
                if queue.try_push(counter).is_ok() {
                    expected_len += 1;
                }
                counter += 1;
            } else if queue.try_pop().is_some() {
                expected_len -= 1;
            }

            prop_assert_eq!(queue.len(), expected_len);
            prop_assert!(expected_len <= capacity);
            prop_assert_eq!(queue.is_empty(), expected_len == 0);
            prop_assert_eq!(queue.is_full(), expected_len == capacity);
        }
    }

    /// Shutdown drains all remaining items in order, then closes.
    #[test]
    fn test_shutdown_drains_in_order(
        capacity in 1usize..30,
        fill in 0usize..30
    ) {
        let queue: BoundedQueue<usize> = BoundedQueue::new(capacity).unwrap();
        let stored = fill.min(capacity);

        for i in 0..stored {
            queue.push(i).unwrap();
        }
        queue.shutdown();

        for i in 0..stored {
            prop_assert_eq!(queue.pop(), Some(i));
        }
        prop_assert_eq!(queue.pop(), None);
        prop_assert_eq!(queue.push(0), Err(Error::Shutdown));
    }

    /// Cursor wrap-around never corrupts the FIFO order.
    #[test]
    fn test_wrap_around_preserves_order(
        capacity in 2usize..10,
        rounds in 1usize..30
    ) {
        let queue: BoundedQueue<usize> = BoundedQueue::new(capacity).unwrap();

        for round in 0..rounds {
            for i in 0..capacity {
                queue.push(round * capacity + i).unwrap();
            }
            prop_assert!(queue.is_full());
            prop_assert_eq!(queue.try_push(usize::MAX), Err(Error::Full));

            for i in 0..capacity {
                prop_assert_eq!(queue.pop(), Some(round * capacity + i));
            }
            prop_assert!(queue.is_empty());
        }
    }

    /// Concurrent producers and consumers deliver every item exactly once.
    #[test]
    fn test_concurrent_exactly_once(
        num_threads in 2usize..5,
        items_per_thread in 10usize..50,
        capacity in 1usize..16
    ) {
        let queue = Arc::new(BoundedQueue::<usize>::new(capacity).unwrap());
        let mut handles = vec![];

        for thread_id in 0..num_threads {
            let queue = Arc::clone(&queue);
            handles.push(thread::spawn(move || {
                for i in 0..items_per_thread {
                    queue.push(thread_id * items_per_thread + i).unwrap();
                }
            }));
        }

        let mut consumers = vec![];
        for _ in 0..num_threads {
            let queue = Arc::clone(&queue);
            consumers.push(thread::spawn(move || {
                let mut received = Vec::new();
                while let Some(value) = queue.pop() {
                    received.push(value);
                }
                received
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
        queue.shutdown();

        let mut all_received = Vec::new();
        for handle in consumers {
            all_received.extend(handle.join().unwrap());
        }

        let expected_total = num_threads * items_per_thread;
        prop_assert_eq!(all_received.len(), expected_total);

        let mut sorted = all_received;
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), expected_total);
    }
}
