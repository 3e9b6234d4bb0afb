//! Worker pipeline example
//!
//! A handful of producers feed jobs through a small bounded queue to a pool
//! of workers. The bounded capacity applies backpressure to the producers,
//! and a single `shutdown()` call winds the whole pipeline down without
//! losing any job that was already accepted.

use sluice::{BoundedQueue, Error, StatsSource};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    let queue: Arc<BoundedQueue<u64>> = Arc::new(BoundedQueue::new(8).expect("capacity is nonzero"));

    println!("Sluice pipeline example");
    println!("=======================");

    let producers: Vec<_> = (0..3u64)
        .map(|producer_id| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut accepted = 0;
                for i in 0..1000 {
                    match queue.push(producer_id * 1000 + i) {
                        Ok(()) => accepted += 1,
                        Err(Error::Shutdown) => break,
                        Err(e) => unreachable!("blocking push cannot fail with {}", e),
                    }
                }
                accepted
            })
        })
        .collect();

    let workers: Vec<_> = (0..4)
        .map(|worker_id| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut handled = 0u64;
                // `None` means the queue is shut down and fully drained.
                while let Some(job) = queue.pop() {
                    let _checksum = job.wrapping_mul(0x9e37_79b9_7f4a_7c15);
                    handled += 1;
                }
                println!("worker {} handled {} jobs", worker_id, handled);
                handled
            })
        })
        .collect();

    // Let the pipeline run briefly, then wind it down mid-stream.
    thread::sleep(Duration::from_millis(50));
    queue.shutdown();

    let produced: u64 = producers.into_iter().map(|h| h.join().unwrap()).sum();
    let handled: u64 = workers.into_iter().map(|h| h.join().unwrap()).sum();

    println!("accepted {} jobs, handled {} jobs", produced, handled);
    assert_eq!(produced, handled, "no accepted job may be lost on shutdown");

    let stats = queue.stats();
    println!(
        "stats: {} enqueued, {} dequeued, {} rejected, wait rate {:.2}",
        stats.enqueued,
        stats.dequeued,
        stats.rejected,
        stats.wait_rate()
    );
}
