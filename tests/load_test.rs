//! Concurrent heartbeat and query load against a shared detector.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use accrual_detector::config::window_size;
use accrual_detector::Detector;

#[test]
fn test_concurrent_writers_and_readers() {
    let detector = Arc::new(Detector::new(vec![window_size(128)]).unwrap());
    detector.register_heartbeat(Some(0));

    let writers = 4;
    let beats_per_writer = 2_500;
    let done = Arc::new(AtomicBool::new(false));
    let start = Instant::now();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let detector = detector.clone();
            let done = done.clone();
            thread::spawn(move || {
                let mut queries = 0_u64;
                while !done.load(Ordering::Acquire) {
                    let p = detector.failure_probability(Some(i64::MAX / 2));
                    assert!((0.0..=1.0).contains(&p));
                    queries += 1;
                }
                queries
            })
        })
        .collect();

    let handles: Vec<_> = (0..writers)
        .map(|w| {
            let detector = detector.clone();
            thread::spawn(move || {
                for i in 1..=beats_per_writer {
                    detector.register_heartbeat(Some(w * 1_000_000 + i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    done.store(true, Ordering::Release);
    let queries: u64 = readers.into_iter().map(|r| r.join().unwrap()).sum();

    let snapshot = detector.snapshot();
    assert_eq!(snapshot.heartbeats, 1 + (writers * beats_per_writer) as u64);
    assert_eq!(snapshot.sample_count, 128);

    println!(
        "{} heartbeats and {} queries in {:?}",
        writers * beats_per_writer,
        queries,
        start.elapsed()
    );
}

#[test]
fn test_readers_see_consistent_windows() {
    // Every gap is exactly 10, so any consistent view answers 0 below 10 and 1 at or above.
    let detector = Arc::new(Detector::new(vec![window_size(16)]).unwrap());
    detector.register_heartbeat(Some(0));
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let detector = detector.clone();
        let done = done.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                let Some(last) = detector.last_arrival() else {
                    continue;
                };
                let p = detector.failure_probability(Some(last + 100));
                assert!(p == 0.0 || p == 1.0, "torn read: {p}");
            }
        })
    };

    for i in 1..=10_000 {
        detector.register_heartbeat(Some(i * 10));
    }
    done.store(true, Ordering::Release);
    reader.join().unwrap();
}
