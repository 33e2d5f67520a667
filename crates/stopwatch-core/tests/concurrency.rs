//! Per-key atomicity under parallel callers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Barrier};
use std::thread;

use stopwatch_core::{ErrorCode, TimerRegistry};

const THREADS: usize = 16;

fn race<T, F>(f: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(usize) -> T + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let f = Arc::clone(&f);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                f(i)
            })
        })
        .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

#[test]
fn concurrent_start_has_single_winner() {
    for _ in 0..20 {
        let reg = Arc::new(TimerRegistry::new());
        let r = Arc::clone(&reg);
        let results = race(move |_| r.start(["shared"], false).remove(0));

        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.code() == ErrorCode::AlreadyExists));
        assert_eq!(reg.len(), 1);
    }
}

#[test]
fn concurrent_remove_has_single_winner() {
    for _ in 0..20 {
        let reg = Arc::new(TimerRegistry::new());
        reg.start(["shared"], false);
        let r = Arc::clone(&reg);
        let results = race(move |_| r.remove(["shared"], true).unwrap().remove(0));

        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|e| matches!(
            e.code(),
            ErrorCode::NotFound | ErrorCode::RemovalFailed
        )));
        assert!(reg.is_empty());
    }
}

#[test]
fn distinct_names_all_succeed() {
    let reg = Arc::new(TimerRegistry::new());
    let r = Arc::clone(&reg);
    let results = race(move |i| {
        let name = format!("t{i}");
        let started = r.start([&name], false).remove(0).is_ok();
        let stopped = r.stop([&name]).unwrap().remove(0).unwrap();
        let removed = r.remove([&name], false).unwrap().remove(0).is_ok();
        started && !stopped.is_running && removed
    });

    assert!(results.into_iter().all(|ok| ok));
    assert!(reg.is_empty());
}
