use std::sync::{Arc, Barrier};
use std::thread;

use scheduler_core::command::ADD_SUCCESS;
use scheduler_core::prelude::*;

const THREADS: usize = 16;

#[test]
fn concurrent_adds_for_one_user_and_day_admit_exactly_one() {
    let store = Arc::new(AvailabilityStore::new());
    let dispatcher = CommandDispatcher::new(store.clone());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                dispatcher.handle(&format!(
                    "!schedule add @bob Wednesday 10:00 11:00 attempt {i}"
                ))
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|reply| reply.as_deref() == Some(ADD_SUCCESS))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(store.query(Weekday::Wednesday).len(), 1);
}

#[test]
fn concurrent_adds_for_distinct_users_all_land() {
    let store = Arc::new(AvailabilityStore::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let store = store.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                let entry = Availability::new(
                    UserId::new(format!("@user{i}")),
                    scheduler_core::time::normalize("10:00").unwrap(),
                    scheduler_core::time::normalize("11:00").unwrap(),
                    "",
                )
                .unwrap();
                barrier.wait();
                store.add(Weekday::Thursday, entry)
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(store.query(Weekday::Thursday).len(), THREADS);
}
