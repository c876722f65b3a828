use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use riko_runtime::{Error, Handle, HandleTable};

const THREADS: usize = 8;

#[test]
fn concurrent_registers_never_share_a_handle() {
    const PER_THREAD: usize = 100;
    let table = Arc::new(HandleTable::new("counter"));
    let barrier = Arc::new(Barrier::new(THREADS));

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let table = Arc::clone(&table);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD)
                    .map(|i| table.register(t * PER_THREAD + i))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let handles: HashSet<Handle> = workers
        .into_iter()
        .flat_map(|w| w.join().unwrap())
        .collect();
    assert_eq!(handles.len(), THREADS * PER_THREAD);
    assert!(handles.iter().all(|h| h.raw() != 0));
    assert_eq!(table.len(), THREADS * PER_THREAD);
}

#[test]
fn racing_removes_succeed_exactly_once() {
    let table = Arc::new(HandleTable::new("counter"));
    let handle = table.register(7_u32);
    let barrier = Arc::new(Barrier::new(THREADS));

    let results: Vec<_> = (0..THREADS)
        .map(|_| {
            let table = Arc::clone(&table);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                table.remove(handle).map(|slot| *slot.lock().unwrap())
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|w| w.join().unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, Error::NotFound(h) if *h == handle))
    );
    assert!(table.is_empty());
}

#[test]
fn mutations_through_with_are_serialized() {
    let table = Arc::new(HandleTable::new("counter"));
    let handle = table.register(0_u64);

    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for _ in 0..1000 {
                    table.with(handle, |n| *n += 1).unwrap();
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    assert_eq!(table.with(handle, |n| *n).unwrap(), (THREADS * 1000) as u64);
}
