use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use viska::{Boundary, Error, Handle, Library, NativeBoundary};
use viska_core::symbols;

const THREADS: usize = 8;

/// Counts destructor calls only.
#[derive(Default)]
struct DropCounter {
    inner: NativeBoundary,
    drops: AtomicUsize,
}

impl Boundary for DropCounter {
    fn call_static(&self, symbol: &str, args: &[&[u8]]) -> Vec<u8> {
        self.inner.call_static(symbol, args)
    }

    fn call_method(&self, symbol: &str, handle: Handle, args: &[&[u8]]) -> Vec<u8> {
        if symbol == symbols::CLIENT_DROP {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.call_method(symbol, handle, args)
    }
}

#[test]
fn concurrent_creates_get_distinct_handles() {
    const PER_THREAD: usize = 25;
    let lib = Library::native();
    let barrier = Arc::new(Barrier::new(THREADS));

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let lib = lib.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD)
                    .map(|i| lib.create_client(&format!("user-{t}-{i}")).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let clients: Vec<_> = workers
        .into_iter()
        .flat_map(|w| w.join().unwrap())
        .collect();
    let handles: HashSet<Handle> = clients.iter().map(viska::Client::handle).collect();
    assert_eq!(handles.len(), THREADS * PER_THREAD);

    for client in &clients {
        client.release().unwrap();
    }
}

#[test]
fn racing_releases_issue_exactly_one_destructor_call() {
    let boundary = Arc::new(DropCounter::default());
    let lib = Library::with_boundary(boundary.clone());
    let client = Arc::new(lib.create_client("race").unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));

    let results: Vec<_> = (0..THREADS)
        .map(|_| {
            let client = Arc::clone(&client);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                client.release()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, Error::DoubleFree { .. }))
    );
    assert_eq!(boundary.drops.load(Ordering::SeqCst), 1);
}

#[test]
fn methods_racing_release_never_hit_a_dead_handle() {
    let lib = Library::native();
    let client = Arc::new(lib.create_client("busy").unwrap());
    let barrier = Arc::new(Barrier::new(THREADS + 1));

    let callers: Vec<_> = (0..THREADS)
        .map(|_| {
            let client = Arc::clone(&client);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..200).map(|_| client.name()).collect::<Vec<_>>()
            })
        })
        .collect();

    barrier.wait();
    client.release().unwrap();

    for caller in callers {
        for result in caller.join().unwrap() {
            match result {
                Ok(name) => assert_eq!(name, "busy"),
                Err(e) => assert!(matches!(e, Error::UseAfterFree { .. }), "unexpected {e}"),
            }
        }
    }
}
