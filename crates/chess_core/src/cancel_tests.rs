use super::*;
use std::thread;

#[test]
fn test_stop_handle_starts_clear() {
    let handle = StopHandle::new();
    assert!(!handle.is_stopped());
}

#[test]
fn test_stop_is_idempotent() {
    let handle = StopHandle::new();
    handle.stop();
    handle.stop();
    assert!(handle.is_stopped());
}

#[test]
fn test_stop_from_other_thread() {
    let handle = StopHandle::new();
    let remote = handle.clone();

    thread::spawn(move || remote.stop()).join().unwrap();
    assert!(handle.is_stopped());
}

#[test]
fn test_fresh_handles_are_independent() {
    let old = StopHandle::new();
    old.stop();
    let fresh = StopHandle::new();
    assert!(!fresh.is_stopped());
}
