//! Tests for TimerSlot.

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::run_loop::ManualRunLoop;

#[test]
fn test_slot_starts_empty() {
    let slot = TimerSlot::new("indicator-hide");
    assert_eq!(slot.name(), "indicator-hide");
    assert!(slot.pending().is_none());
    assert_eq!(slot.replaced(), 0);
}

#[test]
fn test_replace_cancels_previous() {
    let run_loop = ManualRunLoop::new();
    let mut slot = TimerSlot::new("feedback-hide");
    let log = Rc::new(RefCell::new(Vec::new()));

    let first_log = log.clone();
    let first = slot
        .replace(
            &run_loop,
            Duration::from_millis(600),
            Box::new(move || first_log.borrow_mut().push("first")),
        )
        .unwrap();

    run_loop.advance(Duration::from_millis(400));

    let second_log = log.clone();
    let second = slot
        .replace(
            &run_loop,
            Duration::from_millis(600),
            Box::new(move || second_log.borrow_mut().push("second")),
        )
        .unwrap();

    assert_ne!(first, second);
    assert!(!run_loop.is_pending(first));
    assert_eq!(slot.pending(), Some(second));
    assert_eq!(slot.replaced(), 1);
    assert_eq!(run_loop.pending_timers(), 1);

    // The first deadline (600ms) passes without effect.
    run_loop.advance(Duration::from_millis(300));
    assert!(log.borrow().is_empty());

    // The second fires 600ms after it was scheduled (t = 1000ms).
    run_loop.advance(Duration::from_millis(300));
    assert_eq!(*log.borrow(), vec!["second"]);
}

#[test]
fn test_clear() {
    let run_loop = ManualRunLoop::new();
    let mut slot = TimerSlot::new("indicator-hide");

    assert!(!slot.clear(&run_loop));

    slot.replace(&run_loop, Duration::from_secs(3), Box::new(|| {}))
        .unwrap();
    assert!(slot.clear(&run_loop));
    assert!(slot.pending().is_none());
    assert_eq!(run_loop.pending_timers(), 0);
}
