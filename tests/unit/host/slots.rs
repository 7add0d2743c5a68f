use super::*;

#[test]
fn fired_callbacks_are_released_on_purge() {
    let slots = CallbackSlots::new();
    let owner = Rc::new(());
    for i in 0..3 {
        slots.insert(FrameRequestId(i), Rc::clone(&owner));
    }
    assert_eq!(Rc::strong_count(&owner), 4);

    let sink = slots.sink();
    sink.mark(FrameRequestId(0));
    sink.mark(FrameRequestId(2));
    // Still held until purged: a callback reports itself while it is running.
    assert_eq!(slots.len(), 3);

    assert_eq!(slots.purge(), 2);
    assert_eq!(slots.len(), 1);
    assert_eq!(Rc::strong_count(&owner), 2);
    assert_eq!(slots.purge(), 0);
}

#[test]
fn cancel_releases_a_callback_that_never_fires() {
    let slots = CallbackSlots::new();
    let owner = Rc::new(());
    slots.insert(FrameRequestId(7), Rc::clone(&owner));

    assert!(slots.cancel(FrameRequestId(7)));
    assert!(!slots.cancel(FrameRequestId(7)));
    assert!(!slots.cancel(FrameRequestId(99)));
    assert_eq!(slots.len(), 0);
    assert_eq!(Rc::strong_count(&owner), 1);
}

#[test]
fn repeated_stop_and_restart_does_not_accumulate() {
    let slots = CallbackSlots::new();
    let owner = Rc::new(());
    for round in 0..100u64 {
        slots.purge();
        slots.insert(FrameRequestId(round), Rc::clone(&owner));
        slots.cancel(FrameRequestId(round));
    }
    assert_eq!(slots.len(), 0);
    assert_eq!(Rc::strong_count(&owner), 1);
}
