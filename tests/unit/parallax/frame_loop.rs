use super::*;
use crate::host::manual::ManualScheduler;
use crate::host::memory::{MemoryDocument, NodeId};
use crate::parallax::config::ParallaxConfig;

struct Fixture {
    doc: Rc<RefCell<MemoryDocument>>,
    sched: Rc<ManualScheduler>,
    wrapper: NodeId,
    fg: (NodeId, NodeId),
    handle: FrameLoopHandle,
}

fn start(viewport_h: f64) -> Fixture {
    let cfg = ParallaxConfig::default();
    let mut doc = MemoryDocument::scaffold(&cfg, viewport_h).unwrap();
    let engine = ParallaxEngine::init(&mut doc, &cfg).unwrap();
    let wrapper = *engine.scroll_container();
    let (fg, fg_clone) = engine.elements("foreground").unwrap();
    let fg = (*fg, *fg_clone);

    let doc = Rc::new(RefCell::new(doc));
    let sched = Rc::new(ManualScheduler::new());
    let handle = FrameLoop::start(engine, Rc::clone(&doc), Rc::clone(&sched)).unwrap();
    Fixture {
        doc,
        sched,
        wrapper,
        fg,
        handle,
    }
}

#[test]
fn start_places_layers_before_first_refresh() {
    let f = start(1000.0);
    assert_eq!(f.handle.frames_applied(), FrameIndex(1));
    assert_eq!(f.doc.borrow().style_writes(), 4);
    assert_eq!(
        f.doc.borrow().transform(f.fg.1),
        Some("translateZ(-5px) scale(1.5) translateY(-1000px)")
    );
    assert_eq!(f.sched.pending(), 1);
    assert!(f.handle.is_running());

    assert_eq!(f.sched.refresh(), 1);
    assert_eq!(f.handle.frames_applied(), FrameIndex(2));
    assert_eq!(f.sched.pending(), 1);
}

#[test]
fn start_without_source_requests_no_frame() {
    let cfg = ParallaxConfig::default();
    let mut doc = MemoryDocument::scaffold(&cfg, 1000.0).unwrap();
    let engine = ParallaxEngine::init(&mut doc, &cfg).unwrap();
    doc.set_viewport_height(None);

    let doc = Rc::new(RefCell::new(doc));
    let sched = Rc::new(ManualScheduler::new());
    let handle = FrameLoop::start(engine, Rc::clone(&doc), Rc::clone(&sched)).unwrap();
    assert_eq!(handle.stop_reason(), Some(StopReason::SourceLost));
    assert_eq!(handle.frames_applied(), FrameIndex(0));
    assert_eq!(sched.pending(), 0);
    assert_eq!(doc.borrow().style_writes(), 0);
}

#[test]
fn loop_tracks_scroll_across_refreshes() {
    let f = start(1000.0);
    for (scroll, primary, clone) in [
        (0.0, "0", "-1000"),
        (1200.0, "600", "-400"),
        (1998.0, "999", "-1"),
        (2002.0, "1", "-999"),
    ] {
        f.doc.borrow_mut().set_scroll_top(f.wrapper, scroll).unwrap();
        f.sched.refresh();
        let doc = f.doc.borrow();
        assert_eq!(
            doc.transform(f.fg.0),
            Some(format!("translateZ(-5px) scale(1.5) translateY({primary}px)").as_str())
        );
        assert_eq!(
            doc.transform(f.fg.1),
            Some(format!("translateZ(-5px) scale(1.5) translateY({clone}px)").as_str())
        );
    }
    assert_eq!(f.handle.frames_applied(), FrameIndex(5));
}

#[test]
fn stop_cancels_pending_frame_and_is_idempotent() {
    let f = start(1000.0);
    f.sched.refresh_n(3);
    let writes = f.doc.borrow().style_writes();

    f.handle.stop();
    f.handle.stop();
    assert!(!f.handle.is_running());
    assert_eq!(f.handle.stop_reason(), Some(StopReason::Stopped));
    assert_eq!(f.sched.pending(), 0);

    f.sched.refresh_n(5);
    assert_eq!(f.doc.borrow().style_writes(), writes);
    assert_eq!(f.handle.frames_applied(), FrameIndex(4));
}

#[test]
fn detached_container_stops_loop_gracefully() {
    let f = start(1000.0);
    f.sched.refresh();
    f.doc.borrow_mut().detach(f.wrapper).unwrap();

    f.sched.refresh();
    assert_eq!(f.handle.stop_reason(), Some(StopReason::SourceLost));
    assert_eq!(f.sched.pending(), 0);
    assert_eq!(f.sched.refresh_n(3), 0);
    assert_eq!(f.handle.frames_applied(), FrameIndex(2));

    // Stopping after the fact keeps the original reason.
    f.handle.stop();
    assert_eq!(f.handle.stop_reason(), Some(StopReason::SourceLost));
}

#[test]
fn busy_document_skips_a_frame_without_stopping() {
    let f = start(1000.0);
    {
        let _held = f.doc.borrow();
        assert_eq!(f.sched.refresh(), 1);
    }
    assert!(f.handle.is_running());
    assert_eq!(f.handle.frames_applied(), FrameIndex(1));
    f.sched.refresh();
    assert_eq!(f.handle.frames_applied(), FrameIndex(2));
}

#[test]
fn independent_loops_coexist() {
    let a = start(1000.0);
    let b = start(500.0);
    a.doc.borrow_mut().set_scroll_top(a.wrapper, 1200.0).unwrap();
    b.doc.borrow_mut().set_scroll_top(b.wrapper, 1200.0).unwrap();

    a.sched.refresh();
    b.sched.refresh();
    a.handle.stop();
    b.sched.refresh();

    assert_eq!(
        a.doc.borrow().transform(a.fg.0),
        Some("translateZ(-5px) scale(1.5) translateY(600px)")
    );
    assert_eq!(
        b.doc.borrow().transform(b.fg.0),
        Some("translateZ(-5px) scale(1.5) translateY(100px)")
    );
    assert!(b.handle.is_running());
    assert_eq!(b.handle.frames_applied(), FrameIndex(3));
}
