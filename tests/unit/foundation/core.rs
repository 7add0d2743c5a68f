use super::*;

#[test]
fn frame_index_next_saturates() {
    assert_eq!(FrameIndex(0).next(), FrameIndex(1));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}

#[test]
fn scroll_sample_rejects_degenerate_viewports() {
    assert!(ScrollSample::new(10.0, 800.0).is_ok());
    assert!(ScrollSample::new(10.0, 0.0).is_err());
    assert!(ScrollSample::new(10.0, -1.0).is_err());
    assert!(ScrollSample::new(10.0, f64::NAN).is_err());
    assert!(ScrollSample::new(f64::INFINITY, 800.0).is_err());
}

#[test]
fn scroll_sample_allows_overscroll() {
    let s = ScrollSample::new(-25.0, 600.0).unwrap();
    assert_eq!(s.scroll_y, -25.0);
}
