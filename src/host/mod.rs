//! Host collaborators consumed by the parallax engine.
//!
//! The engine never touches a real DOM directly. It talks to a [`Document`] (element lookup,
//! cloning, style writes, scroll offset, viewport height) and registers its per-frame work with a
//! [`FrameScheduler`] (the display-refresh primitive).

use std::fmt;

use crate::foundation::error::SoleilResult;

/// In-memory DOM-like tree.
pub mod memory;
/// Explicitly driven frame scheduler.
pub mod manual;
#[cfg_attr(not(all(feature = "web", target_arch = "wasm32")), allow(dead_code))]
mod slots;
/// Browser host over `web-sys`.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

/// DOM-like tree plus the window-level values the engine reads every frame.
pub trait Document {
    type Element: Clone + fmt::Debug;

    /// First element matching `selector` in document order.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Deep-clones `element` and inserts the copy as its next sibling in the same parent.
    fn clone_after(&mut self, element: &Self::Element) -> SoleilResult<Self::Element>;

    /// Replaces the element's `transform` style.
    fn set_transform(&mut self, element: &Self::Element, css: &str) -> SoleilResult<()>;

    /// Current scroll offset, or `None` once the element is no longer attached.
    fn scroll_top(&self, element: &Self::Element) -> Option<f64>;

    /// Current viewport height, or `None` when the window is gone.
    fn viewport_height(&self) -> Option<f64>;
}

/// Identifies a pending frame request so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequestId(pub u64);

pub type FrameCallback = Box<dyn FnOnce()>;

/// Display-refresh scheduling primitive (`requestAnimationFrame` in a browser).
///
/// Callbacks run once, on the next refresh. A callback may request another frame.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> SoleilResult<FrameRequestId>;

    /// Drops a pending request. Unknown or already-fired ids are ignored.
    fn cancel_frame(&self, id: FrameRequestId);
}
