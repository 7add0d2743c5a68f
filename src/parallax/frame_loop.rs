//! Self re-arming per-frame registration of a [`ParallaxEngine`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::SoleilResult;
use crate::host::{Document, FrameRequestId, FrameScheduler};
use crate::parallax::engine::{FrameOutcome, ParallaxEngine};

/// Why a loop is no longer running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum StopReason {
    /// [`FrameLoopHandle::stop`] was called.
    Stopped,
    /// The scroll container or viewport became unavailable.
    SourceLost,
    /// The host rejected a style write or a frame request.
    Failed,
}

struct LoopState<D: Document, S> {
    engine: RefCell<ParallaxEngine<D::Element>>,
    document: Rc<RefCell<D>>,
    scheduler: Rc<S>,
    pending: Cell<Option<FrameRequestId>>,
    stop_reason: Cell<Option<StopReason>>,
}

trait LoopControl {
    fn stop(&self);
    fn stop_reason(&self) -> Option<StopReason>;
    fn frames_applied(&self) -> FrameIndex;
}

pub struct FrameLoop;

impl FrameLoop {
    /// Positions every layer once, then registers `engine` with `scheduler`.
    ///
    /// The synchronous first update keeps clones from showing unplaced on the first paint. If it
    /// already loses the source or fails, no frame is requested and the returned handle reports
    /// the reason.
    #[tracing::instrument(skip_all, fields(layers = engine.layer_count()))]
    pub fn start<D, S>(
        engine: ParallaxEngine<D::Element>,
        document: Rc<RefCell<D>>,
        scheduler: Rc<S>,
    ) -> SoleilResult<FrameLoopHandle>
    where
        D: Document + 'static,
        S: FrameScheduler + 'static,
    {
        let state = Rc::new(LoopState {
            engine: RefCell::new(engine),
            document,
            scheduler,
            pending: Cell::new(None),
            stop_reason: Cell::new(None),
        });
        if step(&state) {
            arm(&state)?;
            tracing::debug!("parallax loop started");
        }
        Ok(FrameLoopHandle { inner: state })
    }
}

/// Cancellation handle for a running loop.
///
/// Dropping the handle does not stop the loop; call [`FrameLoopHandle::stop`].
#[must_use = "a frame loop keeps running until stopped"]
#[derive(Clone)]
pub struct FrameLoopHandle {
    inner: Rc<dyn LoopControl>,
}

impl FrameLoopHandle {
    /// Cancels the pending frame request. Idempotent.
    pub fn stop(&self) {
        self.inner.stop();
    }

    pub fn is_running(&self) -> bool {
        self.inner.stop_reason().is_none()
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.inner.stop_reason()
    }

    pub fn frames_applied(&self) -> FrameIndex {
        self.inner.frames_applied()
    }
}

impl std::fmt::Debug for FrameLoopHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoopHandle")
            .field("stop_reason", &self.stop_reason())
            .field("frames_applied", &self.frames_applied())
            .finish()
    }
}

impl<D, S> LoopControl for LoopState<D, S>
where
    D: Document,
    S: FrameScheduler,
{
    fn stop(&self) {
        if self.stop_reason.get().is_some() {
            return;
        }
        self.stop_reason.set(Some(StopReason::Stopped));
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        tracing::debug!("parallax loop stopped");
    }

    fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason.get()
    }

    fn frames_applied(&self) -> FrameIndex {
        self.engine
            .try_borrow()
            .map(|e| e.frames_applied())
            .unwrap_or_default()
    }
}

fn arm<D, S>(state: &Rc<LoopState<D, S>>) -> SoleilResult<()>
where
    D: Document + 'static,
    S: FrameScheduler + 'static,
{
    let next = Rc::clone(state);
    let id = state
        .scheduler
        .request_frame(Box::new(move || on_frame(&next)))?;
    state.pending.set(Some(id));
    Ok(())
}

fn on_frame<D, S>(state: &Rc<LoopState<D, S>>)
where
    D: Document + 'static,
    S: FrameScheduler + 'static,
{
    state.pending.set(None);
    if state.stop_reason.get().is_some() {
        return;
    }
    if step(state) {
        rearm(state);
    }
}

/// Runs one update. Returns whether the loop should keep going.
fn step<D, S>(state: &LoopState<D, S>) -> bool
where
    D: Document,
    S: FrameScheduler,
{
    let outcome = match state.document.try_borrow_mut() {
        Ok(mut doc) => state.engine.borrow_mut().update(&mut *doc),
        Err(_) => {
            tracing::debug!("document busy, skipping frame");
            return true;
        }
    };

    match outcome {
        Ok(FrameOutcome::Applied(sample)) => {
            tracing::trace!(
                scroll_y = sample.scroll_y,
                viewport_h = sample.viewport_h,
                "parallax frame"
            );
            true
        }
        Ok(FrameOutcome::SourceLost) => {
            tracing::warn!("scroll container or viewport unavailable, stopping parallax loop");
            state.stop_reason.set(Some(StopReason::SourceLost));
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "parallax frame failed, stopping loop");
            state.stop_reason.set(Some(StopReason::Failed));
            false
        }
    }
}

fn rearm<D, S>(state: &Rc<LoopState<D, S>>)
where
    D: Document + 'static,
    S: FrameScheduler + 'static,
{
    if let Err(e) = arm(state) {
        tracing::error!(error = %e, "frame request rejected, stopping loop");
        state.stop_reason.set(Some(StopReason::Failed));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/frame_loop.rs"]
mod tests;
