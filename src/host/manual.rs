use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::foundation::error::SoleilResult;
use crate::host::{FrameCallback, FrameRequestId, FrameScheduler};

/// Frame scheduler driven by explicit [`ManualScheduler::refresh`] calls.
///
/// Each refresh runs the callbacks that were pending when it started, in request order;
/// requests made from inside a callback wait for the next refresh, like
/// `requestAnimationFrame`.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<(FrameRequestId, FrameCallback)>>,
    next_id: Cell<u64>,
    refreshes: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes.get()
    }

    /// Simulates one display refresh. Returns the number of callbacks run.
    pub fn refresh(&self) -> usize {
        self.refreshes.set(self.refreshes.get() + 1);
        let due: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        let n = due.len();
        for (_, callback) in due {
            callback();
        }
        n
    }

    /// Runs `count` refreshes, returning the total number of callbacks run.
    pub fn refresh_n(&self, count: usize) -> usize {
        (0..count).map(|_| self.refresh()).sum()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> SoleilResult<FrameRequestId> {
        let id = FrameRequestId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue.borrow_mut().push_back((id, callback));
        Ok(id)
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        // Dropped outside the borrow: a callback may own the last handle to its caller's state.
        let cancelled: VecDeque<_> = {
            let mut queue = self.queue.borrow_mut();
            let (cancelled, kept) = queue.drain(..).partition(|(pending, _)| *pending == id);
            *queue = kept;
            cancelled
        };
        drop(cancelled);
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .field("refreshes", &self.refreshes.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/manual.rs"]
mod tests;
