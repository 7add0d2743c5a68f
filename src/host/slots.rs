use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::FrameRequestId;

/// Keeps host-side callback objects alive until they fire or are cancelled.
///
/// A callback cannot free itself while it runs, so it only reports its id through a
/// [`FiredSink`]; the entry is released by the next [`CallbackSlots::purge`]. Cancelled entries are
/// released immediately.
#[derive(Debug)]
pub(crate) struct CallbackSlots<C> {
    live: RefCell<HashMap<FrameRequestId, C>>,
    fired: FiredSink,
}

/// Write end handed to each callback.
#[derive(Clone, Debug, Default)]
pub(crate) struct FiredSink(Rc<RefCell<Vec<FrameRequestId>>>);

impl FiredSink {
    pub(crate) fn mark(&self, id: FrameRequestId) {
        self.0.borrow_mut().push(id);
    }
}

impl<C> Default for CallbackSlots<C> {
    fn default() -> Self {
        Self {
            live: RefCell::new(HashMap::new()),
            fired: FiredSink::default(),
        }
    }
}

impl<C> CallbackSlots<C> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sink(&self) -> FiredSink {
        self.fired.clone()
    }

    pub(crate) fn insert(&self, id: FrameRequestId, callback: C) {
        let replaced = self.live.borrow_mut().insert(id, callback);
        drop(replaced);
    }

    /// Releases a pending callback. Returns whether `id` was still live.
    pub(crate) fn cancel(&self, id: FrameRequestId) -> bool {
        // Dropped outside the borrow: the callback may own the last handle to its caller's state.
        let removed = self.live.borrow_mut().remove(&id);
        removed.is_some()
    }

    /// Releases every callback that reported itself fired. Returns how many were released.
    pub(crate) fn purge(&self) -> usize {
        let done = std::mem::take(&mut *self.fired.0.borrow_mut());
        let released: Vec<C> = {
            let mut live = self.live.borrow_mut();
            done.iter().filter_map(|id| live.remove(id)).collect()
        };
        released.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.live.borrow().len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/slots.rs"]
mod tests;
