use {std::sync::Arc, tokio::sync::watch};

/// Single-slot cell holding the most recent result of an asynchronous
/// detector.
///
/// Writers replace the whole snapshot; readers get an `Arc` to whatever is in
/// the slot at that moment. A read can race a write and see the previous
/// snapshot, never a partially written one. Clones share the slot.
#[derive(Debug)]
pub struct LatestResult<T> {
    slot: Arc<watch::Sender<Option<Arc<T>>>>,
}

impl<T> Clone for LatestResult<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for LatestResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestResult<T> {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
        }
    }

    /// Replace the snapshot.
    pub fn publish(&self, value: T) {
        self.slot.send_replace(Some(Arc::new(value)));
    }

    /// The current snapshot, or `None` if nothing was ever published.
    pub fn snapshot(&self) -> Option<Arc<T>> {
        self.slot.borrow().clone()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<T>>> {
        self.slot.subscribe()
    }
}
