//! Change bus: every store dispatch, fanned out over a tokio broadcast channel.

use tokio::sync::broadcast;

use crate::ports::StoreObserver;
use crate::store::StoreChange;

/// [`StoreObserver`] that rebroadcasts each [`StoreChange`] to its receivers.
///
/// Receivers see changes in revision order. A receiver that falls more than
/// `capacity` changes behind loses the oldest ones and gets
/// [`broadcast::error::RecvError::Lagged`] once.
pub struct InProcessChangeBus {
    sender: broadcast::Sender<StoreChange>,
}

impl InProcessChangeBus {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receiver for changes dispatched from now on. Earlier revisions are
    /// not replayed; read the store state for those.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.sender.subscribe()
    }
}

impl StoreObserver for InProcessChangeBus {
    fn notify(&self, change: StoreChange) {
        // Err only means nobody is listening.
        let _ = self.sender.send(change);
    }
}
