//! Store observer port — change notifications for subscribers.

use crate::store::StoreChange;

/// Receives a [`StoreChange`] after every dispatch.
pub trait StoreObserver {
    /// Called synchronously from inside the dispatch.
    fn notify(&self, change: StoreChange);
}

impl<T: StoreObserver> StoreObserver for std::sync::Arc<T> {
    fn notify(&self, change: StoreChange) {
        (**self).notify(change);
    }
}
