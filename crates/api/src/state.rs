//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::PostStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the post store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: PostStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: PostStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the post store.
    #[must_use]
    pub fn store(&self) -> &PostStore {
        &self.inner.store
    }
}
