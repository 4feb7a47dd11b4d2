//! Application state for the web layer.

use std::sync::Arc;

use crate::board::ArrivalBoard;

/// Shared application state.
///
/// Generic over the data source so tests can serve canned records.
pub struct AppState<S> {
    /// The arrival board: schedule, caches and upstream sources
    pub board: Arc<ArrivalBoard<S>>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(board: ArrivalBoard<S>) -> Self {
        Self {
            board: Arc::new(board),
        }
    }
}

// Not derived: `S` itself need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            board: Arc::clone(&self.board),
        }
    }
}
