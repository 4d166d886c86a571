//! The result collection: append-only storage for response bodies.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe, unordered, append-only collection of response bodies.
///
/// One instance lives per batch run and is shared by `Arc` across the fetch
/// tasks, which only append. Size is read after the join barrier, so a read
/// never races a write that matters.
#[derive(Debug, Default)]
pub struct ResultSet {
    bodies: Mutex<Vec<String>>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one response body. Insertion order under concurrent writers is
    /// unspecified.
    pub fn push(&self, body: String) {
        self.lock().push(body);
    }

    /// Number of bodies collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consume the set and return the collected bodies, in no particular
    /// order.
    #[must_use]
    pub fn into_bodies(self) -> Vec<String> {
        self.bodies
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // A poisoned lock only means a writer panicked mid-push; the data
        // already stored is still valid.
        self.bodies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
