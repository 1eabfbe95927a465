//! Identifier generation seam.
//!
//! The engine never mints ids itself; actions receive them as arguments
//! and the empty-item calculation draws them from an [`IdSource`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Supplies fresh, unique identifiers.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Monotonic `prefix-N` ids.
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
