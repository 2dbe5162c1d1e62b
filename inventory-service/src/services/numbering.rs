//! Batch number sequence.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, Utc};

/// Issues batch labels of the form `BATCH-<year>-<NNN>`.
///
/// The running number is an atomic counter seeded from the item count at
/// startup, so concurrent creations within a process never race to the same
/// label. Uniqueness across restarts is best-effort: deleting items lowers
/// the seed, which can reissue a label an earlier run already used.
#[derive(Clone)]
pub struct BatchSequence {
    counter: Arc<AtomicU64>,
}

impl BatchSequence {
    pub fn starting_at(issued: u64) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(issued)),
        }
    }

    pub fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("BATCH-{}-{:03}", Utc::now().year(), n)
    }
}
