//! Memoized dependency lookups
//!
//! Dependency extraction diffs and blames commits, so every identity is
//! computed at most once per run. Each key gets its own slot: concurrent
//! callers asking for the same commit wait on that slot instead of
//! repeating the work, while different commits proceed independently.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use crate::core::models::CommitId;
use crate::error::Error;

type Slot = Arc<Mutex<Option<BTreeSet<CommitId>>>>;

/// Per-commit compute-once map of dependency sets
#[derive(Debug, Default)]
pub struct DependencyCache {
    slots: Mutex<HashMap<CommitId, Slot>>,
}

impl DependencyCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached set for `commit`, computing it on first use
    ///
    /// A failed computation is not cached; the next caller retries.
    pub fn get_or_compute<F>(&self, commit: &CommitId, compute: F) -> Result<BTreeSet<CommitId>, Error>
    where
        F: FnOnce() -> Result<BTreeSet<CommitId>, Error>,
    {
        let slot = {
            let mut slots = self.slots.lock().map_err(|_| Error::CachePoisoned)?;
            Arc::clone(slots.entry(commit.clone()).or_default())
        };

        let mut value = slot.lock().map_err(|_| Error::CachePoisoned)?;
        if let Some(cached) = value.as_ref() {
            log::debug!("dependency cache hit for {}", commit.short());
            return Ok(cached.clone());
        }

        let computed = compute()?;
        *value = Some(computed.clone());
        Ok(computed)
    }

    /// Number of commits with a computed dependency set
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().map_or(0, |slots| {
            slots
                .values()
                .filter(|slot| slot.lock().is_ok_and(|value| value.is_some()))
                .count()
        })
    }

    /// Whether nothing has been computed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
