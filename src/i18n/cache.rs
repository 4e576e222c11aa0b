//! In-memory caches owned by a `Translator`.
//!
//! `LangCache` maps normalized language codes to loaded entries and carries the
//! single lock that serializes disk loads. `AggregateCache` memoizes the result of a
//! full directory scan until it is invalidated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;

use crate::i18n::translations::LangFile;

/// Loaded entries keyed by normalized language code.
#[derive(Debug, Default)]
pub struct LangCache {
    /// Sharded map; readers of one code never wait on writers of another.
    entries: DashMap<String, Arc<LangFile>>,
    /// Held for the whole read-and-parse of a cold load, for every code.
    load_lock: Mutex<()>,
}

impl LangCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached entry for `lang`, if any.
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<Arc<LangFile>> {
        self.entries.get(lang).map(|entry| Arc::clone(entry.value()))
    }

    /// Store `entry` under `lang`, replacing any previous entry.
    pub fn insert(&self, lang: impl Into<String>, entry: Arc<LangFile>) {
        self.entries.insert(lang.into(), entry);
    }

    /// Drop the entry stored under `lang`.
    pub fn evict(&self, lang: &str) {
        self.entries.remove(lang);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached keys (an entry stored under two keys counts twice).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// What: Acquire the load lock.
    ///
    /// Output:
    /// - Guard that keeps other cold loads out until dropped
    ///
    /// Details:
    /// - A poisoned lock is recovered; the guarded data is `()` so nothing can be torn
    pub fn lock_loads(&self) -> MutexGuard<'_, ()> {
        self.load_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// One-time memo of the full list of loaded entries.
#[derive(Debug, Default)]
pub struct AggregateCache {
    /// `None` until the first computation, and again after `invalidate`.
    files: Mutex<Option<Vec<Arc<LangFile>>>>,
}

impl AggregateCache {
    /// Create an empty aggregate cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Return the memoized list, computing it first if needed.
    ///
    /// Inputs:
    /// - `compute`: Produces the list; called at most once until `invalidate`
    ///
    /// Output:
    /// - A fresh copy of the memoized list
    ///
    /// Details:
    /// - The lock is held while computing, so concurrent first callers wait for the
    ///   single computation instead of repeating it
    pub fn get_or_compute<F>(&self, compute: F) -> Vec<Arc<LangFile>>
    where
        F: FnOnce() -> Vec<Arc<LangFile>>,
    {
        let mut guard = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        guard.get_or_insert_with(compute).clone()
    }

    /// Forget the memoized list.
    pub fn invalidate(&self) {
        *self.files.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a list is currently memoized.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
