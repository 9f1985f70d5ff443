//! Thin synchronizing wrapper (spec §5, SPEC_FULL §7).
//!
//! The core itself is single-threaded; this wrapper serializes every
//! entry point behind a `parking_lot::Mutex` rather than building a
//! lock-free concurrent core, which spec.md explicitly keeps out of
//! scope. Views handed back from guarded operations stay behind the same
//! lock for their lifetime, so callers can't observe a torn structural
//! update.

use parking_lot::{Mutex, MutexGuard};

use crate::key::KeyAnalyzer;
use crate::trie::PatriciaTrie;

/// A `PatriciaTrie` behind a mutex; every method takes the lock, runs the
/// delegated call, and releases it before returning.
pub struct SyncPatriciaTrie<K, V, A> {
    inner: Mutex<PatriciaTrie<K, V, A>>,
}

impl<K, V, A> SyncPatriciaTrie<K, V, A>
where
    A: KeyAnalyzer<K>,
{
    pub fn new(analyzer: A) -> Self {
        SyncPatriciaTrie {
            inner: Mutex::new(PatriciaTrie::new(analyzer)),
        }
    }

    pub fn with_capacity(analyzer: A, capacity: usize) -> Self {
        SyncPatriciaTrie {
            inner: Mutex::new(PatriciaTrie::with_capacity(analyzer, capacity)),
        }
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    pub fn remove(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().remove(key)
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Hold the lock across several operations; the guard derefs to
    /// [`PatriciaTrie`], so views built from it (ranges, prefixes,
    /// iterators) stay serialized for as long as the guard lives.
    pub fn lock(&self) -> MutexGuard<'_, PatriciaTrie<K, V, A>> {
        self.inner.lock()
    }
}
