//! Live view of the subtree matching one key prefix (spec §4.8/§4.9).
//!
//! A prefix view re-descends from the root on every bound-sensitive call
//! rather than caching a subtree pointer across mutations: the descent
//! is `O(prefix length)`, the same cost class as checking a cached
//! `mod_count` and redescending on mismatch, so the cache buys nothing
//! here and the view stays trivially correct across arbitrary structural
//! changes elsewhere in the trie. A zero-length prefix matches every
//! key, so such a view is equivalent to the trie itself.

use crate::error::{PatriciaError, Result};
use crate::key::KeyAnalyzer;
use crate::trie::{Entry, PatriciaTrie};

pub struct PrefixView<'a, K, V, A> {
    trie: &'a mut PatriciaTrie<K, V, A>,
    prefix: K,
    offset: i32,
    length: i32,
}

impl<'a, K, V, A> PrefixView<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
{
    pub(crate) fn new(trie: &'a mut PatriciaTrie<K, V, A>, prefix: K, offset: i32, length: i32) -> Self {
        PrefixView { trie, prefix, offset, length }
    }

    fn matches(&self, key: &K) -> bool {
        self.trie.comparator().is_prefix(&self.prefix, self.offset, self.length, key)
    }

    fn bounds(&self) -> Option<(u32, u32, Option<u32>, Option<u32>)> {
        self.trie.prefix_bounds(&self.prefix, self.offset, self.length)
    }

    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        if !self.matches(&key) {
            return Err(PatriciaError::OutOfRange);
        }
        Ok(self.trie.put(key, value))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        if self.matches(key) {
            self.trie.get(key)
        } else {
            None
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        if self.matches(key) {
            self.trie.remove(key)
        } else {
            None
        }
    }

    pub fn first_key(&self) -> Result<&K> {
        let (first, ..) = self.bounds().ok_or(PatriciaError::NoSuchElement)?;
        Ok(self.trie.node_key(first))
    }

    pub fn last_key(&self) -> Result<&K> {
        let (_, last, ..) = self.bounds().ok_or(PatriciaError::NoSuchElement)?;
        Ok(self.trie.node_key(last))
    }

    /// The key just before the prefix range, outside this view.
    pub fn key_before(&self) -> Option<&K> {
        let (_, _, before, _) = self.bounds()?;
        before.map(|n| self.trie.node_key(n))
    }

    /// The key just after the prefix range, outside this view.
    pub fn key_after(&self) -> Option<&K> {
        let (_, _, _, after) = self.bounds()?;
        after.map(|n| self.trie.node_key(n))
    }

    pub fn iter(&mut self) -> PrefixIter<'_, K, V, A>
    where
        V: Clone,
    {
        let bounds = self.bounds();
        let (start, end) = match bounds {
            Some((first, last, ..)) => (Some(first), Some(last)),
            None => (None, None),
        };
        PrefixIter {
            trie: self.trie,
            current: start,
            end,
            done: start.is_none(),
            expected_mod_count: self.trie.mod_count(),
            last: None,
        }
    }
}

/// Iterator over one [`PrefixView`]'s matching entries, in sort order.
pub struct PrefixIter<'a, K, V, A> {
    trie: &'a mut PatriciaTrie<K, V, A>,
    current: Option<u32>,
    end: Option<u32>,
    done: bool,
    expected_mod_count: u64,
    last: Option<u32>,
}

impl<'a, K, V, A> PrefixIter<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    pub fn try_next(&mut self) -> Result<Option<Entry<K, V>>> {
        if self.done {
            return Ok(None);
        }
        if self.trie.mod_count() != self.expected_mod_count {
            return Err(PatriciaError::ConcurrentModification);
        }
        let id = match self.current {
            Some(id) => id,
            None => {
                self.done = true;
                return Ok(None);
            }
        };
        let entry = self.trie.entry_at(id);
        self.last = Some(id);
        if Some(id) == self.end {
            self.current = None;
            self.done = true;
        } else {
            self.current = self.trie.next_node(id, None);
            if self.current.is_none() {
                self.done = true;
            }
        }
        Ok(Some(entry))
    }

    pub fn remove(&mut self) -> Result<()> {
        if self.trie.mod_count() != self.expected_mod_count {
            return Err(PatriciaError::ConcurrentModification);
        }
        let id = self.last.take().ok_or(PatriciaError::IllegalArgument(
            "remove() called before next() or called twice in a row",
        ))?;
        if Some(id) == self.end {
            self.done = true;
        }
        self.trie.remove_by_node(id);
        self.expected_mod_count = self.trie.mod_count();
        Ok(())
    }
}

impl<'a, K, V, A> Iterator for PrefixIter<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().expect("trie structurally modified during iteration")
    }
}
