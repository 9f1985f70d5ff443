//! `key_set`/`values`/`entry_set` facades (spec §6): thin views backed by
//! the trie that support removal through their iterators but not addition.

use crate::error::Result;
use crate::iter::{Iter, Keys, Values};
use crate::key::KeyAnalyzer;
use crate::trie::PatriciaTrie;

pub struct KeySet<'a, K, V, A> {
    trie: &'a mut PatriciaTrie<K, V, A>,
}

impl<'a, K, V, A> KeySet<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    pub(crate) fn new(trie: &'a mut PatriciaTrie<K, V, A>) -> Self {
        KeySet { trie }
    }

    pub fn len(&self) -> usize {
        self.trie.size()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.trie.contains_key(key)
    }

    /// Removes `key` from the backing trie. Adding keys through this view
    /// is unsupported; use [`PatriciaTrie::put`] on the trie itself.
    pub fn remove(&mut self, key: &K) -> bool {
        self.trie.remove(key).is_some()
    }

    pub fn iter(&mut self) -> Keys<'_, K, V, A> {
        let start = self.trie.first_node();
        Keys(Iter::new(self.trie, start, None))
    }
}

pub struct ValuesView<'a, K, V, A> {
    trie: &'a mut PatriciaTrie<K, V, A>,
}

impl<'a, K, V, A> ValuesView<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    pub(crate) fn new(trie: &'a mut PatriciaTrie<K, V, A>) -> Self {
        ValuesView { trie }
    }

    pub fn len(&self) -> usize {
        self.trie.size()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn iter(&mut self) -> Values<'_, K, V, A> {
        let start = self.trie.first_node();
        Values(Iter::new(self.trie, start, None))
    }
}

pub struct EntrySet<'a, K, V, A> {
    trie: &'a mut PatriciaTrie<K, V, A>,
}

impl<'a, K, V, A> EntrySet<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    pub(crate) fn new(trie: &'a mut PatriciaTrie<K, V, A>) -> Self {
        EntrySet { trie }
    }

    pub fn len(&self) -> usize {
        self.trie.size()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn iter(&mut self) -> Iter<'_, K, V, A> {
        let start = self.trie.first_node();
        Iter::new(self.trie, start, None)
    }
}
