//! Bounded range view `[from?, to?)` over the trie core (spec §4.9).
//!
//! A `RangeView` never copies data; every operation delegates straight
//! back into the [`PatriciaTrie`] it borrows, after checking the key (for
//! mutation) or clamping the walk (for iteration) against its bounds.

use std::cmp::Ordering;

use crate::error::{PatriciaError, Result};
use crate::iter::Iter;
use crate::key::KeyAnalyzer;
use crate::trie::PatriciaTrie;

/// One endpoint of a [`RangeView`]: absent means unbounded on that side.
#[derive(Clone)]
struct Bound<K> {
    key: K,
    inclusive: bool,
}

pub struct RangeView<'a, K, V, A> {
    trie: &'a mut PatriciaTrie<K, V, A>,
    from: Option<Bound<K>>,
    to: Option<Bound<K>>,
}

impl<'a, K, V, A> RangeView<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
{
    pub(crate) fn new(
        trie: &'a mut PatriciaTrie<K, V, A>,
        from: Option<(K, bool)>,
        to: Option<(K, bool)>,
    ) -> Self {
        RangeView {
            trie,
            from: from.map(|(key, inclusive)| Bound { key, inclusive }),
            to: to.map(|(key, inclusive)| Bound { key, inclusive }),
        }
    }

    fn in_range(&self, key: &K) -> bool {
        if let Some(from) = &self.from {
            let cmp = self.trie.comparator().compare(key, &from.key);
            if cmp == Ordering::Less || (cmp == Ordering::Equal && !from.inclusive) {
                return false;
            }
        }
        if let Some(to) = &self.to {
            let cmp = self.trie.comparator().compare(key, &to.key);
            if cmp == Ordering::Greater || (cmp == Ordering::Equal && !to.inclusive) {
                return false;
            }
        }
        true
    }

    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        if !self.in_range(&key) {
            return Err(PatriciaError::OutOfRange);
        }
        Ok(self.trie.put(key, value))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        if self.in_range(key) {
            self.trie.get(key)
        } else {
            None
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        if self.in_range(key) {
            self.trie.remove(key)
        } else {
            None
        }
    }

    /// A new range clamped to `[from, to)` within the current one;
    /// `from`/`to` falling outside the current bounds is an error.
    pub fn sub_range(&mut self, from: Option<K>, to: Option<K>) -> Result<RangeView<'_, K, V, A>> {
        if let Some(ref f) = from {
            if !self.in_range(f) {
                return Err(PatriciaError::OutOfRange);
            }
        }
        if let Some(ref t) = to {
            if !self.in_range(t) {
                return Err(PatriciaError::OutOfRange);
            }
        }
        Ok(RangeView::new(
            self.trie,
            from.map(|k| (k, true)),
            to.map(|k| (k, false)),
        ))
    }

    fn first_in_range(&self) -> Option<u32> {
        let candidate = match &self.from {
            None => self.trie.first_node(),
            Some(from) => {
                if from.inclusive {
                    self.trie.ceiling_node(&from.key)
                } else {
                    self.trie.higher_node(&from.key)
                }
            }
        }?;
        let key = self.trie.node_key(candidate);
        if self.in_range(key) {
            Some(candidate)
        } else {
            None
        }
    }

    fn last_in_range(&self) -> Option<u32> {
        let candidate = match &self.to {
            None => self.trie.last_node(),
            Some(to) => {
                if to.inclusive {
                    self.trie.floor_node(&to.key)
                } else {
                    self.trie.lower_node(&to.key)
                }
            }
        }?;
        let key = self.trie.node_key(candidate);
        if self.in_range(key) {
            Some(candidate)
        } else {
            None
        }
    }

    pub fn first_key(&self) -> Result<&K> {
        self.first_in_range()
            .map(|n| self.trie.node_key(n))
            .ok_or(PatriciaError::NoSuchElement)
    }

    pub fn last_key(&self) -> Result<&K> {
        self.last_in_range()
            .map(|n| self.trie.node_key(n))
            .ok_or(PatriciaError::NoSuchElement)
    }

    pub fn iter(&mut self) -> RangeIter<'_, K, V, A>
    where
        V: Clone,
    {
        let start = self.first_in_range();
        RangeIter {
            inner: Iter::new(self.trie, start, None),
            to: self.to.clone(),
            done: false,
        }
    }
}

/// Iterator returned by [`RangeView::iter`]; stops permanently once past
/// the view's `to` bound rather than walking into the rest of the trie.
pub struct RangeIter<'a, K, V, A> {
    inner: Iter<'a, K, V, A>,
    to: Option<Bound<K>>,
    done: bool,
}

impl<'a, K, V, A> RangeIter<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    fn past_to(&self, key: &K) -> bool {
        match &self.to {
            None => false,
            Some(to) => {
                let cmp = self.inner.trie_ref().comparator().compare(key, &to.key);
                cmp == Ordering::Greater || (cmp == Ordering::Equal && !to.inclusive)
            }
        }
    }

    pub fn remove(&mut self) -> Result<()> {
        self.inner.remove()
    }
}

impl<'a, K, V, A> Iterator for RangeIter<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    type Item = crate::trie::Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            Some(entry) => {
                if self.past_to(entry.key()) {
                    self.done = true;
                    None
                } else {
                    Some(entry)
                }
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ByteKeyAnalyzer;
    use crate::trie::PatriciaTrie;

    fn sample() -> PatriciaTrie<Vec<u8>, i32, ByteKeyAnalyzer> {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        for b in [b'a', b'b', b'c', b'd', b'e', b'f'] {
            trie.put(vec![b], b as i32);
        }
        trie
    }

    #[test]
    fn sub_map_rejects_out_of_range_put() {
        let mut trie = sample();
        let mut view = trie.sub_map(vec![b'b'], vec![b'f']);
        assert_eq!(view.put(vec![b'a'], 0), Err(PatriciaError::OutOfRange));
        assert!(view.put(vec![b'd'], 99).is_ok());
    }

    #[test]
    fn sub_map_bounds_and_iteration() {
        let mut trie = sample();
        let mut view = trie.sub_map(vec![b'b'], vec![b'f']);
        assert_eq!(view.first_key().unwrap(), &vec![b'b']);
        assert_eq!(view.last_key().unwrap(), &vec![b'e']);
        let keys: Vec<_> = view.iter().map(|e| e.into_inner().0).collect();
        assert_eq!(keys, vec![vec![b'b'], vec![b'c'], vec![b'd'], vec![b'e']]);
    }

    #[test]
    fn head_map_and_tail_map() {
        let mut trie = sample();
        assert_eq!(trie.head_map(vec![b'c']).last_key().unwrap(), &vec![b'b']);
        assert_eq!(trie.tail_map(vec![b'd']).first_key().unwrap(), &vec![b'd']);
    }

    #[test]
    fn sub_range_validates_against_parent_bounds() {
        let mut trie = sample();
        let mut view = trie.sub_map(vec![b'b'], vec![b'e']);
        assert!(view.sub_range(Some(vec![b'a']), None).is_err());
        assert!(view.sub_range(Some(vec![b'c']), Some(vec![b'd'])).is_ok());
    }
}
