//! Fail-fast iterators over the trie core (spec §4.5/§4.7, §5).
//!
//! Every iterator snapshots `mod_count` at creation and compares against
//! the live trie on each step; external structural mutation is detected
//! before any further node is touched. An iterator's own `remove` updates
//! its expectation in lockstep, so self-driven mutation never trips the
//! check (spec §5).

use crate::error::{PatriciaError, Result};
use crate::key::KeyAnalyzer;
use crate::trie::{Entry, PatriciaTrie};

//------------ Iter -----------------------------------------------------

/// Ordered iterator over `(key, value)` entries, optionally scoped to a
/// subtree by `bound` (used by prefix views to stay inside their subtree).
pub struct Iter<'a, K, V, A> {
    trie: &'a mut PatriciaTrie<K, V, A>,
    current: Option<u32>,
    last: Option<u32>,
    bound: Option<u32>,
    expected_mod_count: u64,
}

impl<'a, K, V, A> Iter<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    pub(crate) fn new(trie: &'a mut PatriciaTrie<K, V, A>, start: Option<u32>, bound: Option<u32>) -> Self {
        let expected_mod_count = trie.mod_count();
        Iter {
            trie,
            current: start,
            last: None,
            bound,
            expected_mod_count,
        }
    }

    /// Borrow the underlying trie, e.g. to reach its comparator.
    pub(crate) fn trie_ref(&self) -> &PatriciaTrie<K, V, A> {
        self.trie
    }

    /// Node id most recently returned by `next`/`try_next`, if any.
    pub(crate) fn last_id(&self) -> Option<u32> {
        self.last
    }

    fn check_mod_count(&self) -> Result<()> {
        if self.trie.mod_count() != self.expected_mod_count {
            Err(PatriciaError::ConcurrentModification)
        } else {
            Ok(())
        }
    }

    /// Advance and return the next entry, or an explicit
    /// [`PatriciaError::ConcurrentModification`] instead of panicking.
    pub fn try_next(&mut self) -> Result<Option<Entry<K, V>>> {
        self.check_mod_count()?;
        match self.current {
            None => Ok(None),
            Some(id) => {
                let entry = self.trie.entry_at(id);
                self.last = Some(id);
                self.current = self.trie.next_node(id, self.bound);
                Ok(Some(entry))
            }
        }
    }

    /// Remove the entry most recently returned by `next`. Does not trip
    /// this iterator's own fail-fast check; does invalidate any other live
    /// iterator over the same trie.
    pub fn remove(&mut self) -> Result<()> {
        self.check_mod_count()?;
        let id = self.last.take().ok_or(PatriciaError::IllegalArgument(
            "remove() called before next() or called twice in a row",
        ))?;
        self.trie.remove_by_node(id);
        self.expected_mod_count = self.trie.mod_count();
        Ok(())
    }
}

impl<'a, K, V, A> Iterator for Iter<'a, K, V, A>
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

//------------ Keys / Values ---------------------------------------------

pub struct Keys<'a, K, V, A>(pub(crate) Iter<'a, K, V, A>);

impl<'a, K, V, A> Iterator for Keys<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.into_inner().0)
    }
}

pub struct Values<'a, K, V, A>(pub(crate) Iter<'a, K, V, A>);

impl<'a, K, V, A> Iterator for Values<'a, K, V, A>
where
    A: KeyAnalyzer<K>,
    K: Clone,
    V: Clone,
{
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.into_inner().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ByteKeyAnalyzer;
    use crate::trie::PatriciaTrie;

    fn sample() -> PatriciaTrie<Vec<u8>, i32, ByteKeyAnalyzer> {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        trie.put(vec![1], 1);
        trie.put(vec![2], 2);
        trie.put(vec![3], 3);
        trie
    }

    #[test]
    fn iterates_in_sorted_order() {
        let mut trie = sample();
        let start = trie.first_node();
        let it = Iter::new(&mut trie, start, None);
        let keys: Vec<_> = it.map(|e| e.into_inner().0).collect();
        assert_eq!(keys, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn external_mutation_trips_fail_fast() {
        let mut trie = sample();
        let start = trie.first_node();
        let mut it = Iter::new(&mut trie, start, None);
        it.try_next().unwrap();
        it.trie.put(vec![4], 4);
        let err = it.try_next().unwrap_err();
        assert_eq!(err, PatriciaError::ConcurrentModification);
    }

    #[test]
    fn own_remove_does_not_trip_fail_fast() {
        let mut trie = sample();
        let start = trie.first_node();
        let mut it = Iter::new(&mut trie, start, None);
        it.try_next().unwrap();
        it.remove().unwrap();
        let rest: Vec<_> = it.map(|e| e.into_inner().0).collect();
        assert_eq!(rest, vec![vec![2], vec![3]]);
        assert_eq!(trie.size(), 2);
    }

    #[test]
    fn remove_without_prior_next_is_illegal_argument() {
        let mut trie = sample();
        let start = trie.first_node();
        let mut it = Iter::new(&mut trie, start, None);
        let err = it.remove().unwrap_err();
        assert!(matches!(err, PatriciaError::IllegalArgument(_)));
    }
}
