//! Property-based invariants and round-trip laws, spec.md §8.

use std::collections::BTreeMap;

use patricia_store::{ByteKeyAnalyzer, PatriciaTrie};
use proptest::collection::vec as pvec;
use proptest::prelude::*;

fn small_key() -> impl Strategy<Value = Vec<u8>> {
    pvec(any::<u8>(), 0..6)
}

proptest! {
    #[test]
    fn get_reflects_every_stored_entry(entries in pvec((small_key(), any::<i32>()), 0..64)) {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        let mut model: BTreeMap<Vec<u8>, i32> = BTreeMap::new();
        for (k, v) in entries {
            trie.put(k.clone(), v);
            model.insert(k, v);
        }
        for (k, v) in &model {
            prop_assert_eq!(trie.get(k), Some(v));
        }
    }

    #[test]
    fn contains_key_matches_get(entries in pvec((small_key(), any::<i32>()), 0..64), probe in small_key()) {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        for (k, v) in entries {
            trie.put(k, v);
        }
        prop_assert_eq!(trie.contains_key(&probe), trie.get(&probe).is_some());
    }

    #[test]
    fn size_matches_distinct_key_count_after_inserts_and_removes(
        inserts in pvec((small_key(), any::<i32>()), 0..64),
        removes in pvec(small_key(), 0..32),
    ) {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        let mut model: BTreeMap<Vec<u8>, i32> = BTreeMap::new();
        for (k, v) in inserts {
            trie.put(k.clone(), v);
            model.insert(k, v);
        }
        for k in removes {
            trie.remove(&k);
            model.remove(&k);
        }
        prop_assert_eq!(trie.size(), model.len());
        prop_assert_eq!(trie.entry_set().iter().count(), model.len());
    }

    #[test]
    fn iteration_is_strictly_increasing(entries in pvec((small_key(), any::<i32>()), 0..64)) {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        for (k, v) in entries {
            trie.put(k, v);
        }
        let mut keys = trie.key_set();
        let collected: Vec<_> = keys.iter().collect();
        for w in collected.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn insert_then_remove_restores_prior_size_and_sequence(
        entries in pvec((small_key(), any::<i32>()), 1..32),
        extra_key in small_key(),
        extra_value in any::<i32>(),
    ) {
        let mut trie = PatriciaTrie::new(ByteKeyAnalyzer);
        for (k, v) in &entries {
            trie.put(k.clone(), *v);
        }
        prop_assume!(!trie.contains_key(&extra_key));

        let before_size = trie.size();
        let before_keys: Vec<_> = trie.key_set().iter().collect();

        trie.put(extra_key.clone(), extra_value);
        trie.remove(&extra_key);

        prop_assert_eq!(trie.size(), before_size);
        let after_keys: Vec<_> = trie.key_set().iter().collect();
        prop_assert_eq!(before_keys, after_keys);
    }
}
