//! Prefix-subtree views, spec.md §8 scenario 1 and the prefix laws in §8.

use patricia_store::{PatriciaError, PatriciaTrie, StringKeyAnalyzer};

#[test]
fn get_prefixed_by_whole_key() {
    let mut trie = PatriciaTrie::new(StringKeyAnalyzer);
    trie.put("Lime".to_string(), 1);
    trie.put("LimeWire".to_string(), 2);
    trie.put("LimeRadio".to_string(), 3);
    trie.put("Orange".to_string(), 4);
    assert_eq!(trie.size(), 4);

    let mut view = trie.get_prefixed_by("Lime".to_string());
    let keys: Vec<String> = view.iter().map(|e| e.into_inner().0).collect();
    assert_eq!(keys, vec!["Lime".to_string(), "LimeRadio".to_string(), "LimeWire".to_string()]);
}

#[test]
fn prefix_view_first_last_and_no_match() {
    let mut trie = PatriciaTrie::new(StringKeyAnalyzer);
    trie.put("cat".to_string(), 1);
    trie.put("car".to_string(), 2);
    trie.put("dog".to_string(), 3);

    let view = trie.get_prefixed_by("ca".to_string());
    assert_eq!(view.first_key().unwrap(), "car");
    assert_eq!(view.last_key().unwrap(), "cat");

    let missing = trie.get_prefixed_by("zz".to_string());
    assert_eq!(missing.first_key(), Err(PatriciaError::NoSuchElement));
}

#[test]
fn element_offset_length_must_be_aligned() {
    let mut trie = PatriciaTrie::new(StringKeyAnalyzer);
    trie.put("abcdef".to_string(), 1);
    // one UTF-16 element is 16 bits; 5 bits is not a multiple of that.
    let err = trie.get_prefixed_by_bits_offset("abcdef".to_string(), 0, 5).unwrap_err();
    assert_eq!(err, PatriciaError::IllegalArgument(
        "prefix offset/length must be a multiple of the analyzer's element width",
    ));
}

#[test]
fn get_prefixed_by_len_counts_elements_not_bits() {
    let mut trie = PatriciaTrie::new(StringKeyAnalyzer);
    trie.put("hello".to_string(), 1);
    trie.put("help".to_string(), 2);
    trie.put("world".to_string(), 3);

    let mut view = trie.get_prefixed_by_len("hello".to_string(), 3).unwrap();
    let keys: Vec<String> = view.iter().map(|e| e.into_inner().0).collect();
    assert_eq!(keys, vec!["hello".to_string(), "help".to_string()]);
}
