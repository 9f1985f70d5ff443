//! The `KeyAnalyzer` capability consumed by the trie core.
//!
//! The core never interprets key bits itself; every bit-level question is
//! routed through an analyzer. This keeps the trie generic over any key
//! type that can be described as a bit-addressable sequence: byte strings,
//! UTF-16 strings, fixed-width integers, IP prefixes, and so on.

/// Sentinel returned by [`KeyAnalyzer::bit_index`] when both compared
/// ranges are all-zero bits.
pub const NULL_BIT_KEY: i32 = -1;

/// Sentinel returned by [`KeyAnalyzer::bit_index`] when the compared
/// ranges are bit-identical.
pub const EQUAL_BIT_KEY: i32 = -2;

/// A valid bit index is never negative; the two sentinels above are the
/// only negative values a conforming analyzer may return from
/// `bit_index`.
#[inline]
pub fn is_valid_bit_index(index: i32) -> bool {
    index >= 0
}

/// External capability consulted by the core for all key-level operations
/// (spec §4.1). Implementations are expected to be cheap, pure functions
/// of their arguments.
pub trait KeyAnalyzer<K: ?Sized> {
    /// Total bit length of `key`.
    fn length_in_bits(&self, key: &K) -> i32;

    /// Width, in bits, of one "element" of the key (e.g. 8 for bytes, 16
    /// for UTF-16 code units). Used to translate element-based prefix
    /// offsets into bit offsets.
    fn bits_per_element(&self) -> i32;

    /// Read the bit at `bit_index`. Bits at or past `length_in_bits` read
    /// as `0`, so callers never need to bounds-check before calling this.
    fn is_bit_set(&self, key: &K, bit_index: i32, length_in_bits: i32) -> bool;

    /// The index of the first bit at which the two bit ranges
    /// `a[a_off..a_off+a_len)` and `b[b_off..b_off+b_len)` disagree, or
    /// [`NULL_BIT_KEY`] if both ranges are all-zero, or [`EQUAL_BIT_KEY`]
    /// if the ranges are bit-identical.
    fn bit_index(
        &self,
        a: &K,
        a_off: i32,
        a_len: i32,
        b: &K,
        b_off: i32,
        b_len: i32,
    ) -> i32;

    /// Whether `prefix[off..off+len)` is a bit-prefix of `key`.
    fn is_prefix(&self, prefix: &K, off: i32, len: i32, key: &K) -> bool;

    /// Total order over keys, consistent with the lexicographic bit
    /// order induced by `is_bit_set`.
    fn compare(&self, a: &K, b: &K) -> std::cmp::Ordering;
}

/// Convenience used throughout the core: the bit-index of the first
/// difference between two *whole* keys.
pub(crate) fn whole_key_bit_index<K, A: KeyAnalyzer<K> + ?Sized>(
    analyzer: &A,
    a: &K,
    b: &K,
) -> i32 {
    let a_len = analyzer.length_in_bits(a);
    let b_len = analyzer.length_in_bits(b);
    analyzer.bit_index(a, 0, a_len, b, 0, b_len)
}
