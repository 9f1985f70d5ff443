//! A PATRICIA trie backed sorted associative container for bit-addressable
//! keys.
//!
//! The core is a single cyclic node graph (no `Box`/`Rc` ownership; see
//! [`node`]) addressed through a stable-index [`node::Arena`], generic over
//! any key type describable through the [`key::KeyAnalyzer`] capability.
//! On top of that core this crate builds ordered traversal, fail-fast
//! iterators, live range and prefix submaps, and XOR-nearest selection.
//!
//! Part of the same retrieval-pack lineage as `rotonda-store`'s tree-bitmap
//! prefix store, reworked here around a PATRICIA trie instead of a
//! multi-bit stride tree.

mod analyzers;
mod collections;
mod cursor;
mod error;
mod iter;
mod key;
mod node;
mod prefix;
mod range;
mod sync;
mod trie;

pub mod prelude;

pub use analyzers::{ByteKeyAnalyzer, StringKeyAnalyzer};
pub use collections::{EntrySet, KeySet, ValuesView};
pub use cursor::{Cursor, Decision};
pub use error::{PatriciaError, Result};
pub use iter::{Iter, Keys, Values};
pub use key::{KeyAnalyzer, EQUAL_BIT_KEY, NULL_BIT_KEY};
pub use prefix::{PrefixIter, PrefixView};
pub use range::{RangeIter, RangeView};
pub use sync::SyncPatriciaTrie;
pub use trie::{Entry, PatriciaTrie};
