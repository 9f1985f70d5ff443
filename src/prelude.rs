//! Common imports for consumers of this crate.

pub use crate::analyzers::{ByteKeyAnalyzer, StringKeyAnalyzer};
pub use crate::cursor::{Cursor, Decision};
pub use crate::error::{PatriciaError, Result};
pub use crate::key::KeyAnalyzer;
pub use crate::sync::SyncPatriciaTrie;
pub use crate::trie::{Entry, PatriciaTrie};
