//! The caller-supplied decision callback driving `select` and `traverse`
//! (spec §4.6, §4.7, design notes).

use crate::trie::Entry;

/// Decision returned by a [`Cursor`] after inspecting one visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed to the next candidate.
    Continue,
    /// Stop; the last visited entry is the result.
    Exit,
    /// Delete the last visited entry and keep going. Only legal inside
    /// `traverse`; illegal inside `select`.
    Remove,
    /// Delete the last visited entry and stop; the returned entry is a
    /// detached copy that does not alias the (now removed) node.
    RemoveAndExit,
}

/// A decision function invoked at each entry visited by `select` or
/// `traverse`. Blanket-implemented for any `FnMut(&Entry<K, V>) -> Decision`,
/// so closures work directly as cursors.
pub trait Cursor<K, V> {
    fn select(&mut self, entry: &Entry<K, V>) -> Decision;
}

impl<K, V, F> Cursor<K, V> for F
where
    F: FnMut(&Entry<K, V>) -> Decision,
{
    fn select(&mut self, entry: &Entry<K, V>) -> Decision {
        self(entry)
    }
}
