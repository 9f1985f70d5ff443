use std::fmt;

/// Every way a trie operation can fail (spec §4.12 / §7).
///
/// `ConcurrentModification` signals a programming error in the caller
/// (external mutation observed by a live iterator) and should not be
/// retried. The remaining variants are ordinary caller errors and surface
/// unchanged from whichever operation detected them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatriciaError {
    /// A `put`/`get`/`remove` was attempted with an absent key.
    NullKey,
    /// A generic-erased lookup was given a key of incompatible runtime
    /// shape for this trie's key type.
    WrongKeyType,
    /// A range-view `put`, or a sub-range construction, fell outside the
    /// bounds of the view.
    OutOfRange,
    /// An iterator observed the trie's `mod_count` change since its last
    /// step and aborted before reading any further state.
    ConcurrentModification,
    /// `first_key`/`last_key` on an empty view, or an iterator stepped
    /// past its last element.
    NoSuchElement,
    /// A prefix offset or length was not a multiple of the analyzer's
    /// element width.
    IllegalArgument(&'static str),
    /// `Decision::Remove` was returned from a `select` cursor; removal
    /// mid-select is only legal during `traverse`.
    Unsupported(&'static str),
}

impl fmt::Display for PatriciaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatriciaError::NullKey => {
                write!(f, "Error: operation requires a present key.")
            }
            PatriciaError::WrongKeyType => {
                write!(f, "Error: key has an incompatible runtime shape for this trie.")
            }
            PatriciaError::OutOfRange => {
                write!(f, "Error: key falls outside the bounds of this view.")
            }
            PatriciaError::ConcurrentModification => {
                write!(f, "Error: trie was structurally modified while an iterator was live.")
            }
            PatriciaError::NoSuchElement => {
                write!(f, "Error: no such element.")
            }
            PatriciaError::IllegalArgument(msg) => {
                write!(f, "Error: illegal argument: {msg}")
            }
            PatriciaError::Unsupported(msg) => {
                write!(f, "Error: unsupported operation: {msg}")
            }
        }
    }
}

impl std::error::Error for PatriciaError {}

pub type Result<T> = std::result::Result<T, PatriciaError>;
