//! Invariant violations for editor state
//!
//! Transforms never fail; these errors only describe a state that breaks
//! one of the structural rules, and are reported by
//! [`EditorState::check_invariants`](super::EditorState::check_invariants).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("editor state has no cursors")]
    NoCursors,

    #[error("cursor id {id:?} appears more than once")]
    DuplicateId { id: String },

    #[error("cursors {first:?} and {second:?} overlap")]
    Overlap { first: String, second: String },

    #[error("cursor {id:?} offset {offset} is past the end of the text (length {len})")]
    OutOfBounds { id: String, offset: usize, len: usize },
}
