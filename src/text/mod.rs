//! Text Editor Core
//!
//! Pure text editing with no knowledge of the DOM. Every operation takes an
//! immutable state and returns a new one; nothing here performs I/O.
//!
//! ## Modules
//!
//! - `cursor`: Carets and selections (anchor/focus pairs with stable ids)
//! - `editor_state`: The document and its edit/navigation algebra
//! - `annotations`: Interval sweep that partitions the text for rendering
//! - `line_index`: Binary search over line begin offsets
//! - `errors`: Invariant violations

pub mod annotations;
pub mod cursor;
pub mod editor_state;
pub mod errors;
pub mod line_index;

// Re-exports for convenience
pub use annotations::{
    Annotation, AnnotationId, AnnotationKind, AnnotationList, AnnotationOptions, AnnotationRange,
};
pub use cursor::{Cursor, Direction};
pub use editor_state::EditorState;
pub use errors::InvariantViolation;
pub use line_index::{find_line, LineIndex};
