//! Cursor and selection management for text editing
//!
//! A cursor is an anchor/focus pair over UTF-16 offsets with a stable id.
//! A zero-width cursor is a caret; anything wider is a selection.

use serde::{Deserialize, Serialize};

/// Which way a selection extends from its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Caret or selection with a stable identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub id: String,
    /// Fixed end of the selection
    pub anchor: usize,
    /// Moving end of the selection
    pub focus: usize,
}

impl Cursor {
    /// Create a cursor with a freshly generated id
    pub fn new(anchor: usize, focus: usize) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), anchor, focus)
    }

    pub fn with_id(id: impl Into<String>, anchor: usize, focus: usize) -> Self {
        Self {
            id: id.into(),
            anchor,
            focus,
        }
    }

    /// Create a caret (anchor == focus) with a freshly generated id
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Copy of this cursor with both endpoints replaced
    pub fn with_range(&self, anchor: usize, focus: usize) -> Self {
        Self {
            id: self.id.clone(),
            anchor,
            focus,
        }
    }

    /// Copy of this cursor with only the focus replaced
    pub fn with_focus(&self, focus: usize) -> Self {
        self.with_range(self.anchor, focus)
    }

    /// Copy of this cursor collapsed to a caret at `offset`
    pub fn collapsed_to(&self, offset: usize) -> Self {
        self.with_range(offset, offset)
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.focus)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.focus)
    }

    pub fn direction(&self) -> Direction {
        if self.anchor <= self.focus {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Width of the selection in code units
    pub fn size(&self) -> usize {
        self.to() - self.from()
    }

    /// Check if this cursor is a caret (no selection)
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Check whether two cursors claim overlapping text
    ///
    /// Two selections overlap when their half-open `[from, to)` spans
    /// intersect; selections that only touch do not. A caret overlaps a
    /// selection it sits strictly inside, and another caret at the same
    /// offset. A caret on a selection's edge only touches it.
    pub fn overlaps(&self, other: &Cursor) -> bool {
        match (self.is_collapsed(), other.is_collapsed()) {
            (true, true) => self.focus == other.focus,
            (true, false) => other.from() < self.focus && self.focus < other.to(),
            (false, true) => self.from() < other.focus && other.focus < self.to(),
            (false, false) => self.from() < other.to() && other.from() < self.to(),
        }
    }

    /// Check whether committing this cursor should absorb `other`
    ///
    /// Like `overlaps`, except that a selection also takes in carets resting
    /// on either of its edges.
    pub fn covers(&self, other: &Cursor) -> bool {
        if !self.is_collapsed() && other.is_collapsed() {
            self.from() <= other.focus && other.focus <= self.to()
        } else {
            self.overlaps(other)
        }
    }

    /// Widen this cursor to also cover `other`, keeping this cursor's id
    ///
    /// Forward cursors take the smallest anchor and largest focus; backward
    /// cursors the mirror image.
    pub fn union(&self, other: &Cursor) -> Self {
        match self.direction() {
            Direction::Forward => self.with_range(
                self.anchor.min(other.anchor),
                self.focus.max(other.focus),
            ),
            Direction::Backward => self.with_range(
                self.anchor.max(other.anchor),
                self.focus.min(other.focus),
            ),
        }
    }

    /// Map both endpoints through `f`
    pub fn map_offsets(&self, f: impl Fn(usize) -> usize) -> Self {
        self.with_range(f(self.anchor), f(self.focus))
    }
}
