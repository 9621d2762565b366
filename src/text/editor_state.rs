//! Editor state management
//!
//! `EditorState` is the immutable document: text, an ordered set of
//! cursors, transient focus flags and the pending IME composition. Every
//! operation returns a new state and leaves the receiver untouched, so any
//! earlier snapshot stays valid for as long as someone holds it.
//!
//! Offsets are UTF-16 code units, as the browser reports them.

use serde::Serialize;

use super::cursor::Cursor;
use super::errors::InvariantViolation;
use super::line_index::LineIndex;
use crate::utils::utf16;

/// Complete text editing state
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    value: String,
    cursors: Vec<Cursor>,
    active: bool,
    focused: bool,
    /// IME text staged at the cursors but not yet part of `value`
    composition_value: String,
}

impl EditorState {
    /// Create a state holding `initial` with one caret at offset 0
    pub fn create(initial: &str) -> Self {
        Self {
            value: initial.to_string(),
            cursors: vec![Cursor::caret(0)],
            active: false,
            focused: false,
            composition_value: String::new(),
        }
    }

    /// Create a state from text and a cursor set
    ///
    /// Offsets are clamped into the text and the cursors are committed one
    /// by one through `update_cursor`, so overlapping input is merged.
    pub fn from_parts(value: impl Into<String>, cursors: Vec<Cursor>) -> Self {
        let value = value.into();
        let cursors = if cursors.is_empty() {
            vec![Cursor::caret(0)]
        } else {
            cursors
        };

        let base = Self {
            value,
            cursors: Vec::new(),
            active: false,
            focused: false,
            composition_value: String::new(),
        };

        cursors
            .into_iter()
            .fold(base, |state, cursor| {
                let cursor = cursor.map_offsets(|offset| state.clamp_offset(offset));
                state.update_cursor(cursor)
            })
            .checked()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn composition_value(&self) -> &str {
        &self.composition_value
    }

    /// Length of the text in UTF-16 code units
    pub fn len(&self) -> usize {
        utf16::len(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Look up a cursor by id
    pub fn cursor(&self, id: &str) -> Option<&Cursor> {
        self.cursors.iter().find(|cursor| cursor.id == id)
    }

    /// The first cursor, which survives `set_selection`
    pub fn primary_cursor(&self) -> &Cursor {
        // An empty cursor list would violate the state invariants
        &self.cursors[0]
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.value)
    }

    /// Text covered by each cursor, in cursor order
    pub fn selected_texts(&self) -> Vec<&str> {
        self.cursors
            .iter()
            .map(|cursor| utf16::slice(&self.value, cursor.from(), cursor.to()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Primitive edits
    // ------------------------------------------------------------------

    /// Insert `text` at offset `at`
    ///
    /// Cursor endpoints at or after `at` shift right by the inserted length;
    /// shifted cursors are committed again since they may now overlap.
    pub fn insert_at(&self, at: usize, text: &str) -> Self {
        debug_assert!(at <= self.len(), "insert offset {} past end {}", at, self.len());

        if text.is_empty() {
            return self.clone();
        }

        let at = self.clamp_offset(at);
        let delta = utf16::len(text);

        let mut next = self.clone();
        next.value.insert_str(utf16::byte_index(&self.value, at), text);

        let shifted = next.remap_cursors(|offset| if offset >= at { offset + delta } else { offset });
        next.recommit(&shifted).checked()
    }

    /// Remove the text between `from` and `to`
    ///
    /// Endpoints inside the removed span collapse onto `from`; endpoints
    /// after it shift left by the removed length.
    pub fn remove_by_range(&self, from: usize, to: usize) -> Self {
        debug_assert!(from <= to, "inverted range {}..{}", from, to);
        debug_assert!(to <= self.len(), "range end {} past end {}", to, self.len());

        let to = self.clamp_offset(to);
        let from = self.clamp_offset(from).min(to);
        if from == to {
            return self.clone();
        }

        let width = to - from;
        let start = utf16::byte_index(&self.value, from);
        let end = utf16::byte_index(&self.value, to);

        let mut next = self.clone();
        next.value.replace_range(start..end, "");

        let shifted = next.remap_cursors(|offset| {
            if offset < to {
                offset.min(from)
            } else {
                offset - width
            }
        });
        next.recommit(&shifted).checked()
    }

    /// Commit a cursor, merging away every cursor it overlaps
    ///
    /// Overlapping cursors with the same direction are absorbed into
    /// `cursor` by widening it to their union. Overlapping cursors running
    /// the other way are dropped. A selection also absorbs carets resting on
    /// its edges. The result is appended after the remaining cursors and
    /// keeps `cursor`'s id.
    pub fn update_cursor(&self, cursor: Cursor) -> Self {
        self.commit_cursor(cursor, Cursor::covers)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Replace every cursor's selection with `text`
    pub fn insert_text(&self, text: &str) -> Self {
        self.reduce_with_each_cursor(|state, cursor| {
            state
                .remove_by_range(cursor.from(), cursor.to())
                .insert_at(cursor.from(), text)
        })
        .checked()
    }

    /// Stage IME text, deleting whatever the cursors had selected
    pub fn set_composition_value(&self, value: &str) -> Self {
        let mut next = self.remove_selections();
        next.composition_value = value.to_string();
        next.checked()
    }

    /// Insert the staged composition at every cursor and clear it
    pub fn commit_composition(&self) -> Self {
        if self.composition_value.is_empty() {
            return self.clone();
        }

        let mut cleared = self.clone();
        let text = std::mem::take(&mut cleared.composition_value);
        cleared.insert_text(&text)
    }

    /// Delete each selection, or the character before each caret
    pub fn remove_backward(&self) -> Self {
        self.reduce_with_each_cursor(|state, cursor| {
            if !cursor.is_collapsed() {
                state.remove_by_range(cursor.from(), cursor.to())
            } else if cursor.focus == 0 {
                state.clone()
            } else {
                let from = utf16::prev_boundary(&state.value, cursor.focus);
                state.remove_by_range(from, cursor.focus)
            }
        })
        .checked()
    }

    /// Delete each selection, or the character after each caret
    pub fn remove_forward(&self) -> Self {
        self.reduce_with_each_cursor(|state, cursor| {
            if !cursor.is_collapsed() {
                state.remove_by_range(cursor.from(), cursor.to())
            } else if cursor.focus >= state.len() {
                state.clone()
            } else {
                let to = utf16::next_boundary(&state.value, cursor.focus);
                state.remove_by_range(cursor.focus, to)
            }
        })
        .checked()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Collapse selections to their start, or move carets one character left
    pub fn move_backward(&self) -> Self {
        self.move_each(|state, cursor| {
            if cursor.is_collapsed() {
                cursor.collapsed_to(utf16::prev_boundary(&state.value, cursor.focus))
            } else {
                cursor.collapsed_to(cursor.from())
            }
        })
    }

    /// Collapse selections to their end, or move carets one character right
    pub fn move_forward(&self) -> Self {
        self.move_each(|state, cursor| {
            if cursor.is_collapsed() {
                cursor.collapsed_to(utf16::next_boundary(&state.value, cursor.focus))
            } else {
                cursor.collapsed_to(cursor.to())
            }
        })
    }

    pub fn move_backward_with_select(&self) -> Self {
        self.move_each(|state, cursor| {
            cursor.with_focus(utf16::prev_boundary(&state.value, cursor.focus))
        })
    }

    pub fn move_forward_with_select(&self) -> Self {
        self.move_each(|state, cursor| {
            cursor.with_focus(utf16::next_boundary(&state.value, cursor.focus))
        })
    }

    pub fn move_to_line_begin(&self) -> Self {
        let index = self.line_index();
        self.move_each(|_, cursor| {
            cursor.collapsed_to(index.line_begin(index.line_of(cursor.focus)))
        })
    }

    pub fn move_to_line_end(&self) -> Self {
        let index = self.line_index();
        self.move_each(|_, cursor| cursor.collapsed_to(index.line_end(index.line_of(cursor.focus))))
    }

    pub fn move_to_line_begin_with_select(&self) -> Self {
        let index = self.line_index();
        self.move_each(|_, cursor| cursor.with_focus(index.line_begin(index.line_of(cursor.focus))))
    }

    pub fn move_to_line_end_with_select(&self) -> Self {
        let index = self.line_index();
        self.move_each(|_, cursor| cursor.with_focus(index.line_end(index.line_of(cursor.focus))))
    }

    /// Select the whole text; every cursor collapses into one selection
    pub fn select_all(&self) -> Self {
        let len = self.len();
        self.move_each(|_, cursor| cursor.with_range(0, len))
    }

    // ------------------------------------------------------------------
    // Cursor set and flags
    // ------------------------------------------------------------------

    /// Replace all cursors by one selection, keeping the primary cursor's id
    pub fn set_selection(&self, anchor: usize, focus: usize) -> Self {
        let cursor = self
            .primary_cursor()
            .with_range(self.clamp_offset(anchor), self.clamp_offset(focus));

        Self {
            cursors: vec![cursor],
            ..self.clone()
        }
        .checked()
    }

    /// Add a cursor with a fresh id
    pub fn add_cursor(&self, anchor: usize, focus: usize) -> Self {
        self.update_cursor(Cursor::new(anchor, focus)).checked()
    }

    pub fn set_focused(&self, focused: bool) -> Self {
        Self {
            focused,
            ..self.clone()
        }
    }

    pub fn set_active(&self, active: bool) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }

    /// Check the structural rules every reachable state satisfies
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.cursors.is_empty() {
            return Err(InvariantViolation::NoCursors);
        }

        let len = self.len();
        for (i, cursor) in self.cursors.iter().enumerate() {
            if cursor.to() > len {
                return Err(InvariantViolation::OutOfBounds {
                    id: cursor.id.clone(),
                    offset: cursor.to(),
                    len,
                });
            }

            for other in &self.cursors[i + 1..] {
                if other.id == cursor.id {
                    return Err(InvariantViolation::DuplicateId { id: cursor.id.clone() });
                }
                if other.overlaps(cursor) {
                    return Err(InvariantViolation::Overlap {
                        first: cursor.id.clone(),
                        second: other.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Fold `f` over the cursors present when the call starts
    ///
    /// Each step sees the state produced by the previous step and looks its
    /// cursor up again by id. A cursor merged away by an earlier step is
    /// skipped.
    fn reduce_with_each_cursor(&self, f: impl Fn(&Self, &Cursor) -> Self) -> Self {
        let ids: Vec<String> = self.cursors.iter().map(|cursor| cursor.id.clone()).collect();

        ids.iter().fold(self.clone(), |state, id| match state.cursor(id).cloned() {
            Some(cursor) => f(&state, &cursor),
            None => {
                log::trace!("cursor {} was merged away, skipping", id);
                state
            }
        })
    }

    /// Move every cursor with `f`, committing only cursors that changed
    fn move_each(&self, f: impl Fn(&Self, &Cursor) -> Cursor) -> Self {
        self.reduce_with_each_cursor(|state, cursor| {
            let moved = f(state, cursor);
            if moved == *cursor {
                state.clone()
            } else {
                state.update_cursor(moved)
            }
        })
        .checked()
    }

    /// Delete every non-empty selection
    fn remove_selections(&self) -> Self {
        self.reduce_with_each_cursor(|state, cursor| {
            if cursor.is_collapsed() {
                state.clone()
            } else {
                state.remove_by_range(cursor.from(), cursor.to())
            }
        })
    }

    /// Map every cursor's endpoints, returning the ids that moved
    fn remap_cursors(&mut self, f: impl Fn(usize) -> usize) -> Vec<String> {
        let mut moved = Vec::new();
        for cursor in &mut self.cursors {
            let mapped = cursor.map_offsets(&f);
            if mapped != *cursor {
                moved.push(cursor.id.clone());
                *cursor = mapped;
            }
        }
        moved
    }

    /// Commit the given cursors again so overlaps created by an edit merge
    ///
    /// Only true overlaps merge here. An edit that collapses a selection
    /// leaves its caret on the edge of a touching neighbour, and that
    /// neighbour still has its own step to run.
    fn recommit(self, ids: &[String]) -> Self {
        ids.iter().fold(self, |state, id| match state.cursor(id).cloned() {
            Some(cursor) => state.commit_cursor(cursor, Cursor::overlaps),
            None => state,
        })
    }

    /// Merge `cursor` into the set, repeating until the widened cursor
    /// absorbs nothing more
    fn commit_cursor(&self, cursor: Cursor, absorbs: impl Fn(&Cursor, &Cursor) -> bool) -> Self {
        let mut merged = cursor.map_offsets(|offset| self.clamp_offset(offset));
        let mut others: Vec<Cursor> = self
            .cursors
            .iter()
            .filter(|other| other.id != merged.id)
            .cloned()
            .collect();

        loop {
            let before = others.len();
            let mut kept = Vec::with_capacity(before);

            for other in others {
                if !absorbs(&merged, &other) {
                    kept.push(other);
                } else if other.direction() == merged.direction() {
                    log::debug!("merging cursor {} into {}", other.id, merged.id);
                    merged = merged.union(&other);
                } else {
                    log::debug!("dropping cursor {} overlapped by {}", other.id, merged.id);
                }
            }

            others = kept;
            if others.len() == before {
                break;
            }
        }

        others.push(merged);

        Self {
            cursors: others,
            ..self.clone()
        }
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        utf16::floor_boundary(&self.value, offset)
    }

    fn checked(self) -> Self {
        debug_assert_eq!(self.check_invariants(), Ok(()));
        self
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(value: &str, cursors: &[(&str, usize, usize)]) -> EditorState {
        EditorState::from_parts(
            value,
            cursors
                .iter()
                .map(|(id, anchor, focus)| Cursor::with_id(*id, *anchor, *focus))
                .collect(),
        )
    }

    fn offsets(state: &EditorState) -> Vec<(usize, usize)> {
        state.cursors().iter().map(|c| (c.anchor, c.focus)).collect()
    }

    #[test]
    fn test_create() {
        let state = EditorState::create("hello");
        assert_eq!(state.value(), "hello");
        assert_eq!(offsets(&state), vec![(0, 0)]);
        assert!(!state.is_focused());
        assert!(!state.is_active());
        assert_eq!(state.composition_value(), "");
    }

    #[test]
    fn test_insert_at_shifts_later_endpoints() {
        let before = state("abcd", &[("a", 1, 1), ("b", 3, 3)]);
        let after = before.insert_at(2, "XY");
        assert_eq!(after.value(), "abXYcd");
        assert_eq!(after.cursor("a").map(|c| c.focus), Some(1));
        assert_eq!(after.cursor("b").map(|c| c.focus), Some(5));
        // The receiver is untouched
        assert_eq!(before.value(), "abcd");
    }

    #[test]
    fn test_remove_by_range_collapses_inner_endpoints() {
        let before = state("abcdef", &[("a", 0, 3), ("b", 5, 5)]);
        let after = before.remove_by_range(2, 4);
        assert_eq!(after.value(), "abef");
        assert_eq!(after.cursor("a").map(|c| (c.anchor, c.focus)), Some((0, 2)));
        assert_eq!(after.cursor("b").map(|c| c.focus), Some(3));
    }

    #[test]
    fn test_update_cursor_drops_opposite_direction() {
        let before = state("abcdef", &[("back", 4, 2)]);
        let after = before.update_cursor(Cursor::with_id("new", 1, 3));
        assert_eq!(after.cursors(), &[Cursor::with_id("new", 1, 3)]);
    }

    #[test]
    fn test_update_cursor_absorbs_every_overlap() {
        let before = state("abcdefgh", &[("b", 2, 5), ("c", 5, 7)]);

        let after = before.update_cursor(Cursor::with_id("new", 1, 3));
        assert_eq!(after.cursors(), &[Cursor::with_id("c", 5, 7), Cursor::with_id("new", 1, 5)]);

        let after = before.update_cursor(Cursor::with_id("new", 1, 6));
        assert_eq!(after.cursors(), &[Cursor::with_id("new", 1, 7)]);
    }

    #[test]
    fn test_remove_backward_merges_collapsing_carets() {
        let after = state("abc", &[("a", 1, 1), ("b", 2, 2)]).remove_backward();
        assert_eq!(after.value(), "c");
        assert_eq!(after.cursors().len(), 1);
        assert_eq!(offsets(&after), vec![(0, 0)]);
    }

    #[test]
    fn test_remove_at_bounds_is_noop() {
        let start = state("abc", &[("a", 0, 0)]);
        assert_eq!(start.remove_backward(), start);

        let end = state("abc", &[("a", 3, 3)]);
        assert_eq!(end.remove_forward(), end);
    }

    #[test]
    fn test_remove_steps_over_surrogate_pairs() {
        let after = state("a\u{1F600}b", &[("a", 3, 3)]).remove_backward();
        assert_eq!(after.value(), "ab");
        assert_eq!(offsets(&after), vec![(1, 1)]);
    }

    #[test]
    fn test_collapse_counts_as_move() {
        let selected = state("abcdef", &[("a", 2, 4)]);
        assert_eq!(offsets(&selected.move_backward()), vec![(2, 2)]);
        assert_eq!(offsets(&selected.move_forward()), vec![(4, 4)]);
        assert_eq!(offsets(&selected.move_backward().move_backward()), vec![(1, 1)]);
    }

    #[test]
    fn test_select_moves_only_focus() {
        let after = state("abcdef", &[("a", 2, 2)])
            .move_forward_with_select()
            .move_forward_with_select();
        assert_eq!(offsets(&after), vec![(2, 4)]);

        let after = after.move_backward_with_select().move_backward_with_select().move_backward_with_select();
        assert_eq!(offsets(&after), vec![(2, 1)]);
    }

    #[test]
    fn test_moves_clamp_at_bounds() {
        let start = state("ab", &[("a", 0, 0)]);
        assert_eq!(start.move_backward(), start);
        assert_eq!(start.move_backward_with_select(), start);

        let end = state("ab", &[("a", 2, 2)]);
        assert_eq!(end.move_forward(), end);
    }

    #[test]
    fn test_carets_meeting_merge() {
        // "a" lands on "b" and absorbs it before "b" gets its turn
        let after = state("abcd", &[("a", 1, 1), ("b", 2, 2)]).move_forward();
        assert_eq!(after.cursors(), &[Cursor::with_id("a", 2, 2)]);
    }

    #[test]
    fn test_touching_selections_are_edited_separately() {
        let touching = state("abcdef", &[("A", 1, 3), ("B", 3, 5)]);

        // Both carets land on one offset once B's selection is gone
        let typed = touching.insert_text("Y");
        assert_eq!(typed.value(), "aYYf");
        assert_eq!(typed.cursors(), &[Cursor::with_id("B", 3, 3)]);

        let removed = touching.remove_backward();
        assert_eq!(removed.value(), "af");
        assert_eq!(removed.cursors(), &[Cursor::with_id("B", 1, 1)]);

        let composing = touching.set_composition_value("k");
        assert_eq!(composing.value(), "af");
        assert_eq!(composing.composition_value(), "k");
        assert_eq!(composing.cursors(), &[Cursor::with_id("B", 1, 1)]);
    }

    #[test]
    fn test_caret_on_selection_edge_is_kept() {
        let before = state("abcdefg", &[("s", 3, 5)]);

        let after = before.update_cursor(Cursor::with_id("c", 5, 5));
        assert_eq!(after.cursors(), &[Cursor::with_id("s", 3, 5), Cursor::with_id("c", 5, 5)]);

        let after = before.update_cursor(Cursor::with_id("c", 3, 3));
        assert_eq!(after.cursors(), &[Cursor::with_id("s", 3, 5), Cursor::with_id("c", 3, 3)]);
    }

    #[test]
    fn test_growing_selection_absorbs_caret_at_new_edge() {
        let after = state("abcdef", &[("a", 1, 2), ("b", 3, 3)]).move_forward_with_select();
        assert_eq!(after.cursors(), &[Cursor::with_id("a", 1, 3)]);
    }

    #[test]
    fn test_line_moves_with_select() {
        let before = state("ab\ncd\nef", &[("a", 4, 4)]);
        assert_eq!(offsets(&before.move_to_line_end_with_select()), vec![(4, 5)]);
        assert_eq!(offsets(&before.move_to_line_begin_with_select()), vec![(4, 3)]);
    }

    #[test]
    fn test_select_all_merges_cursors() {
        let after = state("abc\ndef", &[("a", 1, 1), ("b", 5, 6)]).select_all();
        assert_eq!(offsets(&after), vec![(0, 7)]);
    }

    #[test]
    fn test_composition_replaces_selection_then_commits() {
        let composing = state("hello world", &[("a", 6, 11)]).set_composition_value("k");
        assert_eq!(composing.value(), "hello ");
        assert_eq!(composing.composition_value(), "k");
        assert_eq!(offsets(&composing), vec![(6, 6)]);

        let committed = composing.set_composition_value("\u{304b}").commit_composition();
        assert_eq!(committed.value(), "hello \u{304b}");
        assert_eq!(committed.composition_value(), "");
        assert_eq!(offsets(&committed), vec![(7, 7)]);
    }

    #[test]
    fn test_commit_without_composition_is_noop() {
        let state = state("abc", &[("a", 1, 1)]);
        assert_eq!(state.commit_composition(), state);
    }

    #[test]
    fn test_set_selection_keeps_primary_id() {
        let after = state("abcdef", &[("a", 1, 1), ("b", 3, 3)]).set_selection(5, 2);
        assert_eq!(after.cursors(), &[Cursor::with_id("a", 5, 2)]);
    }

    #[test]
    fn test_add_cursor_merges() {
        let after = state("abcdef", &[("a", 1, 3)]).add_cursor(2, 2);
        assert_eq!(after.cursors().len(), 1);
        assert_eq!(offsets(&after), vec![(1, 3)]);

        let after = state("abcdef", &[("a", 1, 3)]).add_cursor(5, 5);
        assert_eq!(after.cursors().len(), 2);
    }

    #[test]
    fn test_selected_texts() {
        let state = state("hello world", &[("a", 0, 5), ("b", 11, 6)]);
        assert_eq!(state.selected_texts(), vec!["hello", "world"]);
    }

    #[test]
    fn test_flags() {
        let state = EditorState::create("").set_focused(true).set_active(true);
        assert!(state.is_focused());
        assert!(state.is_active());
        assert!(!state.set_focused(false).is_focused());
    }

    #[test]
    fn test_check_invariants_reports_violations() {
        let mut broken = EditorState::create("ab");
        broken.cursors = vec![Cursor::with_id("a", 0, 2), Cursor::with_id("b", 1, 1)];
        assert_eq!(
            broken.check_invariants(),
            Err(InvariantViolation::Overlap {
                first: "a".to_string(),
                second: "b".to_string()
            })
        );

        broken.cursors = vec![Cursor::with_id("a", 0, 9)];
        assert!(matches!(
            broken.check_invariants(),
            Err(InvariantViolation::OutOfBounds { offset: 9, len: 2, .. })
        ));

        broken.cursors.clear();
        assert_eq!(broken.check_invariants(), Err(InvariantViolation::NoCursors));
    }
}
