//! Annotation layer for rendering
//!
//! Cursor, composition and line marks are defined independently over
//! buffer offsets. `AnnotationList` sweeps over their boundaries and cuts
//! the text into an ordered, gap-free partition where each piece carries
//! exactly the set of marks active over it.
//!
//! Annotations live in a per-call arena; ranges refer to them by index and
//! never outlive the list they came from.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::cursor::Cursor;
use super::editor_state::EditorState;

/// Index of an annotation inside its `AnnotationList`
pub type AnnotationId = usize;

/// What an annotation marks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnnotationKind {
    /// A caret or selection
    Cursor { cursor: Cursor },
    /// Where staged IME text will land
    Composition,
    /// One line, including its terminating newline
    Line { line: usize },
}

/// A labeled interval over buffer offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub from: usize,
    pub to: usize,
    #[serde(flatten)]
    pub kind: AnnotationKind,
}

impl Annotation {
    /// Zero-width marks (carets, empty lines) only show up as empty ranges
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

/// Maximal interval `[from, to)` over which the active set is constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRange {
    pub from: usize,
    pub to: usize,
    /// Ascending ids of the active annotations
    pub annotations: Vec<AnnotationId>,
}

impl AnnotationRange {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

/// Which marks `AnnotationList::create_with` produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotationOptions {
    pub lines: bool,
    pub cursors: bool,
    pub composition: bool,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            lines: true,
            cursors: true,
            composition: true,
        }
    }
}

/// Partition of the buffer by active annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationList {
    annotations: Vec<Annotation>,
    ranges: Vec<AnnotationRange>,
}

/// Annotations starting and ending at one offset
#[derive(Default)]
struct Boundary {
    starts: Vec<AnnotationId>,
    ends: Vec<AnnotationId>,
}

impl AnnotationList {
    /// Annotate `state` with every mark kind
    pub fn create(state: &EditorState) -> Self {
        Self::create_with(state, &AnnotationOptions::default())
    }

    pub fn create_with(state: &EditorState, options: &AnnotationOptions) -> Self {
        let annotations = collect_annotations(state, options);
        let ranges = sweep(&annotations, state.len());
        Self {
            annotations,
            ranges,
        }
    }

    pub fn ranges(&self) -> &[AnnotationRange] {
        &self.ranges
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationRange> {
        self.ranges.iter()
    }

    /// Annotations active over `range`
    pub fn annotations_in<'a>(
        &'a self,
        range: &'a AnnotationRange,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        range.annotations.iter().filter_map(move |id| self.get(*id))
    }

    /// Cursors active over `range`
    pub fn cursors_in<'a>(&'a self, range: &'a AnnotationRange) -> impl Iterator<Item = &'a Cursor> + 'a {
        self.annotations_in(range).filter_map(|annotation| match &annotation.kind {
            AnnotationKind::Cursor { cursor } => Some(cursor),
            _ => None,
        })
    }

    /// Lines active over `range`; a boundary range can touch two
    pub fn lines_in<'a>(&'a self, range: &'a AnnotationRange) -> impl Iterator<Item = usize> + 'a {
        self.annotations_in(range).filter_map(|annotation| match annotation.kind {
            AnnotationKind::Line { line } => Some(line),
            _ => None,
        })
    }

    pub fn has_composition(&self, range: &AnnotationRange) -> bool {
        self.annotations_in(range)
            .any(|annotation| matches!(annotation.kind, AnnotationKind::Composition))
    }
}

impl<'a> IntoIterator for &'a AnnotationList {
    type Item = &'a AnnotationRange;
    type IntoIter = std::slice::Iter<'a, AnnotationRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn collect_annotations(state: &EditorState, options: &AnnotationOptions) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    if options.lines {
        let index = state.line_index();
        for line in 0..index.line_count() {
            let (from, to) = index.line_span(line);
            annotations.push(Annotation {
                from,
                to,
                kind: AnnotationKind::Line { line },
            });
        }
    }

    if options.composition && !state.composition_value().is_empty() {
        for cursor in state.cursors() {
            annotations.push(Annotation {
                from: cursor.from(),
                to: cursor.to(),
                kind: AnnotationKind::Composition,
            });
        }
    }

    if options.cursors {
        for cursor in state.cursors() {
            annotations.push(Annotation {
                from: cursor.from(),
                to: cursor.to(),
                kind: AnnotationKind::Cursor {
                    cursor: cursor.clone(),
                },
            });
        }
    }

    annotations
}

/// Cut `[0, len]` at every annotation boundary
///
/// At each offset, starts are handled before ends. Each change closes the
/// open range with the active set as it was before the change. Empty
/// ranges are kept only when they carry a zero-width annotation, which is
/// how carets and empty lines reach the renderer.
fn sweep(annotations: &[Annotation], len: usize) -> Vec<AnnotationRange> {
    let mut boundaries: BTreeMap<usize, Boundary> = BTreeMap::new();
    for (id, annotation) in annotations.iter().enumerate() {
        boundaries.entry(annotation.from).or_default().starts.push(id);
        boundaries.entry(annotation.to).or_default().ends.push(id);
    }

    let mut ranges = Vec::new();
    let mut active: BTreeSet<AnnotationId> = BTreeSet::new();
    let mut position = 0;

    let mut close = |from: usize, to: usize, active: &BTreeSet<AnnotationId>| {
        let keep = from < to || active.iter().any(|id| annotations[*id].is_empty());
        if keep {
            ranges.push(AnnotationRange {
                from,
                to,
                annotations: active.iter().copied().collect(),
            });
        }
    };

    for (offset, boundary) in boundaries {
        if !boundary.starts.is_empty() {
            close(position, offset, &active);
            active.extend(boundary.starts);
            position = offset;
        }

        if !boundary.ends.is_empty() {
            close(position, offset, &active);
            for id in &boundary.ends {
                active.remove(id);
            }
            position = offset;
        }
    }

    // Only reachable when line marks are turned off
    if position < len {
        close(position, len, &active);
    }

    ranges
}
