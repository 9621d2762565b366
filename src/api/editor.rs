//! JavaScript-facing text editor handle
//!
//! `TextEditor` holds the current `EditorState` for one editing session.
//! The input adapter calls one method per browser event; each call
//! replaces the held state with the result of the matching pure
//! transform. Rendering code reads back `state()` and `annotations()`.

use wasm_bindgen::prelude::*;

use super::helpers::{
    deserialize, parse_log_level, serialize, to_js_error, validate_offset, validate_range,
    validate_selection,
};
use crate::text::{AnnotationList, AnnotationOptions, EditorState};
use crate::{wasm_info, wasm_log};

#[wasm_bindgen]
pub struct TextEditor {
    state: EditorState,
    options: AnnotationOptions,
}

impl TextEditor {
    /// Current state snapshot
    pub fn snapshot(&self) -> &EditorState {
        &self.state
    }

    fn apply(&mut self, operation: &str, transform: impl FnOnce(&EditorState) -> EditorState) {
        self.state = transform(&self.state);
        wasm_log!(
            "{}: {} cursor(s), length {}",
            operation,
            self.state.cursors().len(),
            self.state.len()
        );
    }
}

#[wasm_bindgen]
impl TextEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(initial: Option<String>) -> TextEditor {
        let state = EditorState::create(initial.as_deref().unwrap_or_default());
        wasm_info!("TextEditor created with {} code units", state.len());
        TextEditor {
            state,
            options: AnnotationOptions::default(),
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&mut self, text: &str) {
        self.apply("insertText", |state| state.insert_text(text));
    }

    #[wasm_bindgen(js_name = removeBackward)]
    pub fn remove_backward(&mut self) {
        self.apply("removeBackward", EditorState::remove_backward);
    }

    #[wasm_bindgen(js_name = removeForward)]
    pub fn remove_forward(&mut self) {
        self.apply("removeForward", EditorState::remove_forward);
    }

    #[wasm_bindgen(js_name = setCompositionValue)]
    pub fn set_composition_value(&mut self, value: &str) {
        self.apply("setCompositionValue", |state| state.set_composition_value(value));
    }

    #[wasm_bindgen(js_name = commitComposition)]
    pub fn commit_composition(&mut self) {
        self.apply("commitComposition", EditorState::commit_composition);
    }

    /// Insert at an explicit offset (paste, programmatic edits)
    #[wasm_bindgen(js_name = insertAt)]
    pub fn insert_at(&mut self, at: usize, text: &str) -> Result<(), JsValue> {
        validate_offset(at, self.state.len()).map_err(to_js_error)?;
        self.apply("insertAt", |state| state.insert_at(at, text));
        Ok(())
    }

    #[wasm_bindgen(js_name = removeRange)]
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<(), JsValue> {
        validate_range(from, to, self.state.len()).map_err(to_js_error)?;
        self.apply("removeRange", |state| state.remove_by_range(from, to));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = moveBackward)]
    pub fn move_backward(&mut self) {
        self.apply("moveBackward", EditorState::move_backward);
    }

    #[wasm_bindgen(js_name = moveForward)]
    pub fn move_forward(&mut self) {
        self.apply("moveForward", EditorState::move_forward);
    }

    #[wasm_bindgen(js_name = moveBackwardWithSelect)]
    pub fn move_backward_with_select(&mut self) {
        self.apply("moveBackwardWithSelect", EditorState::move_backward_with_select);
    }

    #[wasm_bindgen(js_name = moveForwardWithSelect)]
    pub fn move_forward_with_select(&mut self) {
        self.apply("moveForwardWithSelect", EditorState::move_forward_with_select);
    }

    #[wasm_bindgen(js_name = moveToLineBegin)]
    pub fn move_to_line_begin(&mut self) {
        self.apply("moveToLineBegin", EditorState::move_to_line_begin);
    }

    #[wasm_bindgen(js_name = moveToLineEnd)]
    pub fn move_to_line_end(&mut self) {
        self.apply("moveToLineEnd", EditorState::move_to_line_end);
    }

    #[wasm_bindgen(js_name = moveToLineBeginWithSelect)]
    pub fn move_to_line_begin_with_select(&mut self) {
        self.apply("moveToLineBeginWithSelect", EditorState::move_to_line_begin_with_select);
    }

    #[wasm_bindgen(js_name = moveToLineEndWithSelect)]
    pub fn move_to_line_end_with_select(&mut self) {
        self.apply("moveToLineEndWithSelect", EditorState::move_to_line_end_with_select);
    }

    #[wasm_bindgen(js_name = selectAll)]
    pub fn select_all(&mut self) {
        self.apply("selectAll", EditorState::select_all);
    }

    // ------------------------------------------------------------------
    // Cursors and flags
    // ------------------------------------------------------------------

    /// Collapse to a single selection (mouse click or drag)
    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, anchor: usize, focus: usize) -> Result<(), JsValue> {
        validate_selection(anchor, focus, self.state.len()).map_err(to_js_error)?;
        self.apply("setSelection", |state| state.set_selection(anchor, focus));
        Ok(())
    }

    /// Add another cursor (alt-click)
    #[wasm_bindgen(js_name = addCursor)]
    pub fn add_cursor(&mut self, anchor: usize, focus: usize) -> Result<(), JsValue> {
        validate_selection(anchor, focus, self.state.len()).map_err(to_js_error)?;
        self.apply("addCursor", |state| state.add_cursor(anchor, focus));
        Ok(())
    }

    #[wasm_bindgen(js_name = setFocused)]
    pub fn set_focused(&mut self, focused: bool) {
        self.apply("setFocused", |state| state.set_focused(focused));
    }

    #[wasm_bindgen(js_name = setActive)]
    pub fn set_active(&mut self, active: bool) {
        self.apply("setActive", |state| state.set_active(active));
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    pub fn value(&self) -> String {
        self.state.value().to_string()
    }

    /// Serialized `EditorState`
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.state, "Failed to serialize editor state")
    }

    /// Serialized `AnnotationList` for the current state
    pub fn annotations(&self) -> Result<JsValue, JsValue> {
        let list = AnnotationList::create_with(&self.state, &self.options);
        serialize(&list, "Failed to serialize annotations")
    }

    /// Selected text of every cursor, for copy
    #[wasm_bindgen(js_name = selectedTexts)]
    pub fn selected_texts(&self) -> js_sys::Array {
        self.state
            .selected_texts()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// Pretty-printed state for debugging panels
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| to_js_error(super::ApiError::Serialization(e.to_string())))
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Choose which marks `annotations()` emits; missing fields default to on
    #[wasm_bindgen(js_name = setAnnotationOptions)]
    pub fn set_annotation_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        self.options = deserialize(options, "Invalid annotation options")?;
        wasm_info!("Annotation options set to {:?}", self.options);
        Ok(())
    }
}

/// Set the maximum level forwarded to the console logger
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_log_level(level).map_err(to_js_error)?;
    log::set_max_level(filter);
    wasm_info!("Log level set to {}", filter);
    Ok(())
}
