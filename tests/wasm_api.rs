#![cfg(target_arch = "wasm32")]

//! WASM API test
//!
//! Drives the `TextEditor` handle the way the browser input adapter does.

use textarea_wasm::api::{set_log_level, TextEditor};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_editor_creation() {
    let editor = TextEditor::new(Some("hello".to_string()));
    assert_eq!(editor.value(), "hello");
    assert_eq!(editor.snapshot().cursors().len(), 1);
}

#[wasm_bindgen_test]
fn test_typing_and_deleting() {
    let mut editor = TextEditor::new(None);
    editor.insert_text("abc");
    editor.remove_backward();
    editor.move_to_line_begin();
    editor.remove_forward();
    assert_eq!(editor.value(), "b");
}

#[wasm_bindgen_test]
fn test_selection_validation() {
    let mut editor = TextEditor::new(Some("abc".to_string()));
    assert!(editor.set_selection(0, 2).is_ok());
    assert!(editor.set_selection(0, 9).is_err());
    assert!(editor.add_cursor(4, 4).is_err());

    let texts = editor.selected_texts();
    assert_eq!(texts.length(), 1);
    assert_eq!(texts.get(0).as_string(), Some("ab".to_string()));
}

#[wasm_bindgen_test]
fn test_composition_round_trip() {
    let mut editor = TextEditor::new(Some("ab".to_string()));
    editor.select_all();
    editor.set_composition_value("k");
    assert_eq!(editor.value(), "");
    editor.commit_composition();
    assert_eq!(editor.value(), "k");
}

#[wasm_bindgen_test]
fn test_state_and_annotations_serialize() {
    let mut editor = TextEditor::new(Some("ab\ncd".to_string()));
    editor.set_focused(true);
    assert!(editor.state().is_ok());
    assert!(editor.annotations().is_ok());
    assert!(editor.to_json().is_ok());
}

#[wasm_bindgen_test]
fn test_configuration() {
    let mut editor = TextEditor::new(None);
    let options = js_sys::Object::new();
    assert!(js_sys::Reflect::set(&options, &"lines".into(), &false.into()).is_ok());
    assert!(editor.set_annotation_options(options.into()).is_ok());

    assert!(set_log_level("info").is_ok());
    assert!(set_log_level("chatty").is_err());
}

#[wasm_bindgen_test]
fn test_explicit_range_edits_are_validated() {
    let mut editor = TextEditor::new(Some("abc".to_string()));
    assert!(editor.insert_at(3, "def").is_ok());
    assert_eq!(editor.value(), "abcdef");

    assert!(editor.remove_range(1, 3).is_ok());
    assert_eq!(editor.value(), "adef");

    assert!(editor.insert_at(9, "x").is_err());
    assert!(editor.remove_range(3, 1).is_err());
    assert_eq!(editor.value(), "adef");
}
