//! Text Editor WASM API
//!
//! This module provides the JavaScript-facing API for the text editing core.
//!
//! # Module Structure
//!
//! - `helpers`: Console logging macros, serialization and input validation
//! - `errors`: Errors for bad input arriving from JavaScript
//! - `editor`: The `TextEditor` handle driven by the input adapter

pub mod helpers;
pub mod errors;
pub mod editor;

pub use errors::ApiError;
pub use editor::{set_log_level, TextEditor};
