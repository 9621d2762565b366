//! Shared helpers for WASM API operations
//!
//! This module contains common patterns for console logging,
//! serialization, and validation of offsets coming from JavaScript.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::errors::ApiError;

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

pub fn log_debug(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(&format!("[WASM] {}", msg)));
}

pub fn log_info(msg: &str) {
    web_sys::console::info_1(&JsValue::from_str(&format!("[WASM] {}", msg)));
}

pub fn log_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("[WASM] ⚠️ {}", msg)));
}

pub fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(&format!("[WASM] ❌ {}", msg)));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| to_js_error(ApiError::Deserialization(format!("{}: {}", error_context, e))))
}

/// Serialize a value to JavaScript
///
/// Maps serialize as plain objects so JavaScript reads fields by name.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| to_js_error(ApiError::Serialization(format!("{}: {}", error_context, e))))
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that an offset lies within the text
pub fn validate_offset(offset: usize, len: usize) -> Result<(), ApiError> {
    if offset > len {
        return Err(ApiError::OffsetOutOfBounds { offset, len });
    }
    Ok(())
}

/// Validate an anchor/focus pair against the text length
pub fn validate_selection(anchor: usize, focus: usize, len: usize) -> Result<(), ApiError> {
    validate_offset(anchor, len)?;
    validate_offset(focus, len)
}

/// Validate that a range is ordered and within the text
pub fn validate_range(from: usize, to: usize, len: usize) -> Result<(), ApiError> {
    if from > to {
        return Err(ApiError::InvalidRange { from, to });
    }
    validate_offset(to, len)
}

/// Parse a log level name such as "debug" or "warn"
pub fn parse_log_level(level: &str) -> Result<log::LevelFilter, ApiError> {
    level
        .parse()
        .map_err(|_| ApiError::InvalidLogLevel(level.to_string()))
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log an API error and convert it for JavaScript
pub fn to_js_error(err: ApiError) -> JsValue {
    let msg = err.to_string();
    wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}
