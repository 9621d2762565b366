//! Text Editor WASM Module
//!
//! In-memory editing model for a browser-hosted text widget: an immutable
//! document with multiple cursors, IME composition staging and directional
//! navigation, plus the annotation sweep that feeds the renderer.

pub mod api;
pub mod text;
pub mod utils;

// Re-export commonly used types
pub use text::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        wasm_warn!("Logger already initialized: {}", e);
    }

    log::info!("Text Editor WASM module initialized");
}
