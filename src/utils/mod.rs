//! Utility modules for the text editor
//!
//! This module contains helpers shared by the editing core.

pub mod utf16;
