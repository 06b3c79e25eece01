//! # Rendering Module
//!
//! Plain-text rendering of the game state: the room line, an ASCII map,
//! direction labels with lock state, and event messages.

pub mod display;

pub use display::*;
