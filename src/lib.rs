//! # Dark Castle
//!
//! A procedurally generated maze-exploration text adventure.
//!
//! ## Architecture Overview
//!
//! The crate is split into a small core and thin presentation glue:
//!
//! - **Grid**: arena of cells addressed by [`Position`], with symmetric room adjacency
//! - **Generation**: the corridor-growing [`MazeCarver`] and the randomized
//!   depth-first [`PlacementWalker`] that hides items
//! - **Game State**: current cell, owned items, hints and the lock rules
//!   enforced on every move
//! - **Input / Rendering**: plain-text command parsing and ASCII output used by
//!   the binary
//!
//! All randomness is threaded through an explicit [`rand::rngs::StdRng`], so a
//! seed fully determines a castle.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Fatal error type for the Dark Castle engine.
///
/// Anything surfacing here means generation or setup went wrong; ordinary
/// player mistakes are reported through [`MoveError`] instead.
#[derive(thiserror::Error, Debug)]
pub enum DarkCastleError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// An internal invariant of the grid or game was broken
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type used throughout the Dark Castle codebase.
pub type DarkCastleResult<T> = Result<T, DarkCastleError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default castle height in cells
    pub const DEFAULT_ROWS: usize = 10;

    /// Default castle width in cells
    pub const DEFAULT_COLS: usize = 20;

    /// Smallest grid the carver accepts in either dimension
    pub const MIN_DIMENSION: usize = 3;

    /// Largest grid dimension; cell coordinates are `i32`
    pub const MAX_DIMENSION: usize = i32::MAX as usize;

    /// Name of the item that unlocks the exit
    pub const EXIT_KEY_NAME: &str = "Red Key";

    /// Name of the item that reveals the castle layout
    pub const MAP_ITEM_NAME: &str = "Map";
}
