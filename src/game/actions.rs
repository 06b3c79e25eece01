//! # Actions
//!
//! The closed set of semantic commands the game accepts, the events produced
//! by executing them, and the recoverable reasons a move can be refused.

use crate::{Direction, Item, ItemSet, Position};
use serde::{Deserialize, Serialize};

/// A player command. Free-text parsing lives in the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Walk through the door in the given direction
    Move(Direction),
    /// List owned items
    Inventory,
    /// Show one of the placement hints
    Hint,
    /// Leave the game
    Quit,
}

/// Something that happened while executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The player entered a cell
    Entered { position: Position },
    /// An item was moved from the floor into the owned set
    ItemPickedUp { item: Item },
    /// A move was refused; state is unchanged
    MoveBlocked { direction: Direction, reason: MoveError },
    /// Current inventory listing
    Inventory { items: Vec<Item> },
    /// A hint about where an item was hidden
    Hint { text: String },
    /// No hints were recorded
    NoHints,
    /// The player reached the exit
    Escaped,
    /// The player asked to leave
    Quit,
}

/// Why a move was refused. Always recoverable.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The step would leave the grid
    #[error("There is nothing in that direction.")]
    OffGrid,

    /// The target cell was never carved
    #[error("There is nothing in that direction.")]
    NotARoom { position: Position },

    /// The target cell requires items the player lacks
    #[error("To enter, you need: {}", crate::join_items(.missing))]
    Locked { position: Position, missing: ItemSet },
}
