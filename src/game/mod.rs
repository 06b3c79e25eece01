//! # Game Module
//!
//! Core game state, the castle grid and the command set.
//!
//! This module contains the fundamental building blocks of Dark Castle:
//! - Grid and cell representation (an arena keyed by [`Position`])
//! - Items and item sets used for floor contents and locks
//! - Game state with movement, locks and automatic pickup
//! - The closed set of semantic commands the game accepts

pub mod actions;
pub mod grid;
pub mod items;
pub mod state;

pub use actions::*;
pub use grid::*;
pub use items::*;
pub use state::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate in the castle grid.
///
/// Rows grow southwards and columns grow eastwards. Coordinates are signed so
/// that stepping off the grid produces a position that simply fails lookup.
///
/// # Examples
///
/// ```
/// use darkcastle::{Direction, Position};
///
/// let pos = Position::new(5, 10);
/// assert_eq!(pos.step(Direction::North), Position::new(4, 10));
/// assert_eq!(pos.name(), "5:10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the position one step away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.to_delta();
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Stable cell name derived from the coordinates, `"row:col"`.
    pub fn name(self) -> String {
        format!("{}:{}", self.row, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// The four cardinal directions a player can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Canonical visiting order, also used as the index order of neighbour arrays.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Converts a direction to a `(row, col)` delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use darkcastle::Direction;
    ///
    /// assert_eq!(Direction::North.to_delta(), (-1, 0));
    /// assert_eq!(Direction::East.to_delta(), (0, 1));
    /// ```
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Returns the direction pointing back the way we came.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Index into per-direction arrays.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.row, 5);
        assert_eq!(pos.col, 10);
    }

    #[test]
    fn test_position_step() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.step(Direction::North), Position::new(4, 10));
        assert_eq!(pos.step(Direction::East), Position::new(5, 11));
        assert_eq!(pos.step(Direction::South), Position::new(6, 10));
        assert_eq!(pos.step(Direction::West), Position::new(5, 9));
    }

    #[test]
    fn test_position_name() {
        let pos = Position::new(3, 17);
        assert_eq!(pos.name(), "3:17");
        assert_eq!(pos.to_string(), pos.name());
    }

    #[test]
    fn test_direction_opposite() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
            let pos = Position::new(2, 2);
            assert_eq!(pos.step(direction).step(direction.opposite()), pos);
        }
    }

    #[test]
    fn test_direction_index_matches_order() {
        for (i, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), i);
        }
    }
}
