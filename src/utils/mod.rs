//! # Utilities Module
//!
//! Reachability helpers over the castle's room graph.

pub mod pathfinding;

pub use self::pathfinding::*;
