//! # Room Reachability
//!
//! Breadth-first queries over room adjacency, used to validate generated
//! castles and to check where items may legally end up.

use crate::{Grid, Position};
use ::pathfinding::prelude::{bfs, bfs_reach};
use std::collections::HashSet;

/// Every room reachable from `start` through linked rooms, `start` included.
///
/// Empty when `start` is not a room.
pub fn reachable_rooms(grid: &Grid, start: Position) -> HashSet<Position> {
    reachable_rooms_avoiding(grid, start, &HashSet::new())
}

/// Like [`reachable_rooms`], but never steps into a cell in `avoid`.
pub fn reachable_rooms_avoiding(
    grid: &Grid,
    start: Position,
    avoid: &HashSet<Position>,
) -> HashSet<Position> {
    if !grid.is_room(start) {
        return HashSet::new();
    }

    bfs_reach(start, |&position| {
        grid.neighbors(position)
            .into_iter()
            .filter(|next| !avoid.contains(next))
            .collect::<Vec<_>>()
    })
    .collect()
}

/// Shortest room-to-room path from `from` to `to`, both ends included.
pub fn room_path(grid: &Grid, from: Position, to: Position) -> Option<Vec<Position>> {
    if !grid.is_room(from) || !grid.is_room(to) {
        return None;
    }

    bfs(&from, |&position| grid.neighbors(position), |&position| position == to)
}
