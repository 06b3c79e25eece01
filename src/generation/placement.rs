//! # Item Placement
//!
//! Hides items with a randomized depth-first walk over room adjacency.
//!
//! At every step each unexplored neighbour either becomes the answer on the
//! spot (a small fixed chance) or is explored recursively. Later siblings
//! overwrite earlier answers, so the result tends to sit at a moderate depth
//! rather than right next to the start or always at the deepest dead end.
//! Neighbours are visited in the canonical North, East, South, West order, so
//! a given seed always hides items in the same cells.

use crate::{DarkCastleError, DarkCastleResult, GenerationConfig, Grid, Item, Position};
use rand::{rngs::StdRng, Rng};
use std::collections::HashSet;

/// Where an item ended up, plus the hint describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    pub hint: String,
}

/// Randomized DFS used to pick hiding cells.
#[derive(Debug, Clone)]
pub struct PlacementWalker {
    /// Chance that a candidate is taken immediately instead of explored
    pub stop_chance: f64,
}

impl PlacementWalker {
    /// Creates a walker with the given early-stop chance.
    pub fn new(stop_chance: f64) -> Self {
        Self { stop_chance }
    }

    /// Creates a walker using the configured early-stop chance.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.placement_stop_chance)
    }

    /// Walks from `from` and returns a chosen cell, or `None` if the explored
    /// subtree never produced one.
    ///
    /// Never returns `from` itself, any cell in `avoid`, or a cell that can't
    /// be reached from `from` without passing through `avoid`.
    pub fn walk_to_random(
        &self,
        grid: &Grid,
        from: Position,
        visited: &mut HashSet<Position>,
        avoid: &HashSet<Position>,
        rng: &mut StdRng,
    ) -> Option<Position> {
        visited.insert(from);

        let candidates: Vec<Position> = grid
            .neighbors(from)
            .into_iter()
            .filter(|p| !visited.contains(p) && !avoid.contains(p))
            .collect();

        let mut selected = None;
        for &candidate in &candidates {
            // An earlier sibling's subtree may have reached it already.
            if visited.contains(&candidate) {
                continue;
            }

            if rng.gen::<f64>() < self.stop_chance {
                selected = Some(candidate);
            } else if let Some(found) = self.walk_to_random(grid, candidate, visited, avoid, rng) {
                selected = Some(found);
            }
        }

        log::debug!(
            "Walk: {} {} {:?}",
            from,
            candidates.len(),
            selected.map(|p| p.name())
        );

        selected
    }

    /// Hides `item` somewhere reachable from `start`, never in `avoid`.
    ///
    /// Each call starts from a fresh visited set. Failing to find any cell is
    /// fatal: it only happens when the castle is too small to hide anything.
    pub fn place_item(
        &self,
        grid: &mut Grid,
        start: Position,
        item: &Item,
        avoid: Position,
        rng: &mut StdRng,
    ) -> DarkCastleResult<Placement> {
        let mut visited = HashSet::new();
        let avoid: HashSet<Position> = [avoid].into_iter().collect();

        let position = self
            .walk_to_random(grid, start, &mut visited, &avoid, rng)
            .ok_or_else(|| {
                DarkCastleError::GenerationFailed(format!(
                    "walk from {} found nowhere to hide the {}",
                    start, item
                ))
            })?;

        let cell = grid.cell_mut(position)?;
        cell.items_on_floor.insert(item.clone());
        let hint = format!("The {} is in {}", item.name, cell.name);

        log::debug!("Placed {} at {}", item, position);

        Ok(Placement { position, hint })
    }
}

impl Default for PlacementWalker {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}
