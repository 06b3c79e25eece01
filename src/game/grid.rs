//! # Grid Module
//!
//! The castle grid: a flat arena of [`Cell`]s addressed by [`Position`].
//!
//! Cells never hold references to each other. Adjacency is stored as
//! neighbour positions, and linking always writes both sides so the
//! relation stays symmetric.

use crate::{DarkCastleError, DarkCastleResult, Direction, ItemSet, Position};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flavour text assigned to a cell when the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomDescription {
    Cobblestone,
    Courtyard,
    Garden,
    Workshop,
    Kitchen,
    Banquet,
}

impl RoomDescription {
    /// Every description, in a fixed order.
    pub const ALL: [RoomDescription; 6] = [
        RoomDescription::Cobblestone,
        RoomDescription::Courtyard,
        RoomDescription::Garden,
        RoomDescription::Workshop,
        RoomDescription::Kitchen,
        RoomDescription::Banquet,
    ];

    /// Picks a description uniformly at random.
    pub fn random(rng: &mut StdRng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Message key for an external string catalogue.
    pub fn message_key(self) -> &'static str {
        match self {
            RoomDescription::Cobblestone => "ROOM_COBBLESTONE",
            RoomDescription::Courtyard => "ROOM_COURTYARD",
            RoomDescription::Garden => "ROOM_GARDEN",
            RoomDescription::Workshop => "ROOM_WORKSHOP",
            RoomDescription::Kitchen => "ROOM_KITCHEN",
            RoomDescription::Banquet => "ROOM_BANQUET",
        }
    }

    /// Default English text.
    pub fn text(self) -> &'static str {
        match self {
            RoomDescription::Cobblestone => "a cobblestone hallway",
            RoomDescription::Courtyard => "an overgrown courtyard",
            RoomDescription::Garden => "a walled garden",
            RoomDescription::Workshop => "a dusty workshop",
            RoomDescription::Kitchen => "a smoky kitchen",
            RoomDescription::Banquet => "a banquet hall",
        }
    }
}

/// A single grid position and everything the game tracks about it.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Coordinates of this cell
    pub position: Position,
    /// Stable name, `"row:col"`
    pub name: String,
    /// Flavour text, fixed at creation
    pub description: RoomDescription,
    /// Carved as a traversable room
    pub is_room: bool,
    /// The player has stood here
    pub visited: bool,
    /// The player has stood next to this cell
    pub discovered: bool,
    /// This is the way out
    pub is_exit: bool,
    /// Linked room neighbours, indexed by [`Direction::index`]
    pub neighbors: [Option<Position>; 4],
    /// Items lying here waiting to be picked up
    pub items_on_floor: ItemSet,
    /// Items the player must own to enter
    pub required_items: ItemSet,
}

impl Cell {
    /// Creates an uncarved cell.
    pub fn new(position: Position, description: RoomDescription) -> Self {
        Self {
            position,
            name: position.name(),
            description,
            is_room: false,
            visited: false,
            discovered: false,
            is_exit: false,
            neighbors: [None; 4],
            items_on_floor: ItemSet::new(),
            required_items: ItemSet::new(),
        }
    }

    /// Linked neighbour in `direction`, if any.
    pub fn neighbor(&self, direction: Direction) -> Option<Position> {
        self.neighbors[direction.index()]
    }

    /// Linked neighbours in canonical direction order.
    pub fn linked_neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        self.neighbors.iter().flatten().copied()
    }
}

/// The rows×cols matrix of cells. Owns every cell exclusively.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    by_name: HashMap<String, Position>,
}

impl Grid {
    /// Allocates a fully populated grid of uncarved cells with random descriptions.
    ///
    /// # Examples
    ///
    /// ```
    /// use darkcastle::Grid;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let grid = Grid::build(10, 20, &mut rng);
    /// assert_eq!(grid.rows(), 10);
    /// assert_eq!(grid.cols(), 20);
    /// assert!(grid.get_cell(0, 0).unwrap().is_some());
    /// assert!(grid.get_cell(10, 0).unwrap().is_none());
    /// ```
    pub fn build(rows: usize, cols: usize, rng: &mut StdRng) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        let mut by_name = HashMap::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let position = Position::new(row as i32, col as i32);
                let cell = Cell::new(position, RoomDescription::random(rng));
                by_name.insert(cell.name.clone(), position);
                cells.push(cell);
            }
        }

        Self {
            rows,
            cols,
            cells,
            by_name,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the coordinates fall inside the grid.
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if self.in_bounds(row, col) {
            Some(row as usize * self.cols + col as usize)
        } else {
            None
        }
    }

    /// Looks up a cell by coordinates.
    ///
    /// Out-of-range coordinates yield `Ok(None)`. An in-range coordinate with
    /// no backing cell is an invariant violation.
    pub fn get_cell(&self, row: i32, col: i32) -> DarkCastleResult<Option<&Cell>> {
        match self.index(row, col) {
            None => Ok(None),
            Some(index) => self.cells.get(index).map(Some).ok_or_else(|| {
                DarkCastleError::InvariantViolation(format!(
                    "no cell backing in-range coordinate {}:{}",
                    row, col
                ))
            }),
        }
    }

    /// Mutable counterpart of [`Grid::get_cell`].
    pub fn get_cell_mut(&mut self, row: i32, col: i32) -> DarkCastleResult<Option<&mut Cell>> {
        match self.index(row, col) {
            None => Ok(None),
            Some(index) => self.cells.get_mut(index).map(Some).ok_or_else(|| {
                DarkCastleError::InvariantViolation(format!(
                    "no cell backing in-range coordinate {}:{}",
                    row, col
                ))
            }),
        }
    }

    /// The cell one step from `position` in `direction`, if it is on the grid.
    pub fn get_cell_relative(
        &self,
        position: Position,
        direction: Direction,
    ) -> DarkCastleResult<Option<&Cell>> {
        let next = position.step(direction);
        self.get_cell(next.row, next.col)
    }

    /// Cell at a position that must exist.
    pub fn cell(&self, position: Position) -> DarkCastleResult<&Cell> {
        self.get_cell(position.row, position.col)?.ok_or_else(|| {
            DarkCastleError::InvariantViolation(format!("position {} is off the grid", position))
        })
    }

    /// Mutable cell at a position that must exist.
    pub fn cell_mut(&mut self, position: Position) -> DarkCastleResult<&mut Cell> {
        self.get_cell_mut(position.row, position.col)?
            .ok_or_else(|| {
                DarkCastleError::InvariantViolation(format!(
                    "position {} is off the grid",
                    position
                ))
            })
    }

    /// Looks up a cell position by its `"row:col"` name.
    pub fn find_cell(&self, name: &str) -> Option<Position> {
        let found = self.by_name.get(name).copied();
        if found.is_none() {
            log::warn!("Cannot find room: {}", name);
        }
        found
    }

    /// Whether the cell at `position` is a carved room. Off-grid is never a room.
    pub fn is_room(&self, position: Position) -> bool {
        matches!(self.get_cell(position.row, position.col), Ok(Some(cell)) if cell.is_room)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterates over the positions of carved rooms.
    pub fn room_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().filter(|cell| cell.is_room).map(|cell| cell.position)
    }

    /// Number of carved rooms.
    pub fn room_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_room).count()
    }

    /// Linked room neighbours of `position`; empty when off-grid.
    pub fn neighbors(&self, position: Position) -> Vec<Position> {
        match self.get_cell(position.row, position.col) {
            Ok(Some(cell)) => cell.linked_neighbors().collect(),
            _ => Vec::new(),
        }
    }

    /// Links every pair of orthogonally adjacent rooms in both directions.
    ///
    /// Cells that are not rooms end up with no links at all.
    pub fn build_all_cell_connections(&mut self) -> DarkCastleResult<()> {
        for index in 0..self.cells.len() {
            let position = self.cells[index].position;
            let is_room = self.cells[index].is_room;

            for direction in Direction::ALL {
                let next = position.step(direction);
                let link = is_room && self.is_room(next);

                self.cells[index].neighbors[direction.index()] = link.then_some(next);
                if link {
                    self.cell_mut(next)?.neighbors[direction.opposite().index()] = Some(position);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_grid(rows: usize, cols: usize) -> Grid {
        let mut rng = StdRng::seed_from_u64(12345);
        Grid::build(rows, cols, &mut rng)
    }

    #[test]
    fn test_build_populates_every_cell() {
        let grid = test_grid(4, 6);
        assert_eq!(grid.cells().count(), 24);
        assert!(grid.cells().all(|cell| !cell.is_room));
        assert!(grid.cells().all(|cell| cell.items_on_floor.is_empty()));
        assert!(grid.cells().all(|cell| cell.required_items.is_empty()));
        assert_eq!(grid.room_count(), 0);
    }

    #[test]
    fn test_get_cell_bounds() {
        let grid = test_grid(4, 6);
        assert!(grid.get_cell(-1, 0).unwrap().is_none());
        assert!(grid.get_cell(0, -1).unwrap().is_none());
        assert!(grid.get_cell(4, 0).unwrap().is_none());
        assert!(grid.get_cell(0, 6).unwrap().is_none());

        let cell = grid.get_cell(3, 5).unwrap().unwrap();
        assert_eq!(cell.position, Position::new(3, 5));
        assert_eq!(cell.name, "3:5");
    }

    #[test]
    fn test_get_cell_relative() {
        let grid = test_grid(4, 6);
        let corner = Position::new(0, 0);
        assert!(grid.get_cell_relative(corner, Direction::North).unwrap().is_none());
        assert!(grid.get_cell_relative(corner, Direction::West).unwrap().is_none());
        let east = grid.get_cell_relative(corner, Direction::East).unwrap().unwrap();
        assert_eq!(east.position, Position::new(0, 1));
        let south = grid.get_cell_relative(corner, Direction::South).unwrap().unwrap();
        assert_eq!(south.position, Position::new(1, 0));
    }

    #[test]
    fn test_find_cell_by_name() {
        let grid = test_grid(4, 6);
        assert_eq!(grid.find_cell("2:3"), Some(Position::new(2, 3)));
        assert_eq!(grid.find_cell("9:9"), None);
    }

    #[test]
    fn test_connections_only_link_rooms() {
        let mut grid = test_grid(3, 3);
        for position in [Position::new(1, 0), Position::new(1, 1), Position::new(0, 1)] {
            grid.cell_mut(position).unwrap().is_room = true;
        }
        grid.build_all_cell_connections().unwrap();

        let center = grid.cell(Position::new(1, 1)).unwrap();
        assert_eq!(center.neighbor(Direction::West), Some(Position::new(1, 0)));
        assert_eq!(center.neighbor(Direction::North), Some(Position::new(0, 1)));
        assert_eq!(center.neighbor(Direction::East), None);
        assert_eq!(center.neighbor(Direction::South), None);

        let west = grid.cell(Position::new(1, 0)).unwrap();
        assert_eq!(west.neighbor(Direction::East), Some(Position::new(1, 1)));

        let wall = grid.cell(Position::new(2, 2)).unwrap();
        assert!(wall.linked_neighbors().next().is_none());
    }

    #[test]
    fn test_connections_are_symmetric() {
        let mut grid = test_grid(5, 5);
        for row in 0..5 {
            grid.cell_mut(Position::new(row, 2)).unwrap().is_room = true;
            grid.cell_mut(Position::new(2, row)).unwrap().is_room = true;
        }
        grid.build_all_cell_connections().unwrap();

        for cell in grid.cells() {
            for direction in Direction::ALL {
                if let Some(other) = cell.neighbor(direction) {
                    let back = grid.cell(other).unwrap().neighbor(direction.opposite());
                    assert_eq!(back, Some(cell.position));
                }
            }
        }
    }

    #[test]
    fn test_description_message_keys_are_distinct() {
        let keys: std::collections::HashSet<_> =
            RoomDescription::ALL.iter().map(|d| d.message_key()).collect();
        assert_eq!(keys.len(), RoomDescription::ALL.len());
    }
}
