//! # Maze Carving
//!
//! Grows a branching castle out of a blank grid.
//!
//! Four corridors leave the start cell, one per cardinal direction. Each
//! corridor walks a random 2-4 cells in a straight line and, at every step,
//! may sprout a side corridor in a random direction with a slightly lower
//! branch probability. The far end of the western corridor becomes the exit.

use crate::generation::utils::random_direction;
use crate::{
    reachable_rooms, DarkCastleError, DarkCastleResult, Direction, GenerationConfig, Generator,
    Grid, Position,
};
use rand::{rngs::StdRng, Rng};

/// A carved castle: the grid plus its two distinguished cells.
#[derive(Debug, Clone)]
pub struct Maze {
    pub grid: Grid,
    /// Where the player starts
    pub start: Position,
    /// The single exit cell
    pub exit: Position,
}

/// Corridor-growing maze generator.
#[derive(Debug, Clone)]
pub struct MazeCarver {
    /// Whether to check connectivity and exit invariants after carving
    pub validate_output: bool,
}

impl MazeCarver {
    /// Creates a carver that validates its output.
    pub fn new() -> Self {
        Self {
            validate_output: true,
        }
    }

    /// Carves one corridor and, recursively, its branches.
    ///
    /// Carves `length` cells and returns the coordinates one step past the
    /// last of them, which are left uncarved. When the corridor runs into the
    /// grid edge it stops early and returns the last carved cell instead.
    pub fn carve_corridor(
        &self,
        grid: &mut Grid,
        start: Position,
        direction: Option<Direction>,
        branch_probability: f64,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> DarkCastleResult<Position> {
        let direction = direction.unwrap_or_else(|| random_direction(rng));
        let length = rng.gen_range(config.min_corridor_length..=config.max_corridor_length);

        log::debug!(
            "Carving corridor from {} heading {} for {} cells (branch p={:.2})",
            start,
            direction,
            length,
            branch_probability
        );

        let mut current = start;
        for _ in 0..length {
            grid.cell_mut(current)?.is_room = true;

            let next = current.step(direction);
            if !grid.in_bounds(next.row, next.col) {
                return Ok(current);
            }

            if rng.gen::<f64>() < branch_probability {
                self.carve_corridor(
                    grid,
                    current,
                    None,
                    branch_probability - config.branch_decay,
                    config,
                    rng,
                )?;
            }

            current = next;
        }

        Ok(current)
    }

    /// Checks that exactly one exit exists and every room hangs off the start.
    fn validate_maze(&self, maze: &Maze) -> DarkCastleResult<()> {
        if !maze.grid.is_room(maze.start) {
            return Err(DarkCastleError::InvariantViolation(format!(
                "start {} is not a room",
                maze.start
            )));
        }
        if !maze.grid.is_room(maze.exit) {
            return Err(DarkCastleError::InvariantViolation(format!(
                "exit {} is not a room",
                maze.exit
            )));
        }

        let exits = maze.grid.cells().filter(|cell| cell.is_exit).count();
        if exits != 1 {
            return Err(DarkCastleError::InvariantViolation(format!(
                "expected exactly one exit, found {}",
                exits
            )));
        }

        let reachable = reachable_rooms(&maze.grid, maze.start);
        if let Some(orphan) = maze.grid.room_positions().find(|p| !reachable.contains(p)) {
            return Err(DarkCastleError::InvariantViolation(format!(
                "room {} is not connected to the start",
                orphan
            )));
        }

        Ok(())
    }
}

impl Generator<Maze> for MazeCarver {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DarkCastleResult<Maze> {
        config.validate()?;

        let mut grid = Grid::build(config.rows, config.cols, rng);
        let start = config.start_position();
        let p = config.branch_probability;

        self.carve_corridor(&mut grid, start, Some(Direction::North), p, config, rng)?;
        self.carve_corridor(&mut grid, start, Some(Direction::East), p, config, rng)?;
        self.carve_corridor(&mut grid, start, Some(Direction::South), p, config, rng)?;
        let exit = self.carve_corridor(&mut grid, start, Some(Direction::West), p, config, rng)?;

        // Only the western terminal is opened up; it becomes the exit.
        let exit_cell = grid.cell_mut(exit)?;
        exit_cell.is_room = true;
        exit_cell.is_exit = true;
        grid.build_all_cell_connections()?;

        let maze = Maze { grid, start, exit };

        if self.validate_output {
            self.validate(&maze, config)?;
        }

        log::info!(
            "Carved {}x{} castle with {} rooms, start {} exit {}",
            config.rows,
            config.cols,
            maze.grid.room_count(),
            maze.start,
            maze.exit
        );

        Ok(maze)
    }

    fn validate(&self, maze: &Maze, _config: &GenerationConfig) -> DarkCastleResult<()> {
        self.validate_maze(maze)
    }

    fn generator_type(&self) -> &'static str {
        "MazeCarver"
    }
}

impl Default for MazeCarver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils;
    use rand::SeedableRng;

    #[test]
    fn test_maze_carver_creation() {
        let carver = MazeCarver::new();
        assert!(carver.validate_output);
        assert_eq!(carver.generator_type(), "MazeCarver");
    }

    #[test]
    fn test_generation_with_classic_grid() {
        let carver = MazeCarver::new();
        let config = GenerationConfig::for_testing(12345);
        let mut rng = utils::create_rng(&config);

        let maze = carver.generate(&config, &mut rng).unwrap();
        assert_eq!(maze.grid.rows(), 10);
        assert_eq!(maze.grid.cols(), 20);
        assert_eq!(maze.start, Position::new(5, 10));
        assert!(maze.grid.is_room(maze.start));
        assert!(maze.grid.is_room(maze.exit));
        assert!(maze.grid.cell(maze.exit).unwrap().is_exit);
        assert_ne!(maze.start, maze.exit);
    }

    #[test]
    fn test_exit_lies_west_of_start() {
        let carver = MazeCarver::new();
        for seed in 0..50 {
            let config = GenerationConfig::for_testing(seed);
            let mut rng = utils::create_rng(&config);
            let maze = carver.generate(&config, &mut rng).unwrap();
            assert_eq!(maze.exit.row, maze.start.row);
            assert!(maze.exit.col < maze.start.col);
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let carver = MazeCarver::new();
        let config = GenerationConfig::for_testing(777);
        let a = carver.generate(&config, &mut utils::create_rng(&config)).unwrap();
        let b = carver.generate(&config, &mut utils::create_rng(&config)).unwrap();

        let rooms_a: Vec<_> = a.grid.room_positions().collect();
        let rooms_b: Vec<_> = b.grid.room_positions().collect();
        assert_eq!(rooms_a, rooms_b);
        assert_eq!(a.exit, b.exit);
    }

    #[test]
    fn test_corridor_stops_at_edge() {
        let carver = MazeCarver::new();
        let mut config = GenerationConfig::with_dimensions(1, 3, 3);
        config.branch_probability = 0.0;
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::build(3, 3, &mut rng);

        let end = carver
            .carve_corridor(&mut grid, Position::new(1, 1), Some(Direction::North), 0.0, &config, &mut rng)
            .unwrap();

        // Length is at least 2 but only two cells exist northwards.
        assert_eq!(end, Position::new(0, 1));
        assert_eq!(grid.room_count(), 2);
    }

    #[test]
    fn test_corridor_without_branches_is_straight() {
        let carver = MazeCarver::new();
        let mut config = GenerationConfig::with_dimensions(1, 3, 20);
        config.min_corridor_length = 3;
        config.max_corridor_length = 3;
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::build(3, 20, &mut rng);

        let end = carver
            .carve_corridor(&mut grid, Position::new(1, 10), Some(Direction::East), 0.0, &config, &mut rng)
            .unwrap();

        assert_eq!(end, Position::new(1, 13));
        assert!(!grid.is_room(end));
        let rooms: Vec<_> = grid.room_positions().collect();
        assert_eq!(
            rooms,
            vec![
                Position::new(1, 10),
                Position::new(1, 11),
                Position::new(1, 12)
            ]
        );
    }

    #[test]
    fn test_corridor_carves_between_min_and_max_cells() {
        let carver = MazeCarver::new();
        let config = GenerationConfig::with_dimensions(1, 3, 40);
        let mut lengths = std::collections::BTreeSet::new();

        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::build(3, 40, &mut rng);
            let start = Position::new(1, 5);
            let end = carver
                .carve_corridor(&mut grid, start, Some(Direction::East), 0.0, &config, &mut rng)
                .unwrap();

            let carved = grid.room_count();
            assert!(
                (config.min_corridor_length..=config.max_corridor_length).contains(&(carved as u32)),
                "seed {} carved {} cells",
                seed,
                carved
            );
            assert_eq!(end, Position::new(1, 5 + carved as i32));
            lengths.insert(carved);
        }

        assert_eq!(lengths.into_iter().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_corridor_at_edge_carves_up_to_boundary() {
        let carver = MazeCarver::new();
        let config = GenerationConfig::with_dimensions(1, 3, 4);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::build(3, 4, &mut rng);
            let end = carver
                .carve_corridor(&mut grid, Position::new(1, 2), Some(Direction::East), 0.0, &config, &mut rng)
                .unwrap();

            assert_eq!(end, Position::new(1, 3));
            let rooms: Vec<_> = grid.room_positions().collect();
            assert_eq!(rooms, vec![Position::new(1, 2), Position::new(1, 3)]);
        }
    }

    #[test]
    fn test_only_the_exit_terminal_is_carved_past_the_corridor() {
        let carver = MazeCarver::new();
        let mut config = GenerationConfig::for_testing(8);
        config.branch_probability = 0.0;
        config.min_corridor_length = 2;
        config.max_corridor_length = 2;
        let maze = carver.generate(&config, &mut utils::create_rng(&config)).unwrap();

        // Start plus one cell per corridor, plus the opened exit.
        assert_eq!(maze.grid.room_count(), 6);
        assert_eq!(maze.exit, Position::new(5, 8));
        assert!(maze.grid.is_room(maze.exit));
        assert!(!maze.grid.is_room(Position::new(3, 10)));
        assert!(!maze.grid.is_room(Position::new(5, 12)));
    }

    #[test]
    fn test_validation_catches_orphan_room() {
        let carver = MazeCarver::new();
        let config = GenerationConfig::with_dimensions(1, 3, 5);
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::build(3, 5, &mut rng);
        for col in 0..3 {
            grid.cell_mut(Position::new(1, col)).unwrap().is_room = true;
        }
        grid.cell_mut(Position::new(1, 0)).unwrap().is_exit = true;
        grid.build_all_cell_connections().unwrap();

        let maze = Maze {
            grid,
            start: Position::new(1, 2),
            exit: Position::new(1, 0),
        };
        assert!(carver.validate(&maze, &config).is_ok());

        let mut broken = maze.clone();
        broken.grid.cell_mut(Position::new(1, 4)).unwrap().is_room = true;
        assert!(carver.validate(&broken, &config).is_err());

        let mut no_exit = maze;
        no_exit.grid.cell_mut(Position::new(1, 0)).unwrap().is_exit = false;
        assert!(carver.validate(&no_exit, &config).is_err());
    }
}
