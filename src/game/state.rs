//! # Game State Module
//!
//! The player's side of the castle: where they stand, what they carry and
//! which hints were recorded while items were hidden.
//!
//! [`Game::move_cell`] is the only way the player position, the visited flags
//! and the discovered flags change. Entering a cell picks up everything on
//! its floor. The exit is always locked behind the Red Key; [`Game::new`]
//! applies that lock to whatever maze it wraps.

use crate::{
    Cell, Command, DarkCastleError, DarkCastleResult, Direction, GameEvent, GenerationConfig,
    Generator, Grid, Item, ItemSet, Maze, MazeCarver, MoveError, PlacementWalker, Position,
};
use rand::rngs::StdRng;
use rand::Rng;

/// Game completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCompletionState {
    /// Game is still in progress
    Playing,
    /// Player walked through the exit
    Escaped,
    /// Player gave up
    Quit,
}

/// Result of asking whether a cell may be entered.
///
/// `missing_items` is always filled in, and is empty whenever the cell is
/// enterable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCheck {
    pub enterable: bool,
    pub missing_items: ItemSet,
    pub reason: Option<MoveError>,
}

/// Central game state.
#[derive(Debug, Clone)]
pub struct Game {
    /// The carved castle, including every cell
    maze: Maze,
    /// Cell the player currently occupies
    current: Position,
    /// Items the player carries
    owned_items: ItemSet,
    /// Whether the map has been picked up
    has_map: bool,
    /// One hint per hidden item, in placement order
    hints: Vec<String>,
    /// Current completion state
    completion_state: GameCompletionState,
}

impl Game {
    /// Wraps a carved maze with the player standing on its start cell and
    /// the exit locked behind the Red Key.
    ///
    /// Items already on the floors stay where they are. Nothing is marked
    /// visited until the first [`Game::move_cell`].
    pub fn new(mut maze: Maze) -> DarkCastleResult<Self> {
        maze.grid
            .cell_mut(maze.exit)?
            .required_items
            .insert(Item::exit_key());

        let current = maze.start;
        Ok(Self {
            maze,
            current,
            owned_items: ItemSet::new(),
            has_map: false,
            hints: Vec::new(),
            completion_state: GameCompletionState::Playing,
        })
    }

    /// Generates a complete, ready-to-play castle.
    ///
    /// Carves the maze, locks the exit behind the key, hides the key and the
    /// map away from the exit and moves the player onto the start cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use darkcastle::{Game, GenerationConfig, generation::utils::create_rng};
    ///
    /// // A walk that never settles on a cell is fatal, so try seeds until one works.
    /// let game = (0..100)
    ///     .find_map(|seed| {
    ///         let config = GenerationConfig::new(seed);
    ///         Game::generate(&config, &mut create_rng(&config)).ok()
    ///     })
    ///     .unwrap();
    /// assert_eq!(game.current(), game.maze().start);
    /// assert_eq!(game.hints().len(), 2);
    /// ```
    pub fn generate(config: &GenerationConfig, rng: &mut StdRng) -> DarkCastleResult<Self> {
        let maze = MazeCarver::new().generate(config, rng)?;
        let mut game = Self::new(maze)?;

        let walker = PlacementWalker::from_config(config);
        game.hide_item(&walker, &Item::exit_key(), rng)?;
        game.hide_item(&walker, &Item::map(), rng)?;

        let start = game.maze.start;
        game.move_cell(start).map_err(|reason| {
            DarkCastleError::InvariantViolation(format!("cannot enter start {}: {}", start, reason))
        })?;

        log::info!(
            "Game ready: start {}, exit {}, {} hints",
            game.maze.start,
            game.maze.exit,
            game.hints.len()
        );

        Ok(game)
    }

    /// Hides an item reachable from the start and away from the exit, and
    /// records a hint for it.
    pub fn hide_item(
        &mut self,
        walker: &PlacementWalker,
        item: &Item,
        rng: &mut StdRng,
    ) -> DarkCastleResult<Position> {
        let placement =
            walker.place_item(&mut self.maze.grid, self.maze.start, item, self.maze.exit, rng)?;
        self.hints.push(placement.hint);
        Ok(placement.position)
    }

    /// The carved castle.
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The castle grid.
    pub fn grid(&self) -> &Grid {
        &self.maze.grid
    }

    /// Position of the cell the player stands in.
    pub fn current(&self) -> Position {
        self.current
    }

    pub fn owned_items(&self) -> &ItemSet {
        &self.owned_items
    }

    pub fn has_map(&self) -> bool {
        self.has_map
    }

    /// Hints recorded while hiding items, in placement order.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn completion_state(&self) -> GameCompletionState {
        self.completion_state
    }

    /// The cell the player stands in.
    pub fn current_cell(&self) -> DarkCastleResult<&Cell> {
        self.maze.grid.cell(self.current)
    }

    /// Looks up a cell position by name.
    pub fn find_cell(&self, name: &str) -> Option<Position> {
        self.maze.grid.find_cell(name)
    }

    /// Whether the player may enter the cell at `position`.
    ///
    /// Pure: depends only on the cell and the owned items.
    pub fn can_enter(&self, position: Position) -> EntryCheck {
        let cell = match self.maze.grid.get_cell(position.row, position.col) {
            Ok(Some(cell)) => cell,
            _ => {
                return EntryCheck {
                    enterable: false,
                    missing_items: ItemSet::new(),
                    reason: Some(MoveError::OffGrid),
                }
            }
        };

        let missing_items: ItemSet = cell
            .required_items
            .difference(&self.owned_items)
            .cloned()
            .collect();

        let reason = if !cell.is_room {
            Some(MoveError::NotARoom { position })
        } else if !missing_items.is_empty() {
            Some(MoveError::Locked {
                position,
                missing: missing_items.clone(),
            })
        } else {
            None
        };

        EntryCheck {
            enterable: reason.is_none(),
            missing_items,
            reason,
        }
    }

    /// Previews the cell next to the player without moving.
    pub fn check_direction(&self, direction: Direction) -> EntryCheck {
        self.can_enter(self.current.step(direction))
    }

    /// Moves the player into `target` if allowed.
    ///
    /// On refusal nothing changes. On success the target is marked visited,
    /// its four grid neighbours become discovered and its floor is emptied
    /// into the owned items.
    pub fn move_cell(&mut self, target: Position) -> Result<Vec<GameEvent>, MoveError> {
        let check = self.can_enter(target);
        if let Some(reason) = check.reason {
            return Err(reason);
        }

        if let Ok(Some(cell)) = self.maze.grid.get_cell_mut(target.row, target.col) {
            cell.visited = true;
            cell.discovered = true;
        }
        for direction in Direction::ALL {
            let next = target.step(direction);
            if let Ok(Some(cell)) = self.maze.grid.get_cell_mut(next.row, next.col) {
                cell.discovered = true;
            }
        }

        self.current = target;

        let mut events = vec![GameEvent::Entered { position: target }];
        events.extend(self.pick_up_items());

        if self.is_finished() {
            self.completion_state = GameCompletionState::Escaped;
            events.push(GameEvent::Escaped);
        }

        Ok(events)
    }

    /// Moves one step in `direction`.
    pub fn move_direction(&mut self, direction: Direction) -> Result<Vec<GameEvent>, MoveError> {
        self.move_cell(self.current.step(direction))
    }

    /// Transfers every item on the current floor to the owned items.
    pub fn pick_up_items(&mut self) -> Vec<GameEvent> {
        let floor = match self.maze.grid.get_cell_mut(self.current.row, self.current.col) {
            Ok(Some(cell)) => std::mem::take(&mut cell.items_on_floor),
            _ => return Vec::new(),
        };

        floor
            .into_iter()
            .map(|item| {
                if item.is_map() {
                    self.has_map = true;
                }
                log::debug!("Picked up {} at {}", item, self.current);
                self.owned_items.insert(item.clone());
                GameEvent::ItemPickedUp { item }
            })
            .collect()
    }

    /// One of the recorded hints, chosen uniformly.
    pub fn random_hint(&self, rng: &mut StdRng) -> Option<&str> {
        if self.hints.is_empty() {
            return None;
        }
        Some(self.hints[rng.gen_range(0..self.hints.len())].as_str())
    }

    /// Whether the player stands on the exit.
    pub fn is_finished(&self) -> bool {
        self.current == self.maze.exit
    }

    /// Whether the game loop should stop.
    pub fn is_game_ended(&self) -> bool {
        self.completion_state != GameCompletionState::Playing
    }

    /// Executes a command and reports what happened.
    ///
    /// Refused moves come back as [`GameEvent::MoveBlocked`]; they never end
    /// the game.
    pub fn execute(&mut self, command: Command, rng: &mut StdRng) -> Vec<GameEvent> {
        match command {
            Command::Move(direction) => match self.move_direction(direction) {
                Ok(events) => events,
                Err(reason) => vec![GameEvent::MoveBlocked { direction, reason }],
            },
            Command::Inventory => vec![GameEvent::Inventory {
                items: self.owned_items.iter().cloned().collect(),
            }],
            Command::Hint => match self.random_hint(rng) {
                Some(text) => vec![GameEvent::Hint {
                    text: text.to_string(),
                }],
                None => vec![GameEvent::NoHints],
            },
            Command::Quit => {
                self.completion_state = GameCompletionState::Quit;
                vec![GameEvent::Quit]
            }
        }
    }
}
