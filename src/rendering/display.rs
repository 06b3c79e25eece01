//! # Text Display
//!
//! Turns game state and events into lines of text. Nothing here mutates the
//! game; lock labels come from the side-effect free [`Game::check_direction`].

use crate::{join_items, Cell, DarkCastleResult, Direction, Game, GameEvent, MoveError};

/// Map glyphs.
pub mod glyphs {
    pub const PLAYER: char = '+';
    pub const VISITED: char = 'v';
    pub const DISCOVERED_ROOM: char = 'o';
    pub const DISCOVERED_WALL: char = '#';
    pub const EXIT: char = 'X';
    pub const MAPPED_ROOM: char = ':';
    pub const UNKNOWN: char = '.';
}

/// Text renderer with a bounded message history.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    /// Message history, oldest first
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay {
    /// Creates a new display.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: 20,
        }
    }

    /// Adds a message, dropping the oldest when over capacity.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }

    /// Renders every event as messages.
    pub fn add_events(&mut self, events: &[GameEvent]) {
        for event in events {
            for line in event_lines(event) {
                self.add_message(line);
            }
        }
    }

    /// Takes all pending messages.
    pub fn drain_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Full screen: room line, map, available actions.
    pub fn render_game(&self, game: &Game) -> DarkCastleResult<String> {
        let cell = game.current_cell()?;
        let mut out = String::new();

        out.push_str(&room_line(cell));
        out.push_str("\n\n");
        out.push_str(&render_map(game));
        out.push('\n');
        for direction in Direction::ALL {
            out.push_str(&format!("- {}\n", direction_label(game, direction)));
        }
        out.push_str("- Inventory: show inventory\n");
        out.push_str("- Hint: show hint\n");
        out.push_str("- Quit\n");

        Ok(out)
    }
}

/// "You are in ... (row:col)".
pub fn room_line(cell: &Cell) -> String {
    format!("You are in {} ({})", cell.description.text(), cell.name)
}

/// Label for a direction: the neighbour's name and, if locked, what is missing.
pub fn direction_label(game: &Game, direction: Direction) -> String {
    let check = game.check_direction(direction);
    match check.reason {
        Some(MoveError::OffGrid) | Some(MoveError::NotARoom { .. }) => {
            format!("{}: # Wall #", direction)
        }
        Some(MoveError::Locked { position, missing }) => {
            format!("{}: ({}) ({})", direction, position, join_items(&missing))
        }
        None => format!("{}: ({})", direction, game.current().step(direction)),
    }
}

/// Glyph for a single cell as the player currently knows it.
pub fn cell_glyph(game: &Game, cell: &Cell) -> char {
    if cell.position == game.current() {
        glyphs::PLAYER
    } else if cell.visited {
        glyphs::VISITED
    } else if cell.discovered {
        if cell.is_room {
            glyphs::DISCOVERED_ROOM
        } else {
            glyphs::DISCOVERED_WALL
        }
    } else if game.has_map() && cell.is_exit {
        glyphs::EXIT
    } else if game.has_map() && cell.is_room {
        glyphs::MAPPED_ROOM
    } else {
        glyphs::UNKNOWN
    }
}

/// ASCII map of the whole grid, one line per row.
pub fn render_map(game: &Game) -> String {
    let grid = game.grid();
    let mut out = String::with_capacity((grid.cols() + 1) * grid.rows());
    for (index, cell) in grid.cells().enumerate() {
        out.push(cell_glyph(game, cell));
        if (index + 1) % grid.cols() == 0 {
            out.push('\n');
        }
    }
    out
}

/// Message lines for one event.
pub fn event_lines(event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::Entered { .. } => Vec::new(),
        GameEvent::ItemPickedUp { item } => vec![format!("Picked up item {}", item)],
        GameEvent::MoveBlocked { reason, .. } => vec![reason.to_string()],
        GameEvent::Inventory { items } => {
            let mut lines = vec![match items.len() {
                1 => "You have 1 item".to_string(),
                n => format!("You have {} items", n),
            }];
            lines.extend(items.iter().map(|item| format!("Item: {}", item)));
            lines
        }
        GameEvent::Hint { text } => vec![text.clone()],
        GameEvent::NoHints => vec!["No hints are available.".to_string()],
        GameEvent::Escaped => vec!["You found the way out of the castle!".to_string()],
        GameEvent::Quit => vec!["Goodbye.".to_string()],
    }
}

/// Message for text that matched no command.
pub fn unknown_command_line(text: &str) -> String {
    format!("I don't understand \"{}\".", text)
}
