//! # Input Module
//!
//! Line-based input handling for the text front end.

pub mod commands;

pub use commands::*;

use crate::{Command, DarkCastleResult};
use std::io::BufRead;

/// Player input types that can be processed by the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// A recognised command
    Command(Command),
    /// Text that maps to no command
    Unknown(String),
    /// A blank line
    Empty,
    /// The input stream ended
    EndOfInput,
}

/// Reads player commands from any buffered reader.
pub struct InputHandler<R: BufRead> {
    reader: R,
}

impl<R: BufRead> InputHandler<R> {
    /// Creates a new input handler over `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads one line and interprets it.
    pub fn read_input(&mut self) -> DarkCastleResult<PlayerInput> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(PlayerInput::EndOfInput);
        }
        Ok(interpret_line(&line))
    }
}

/// Interprets a line of text.
pub fn interpret_line(line: &str) -> PlayerInput {
    let line = line.trim();
    if line.is_empty() {
        return PlayerInput::Empty;
    }
    match parse_command(line) {
        Some(command) => PlayerInput::Command(command),
        None => PlayerInput::Unknown(line.to_string()),
    }
}
