//! # Command Words
//!
//! Maps the words a player types onto semantic [`Command`]s.

use crate::{Command, Direction};

/// Words accepted for each command. The first entry is the canonical one.
pub const COMMAND_WORDS: &[(&[&str], Command)] = &[
    (&["north", "n"], Command::Move(Direction::North)),
    (&["east", "e"], Command::Move(Direction::East)),
    (&["south", "s"], Command::Move(Direction::South)),
    (&["west", "w"], Command::Move(Direction::West)),
    (&["inventory", "i", "inv", "items"], Command::Inventory),
    (&["hint", "h"], Command::Hint),
    (&["quit", "q"], Command::Quit),
];

/// Parses a single word, ignoring case and surrounding whitespace.
pub fn parse_command(word: &str) -> Option<Command> {
    let word = word.trim().to_lowercase();
    COMMAND_WORDS
        .iter()
        .find(|(words, _)| words.contains(&word.as_str()))
        .map(|&(_, command)| command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movement() {
        assert_eq!(parse_command("n"), Some(Command::Move(Direction::North)));
        assert_eq!(parse_command("East"), Some(Command::Move(Direction::East)));
        assert_eq!(parse_command(" south "), Some(Command::Move(Direction::South)));
        assert_eq!(parse_command("w"), Some(Command::Move(Direction::West)));
    }

    #[test]
    fn test_parse_other_commands() {
        for word in ["i", "inv", "items", "inventory"] {
            assert_eq!(parse_command(word), Some(Command::Inventory));
        }
        assert_eq!(parse_command("h"), Some(Command::Hint));
        assert_eq!(parse_command("q"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_command("dance"), None);
        assert_eq!(parse_command(""), None);
    }
}
