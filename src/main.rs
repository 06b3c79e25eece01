//! # Dark Castle Main Entry Point
//!
//! Parses arguments, generates a castle and runs the text game loop on stdin.

use clap::Parser;
use darkcastle::{
    generation::utils::create_rng, unknown_command_line, DarkCastleError, DarkCastleResult, Game,
    GenerationConfig, InputHandler, PlayerInput, TextDisplay,
};
use std::io::{self, Write};
use std::path::PathBuf;
#[cfg(feature = "dev-tools")]
use tracing::{error, info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for Dark Castle.
#[derive(Parser, Debug)]
#[command(name = "darkcastle")]
#[command(about = "Find the key and escape the procedurally generated castle")]
#[command(version)]
struct Args {
    /// Random seed for castle generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON generation config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Grid width in cells
    #[arg(long)]
    cols: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(&args) {
        error!("Fatal: {}", e);
        eprintln!("Fatal: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> DarkCastleResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .map_err(|e| DarkCastleError::InvalidConfig(e.to_string()))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let level: log::LevelFilter = log_level.parse().map_err(|_| {
            DarkCastleError::InvalidConfig(format!("unknown log level {}", log_level))
        })?;

        env_logger::Builder::new()
            .filter_level(level)
            .try_init()
            .map_err(|e| DarkCastleError::InvalidConfig(e.to_string()))?;
    }

    Ok(())
}

/// Builds the configuration from the optional file and CLI overrides.
fn load_config(args: &Args) -> DarkCastleResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::new(rand::random()),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }

    config.validate()?;
    Ok(config)
}

/// Runs the game until the player escapes, quits or input ends.
fn run(args: &Args) -> DarkCastleResult<()> {
    let config = load_config(args)?;
    info!("Starting Dark Castle v{} with seed {}", darkcastle::VERSION, config.seed);

    let mut rng = create_rng(&config);
    let mut game = Game::generate(&config, &mut rng)?;

    let mut display = TextDisplay::new();
    let stdin = io::stdin();
    let mut input = InputHandler::new(stdin.lock());
    let mut stdout = io::stdout();

    while !game.is_game_ended() {
        write!(stdout, "\n{}", display.render_game(&game)?)?;
        write!(stdout, "\n> ")?;
        stdout.flush()?;

        match input.read_input()? {
            PlayerInput::Command(command) => {
                let events = game.execute(command, &mut rng);
                display.add_events(&events);
            }
            PlayerInput::Unknown(text) => display.add_message(unknown_command_line(&text)),
            PlayerInput::Empty => {}
            PlayerInput::EndOfInput => {
                info!("Input closed");
                break;
            }
        }

        for line in display.drain_messages() {
            writeln!(stdout, "{}", line)?;
        }
    }

    info!("Game loop ended: {:?}", game.completion_state());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkcastle::interpret_line;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["darkcastle", "--seed", "7", "--rows", "12"]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.rows, Some(12));
        assert_eq!(args.log_level, "warn");

        let config = load_config(&args).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 20);
    }

    #[test]
    fn test_unknown_input_is_reported() {
        assert_eq!(interpret_line("dance"), PlayerInput::Unknown("dance".to_string()));
    }
}
