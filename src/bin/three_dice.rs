use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use three_dice::cli::{Outcome, Session};
use three_dice::core::GameConfig;
use three_dice::game::Game;
use tracing::info;

const PROMPT: &str = "3d% ";

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a three-dice game from the terminal")]
struct Args {
    /// Game configuration as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Game identifier
    #[arg(long)]
    game_id: Option<String>,

    /// The three players, in seat order
    #[arg(long, num_args = 3, value_names = ["P1", "P2", "P3"])]
    players: Option<Vec<String>>,

    /// Scorecard column width
    #[arg(long)]
    column_width: Option<usize>,

    /// Shorthand for --log-level debug
    #[arg(long)]
    verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn init_tracing(args: &Args) {
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => GameConfig::three_players("Game001", "Freddy", "Danny", "Smeck"),
    };

    if let Some(game_id) = &args.game_id {
        config.game_id = game_id.clone();
    }
    if let Some(players) = &args.players {
        config.players = players.iter().map(|p| p.as_str().into()).collect();
    }
    if let Some(width) = args.column_width {
        config.column_width = width;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let config = load_config(&args)?;
    let game = Game::new(config).context("invalid game configuration")?;
    info!(game = %game, "starting game");

    let mut session = Session::new(game);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{}", session.game())?;
    write!(stdout, "{PROMPT}")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        let outcome = session.execute(&line);
        if !outcome.text().is_empty() {
            writeln!(stdout, "{}", outcome.text())?;
        }
        if let Outcome::Quit(_) = outcome {
            return Ok(());
        }
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["three-dice"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.game_id, "Game001");
        assert_eq!(config.players.len(), 3);
        assert_eq!(args.log_level, tracing::Level::WARN);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "three-dice",
            "--game-id",
            "G9",
            "--players",
            "A",
            "B",
            "C",
            "--column-width",
            "12",
            "--verbose",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.game_id, "G9");
        assert_eq!(config.players[2], "C");
        assert_eq!(config.column_width, 12);
        assert!(args.verbose);
    }
}
