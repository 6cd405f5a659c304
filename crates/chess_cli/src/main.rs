//! Terminal front end for the rules engine.
//!
//! Reads moves as `x1,y1 x2,y2` from stdin and plays them through
//! `Game::play_turn`. `board` reprints the position, `reset` starts a
//! fresh game, `quit` exits.

mod config;

use anyhow::{bail, Context};
use chess_core::{new_game, Color, Game};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Move([i32; 2], [i32; 2]),
    Board,
    Reset,
    Quit,
}

fn parse_square(s: &str) -> Option<[i32; 2]> {
    let (x, y) = s.split_once(',')?;
    Some([x.trim().parse().ok()?, y.trim().parse().ok()?])
}

fn parse_command(line: &str) -> Result<Command, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["quit"] | ["exit"] => Ok(Command::Quit),
        ["reset"] => Ok(Command::Reset),
        ["board"] => Ok(Command::Board),
        [from, to] => match (parse_square(from), parse_square(to)) {
            (Some(f), Some(t)) => Ok(Command::Move(f, t)),
            _ => Err("Invalid input format. Use 'x1,y1 x2,y2'.".to_string()),
        },
        _ => Err("Invalid input format. Use 'x1,y1 x2,y2'.".to_string()),
    }
}

fn parse_args() -> anyhow::Result<Option<PathBuf>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).context("--config requires a path")?;
                config = Some(PathBuf::from(path));
                i += 2;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(config)
}

fn print_usage() {
    println!("Chess CLI");
    println!();
    println!("Usage:");
    println!("  chess_cli [--config <file.toml>]");
    println!();
    println!("Commands:");
    println!("  x1,y1 x2,y2   move the piece on (x1, y1) to (x2, y2)");
    println!("  board         print the board");
    println!("  reset         start a new game");
    println!("  quit          exit");
}

fn prompt(game: &Game, config: &CliConfig, out: &mut impl Write) -> io::Result<()> {
    if config.show_board {
        writeln!(out, "{}", game.board())?;
    }
    let label = match game.turn() {
        Color::White => "White",
        Color::Black => "Black",
    };
    write!(out, "{label}'s turn > ")?;
    out.flush()
}

/// Applies one input line to the game. Returns `false` once the user quits.
fn run_line(
    game: &mut Game,
    config: &CliConfig,
    line: &str,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match parse_command(line) {
        Ok(Command::Quit) => return Ok(false),
        Ok(Command::Reset) => {
            info!(moves = game.history().len(), "game reset");
            *game = new_game();
            writeln!(out, "New game.")?;
        }
        Ok(Command::Board) => {
            if !config.show_board {
                writeln!(out, "{}", game.board())?;
            }
        }
        Ok(Command::Move(from, to)) => {
            let result = game.play_turn(from, to);
            if config.json {
                writeln!(out, "{}", result.to_json()?)?;
            } else {
                writeln!(out, "{}", result.message)?;
                if let Some(kind) = result.captured {
                    writeln!(out, "Captured {kind}")?;
                }
            }
            if game.is_over() {
                info!(status = ?game.status(), winner = ?game.winner(), "game over");
                writeln!(out, "Game over. Type 'reset' for a new game.")?;
            }
        }
        Err(msg) => {
            warn!(input = %line.trim(), "unrecognised command");
            writeln!(out, "{msg}")?;
        }
    }
    Ok(true)
}

fn main() -> anyhow::Result<()> {
    let config_path = parse_args()?;
    let config = match &config_path {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match &config_path {
        Some(path) => info!(path = %path.display(), ?config, "loaded config"),
        None => info!("no config file, using defaults"),
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut game = new_game();

    prompt(&game, &config, &mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() && !run_line(&mut game, &config, &line, &mut stdout)? {
            break;
        }
        prompt(&game, &config, &mut stdout)?;
    }
    Ok(())
}
