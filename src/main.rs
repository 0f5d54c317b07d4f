//! Reversi-Rust: a Reversi/Othello variant with obstacle cells.
//!
//! ## Usage
//!
//! - `reversi-rust` - Play a local two-player game on the console
//! - `reversi-rust -a` - Play against the built-in move picker
//! - `reversi-rust -s 10x12 -r -r` - 10x12 board with two obstacles
//! - `reversi-rust -n 4711` - Host an online game on port 4711
//! - `reversi-rust -c host:4711` - Join a hosted game

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;

use reversi_rust::board::{Color, Point};
use reversi_rust::console;
use reversi_rust::constants::{AI_THINK_SECS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use reversi_rust::game::{Game, PlayOutcome};
use reversi_rust::relay::{self, Server};

/// Reversi with obstacles: console, versus-AI, and online play
#[derive(Parser)]
#[command(name = "reversi-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size as WIDTHxHEIGHT (default 8x8)
    #[arg(short, long)]
    size: Option<String>,

    /// Add one obstacle cell per occurrence
    #[arg(short = 'r', long = "rocks", action = clap::ArgAction::Count)]
    rocks: u8,

    /// Let the move picker play Dark
    #[arg(short, long, conflicts_with = "white", requires = "ai")]
    black: bool,

    /// Let the move picker play Light (the default with --ai)
    #[arg(short, long, requires = "ai")]
    white: bool,

    /// Play offline against the built-in move picker
    #[arg(short, long, conflicts_with_all = ["newgame", "connect"])]
    ai: bool,

    /// Host a new online game on this port
    #[arg(short, long, value_name = "PORT", conflicts_with = "connect")]
    newgame: Option<u16>,

    /// Connect to a hosted game at HOST:PORT
    #[arg(short, long, value_name = "ADDRESS")]
    connect: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (width, height) = parse_size(cli.size.as_deref())?;
    let rocks = cli.rocks as usize;

    if let Some(port) = cli.newgame {
        let game = Game::new(width, height, rocks)?;
        host_game(port, game)
    } else if let Some(addr) = cli.connect {
        relay::connect(&addr)
    } else {
        play_offline(width, height, rocks, ai_side(&cli))
    }
}

/// Spawn the relay server and join it as the Dark-side client.
fn host_game(port: u16, game: Game) -> Result<()> {
    let server = Server::bind(port, game)?;
    let handle = thread::spawn(move || server.run());
    relay::connect(&format!("127.0.0.1:{port}"))?;
    match handle.join() {
        Ok(result) => result,
        Err(_) => bail!("relay server thread panicked"),
    }
}

fn ai_side(cli: &Cli) -> Option<Color> {
    if !cli.ai {
        None
    } else if cli.black {
        Some(Color::Dark)
    } else {
        Some(Color::Light)
    }
}

fn play_offline(width: i32, height: i32, rocks: usize, ai_side: Option<Color>) -> Result<()> {
    let mut game = Game::new(width, height, rocks)?;
    loop {
        println!("{}", console::status(&game));
        let outcome = if ai_side == Some(game.to_move()) {
            ai_move(&mut game)?
        } else {
            human_move(&mut game)?
        };
        if let PlayOutcome::GameOver(_) = outcome {
            println!("{}", console::status(&game));
            if !prompt_rematch()? {
                return Ok(());
            }
            game = Game::new(width, height, rocks)?;
        }
    }
}

/// Prompt until the local player enters a move the engine accepts.
/// Recoverable problems (unreadable input, illegal moves) are printed
/// and the prompt repeats.
fn human_move(game: &mut Game) -> Result<PlayOutcome> {
    loop {
        print!("Your move: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            bail!("standard input closed");
        }
        let pos = match relay::parse_move(&line) {
            Ok(pos) => pos,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match game.play(pos) {
            Ok(outcome) => return Ok(outcome),
            Err(err) => println!("{err}"),
        }
    }
}

/// The trivial move picker: after a fixed think-time, play the first
/// available move.
fn ai_move(game: &mut Game) -> Result<PlayOutcome> {
    let pos: Point = game
        .available_moves()
        .iter()
        .next()
        .copied()
        .context("no available move for the picker")?;
    thread::sleep(Duration::from_secs(AI_THINK_SECS));
    println!("AI move: {}, {}", pos.0, pos.1);
    Ok(game.play(pos)?)
}

fn prompt_rematch() -> Result<bool> {
    print!("Play again with the same settings (y/N)? ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn parse_size(size: Option<&str>) -> Result<(i32, i32)> {
    let Some(size) = size else {
        return Ok((DEFAULT_WIDTH, DEFAULT_HEIGHT));
    };
    let (w, h) = size
        .split_once('x')
        .with_context(|| format!("size {size:?} must look like 8x8"))?;
    let width = w
        .trim()
        .parse()
        .with_context(|| format!("bad width in {size:?}"))?;
    let height = h
        .trim()
        .parse()
        .with_context(|| format!("bad height in {size:?}"))?;
    Ok((width, height))
}
