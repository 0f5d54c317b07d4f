//! Text rendering of the game state.
//!
//! Consumes read-only engine state and produces the status block shown
//! to players, both locally and over the relay: separator, score, side
//! to move, the field, and the ending summary once the game is over.

use crate::board::{Cell, Color};
use crate::game::Game;

/// Light chip glyph (white circle).
pub const LIGHT_CHIP: char = '\u{25cb}';
/// Dark chip glyph (black circle).
pub const DARK_CHIP: char = '\u{25cf}';
/// Obstacle glyph.
pub const OBSTACLE_CHIP: char = '#';

const SEPARATOR: &str =
    "-------------------------------------------------------------------\n";

/// Render the full status block for the current game state.
pub fn status(game: &Game) -> String {
    let mut out = String::new();
    out.push_str(SEPARATOR);
    out.push_str(&score(game));
    out.push_str(&current_player(game));
    out.push_str(&field(game));
    if !game.is_running() {
        out.push_str(&ending(game));
    }
    out
}

fn score(game: &Game) -> String {
    format!(
        "Light: {}\nDark: {}\n",
        game.score().light,
        game.score().dark
    )
}

fn current_player(game: &Game) -> String {
    let side = match game.to_move() {
        Color::Light => format!("Light ({LIGHT_CHIP})"),
        Color::Dark => format!("Dark ({DARK_CHIP})"),
    };
    format!("Current player: {side}\n")
}

/// The board: a column tip of last digits above and below, row labels
/// on the left, `.` marking currently-available cells and `-` the rest.
fn field(game: &Game) -> String {
    let tab_len = row_label_width(game.height());
    let tip = column_tip(game.width(), tab_len);
    let mut out = String::new();
    out.push_str(&tip);
    out.push('\n');
    for y in 0..game.height() {
        let label = y.to_string();
        out.push_str(&label);
        out.push_str(&" ".repeat(tab_len.saturating_sub(label.len())));
        for x in 0..game.width() {
            let glyph = match game.cell((x, y)) {
                Ok(Cell::Chip(Color::Light)) => LIGHT_CHIP,
                Ok(Cell::Chip(Color::Dark)) => DARK_CHIP,
                Ok(Cell::Obstacle) => OBSTACLE_CHIP,
                Ok(Cell::Empty) if game.available_moves().contains(&(x, y)) => '.',
                _ => '-',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push_str(&tip);
    out.push('\n');
    out
}

fn row_label_width(height: i32) -> usize {
    (((height - 1) as f64).log10().ceil() as usize) + 1
}

fn column_tip(width: i32, tab_len: usize) -> String {
    let mut tip = " ".repeat(tab_len);
    for x in 0..width {
        tip.push((b'0' + (x % 10) as u8) as char);
    }
    tip
}

fn ending(game: &Game) -> String {
    let mut out = String::from("No moves available. The game is over.\n");
    let result = game.result();
    match result.winner {
        None => out.push_str("Draw!\n"),
        Some(color) => out.push_str(&format!(
            "{color} won {}:{}.\n",
            result.score.dark, result.score.light
        )),
    }
    out
}
