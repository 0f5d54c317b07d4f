//! The rectangular board and its cell contents.
//!
//! The board is a dense row-major grid: every in-range coordinate holds
//! exactly one [`Cell`]. It knows nothing about move legality; the game
//! engine in [`crate::game`] drives all mutation.

use std::fmt;

/// One of the two players' chip colors. Dark moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    /// The other player's color.
    pub fn opposite(self) -> Color {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Dark => write!(f, "Dark"),
            Color::Light => write!(f, "Light"),
        }
    }
}

/// Contents of a single board cell.
///
/// An obstacle is permanent: it never flips, never scores, and is never
/// a legal destination.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Chip(Color),
    Obstacle,
}

/// A board coordinate, `(x, y)` with `0 <= x < width`, `0 <= y < height`.
///
/// Signed so that direction walks can step off the edge and be caught
/// by a bounds check instead of wrapping.
pub type Point = (i32, i32);

/// A fixed-size rectangular grid of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-empty board. Dimension validation belongs to the
    /// game setup, not here.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Whether a coordinate lies on the board.
    pub fn contains(&self, (x, y): Point) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Cell contents, or `None` out of bounds.
    pub fn get(&self, (x, y): Point) -> Option<Cell> {
        if !self.contains((x, y)) {
            return None;
        }
        Some(self.cells[self.idx(x, y)])
    }

    /// Unconditional cell write. Callers pass in-range coordinates;
    /// only game setup and capture execution mutate the board.
    pub fn set(&mut self, (x, y): Point, cell: Cell) {
        let i = self.idx(x, y);
        self.cells[i] = cell;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = match self.cells[self.idx(x, y)] {
                    Cell::Chip(Color::Dark) => 'X',
                    Cell::Chip(Color::Light) => 'O',
                    Cell::Obstacle => '#',
                    Cell::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
