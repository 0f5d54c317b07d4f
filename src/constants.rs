//! Constants for board geometry, the opening layout, and the CLI.

/// Offsets to the 8 neighbors of a cell (orthogonal and diagonal).
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Default board width when no size is given.
pub const DEFAULT_WIDTH: i32 = 8;

/// Default board height when no size is given.
pub const DEFAULT_HEIGHT: i32 = 8;

/// Largest dimension for the compact opening layout.
///
/// When either board dimension is at most this value, the four starting
/// chips use the diagonal color assignment; above it, each color takes
/// one row of the central block. The threshold and both cell
/// assignments are a pinned compatibility contract.
pub const SMALL_LAYOUT_MAX: i32 = 8;

/// Seconds the built-in move picker pretends to think before playing.
pub const AI_THINK_SECS: u64 = 3;
