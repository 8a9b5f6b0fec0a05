//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, score storage).
//!
//! # Board
//!
//! - **Default size**: 4x4 (any square size >= 2 is supported)
//! - **Coordinates**: `(row, col)`, 0-indexed, origin top-left
//! - **Cell**: `None` when empty, otherwise a power of two >= 2
//!
//! # Spawning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_TWO_PROBABILITY` | 0.9 | Draws below this spawn a 2, others a 4 |
//! | `TARGET_TILE` | 2048 | Reaching this tile triggers the win milestone |
//! | `SWIPE_THRESHOLD_PX` | 50 | Minimum swipe displacement along the dominant axis |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, DEFAULT_GRID_SIZE};
//!
//! let dir = Direction::from_str("Left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.rotations(), 2);
//!
//! assert_eq!(GameAction::from_str("up"), Some(GameAction::Move(Direction::Up)));
//! assert_eq!(DEFAULT_GRID_SIZE, 4);
//! ```

/// Default board size (4x4).
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Smallest board size the engine accepts.
pub const MIN_GRID_SIZE: usize = 2;

/// Largest board size the front ends accept from configuration.
pub const MAX_GRID_SIZE: usize = 16;

/// Largest tile accepted on a caller-supplied board. Two of these still merge
/// into a value that fits in `u32`.
pub const MAX_TILE: u32 = 1 << 30;

/// Tile value that triggers the win milestone.
pub const TARGET_TILE: u32 = 2048;

/// Uniform draws below this threshold spawn a 2, the rest spawn a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Number of tiles placed on a fresh board.
pub const INITIAL_TILES: usize = 2;

/// Swipe displacement (pixels) that must be exceeded on the dominant axis.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(v)`: Tile with value `v` (power of two, >= 2)
pub type Cell = Option<u32>;

/// A `(row, col)` board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position after one clockwise quarter turn of a `size`x`size` board.
    ///
    /// ```
    /// use tui_2048_types::Position;
    ///
    /// assert_eq!(Position::new(0, 0).rotate_cw(4), Position::new(0, 3));
    /// assert_eq!(Position::new(0, 3).rotate_cw(4), Position::new(3, 3));
    /// ```
    pub fn rotate_cw(self, size: usize) -> Self {
        Self {
            row: self.col,
            col: size - 1 - self.row,
        }
    }
}

/// Move directions
///
/// Each direction names the edge tiles slide toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All four directions in clockwise order starting at `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Clockwise quarter turns that bring this direction to "slide right".
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::Right.rotations(), 0);
    /// assert_eq!(Direction::Up.rotations(), 1);
    /// assert_eq!(Direction::Left.rotations(), 2);
    /// assert_eq!(Direction::Down.rotations(), 3);
    /// ```
    pub fn rotations(&self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        }
    }

    /// Direction for an index into [`Direction::ALL`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`. Callers mapping raw input must validate first.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(dir) => *dir,
            None => panic!("direction index out of range: {index}"),
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "right" | "r",
    /// "down" | "d", "left" | "l".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "right" | "r" => Some(Direction::Right),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// Game actions that can be applied to a session
///
/// Produced by keyboard and swipe input, consumed by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide all tiles toward an edge
    Move(Direction),
    /// Throw away the current board and start a new game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("left"), Some(GameAction::Move(Direction::Left)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("restart") || s.eq_ignore_ascii_case("new") {
            return Some(GameAction::Restart);
        }
        Direction::from_str(s).map(GameAction::Move)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(dir) => dir.as_str(),
            GameAction::Restart => "restart",
        }
    }
}
