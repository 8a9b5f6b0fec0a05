use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::spawn::Spawn;
use crate::types::{Position, INITIAL_TILES};

/// Where a session stands in its lifecycle.
///
/// `Won` is a milestone reached while still playable; only `Over` ends a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Active,
    Won,
    Over,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Won => "won",
            SessionStatus::Over => "over",
        }
    }
}

/// Read-only copy of a session handed to the UI after every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub grid: Grid,
    pub score: u32,
    pub best_score: u32,
    pub is_over: bool,
    pub has_won: bool,
    /// Tile placed by the most recent successful move (or the second
    /// starting tile right after a reset).
    pub last_spawn: Option<Spawn>,
    /// Merge targets of the most recent successful move.
    pub merged_positions: Vec<Position>,
    pub move_count: u32,
    /// Tiles placed by the last reset, in placement order.
    pub initial_spawns: ArrayVec<Spawn, INITIAL_TILES>,
    /// Monotonic game id (increments on reset).
    pub game_id: u32,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        if self.is_over {
            SessionStatus::Over
        } else if self.has_won {
            SessionStatus::Won
        } else {
            SessionStatus::Active
        }
    }

    pub fn playable(&self) -> bool {
        !self.is_over
    }

    /// Whether `pos` was the target of a merge in the last move.
    pub fn was_merged(&self, pos: Position) -> bool {
        self.merged_positions.contains(&pos)
    }

    /// Whether `pos` holds the most recently spawned tile.
    pub fn is_new_tile(&self, pos: Position) -> bool {
        self.last_spawn.map(|s| s.position) == Some(pos)
    }
}
