//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the 2048 rules, the session state machine, and the
//! seams to randomness and score storage.
//! It has **zero dependencies** on UI, terminal, or file I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: The slide routine, rotation and spawner are tested separately
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: N x N board with terminal and target checks, and rotation
//! - [`slide`]: the move engine (rotate, slide every row right, rotate back)
//! - [`spawn`]: random 2/4 tile placement
//! - [`rng`]: the injectable [`RandomSource`] and a seedable LCG
//! - [`score`]: the best-score store seam
//! - [`session`]: turn sequencing, score, win/over detection
//! - [`snapshot`]: read-only session state handed to the UI
//!
//! # Game Rules
//!
//! - A move slides every tile toward one edge; equal neighbours merge once
//! - A move that changes nothing is ignored (no tile spawns)
//! - After every effective move one tile spawns: 2 (90%) or 4 (10%)
//! - Reaching 2048 is a milestone; play continues
//! - The game is over when the board is full with no equal neighbours
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{GameSession, MemoryStore, Player, SimpleRng};
//! use tui_2048_types::Direction;
//!
//! let mut game = GameSession::new(4, Player::Anonymous, SimpleRng::new(12345), MemoryStore::new());
//! assert_eq!(game.grid().tile_count(), 2);
//!
//! for dir in Direction::ALL {
//!     game.apply_move(dir);
//! }
//!
//! let state = game.state();
//! assert!(state.best_score >= state.score);
//! ```

pub mod grid;
pub mod rng;
pub mod score;
pub mod session;
pub mod slide;
pub mod snapshot;
pub mod spawn;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use grid::{Grid, GridError};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use score::{MemoryStore, Player, ScoreStore};
pub use session::{GameEvent, GameSession};
pub use slide::{available_moves, can_move, move_tiles, slide_row_right, MoveResult, RowSlide};
pub use snapshot::{SessionState, SessionStatus};
pub use spawn::{add_random_tile, Spawn, SpawnResult};
