//! Best-score storage seam.
//!
//! The session reads a player's best score on reset and pushes new bests as
//! they happen. Where scores live is up to the implementation; the game never
//! waits on or inspects the outcome of a write.

use std::collections::HashMap;
use std::fmt;

/// Whose best score is being read or written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Player {
    #[default]
    Anonymous,
    User(String),
}

impl Player {
    pub fn user(name: impl Into<String>) -> Self {
        Player::User(name.into())
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Player::Anonymous => None,
            Player::User(name) => Some(name),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Anonymous => f.write_str("anonymous"),
            Player::User(name) => f.write_str(name),
        }
    }
}

/// External best-score store consumed by [`crate::GameSession`].
pub trait ScoreStore {
    /// Best score recorded for `player`, 0 if none.
    fn load_best_score(&mut self, player: &Player) -> u32;

    /// Record `score` as `player`'s best. Fire-and-forget: implementations
    /// handle (and log) their own failures.
    fn persist_best_score(&mut self, player: &Player, score: u32);
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load_best_score(&mut self, player: &Player) -> u32 {
        (**self).load_best_score(player)
    }

    fn persist_best_score(&mut self, player: &Player, score: u32) {
        (**self).persist_best_score(player, score)
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn load_best_score(&mut self, player: &Player) -> u32 {
        (**self).load_best_score(player)
    }

    fn persist_best_score(&mut self, player: &Player, score: u32) {
        (**self).persist_best_score(player, score)
    }
}

/// Volatile store kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HashMap<Player, u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, player: Player, score: u32) -> Self {
        self.scores.insert(player, score);
        self
    }

    pub fn get(&self, player: &Player) -> Option<u32> {
        self.scores.get(player).copied()
    }

    /// Number of persist calls received.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&mut self, player: &Player) -> u32 {
        self.get(player).unwrap_or(0)
    }

    fn persist_best_score(&mut self, player: &Player, score: u32) {
        self.writes += 1;
        self.scores.insert(player.clone(), score);
    }
}
