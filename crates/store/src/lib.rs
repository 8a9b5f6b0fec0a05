//! Persistent best scores, local accounts and the leaderboard.
//!
//! [`JsonFileStore`] implements [`core::ScoreStore`] over a single JSON file.

pub mod document;
pub mod error;
pub mod file_store;

pub use tui_2048_core as core;

pub use document::{ScoreDocument, UserRecord, DEMO_HIGH_SCORE, DEMO_PASSWORD, DEMO_USERNAME};
pub use error::StoreError;
pub use file_store::{JsonFileStore, LeaderboardEntry};
