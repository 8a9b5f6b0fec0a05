//! Input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework beyond the
//! terminal key types. It maps `crossterm` key events into
//! [`crate::types::GameAction`] and classifies pointer or touch swipes into
//! directions for front ends that have them.

pub mod gesture;
pub mod map;

pub use tui_2048_types as types;

pub use gesture::{classify_swipe, SwipeTracker};
pub use map::{handle_key_event, should_quit};
