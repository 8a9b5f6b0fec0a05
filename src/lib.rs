//! Terminal 2048 (workspace facade crate).
//!
//! Re-exports the member crates under `tui_2048::{core,input,store,term,types}`
//! and owns the start-up configuration shared by the binaries.

pub mod config;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_store as store;
pub use tui_2048_term as term;
pub use tui_2048_types as types;
