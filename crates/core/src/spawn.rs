//! Tile spawner - places a 2 or a 4 on a random empty cell

use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{Position, SPAWN_TWO_PROBABILITY};

/// A tile placed by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spawn {
    pub position: Position,
    pub value: u32,
}

/// Grid after a spawn attempt.
///
/// `spawn` is `None` when the board had no empty cell; the grid is then the
/// input unchanged. That is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnResult {
    pub grid: Grid,
    pub spawn: Option<Spawn>,
}

/// Place one tile on a uniformly chosen empty cell.
///
/// The position is drawn first, then the value: a draw below
/// [`SPAWN_TWO_PROBABILITY`] yields 2, anything else 4.
pub fn add_random_tile<R: RandomSource>(grid: &Grid, mut rng: R) -> SpawnResult {
    let empty = grid.empty_positions();
    if empty.is_empty() {
        return SpawnResult {
            grid: grid.clone(),
            spawn: None,
        };
    }

    let position = empty[rng.next_index(empty.len())];
    let value = if rng.next_f64() < SPAWN_TWO_PROBABILITY {
        2
    } else {
        4
    };

    let mut out = grid.clone();
    out.set(position, Some(value));

    SpawnResult {
        grid: out,
        spawn: Some(Spawn { position, value }),
    }
}
