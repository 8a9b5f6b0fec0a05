//! Move engine - slide and merge tiles toward one edge
//!
//! Every direction is reduced to a single "slide right" routine. The board is
//! rotated clockwise until the requested edge is on the right
//! ([`Direction::rotations`]), each row is slid right independently, then the
//! result is rotated back by the remaining quarter turns. Merge positions are
//! recorded in the rotated frame and carried back through the same inverse
//! rotation.
//!
//! Within a row, tiles are finalised right to left. A tile that absorbed a
//! merge is locked for the rest of the move, so `[2, 2, 2, 2]` becomes
//! `[_, _, 4, 4]` and never `[_, _, _, 8]`.

use crate::grid::Grid;
use crate::types::{Cell, Direction, Position};

/// Outcome of sliding one row to the right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowSlide {
    /// Points earned in this row (sum of the doubled values)
    pub score: u32,
    /// Columns that received a merge, in the order they merged
    pub merged: Vec<usize>,
}

/// Result of moving the whole board in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    /// True iff at least one cell differs from the input grid
    pub moved: bool,
    pub score_delta: u32,
    /// Cells (in the caller's orientation) holding a freshly merged tile
    pub merged_positions: Vec<Position>,
}

/// Slide `row` toward its last index, merging equal neighbours once.
///
/// The row is updated in place. Scanning starts at the second-to-last cell:
/// each tile is packed right through empty cells, then merged into its right
/// neighbour if that neighbour holds the same value and has not merged yet.
pub fn slide_row_right(row: &mut [Cell]) -> RowSlide {
    let n = row.len();
    let mut out = RowSlide::default();
    if n < 2 {
        return out;
    }

    // Lives only for this row.
    let mut merged = vec![false; n];

    for i in (0..n - 1).rev() {
        let Some(value) = row[i] else {
            continue;
        };

        let mut j = i;
        while j + 1 < n && row[j + 1].is_none() {
            row[j + 1] = row[j];
            row[j] = None;
            j += 1;
        }

        if j + 1 < n && row[j + 1] == Some(value) && !merged[j + 1] {
            let doubled = value.saturating_mul(2);
            row[j + 1] = Some(doubled);
            row[j] = None;
            merged[j + 1] = true;
            out.score = out.score.saturating_add(doubled);
            out.merged.push(j + 1);
        }
    }

    out
}

/// Slide every tile of `grid` toward `direction`.
///
/// The input grid is never modified; the returned [`MoveResult`] owns a new one.
pub fn move_tiles(grid: &Grid, direction: Direction) -> MoveResult {
    let n = grid.size();
    let rotations = direction.rotations();
    let restore = (4 - rotations) % 4;

    let mut work = grid.rotate_cw(rotations);
    let mut score_delta: u32 = 0;
    let mut merged_positions = Vec::new();

    for row in 0..n {
        let slide = slide_row_right(work.row_mut(row));
        score_delta = score_delta.saturating_add(slide.score);
        for col in slide.merged {
            let mut pos = Position::new(row, col);
            for _ in 0..restore {
                pos = pos.rotate_cw(n);
            }
            merged_positions.push(pos);
        }
    }

    let out = work.rotate_cw(restore);
    let moved = out
        .cells()
        .iter()
        .zip(grid.cells())
        .any(|(after, before)| after != before);

    MoveResult {
        grid: out,
        moved,
        score_delta,
        merged_positions,
    }
}

/// Whether sliding toward `direction` would change the board.
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    move_tiles(grid, direction).moved
}

/// Directions that would change the board, in [`Direction::ALL`] order.
pub fn available_moves(grid: &Grid) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|dir| can_move(grid, *dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RandomSource, SimpleRng};
    use crate::types::MAX_TILE;

    fn slid(cells: [Cell; 4]) -> ([Cell; 4], RowSlide) {
        let mut row = cells;
        let slide = slide_row_right(&mut row);
        (row, slide)
    }

    fn grid(rows: &[[Cell; 4]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    fn random_grid(rng: &mut SimpleRng, size: usize) -> Grid {
        let rows: Vec<Vec<Cell>> = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| match rng.next_index(6) {
                        0 | 1 => None,
                        k => Some(2u32 << (k - 2)),
                    })
                    .collect()
            })
            .collect();
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_largest_tiles_merge_without_overflow() {
        let g = Grid::from_rows(&[vec![Some(MAX_TILE), Some(MAX_TILE)], vec![None, None]]).unwrap();
        let result = move_tiles(&g, Direction::Right);
        assert!(result.moved);
        assert_eq!(result.grid.row(0), &[None, Some(1u32 << 31)]);
        assert_eq!(result.score_delta, 1 << 31);

        // Past the cap the merge saturates instead of wrapping to zero.
        let (row, slide) = slid([None, None, Some(1 << 31), Some(1 << 31)]);
        assert_eq!(row, [None, None, None, Some(u32::MAX)]);
        assert_eq!(slide.score, u32::MAX);
    }

    #[test]
    fn test_pack_without_merge() {
        let (row, slide) = slid([Some(2), None, Some(4), None]);
        assert_eq!(row, [None, None, Some(2), Some(4)]);
        assert_eq!(slide.score, 0);
        assert!(slide.merged.is_empty());
    }

    #[test]
    fn test_merge_across_gap() {
        let (row, slide) = slid([Some(2), None, Some(2), Some(4)]);
        assert_eq!(row, [None, None, Some(4), Some(4)]);
        assert_eq!(slide.score, 4);
        assert_eq!(slide.merged, vec![2]);
    }

    #[test]
    fn test_four_equal_merge_into_two_pairs() {
        let (row, slide) = slid([Some(2), Some(2), Some(2), Some(2)]);
        assert_eq!(row, [None, None, Some(4), Some(4)]);
        assert_eq!(slide.score, 8);
        assert_eq!(slide.merged, vec![3, 2]);
    }

    #[test]
    fn test_three_equal_leave_leftover() {
        let (row, slide) = slid([Some(2), Some(2), Some(2), None]);
        assert_eq!(row, [None, None, Some(2), Some(4)]);
        assert_eq!(slide.score, 4);
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        let (row, slide) = slid([Some(4), Some(2), Some(2), None]);
        assert_eq!(row, [None, None, Some(4), Some(4)]);
        assert_eq!(slide.score, 4);
        assert_eq!(slide.merged, vec![3]);
    }

    #[test]
    fn test_full_row_without_pairs_is_untouched() {
        let (row, slide) = slid([Some(2), Some(4), Some(8), Some(16)]);
        assert_eq!(row, [Some(2), Some(4), Some(8), Some(16)]);
        assert_eq!(slide, RowSlide::default());
    }

    #[test]
    fn test_short_rows() {
        let mut two = [Some(8), Some(8)];
        assert_eq!(slide_row_right(&mut two).score, 16);
        assert_eq!(two, [None, Some(16)]);

        let mut one = [Some(2)];
        assert_eq!(slide_row_right(&mut one), RowSlide::default());
    }

    #[test]
    fn test_move_left_merges_leading_pair() {
        let g = grid(&[
            [Some(2), Some(2), None, None],
            [None, None, None, None],
            [None, None, None, None],
            [None, None, None, None],
        ]);
        let result = move_tiles(&g, Direction::Left);
        assert!(result.moved);
        assert_eq!(result.score_delta, 4);
        assert_eq!(result.grid.row(0), &[Some(4), None, None, None]);
        assert_eq!(result.merged_positions, vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_move_up_and_down_columns() {
        let g = grid(&[
            [Some(2), None, None, Some(8)],
            [None, None, None, None],
            [Some(2), None, Some(4), Some(8)],
            [Some(4), None, None, Some(8)],
        ]);

        let up = move_tiles(&g, Direction::Up);
        assert_eq!(
            up.grid.to_rows(),
            vec![
                vec![Some(4), None, Some(4), Some(16)],
                vec![Some(4), None, None, Some(8)],
                vec![None, None, None, None],
                vec![None, None, None, None],
            ]
        );
        assert_eq!(up.score_delta, 4 + 16);
        let mut merged = up.merged_positions.clone();
        merged.sort();
        assert_eq!(merged, vec![Position::new(0, 0), Position::new(0, 3)]);

        let down = move_tiles(&g, Direction::Down);
        assert_eq!(
            down.grid.to_rows(),
            vec![
                vec![None, None, None, None],
                vec![None, None, None, None],
                vec![Some(4), None, None, Some(8)],
                vec![Some(4), None, Some(4), Some(16)],
            ]
        );
        let mut merged = down.merged_positions.clone();
        merged.sort();
        assert_eq!(merged, vec![Position::new(2, 0), Position::new(3, 3)]);
    }

    #[test]
    fn test_merge_positions_point_at_merged_tiles() {
        let mut rng = SimpleRng::new(2024);
        for _ in 0..200 {
            let g = random_grid(&mut rng, 4);
            for dir in Direction::ALL {
                let result = move_tiles(&g, dir);
                for pos in &result.merged_positions {
                    let cell = result.grid.get(*pos).flatten();
                    assert!(matches!(cell, Some(v) if v >= 4), "{dir:?} {pos:?}\n{g}");
                }
            }
        }
    }

    #[test]
    fn test_move_does_not_mutate_input() {
        let g = grid(&[
            [Some(2), Some(2), Some(4), None],
            [None, Some(8), None, Some(8)],
            [None, None, None, None],
            [Some(2), None, None, None],
        ]);
        let before = g.clone();
        for dir in Direction::ALL {
            let _ = move_tiles(&g, dir);
        }
        assert_eq!(g, before);
    }

    #[test]
    fn test_second_slide_is_noop() {
        let mut rng = SimpleRng::new(77);
        for _ in 0..200 {
            let g = random_grid(&mut rng, 4);
            for dir in Direction::ALL {
                let once = move_tiles(&g, dir);
                let twice = move_tiles(&once.grid, dir);
                // [4, 2, 2, _] slides to [_, _, 4, 4], which can merge again.
                if !twice.moved {
                    assert_eq!(twice.grid, once.grid);
                    assert_eq!(twice.score_delta, 0);
                }
            }
        }
    }

    #[test]
    fn test_sum_and_count_accounting() {
        let mut rng = SimpleRng::new(31337);
        for _ in 0..300 {
            let g = random_grid(&mut rng, 4);
            for dir in Direction::ALL {
                let result = move_tiles(&g, dir);
                let merges = result.merged_positions.len();
                assert_eq!(result.grid.tile_count() + merges, g.tile_count());
                // Each merge of two v tiles removes 2v and adds 2v; the score
                // counts the doubled values.
                assert_eq!(result.grid.tile_sum(), g.tile_sum());
                let merged_sum: u64 = result
                    .merged_positions
                    .iter()
                    .map(|p| result.grid.get(*p).flatten().unwrap_or(0) as u64)
                    .sum();
                assert_eq!(merged_sum, result.score_delta as u64);
            }
        }
    }

    #[test]
    fn test_moved_flag_matches_cell_diff() {
        let mut rng = SimpleRng::new(9);
        for _ in 0..200 {
            let g = random_grid(&mut rng, 5);
            for dir in Direction::ALL {
                let result = move_tiles(&g, dir);
                assert_eq!(result.moved, result.grid != g);
            }
        }
    }

    #[test]
    fn test_terminal_grid_cannot_move() {
        let g = grid(&[
            [Some(2), Some(4), Some(2), Some(4)],
            [Some(4), Some(2), Some(4), Some(2)],
            [Some(2), Some(4), Some(2), Some(4)],
            [Some(4), Some(2), Some(4), Some(2)],
        ]);
        assert!(g.is_terminal());
        for dir in Direction::ALL {
            let result = move_tiles(&g, dir);
            assert!(!result.moved);
            assert_eq!(result.score_delta, 0);
        }
        assert!(available_moves(&g).is_empty());
    }

    #[test]
    fn test_available_moves_agree_with_terminal_check() {
        let mut rng = SimpleRng::new(4242);
        for _ in 0..300 {
            let g = random_grid(&mut rng, 4);
            if g.tile_count() == 0 {
                continue;
            }
            assert_eq!(available_moves(&g).is_empty(), g.is_terminal(), "\n{g}");
        }
    }
}
