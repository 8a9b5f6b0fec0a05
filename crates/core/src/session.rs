//! Game session - turn sequencing on top of the pure engine
//!
//! The session is the only owner and mutator of the live grid. Per move it:
//!
//! 1. runs the move engine; an unchanged board is a silent no-op
//! 2. adopts the new grid and adds the merge score
//! 3. spawns one tile and bumps the move counter
//! 4. raises (and persists) the best score if the score passed it
//! 5. checks for game over, then for the 2048 milestone
//!
//! Win and game-over are each reported once per game through [`GameEvent`]s,
//! which the front end drains with [`GameSession::take_events`].

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::score::{Player, ScoreStore};
use crate::slide::move_tiles;
use crate::snapshot::{SessionState, SessionStatus};
use crate::spawn::{add_random_tile, Spawn};
use crate::types::{Direction, GameAction, Position, INITIAL_TILES, TARGET_TILE};

/// Notifications raised by the session for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The target tile appeared for the first time this game. Play continues.
    Won,
    /// No move can change the board any more.
    GameOver,
    /// The running score beat the stored best.
    NewBest(u32),
}

/// Complete game session
#[derive(Debug)]
pub struct GameSession<R, S> {
    grid: Grid,
    score: u32,
    best_score: u32,
    is_over: bool,
    has_won: bool,
    last_spawn: Option<Spawn>,
    merged_positions: Vec<Position>,
    move_count: u32,
    initial_spawns: ArrayVec<Spawn, INITIAL_TILES>,
    /// Monotonic game id (increments on reset).
    game_id: u32,
    target: u32,
    player: Player,
    rng: R,
    store: S,
    events: Vec<GameEvent>,
}

impl<R: RandomSource, S: ScoreStore> GameSession<R, S> {
    /// Start a fresh `size` x `size` game for `player`.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn new(size: usize, player: Player, rng: R, store: S) -> Self {
        let mut session = Self::from_grid(Grid::new(size), player, rng, store);
        session.game_id = 0;
        session.reset(size);
        session
    }

    /// Continue from an existing board with a zero score.
    ///
    /// Used to resume saved boards and to set up exact positions in tests.
    pub fn from_grid(grid: Grid, player: Player, rng: R, mut store: S) -> Self {
        let best_score = store.load_best_score(&player);
        let mut session = Self {
            grid,
            score: 0,
            best_score,
            is_over: false,
            has_won: false,
            last_spawn: None,
            merged_positions: Vec::new(),
            move_count: 0,
            initial_spawns: ArrayVec::new(),
            game_id: 1,
            target: TARGET_TILE,
            player,
            rng,
            store,
            events: Vec::new(),
        };
        session.evaluate_terminal();
        session
    }

    /// Override the milestone tile (2048 by default).
    pub fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self.has_won = false;
        self.evaluate_terminal();
        self
    }

    /// Throw the current game away and start over on a `size` x `size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn reset(&mut self, size: usize) -> SessionState {
        let mut grid = Grid::new(size);
        self.initial_spawns.clear();
        for _ in 0..INITIAL_TILES {
            let result = add_random_tile(&grid, &mut self.rng);
            grid = result.grid;
            if let Some(spawn) = result.spawn {
                self.initial_spawns.push(spawn);
            }
        }

        self.grid = grid;
        self.score = 0;
        self.move_count = 0;
        self.is_over = false;
        self.has_won = false;
        self.merged_positions.clear();
        self.last_spawn = self.initial_spawns.last().copied();
        self.best_score = self.store.load_best_score(&self.player);
        self.game_id = self.game_id.wrapping_add(1);
        self.events.clear();

        info!(
            game_id = self.game_id,
            size,
            player = %self.player,
            best = self.best_score,
            "new game"
        );

        self.evaluate_terminal();
        self.state()
    }

    /// Slide the board toward `direction`.
    ///
    /// Moves that change nothing, and any move after game over, leave the
    /// session exactly as it was.
    pub fn apply_move(&mut self, direction: Direction) -> SessionState {
        if self.is_over {
            return self.state();
        }

        let result = move_tiles(&self.grid, direction);
        if !result.moved {
            debug!(direction = direction.as_str(), "move ignored: board unchanged");
            return self.state();
        }

        self.score = self.score.saturating_add(result.score_delta);
        let spawned = add_random_tile(&result.grid, &mut self.rng);
        self.grid = spawned.grid;
        self.last_spawn = spawned.spawn;
        self.merged_positions = result.merged_positions;
        self.move_count += 1;

        debug!(
            direction = direction.as_str(),
            delta = result.score_delta,
            score = self.score,
            moves = self.move_count,
            merges = self.merged_positions.len(),
            "move applied"
        );

        self.update_best_score();
        self.evaluate_terminal();
        self.state()
    }

    /// Apply an input action. `Restart` keeps the current board size.
    pub fn apply_action(&mut self, action: GameAction) -> SessionState {
        match action {
            GameAction::Move(direction) => self.apply_move(direction),
            GameAction::Restart => self.reset(self.grid.size()),
        }
    }

    /// Switch players (log in/out). The best score is reloaded for the new
    /// player; the board in play is kept.
    pub fn set_player(&mut self, player: Player) {
        self.best_score = self.store.load_best_score(&player);
        self.player = player;
        self.update_best_score();
    }

    fn update_best_score(&mut self) {
        if self.score > self.best_score {
            self.best_score = self.score;
            self.store.persist_best_score(&self.player, self.score);
            self.events.push(GameEvent::NewBest(self.score));
            debug!(best = self.score, player = %self.player, "new best score");
        }
    }

    fn evaluate_terminal(&mut self) {
        if !self.is_over && self.grid.is_terminal() {
            self.is_over = true;
            self.events.push(GameEvent::GameOver);
            info!(score = self.score, moves = self.move_count, "game over");
        }

        if !self.has_won && self.grid.has_reached_target(self.target) {
            self.has_won = true;
            self.events.push(GameEvent::Won);
            info!(target = self.target, moves = self.move_count, "target tile reached");
        }
    }

    /// Drain notifications raised since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            grid: self.grid.clone(),
            score: self.score,
            best_score: self.best_score,
            is_over: self.is_over,
            has_won: self.has_won,
            last_spawn: self.last_spawn,
            merged_positions: self.merged_positions.clone(),
            move_count: self.move_count,
            initial_spawns: self.initial_spawns.clone(),
            game_id: self.game_id,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_over {
            SessionStatus::Over
        } else if self.has_won {
            SessionStatus::Won
        } else {
            SessionStatus::Active
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SimpleRng};
    use crate::score::MemoryStore;
    use crate::types::Cell;

    /// Always picks the last empty cell and spawns a 2.
    fn last_cell_rng() -> ScriptedRng {
        ScriptedRng::new(vec![0.999, 0.0])
    }

    fn session_from(rows: &[[Cell; 4]]) -> GameSession<ScriptedRng, MemoryStore> {
        GameSession::from_grid(
            Grid::from_rows(rows).unwrap(),
            Player::Anonymous,
            last_cell_rng(),
            MemoryStore::new(),
        )
    }

    fn checkerboard() -> [[Cell; 4]; 4] {
        [
            [Some(2), Some(4), Some(2), Some(4)],
            [Some(4), Some(2), Some(4), Some(2)],
            [Some(2), Some(4), Some(2), Some(4)],
            [Some(4), Some(2), Some(4), Some(2)],
        ]
    }

    #[test]
    fn test_new_session_has_two_tiles() {
        let session = GameSession::new(4, Player::Anonymous, SimpleRng::new(1), MemoryStore::new());
        let state = session.state();
        assert_eq!(state.grid.tile_count(), 2);
        assert_eq!(state.initial_spawns.len(), 2);
        assert_ne!(state.initial_spawns[0].position, state.initial_spawns[1].position);
        assert_eq!(state.last_spawn, Some(state.initial_spawns[1]));
        assert_eq!(state.score, 0);
        assert_eq!(state.move_count, 0);
        assert_eq!(state.game_id, 1);
        assert_eq!(state.status(), SessionStatus::Active);
    }

    #[test]
    fn test_second_initial_tile_sees_first() {
        // Both draws of 0.0 pick the first empty cell, so the second tile must
        // land on the next free cell.
        let session = GameSession::new(
            4,
            Player::Anonymous,
            ScriptedRng::new(vec![0.0]),
            MemoryStore::new(),
        );
        let spawns = session.state().initial_spawns;
        assert_eq!(spawns[0].position, Position::new(0, 0));
        assert_eq!(spawns[1].position, Position::new(0, 1));
    }

    #[test]
    #[should_panic(expected = "grid size must be at least 2")]
    fn test_reset_rejects_tiny_board() {
        let mut session =
            GameSession::new(4, Player::Anonymous, SimpleRng::new(1), MemoryStore::new());
        session.reset(1);
    }

    #[test]
    fn test_reset_loads_best_and_increments_game_id() {
        let store = MemoryStore::new().with_score(Player::user("demo"), 2048);
        let mut session = GameSession::new(4, Player::user("demo"), SimpleRng::new(3), store);
        assert_eq!(session.best_score(), 2048);
        let state = session.reset(5);
        assert_eq!(state.grid.size(), 5);
        assert_eq!(state.game_id, 2);
        assert_eq!(state.best_score, 2048);
    }

    #[test]
    fn test_move_left_merges_and_spawns() {
        let mut session = session_from(&[
            [Some(2), Some(2), None, None],
            [None, None, None, None],
            [None, None, None, None],
            [None, None, None, None],
        ]);
        let state = session.apply_move(Direction::Left);
        assert_eq!(state.grid.row(0), &[Some(4), None, None, None]);
        assert_eq!(state.score, 4);
        assert_eq!(state.move_count, 1);
        assert_eq!(
            state.last_spawn,
            Some(Spawn {
                position: Position::new(3, 3),
                value: 2
            })
        );
        assert_eq!(state.merged_positions, vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_move_right_across_gap() {
        let mut session = session_from(&[
            [Some(2), None, Some(2), Some(4)],
            [None, None, None, None],
            [None, None, None, None],
            [None, None, None, None],
        ]);
        let state = session.apply_move(Direction::Right);
        assert_eq!(state.grid.row(0), &[None, None, Some(4), Some(4)]);
        assert_eq!(state.score, 4);
    }

    #[test]
    fn test_noop_move_changes_nothing() {
        let mut session = session_from(&[
            [None, None, None, Some(2)],
            [None, None, None, None],
            [None, None, None, None],
            [None, None, None, None],
        ]);
        let before = session.state();
        let after = session.apply_move(Direction::Right);
        assert_eq!(before, after);
        assert!(session.take_events().is_empty());
        assert_eq!(session.store().writes(), 0);
    }

    #[test]
    fn test_terminal_board_is_over_and_frozen() {
        let mut session = session_from(&checkerboard());
        assert!(session.is_over());
        assert_eq!(session.take_events(), vec![GameEvent::GameOver]);
        let before = session.state();
        for dir in Direction::ALL {
            assert_eq!(session.apply_move(dir), before);
        }
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_move_into_game_over() {
        // Sliding left merges the 4s; the spawned 2 in the last cell then
        // leaves no empty cell and no equal neighbours.
        let mut session = session_from(&[
            [Some(2), Some(4), Some(2), Some(4)],
            [Some(4), Some(2), Some(4), Some(2)],
            [Some(2), Some(4), Some(2), Some(4)],
            [Some(4), Some(4), Some(32), Some(64)],
        ]);
        assert!(!session.is_over());
        let state = session.apply_move(Direction::Left);
        assert_eq!(
            state.grid.row(3),
            &[Some(8), Some(32), Some(64), Some(2)]
        );
        assert!(state.is_over);
        assert_eq!(state.status(), SessionStatus::Over);
        let events = session.take_events();
        assert!(events.contains(&GameEvent::GameOver));
        assert!(events.contains(&GameEvent::NewBest(8)));
    }

    #[test]
    fn test_win_is_reported_once_and_play_continues() {
        let mut session = session_from(&[
            [Some(1024), Some(1024), None, None],
            [None, None, None, None],
            [None, None, None, None],
            [Some(2), None, None, None],
        ]);
        let state = session.apply_move(Direction::Left);
        assert!(state.has_won);
        assert!(!state.is_over);
        assert_eq!(state.status(), SessionStatus::Won);
        assert!(session.take_events().contains(&GameEvent::Won));

        let state = session.apply_move(Direction::Right);
        assert_eq!(state.move_count, 2);
        assert!(state.has_won);
        assert!(!session.take_events().contains(&GameEvent::Won));
    }

    #[test]
    fn test_custom_target() {
        let mut session = session_from(&[
            [Some(4), Some(4), None, None],
            [None, None, None, None],
            [None, None, None, None],
            [None, None, None, None],
        ])
        .with_target(8);
        session.apply_move(Direction::Left);
        assert!(session.has_won());
    }

    #[test]
    fn test_best_score_persisted_once_per_move_and_never_decreases() {
        let store = MemoryStore::new().with_score(Player::Anonymous, 6);
        let mut session = GameSession::from_grid(
            Grid::from_rows(&[
                [Some(2), Some(2), Some(4), Some(4)],
                [None, None, None, None],
                [None, None, None, None],
                [None, None, None, None],
            ])
            .unwrap(),
            Player::Anonymous,
            last_cell_rng(),
            store,
        );
        assert_eq!(session.best_score(), 6);

        // 2+2 and 4+4 merge in one move: one write of 12.
        session.apply_move(Direction::Left);
        assert_eq!(session.score(), 12);
        assert_eq!(session.best_score(), 12);
        assert_eq!(session.store().writes(), 1);
        assert_eq!(session.store().get(&Player::Anonymous), Some(12));

        // Reset zeroes the score but keeps the best.
        session.reset(4);
        assert_eq!(session.score(), 0);
        assert_eq!(session.best_score(), 12);
    }

    #[test]
    fn test_set_player_reloads_best() {
        let store = MemoryStore::new().with_score(Player::user("demo"), 2048);
        let mut session =
            GameSession::new(4, Player::Anonymous, SimpleRng::new(9), store);
        assert_eq!(session.best_score(), 0);
        session.set_player(Player::user("demo"));
        assert_eq!(session.best_score(), 2048);
        assert_eq!(session.player(), &Player::user("demo"));
    }

    #[test]
    fn test_restart_action_keeps_size() {
        let mut session =
            GameSession::new(6, Player::Anonymous, SimpleRng::new(2), MemoryStore::new());
        let state = session.apply_action(GameAction::Restart);
        assert_eq!(state.grid.size(), 6);
        assert_eq!(state.game_id, 2);
    }

    #[test]
    fn test_seeded_games_replay_identically() {
        let play = |seed| {
            let mut session =
                GameSession::new(4, Player::Anonymous, SimpleRng::new(seed), MemoryStore::new());
            for i in 0..200 {
                session.apply_move(Direction::from_index(i % 4));
            }
            session.state()
        };
        assert_eq!(play(42), play(42));
    }

    #[test]
    fn test_random_game_invariants() {
        let mut session =
            GameSession::new(4, Player::Anonymous, SimpleRng::new(2024), MemoryStore::new());
        let mut last_count = 0;
        let mut last_score = 0;
        for i in 0..2_000 {
            let state = session.apply_move(Direction::from_index((i * 7 + i / 3) % 4));
            assert!(state.move_count >= last_count);
            assert!(state.score >= last_score);
            assert!(state.best_score >= state.score);
            assert!(state
                .grid
                .cells()
                .iter()
                .flatten()
                .all(|v| *v >= 2 && v.is_power_of_two()));
            last_count = state.move_count;
            last_score = state.score;
            if state.is_over {
                assert!(state.grid.is_terminal());
                break;
            }
        }
    }
}
