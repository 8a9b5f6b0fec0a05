//! Terminal 2048 runner (default binary).
//!
//! Keyboard (arrows, WASD, HJKL) and mouse drags drive a single game session
//! rendered through the framebuffer renderer. Best scores go to the store
//! named by `TUI_2048_STORE`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_2048::config::{GameConfig, StoreLocation};
use tui_2048::core::{GameEvent, GameSession, MemoryStore, Player, ScoreStore, SimpleRng};
use tui_2048::input::{handle_key_event, should_quit, SwipeTracker};
use tui_2048::store::JsonFileStore;
use tui_2048::term::{GameView, HudView, TerminalRenderer, Viewport};
use tui_2048::types::GameAction;

type Session = GameSession<SimpleRng, Box<dyn ScoreStore>>;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let (store, player) = open_store(&config)?;
    let seed = config.seed_or_clock();
    info!(size = config.size, seed, player = %player, "starting game");
    let mut session = GameSession::new(config.size, player, SimpleRng::new(seed), store);

    let mut term = TerminalRenderer::new().with_mouse(true);
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The terminal is in raw mode while playing, so logs only go to a file.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn open_store(config: &GameConfig) -> Result<(Box<dyn ScoreStore>, Player)> {
    match &config.store {
        StoreLocation::Memory => Ok((Box::new(MemoryStore::new()), Player::Anonymous)),
        StoreLocation::File(path) => {
            let store = JsonFileStore::open(path)
                .with_context(|| format!("failed to open score store {}", path.display()))?;
            let player = store.current_player();
            Ok((Box::new(store), player))
        }
    }
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut swipes = SwipeTracker::new();
    let mut message: Option<&'static str> = None;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let state = session.state();
        let hud = HudView {
            player: session.player().username(),
            message,
        };
        let fb = view.render_with_hud(&state, &hud, Viewport::new(w, h));
        term.draw(&fb)?;

        let action = match event::read()? {
            Event::Key(key) => match key.kind {
                KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    handle_key_event(key)
                }
                // Terminal auto-repeat would slide the board several times.
                KeyEventKind::Repeat | KeyEventKind::Release => None,
            },
            Event::Mouse(mouse) => swipes.handle_mouse(mouse).map(GameAction::Move),
            Event::Resize(_, _) => {
                term.invalidate();
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            message = None;
            session.apply_action(action);
            for event in session.take_events() {
                message = event_message(event, message);
            }
        }
    }
}

/// Most important notification wins when several fire on one move.
fn event_message(event: GameEvent, current: Option<&'static str>) -> Option<&'static str> {
    match event {
        GameEvent::GameOver => Some("Game over! r restarts"),
        GameEvent::Won if current.is_none() || current == Some("New best!") => {
            Some("You reached 2048!")
        }
        GameEvent::NewBest(_) if current.is_none() => Some("New best!"),
        _ => current,
    }
}
