//! Swipe classification.
//!
//! A swipe is reduced to its start and end points. The axis with the larger
//! absolute displacement wins (ties go vertical), and the displacement along
//! it must exceed the threshold or the gesture is ignored.
//!
//! In the terminal, a mouse drag stands in for a touch swipe: press and
//! release positions arrive in character cells and are scaled to
//! approximate pixels before classification.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{Direction, SWIPE_THRESHOLD_PX};

/// Approximate pixel size of one terminal cell.
const CELL_PX_W: f32 = 8.0;
const CELL_PX_H: f32 = 16.0;

/// Direction for a displacement of `(dx, dy)` pixels (screen coordinates,
/// y grows downward), or `None` if it is too short.
///
/// ```
/// use tui_2048_input::classify_swipe;
/// use tui_2048_types::Direction;
///
/// assert_eq!(classify_swipe(80.0, 10.0, 50.0), Some(Direction::Right));
/// assert_eq!(classify_swipe(-5.0, -60.0, 50.0), Some(Direction::Up));
/// assert_eq!(classify_swipe(30.0, 0.0, 50.0), None);
/// ```
pub fn classify_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx > threshold {
            Some(Direction::Right)
        } else if dx < -threshold {
            Some(Direction::Left)
        } else {
            None
        }
    } else if dy > threshold {
        Some(Direction::Down)
    } else if dy < -threshold {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Tracks one swipe from touch start to touch end.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
    threshold: f32,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_threshold(SWIPE_THRESHOLD_PX)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Record where a touch began. A new start replaces any pending one.
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the touch at `(x, y)` and classify it.
    ///
    /// Returns `None` when no touch was started or the swipe was too short.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        classify_swipe(x - sx, y - sy, self.threshold)
    }

    /// Feed a terminal mouse event; left-button drags act as swipes.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<Direction> {
        let x = event.column as f32 * CELL_PX_W;
        let y = event.row as f32 * CELL_PX_H;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.begin(x, y);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self.end(x, y),
            _ => None,
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}
