//! GameView: maps `core::SessionState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::SessionState;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Position;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Extra text shown next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudView<'a> {
    /// Logged-in player name; `None` shows "guest".
    pub player: Option<&'a str>,
    /// Transient notification ("Game Over!", "You reached 2048!").
    pub message: Option<&'a str>,
}

const FRAME_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 fits four digits with padding and looks roughly square.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Frame size (including border) for an `n` x `n` board.
    pub fn frame_size(&self, n: u16) -> (u16, u16) {
        // One gap column/row between and around tiles, plus the border.
        let w = n.saturating_mul(self.cell_w.saturating_add(1)).saturating_add(3);
        let h = n.saturating_mul(self.cell_h.saturating_add(1)).saturating_add(3);
        (w, h)
    }

    /// Render the session into an existing framebuffer.
    pub fn render_into(&self, state: &SessionState, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_hud(state, &HudView::default(), viewport, fb);
    }

    pub fn render_into_with_hud(
        &self,
        state: &SessionState,
        hud: &HudView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let n = u16::try_from(state.grid.size()).unwrap_or(u16::MAX);
        let (frame_w, frame_h) = self.frame_size(n);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let frame = CellStyle::new(FRAME_BG, FRAME_BG);
        fb.fill_rect(start_x, start_y, frame_w, frame_h, ' ', frame);
        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(120, 110, 100), FRAME_BG),
        );

        for row in 0..state.grid.size() {
            for col in 0..state.grid.size() {
                let pos = Position::new(row, col);
                let value = state.grid.get(pos).flatten();
                self.draw_tile(fb, state, start_x, start_y, pos, value);
            }
        }

        self.draw_side_panel(fb, state, hud, viewport, start_x, start_y, frame_w);

        if state.is_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &SessionState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    pub fn render_with_hud(
        &self,
        state: &SessionState,
        hud: &HudView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_hud(state, hud, viewport, &mut fb);
        fb
    }

    /// Top-left terminal cell of the tile at `pos`.
    pub fn tile_origin(&self, start_x: u16, start_y: u16, pos: Position) -> (u16, u16) {
        let col = u16::try_from(pos.col).unwrap_or(u16::MAX);
        let row = u16::try_from(pos.row).unwrap_or(u16::MAX);
        let x = start_x
            .saturating_add(2)
            .saturating_add(col.saturating_mul(self.cell_w.saturating_add(1)));
        let y = start_y
            .saturating_add(2)
            .saturating_add(row.saturating_mul(self.cell_h.saturating_add(1)));
        (x, y)
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        state: &SessionState,
        start_x: u16,
        start_y: u16,
        pos: Position,
        value: Option<u32>,
    ) {
        let (x, y) = self.tile_origin(start_x, start_y, pos);
        let mid = y + self.cell_h / 2;

        let Some(value) = value else {
            let style = CellStyle::new(DARK_TEXT, EMPTY_BG).dim();
            fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);
            fb.put_str_centered(x, mid, self.cell_w, "·", style);
            return;
        };

        let (bg, fg) = tile_colors(value);
        let mut style = CellStyle::new(fg, bg);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);

        if state.was_merged(pos) {
            style = style.bold();
        }
        let mut digits = [0u8; 10];
        fb.put_str_centered(x, mid, self.cell_w, format_u32(value, &mut digits), style);

        if state.is_new_tile(pos) {
            fb.put_char(x, y, '+', CellStyle::new(fg, bg).bold());
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╭', style);
        fb.put_char(x + w - 1, y, '╮', style);
        fb.put_char(x, y + h - 1, '╰', style);
        fb.put_char(x + w - 1, y + h - 1, '╯', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &SessionState,
        hud: &HudView<'_>,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = start_y;
        for (name, v) in [
            ("SCORE", state.score),
            ("BEST", state.best_score),
            ("MOVES", state.move_count),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "PLAYER", label);
        fb.put_str(panel_x, y + 1, hud.player.unwrap_or("guest"), value);
        y = y.saturating_add(3);

        if state.has_won && !state.is_over {
            let won = CellStyle::new(Rgb::new(237, 194, 46), Rgb::new(0, 0, 0)).bold();
            fb.put_str(panel_x, y, "2048! keep going", won);
            y = y.saturating_add(2);
        }

        if let Some(message) = hud.message {
            fb.put_str(panel_x, y, message, value.bold());
            y = y.saturating_add(2);
        }

        for help in ["arrows/wasd move", "r  new game", "q  quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let padded_w = text.chars().count() as u16 + 4;
        let x = start_x.saturating_add(frame_w.saturating_sub(padded_w) / 2);
        fb.fill_rect(x, mid_y, padded_w, 1, ' ', style);
        fb.put_str_centered(x, mid_y, padded_w, text, style);
    }
}

/// Background and text color for a tile value.
fn tile_colors(value: u32) -> (Rgb, Rgb) {
    match value {
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(60, 58, 50), LIGHT_TEXT),
    }
}

fn format_u32(value: u32, buf: &mut [u8; 10]) -> &str {
    let mut n = value;
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    // Only ASCII digits were written.
    std::str::from_utf8(&buf[i..]).unwrap_or("?")
}
