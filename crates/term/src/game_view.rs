//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::palette::Palette;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
/// Colour for an identifier the palette has not seen yet.
const UNKNOWN_FG: Rgb = Rgb::new(150, 150, 160);
/// Minimum free columns right of the board before the panel is drawn.
const PANEL_MIN_W: u16 = 10;

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

/// Board frame origin inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view of the board.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Total size of the board including its border.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    ///
    /// Callers keep one framebuffer across frames; nothing here allocates
    /// unless the viewport grows.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        palette: &Palette,
        paused: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(SCREEN_BG, SCREEN_BG).cell(' '));

        let (w, h) = self.frame_size();
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            w - 2,
            h - 2,
            ' ',
            CellStyle::new(PLAY_BG, PLAY_BG),
        );
        fb.draw_box(
            frame.x,
            frame.y,
            w,
            h,
            CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for (row, cells) in snap.board.iter().enumerate() {
            for (col, &id) in cells.iter().enumerate() {
                if id == EMPTY {
                    self.fill_cell(fb, frame, row as u16, col as u16, '·', empty);
                    continue;
                }
                let fg = palette.color_of(id).unwrap_or(UNKNOWN_FG);
                let mut style = CellStyle::new(fg, PLAY_BG);
                if snap.active_id == Some(id) {
                    style = style.bold();
                }
                self.fill_cell(fb, frame, row as u16, col as u16, '█', style);
            }
        }

        self.draw_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_banner(fb, frame, "GAME OVER");
        } else if paused {
            self.draw_banner(fb, frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        palette: &Palette,
        paused: bool,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, palette, paused, viewport, &mut fb);
        fb
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, row: u16, col: u16, ch: char, style: CellStyle) {
        let x = frame.x + 1 + col * self.cell_w;
        let y = frame.y + 1 + row * self.cell_h;
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x >= viewport.width || viewport.width - x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(x, y, "SPEED", label);
        let end = fb.put_u32(x, y.saturating_add(1), snap.speed, value);
        fb.put_str(end + 1, y.saturating_add(1), "ticks", value.dim());
        y = y.saturating_add(3);

        if snap.cascade_pending > 0 {
            let end = fb.put_str(x, y, "CLEAR ", label);
            fb.put_u32(end, y, snap.cascade_pending, value);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let y = frame.y.saturating_add(frame.h / 2);
        fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold());
    }
}
