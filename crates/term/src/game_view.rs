//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Palette};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

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

const BLOCK: char = '█';
const LANDING: char = '░';
const PREVIEW_LEN: usize = 5;

const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

/// Terminal layout for one session view.
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
    margin: Rgb,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a terminal glyph.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            margin: Palette::default().margin,
        }
    }

    /// Take the margin row color from the engine palette.
    pub fn with_palette(mut self, palette: &Palette) -> Self {
        self.margin = palette.margin;
        self
    }

    /// Terminal size of the bordered board for a snapshot.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.width as u16 * self.cell_w + 2,
            snap.height as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.draw_box(origin_x, origin_y, frame_w, frame_h, BORDER);
        self.draw_grid(fb, snap, origin_x, origin_y);
        self.draw_side_panel(fb, snap, viewport, origin_x + frame_w + 2, origin_y);

        if snap.game_over {
            let text = "TOP OUT";
            let x = origin_x + frame_w.saturating_sub(text.len() as u16) / 2;
            fb.put_str(x, origin_y + frame_h / 2, text, OVERLAY);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, origin_x: u16, origin_y: u16) {
        for row in 0..snap.height as i8 {
            let margin = snap.is_margin_row(row as usize);
            for col in 0..snap.width as i8 {
                let Some(cell) = snap.cell(row, col) else {
                    continue;
                };
                let (ch, style) = if cell.occupied {
                    (BLOCK, CellStyle::new(cell.color, cell.color))
                } else if margin {
                    (' ', CellStyle::new(self.margin, self.margin))
                } else {
                    ('·', CellStyle::new(Rgb::new(90, 90, 100), cell.color).dim())
                };
                self.fill_cell(fb, origin_x, origin_y, row, col, ch, style);
            }
        }

        let (Some(active), Some(landing)) = (snap.active, snap.landing) else {
            return;
        };
        let Some(color) = snap
            .cell(active.cells[0].0, active.cells[0].1)
            .map(|c| c.color)
        else {
            return;
        };
        for (row, col) in landing {
            if let Some(cell) = snap.cell(row, col).filter(|c| !c.occupied) {
                let style = CellStyle::new(color, cell.color).dim();
                self.fill_cell(fb, origin_x, origin_y, row, col, LANDING, style);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        row: i8,
        col: i8,
        ch: char,
        style: CellStyle,
    ) {
        let x = origin_x + 1 + col as u16 * self.cell_w;
        let y = origin_y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        mut y: u16,
    ) {
        if x.saturating_add(8) > viewport.width {
            return;
        }

        fb.put_str(x, y, "LINES", LABEL);
        fb.put_u32(x, y + 1, snap.lines, VALUE);
        y += 3;

        fb.put_str(x, y, "NEXT", LABEL);
        y += 1;
        for shape in snap.preview.iter().take(PREVIEW_LEN) {
            if y >= viewport.height {
                return;
            }
            fb.put_str(x, y, shape.as_str(), VALUE);
            y += 1;
        }
    }
}
