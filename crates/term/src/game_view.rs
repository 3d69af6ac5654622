//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! The 3D field is drawn as one panel per depth slice, laid out left to right
//! from z = 0 to the back of the field. Inside a panel x runs to the right and
//! y runs upward, so the floor is the bottom row.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, NextSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, PieceKind};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the slice panels land for a given field and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of the first panel's border.
    pub origin_x: u16,
    pub origin_y: u16,
    /// Panel size including its border.
    pub panel_w: u16,
    pub panel_h: u16,
    /// Columns between neighbouring panels.
    pub gap: u16,
    pub slices: u16,
    cell_w: u16,
    cell_h: u16,
    field_h: u16,
}

impl Layout {
    /// Full width of all slice panels.
    pub fn total_w(&self) -> u16 {
        self.slices * self.panel_w + self.slices.saturating_sub(1) * self.gap
    }

    /// Terminal position of the top-left glyph of field cell `(x, y, z)`.
    pub fn cell_origin(&self, x: u16, y: u16, z: u16) -> Option<(u16, u16)> {
        let cols = (self.panel_w - 2) / self.cell_w;
        if x >= cols || y >= self.field_h || z >= self.slices {
            return None;
        }
        let px = self.origin_x + z * (self.panel_w + self.gap) + 1 + x * self.cell_w;
        let py = self.origin_y + 1 + (self.field_h - 1 - y) * self.cell_h;
        Some((px, py))
    }
}

/// A lightweight terminal renderer for the 3D field.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    gap: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            gap: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let panel_w = snap.width as u16 * self.cell_w + 2;
        let panel_h = snap.height as u16 * self.cell_h + 2;
        let slices = snap.depth as u16;
        let total_w = slices * panel_w + slices.saturating_sub(1) * self.gap;
        // One label row sits above the panels.
        let total_h = panel_h + 1;

        let origin_x = viewport.width.saturating_sub(total_w + SIDE_PANEL_W) / 2;
        let top = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };

        Layout {
            origin_x,
            origin_y: top + 1,
            panel_w,
            panel_h,
            gap: self.gap,
            slices,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            field_h: snap.height as u16,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, viewport);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        let label = CellStyle {
            dim: true,
            ..border
        };

        for z in 0..layout.slices {
            let px = layout.origin_x + z * (layout.panel_w + layout.gap);
            fb.fill_rect(
                px + 1,
                layout.origin_y + 1,
                layout.panel_w - 2,
                layout.panel_h - 2,
                ' ',
                CellStyle::plain(PLAY_BG, PLAY_BG),
            );
            fb.draw_box(px, layout.origin_y, layout.panel_w, layout.panel_h, border);
            if layout.origin_y > 0 {
                fb.put_char(px + 1, layout.origin_y - 1, 'z', label);
                fb.put_u32(px + 2, layout.origin_y - 1, z as u32, label);
            }
        }

        // Locked cells, shaded by height so layers are easy to tell apart.
        for z in 0..snap.depth as i32 {
            for y in 0..snap.height as i32 {
                for x in 0..snap.width as i32 {
                    let (ch, style) = if snap.cell(x, y, z) {
                        ('█', locked_style(y as usize, snap.height))
                    } else {
                        ('·', empty_style())
                    };
                    self.fill_cell(fb, &layout, x, y, z, ch, style);
                }
            }
        }

        if let Some(active) = snap.active.as_ref() {
            if snap.ghost_visible() {
                if let Some(ghost) = snap.ghost {
                    let ghost_style = CellStyle {
                        fg: Rgb::new(140, 140, 140),
                        bg: PLAY_BG,
                        bold: false,
                        dim: true,
                    };
                    for (x, y, z) in active.cells_at(ghost) {
                        self.fill_cell(fb, &layout, x, y, z, '░', ghost_style);
                    }
                }
            }

            let style = CellStyle {
                fg: piece_color(active.kind),
                bg: PLAY_BG,
                bold: true,
                dim: false,
            };
            for (x, y, z) in active.cells() {
                self.fill_cell(fb, &layout, x, y, z, '█', style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        match snap.phase {
            Phase::Waiting => self.draw_overlay_text(fb, &layout, 0, "PRESS ENTER"),
            Phase::GameOver => {
                self.draw_overlay_text(fb, &layout, 0, "GAME OVER");
                self.draw_overlay_score(fb, &layout, snap.score);
            }
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        x: i32,
        y: i32,
        z: i32,
        ch: char,
        style: CellStyle,
    ) {
        // Cells above the ceiling or outside the field are not drawn.
        if x < 0 || y < 0 || z < 0 {
            return;
        }
        if let Some((px, py)) = layout.cell_origin(x as u16, y as u16, z as u16) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout.origin_x + layout.total_w() + 2;
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), SCREEN_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        let dim = CellStyle { dim: true, ..value };

        let mut y = layout.origin_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("REN", snap.ren),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }
        if snap.back_to_back {
            fb.put_str(panel_x, y - 1, "B2B", label);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        match snap.next.as_ref() {
            Some(next) => {
                fb.put_str(panel_x, y, next.kind.as_str(), value);
                y += 1;
                y += draw_footprint(fb, panel_x, y, next);
            }
            None => {
                fb.put_char(panel_x, y, '-', value);
                y += 1;
            }
        }

        y += 1;
        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, row: u16, text: &str) {
        let mid_y = layout.origin_y + layout.panel_h / 2 + row;
        let text_w = text.chars().count() as u16;
        let x = layout.origin_x + layout.total_w().saturating_sub(text_w) / 2;
        fb.put_str(x, mid_y, text, overlay_style());
    }

    fn draw_overlay_score(&self, fb: &mut FrameBuffer, layout: &Layout, score: u32) {
        let digits = decimal_width(score);
        let text_w = 6 + digits;
        let x = layout.origin_x + layout.total_w().saturating_sub(text_w) / 2;
        let y = layout.origin_y + layout.panel_h / 2 + 1;
        fb.put_str(x, y, "SCORE ", overlay_style());
        fb.put_u32(x + 6, y, score, overlay_style());
    }
}

/// Columns reserved to the right of the slices.
const SIDE_PANEL_W: u16 = 14;

const CONTROLS: [&str; 7] = [
    "←→ x  ↑↓ z",
    "z/x rot Y",
    "a/s rot X",
    "q/w rot Z",
    "spc drop",
    "e   step",
    "r reset",
];

/// Top-down view of the next piece: `#` where any layer is filled.
fn draw_footprint(fb: &mut FrameBuffer, x: u16, y: u16, next: &NextSnapshot) -> u16 {
    let style = CellStyle::plain(piece_color(next.kind), SCREEN_BG);
    let shape = &next.shape;
    for lz in 0..shape.depth() {
        for lx in 0..shape.width() {
            let filled = (0..shape.height()).any(|ly| shape.get(ly, lz, lx));
            if filled {
                fb.put_char(x + lx as u16, y + lz as u16, '#', style);
            }
        }
    }
    shape.depth() as u16
}

fn decimal_width(mut n: u32) -> u16 {
    let mut w = 1;
    while n >= 10 {
        n /= 10;
        w += 1;
    }
    w
}

fn overlay_style() -> CellStyle {
    CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG)
    }
}

fn empty_style() -> CellStyle {
    CellStyle {
        dim: true,
        ..CellStyle::plain(Rgb::new(90, 90, 100), PLAY_BG)
    }
}

/// Locked blocks fade from bright at the floor toward the ceiling.
fn locked_style(y: usize, height: usize) -> CellStyle {
    let height = height.max(1) as u8;
    let level = height.saturating_sub(y as u8 / 2);
    CellStyle::plain(Rgb::new(170, 190, 230).scaled(level, height), PLAY_BG)
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::V => Rgb::new(230, 230, 230),
    }
}
