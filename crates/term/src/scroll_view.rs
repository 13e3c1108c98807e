//! ScrollView: presents a toroidal tile buffer in a terminal framebuffer.
//!
//! This plays the part of the display hardware: it never looks at the map or the camera, only
//! at the buffer contents and the scroll offset the viewport last set. If the viewport's
//! bookkeeping were wrong, stale tiles would show up here.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::levels::{BRICK, CLOUD, COIN, GRASS, GROUND, MARKER, SKY, STONE, WATER};
use crate::core::{TileBuffer, ViewportConfig};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ScrollMode, TileId};

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub width: u16,
    pub height: u16,
}

impl TermSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The visible screen, read through the scroll offset.
    #[default]
    Screen,
    /// The whole buffer, with the visible window highlighted.
    Buffer,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Screen => ViewMode::Buffer,
            ViewMode::Buffer => ViewMode::Screen,
        }
    }
}

/// Driver-side numbers shown on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollStatus {
    pub mode: ScrollMode,
    pub camera: (i32, i32),
    /// Strips repainted by the most recent refresh.
    pub strips: u8,
    /// Cells repainted by the most recent refresh.
    pub cells: u32,
    /// Cells painted since start-up.
    pub total_paints: u64,
}

const FRAME_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal renderer for a scrolling tile layer.
pub struct ScrollView {
    /// Terminal columns per tile.
    cell_w: u16,
    config: ViewportConfig,
    mode: ViewMode,
}

impl ScrollView {
    pub fn new(config: ViewportConfig) -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            config,
            mode: ViewMode::Screen,
        }
    }

    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn toggle_view_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer across frames
    /// and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        vram: &TileBuffer,
        status: &ScrollStatus,
        size: TermSize,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(size.width, size.height);
        fb.clear(CellStyle::default().cell(' '));

        let (tiles_w, tiles_h) = match self.mode {
            ViewMode::Screen => (
                self.config.horizontal.screen_tiles,
                self.config.vertical.screen_tiles,
            ),
            ViewMode::Buffer => (vram.width(), vram.height()),
        };
        let frame_w = tiles_w * self.cell_w + 2;
        let frame_h = tiles_h + 2;
        let start_x = size.width.saturating_sub(frame_w) / 2;
        let start_y = 0;

        let border = CellStyle::new(Rgb::new(200, 200, 200), FRAME_BG);
        fb.draw_border(start_x, start_y, frame_w, frame_h, border);

        match self.mode {
            ViewMode::Screen => self.draw_screen(vram, fb, start_x + 1, start_y + 1),
            ViewMode::Buffer => self.draw_buffer(vram, fb, start_x + 1, start_y + 1),
        }

        self.draw_status(vram, status, fb, start_x, start_y + frame_h);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, vram: &TileBuffer, status: &ScrollStatus, size: TermSize) -> FrameBuffer {
        let mut fb = FrameBuffer::new(size.width, size.height);
        self.render_into(vram, status, size, &mut fb);
        fb
    }

    /// Tile origin of the visible screen in buffer coordinates.
    fn screen_origin(&self, vram: &TileBuffer) -> (i32, i32) {
        let (sx, sy) = vram.scroll_offset();
        (
            i32::from(sx / self.config.horizontal.tile_size),
            i32::from(sy / self.config.vertical.tile_size),
        )
    }

    fn draw_screen(&self, vram: &TileBuffer, fb: &mut FrameBuffer, x0: u16, y0: u16) {
        let (ox, oy) = self.screen_origin(vram);
        for ty in 0..self.config.vertical.screen_tiles {
            for tx in 0..self.config.horizontal.screen_tiles {
                let tile = vram.get_wrapped(ox + i32::from(tx), oy + i32::from(ty));
                let (ch, style) = tile_glyph(tile);
                fb.fill_rect(x0 + tx * self.cell_w, y0 + ty, self.cell_w, 1, ch, style);
            }
        }
    }

    fn draw_buffer(&self, vram: &TileBuffer, fb: &mut FrameBuffer, x0: u16, y0: u16) {
        let (ox, oy) = self.screen_origin(vram);
        let (bw, bh) = (i32::from(vram.width()), i32::from(vram.height()));
        let screen_w = i32::from(self.config.horizontal.screen_tiles);
        let screen_h = i32::from(self.config.vertical.screen_tiles);

        for by in 0..vram.height() {
            let in_rows = (i32::from(by) - oy).rem_euclid(bh) < screen_h;
            for bx in 0..vram.width() {
                let in_cols = (i32::from(bx) - ox).rem_euclid(bw) < screen_w;
                let (ch, mut style) = tile_glyph(vram.get(bx, by));
                if !(in_rows && in_cols) {
                    style = style.dim();
                }
                fb.fill_rect(x0 + bx * self.cell_w, y0 + by, self.cell_w, 1, ch, style);
            }
        }
    }

    fn draw_status(
        &self,
        vram: &TileBuffer,
        status: &ScrollStatus,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
    ) {
        let text_style = CellStyle::new(Rgb::new(220, 220, 220), FRAME_BG);
        let key_style = CellStyle::new(Rgb::new(120, 120, 140), FRAME_BG);

        let (sx, sy) = vram.scroll_offset();
        let mut line = LineWriter::new(fb, x, y, text_style);
        line.push_str(status.mode.as_str());
        line.push_str("  cam ");
        line.push_i64(i64::from(status.camera.0));
        line.push_str(",");
        line.push_i64(i64::from(status.camera.1));
        line.push_str("  tile ");
        line.push_i64(i64::from(status.camera.0 / i32::from(self.config.horizontal.tile_size)));
        line.push_str(",");
        line.push_i64(i64::from(status.camera.1 / i32::from(self.config.vertical.tile_size)));
        line.push_str("  scroll ");
        line.push_i64(i64::from(sx));
        line.push_str(",");
        line.push_i64(i64::from(sy));
        line.push_str("  strips ");
        line.push_i64(i64::from(status.strips));
        line.push_str("  cells ");
        line.push_i64(i64::from(status.cells));
        line.push_str("  total ");
        line.push_i64(status.total_paints as i64);

        let mode_hint = match self.mode {
            ViewMode::Screen => "[v] buffer  [r] home  [q] quit",
            ViewMode::Buffer => "[v] screen  [r] home  [q] quit",
        };
        fb.put_str(x, y.saturating_add(1), mode_hint, key_style);
    }
}

/// Writes text left to right without allocating.
struct LineWriter<'a> {
    fb: &'a mut FrameBuffer,
    x: u16,
    y: u16,
    style: CellStyle,
}

impl<'a> LineWriter<'a> {
    fn new(fb: &'a mut FrameBuffer, x: u16, y: u16, style: CellStyle) -> Self {
        Self { fb, x, y, style }
    }

    fn push_char(&mut self, ch: char) {
        self.fb.put_char(self.x, self.y, ch, self.style);
        self.x = self.x.saturating_add(1);
    }

    fn push_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.push_char(ch);
        }
    }

    fn push_i64(&mut self, v: i64) {
        if v < 0 {
            self.push_char('-');
        }
        let mut digits = [0u8; 20];
        let mut n = v.unsigned_abs();
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for &d in digits[..len].iter().rev() {
            self.push_char(d as char);
        }
    }
}

/// Glyph and style for a buffer cell; `None` is a never-painted cell.
pub fn tile_glyph(tile: Option<TileId>) -> (char, CellStyle) {
    let sky = Rgb::new(40, 70, 140);
    match tile {
        None => ('·', CellStyle::new(Rgb::new(70, 70, 80), Rgb::new(10, 10, 14))),
        Some(SKY) => (' ', CellStyle::new(sky, sky)),
        Some(GROUND) => ('█', CellStyle::new(Rgb::new(120, 80, 40), sky)),
        Some(BRICK) => ('▓', CellStyle::new(Rgb::new(180, 80, 50), Rgb::new(90, 40, 20))),
        Some(GRASS) => ('▒', CellStyle::new(Rgb::new(90, 200, 90), Rgb::new(30, 90, 30))),
        Some(WATER) => ('~', CellStyle::new(Rgb::new(150, 210, 255), Rgb::new(20, 60, 160))),
        Some(COIN) => ('o', CellStyle::new(Rgb::new(250, 210, 60), sky).bold()),
        Some(CLOUD) => ('░', CellStyle::new(Rgb::new(240, 240, 250), sky)),
        Some(STONE) => ('█', CellStyle::new(Rgb::new(130, 130, 140), Rgb::new(60, 60, 70))),
        Some(MARKER) => (
            '+',
            CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(160, 30, 120)).bold(),
        ),
        Some(other) => {
            let ch = char::from_digit(u32::from(other % 16), 16).unwrap_or('?');
            (ch, CellStyle::new(Rgb::new(230, 120, 230), Rgb::new(30, 30, 40)))
        }
    }
}
