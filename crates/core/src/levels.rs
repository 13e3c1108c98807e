//! Built-in demo levels, one per scroll mode.
//!
//! Levels are generated deterministically and emitted in the map source format
//! (`[width, height, tiles...]`), then parsed back through [`TileMap::from_bytes`] exactly as
//! a level baked into program memory would be.

use crate::error::ConfigError;
use crate::rng::SimpleRng;
use crate::tilemap::TileMap;
use crate::types::{ScrollMode, TileId, SCREEN_TILES_H, SCREEN_TILES_V};

pub const SKY: TileId = 0;
pub const GROUND: TileId = 1;
pub const BRICK: TileId = 2;
pub const GRASS: TileId = 3;
pub const WATER: TileId = 4;
pub const COIN: TileId = 5;
pub const CLOUD: TileId = 6;
pub const STONE: TileId = 7;
/// Distance marker placed at regular intervals so scrolling is easy to follow.
pub const MARKER: TileId = 8;

/// Number of distinct tile identifiers used by the demo levels.
pub const TILE_KINDS: u8 = 9;

const LEVEL_SEED: u32 = 0x5eed;

/// Row-major tile canvas used while generating a level.
struct Canvas {
    width: u8,
    height: u8,
    tiles: Vec<TileId>,
}

impl Canvas {
    fn new(width: u8, height: u8, fill: TileId) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width as usize * height as usize],
        }
    }

    fn set(&mut self, x: i32, y: i32, tile: TileId) {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return;
        }
        self.tiles[y as usize * self.width as usize + x as usize] = tile;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, tile: TileId) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, tile);
            }
        }
    }

    fn into_source(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.tiles.len());
        out.push(self.width);
        out.push(self.height);
        out.extend_from_slice(&self.tiles);
        out
    }
}

/// Source bytes of the demo level for `mode`.
pub fn level_source(mode: ScrollMode) -> Vec<u8> {
    match mode {
        ScrollMode::Horizontal => horizontal_level(),
        ScrollMode::Vertical => vertical_level(),
        ScrollMode::Both => open_level(),
    }
}

/// Parse the demo level for `mode`.
pub fn load(mode: ScrollMode) -> Result<TileMap, ConfigError> {
    TileMap::from_bytes(&level_source(mode))
}

/// Side-scroller: 120 columns of rolling hills, platforms and water gaps, one screen tall.
fn horizontal_level() -> Vec<u8> {
    let height = SCREEN_TILES_V as u8;
    let mut c = Canvas::new(120, height, SKY);
    let mut rng = SimpleRng::new(LEVEL_SEED);
    let h = i32::from(height);

    let mut ground = h - 5;
    let mut x = 0;
    while x < i32::from(c.width) {
        let run = rng.next_between(3, 7);
        let gap = x > 8 && rng.chance(15);
        for dx in 0..run {
            let col = x + dx;
            if gap {
                c.fill_rect(col, h - 2, 1, 2, WATER);
            } else {
                c.set(col, ground, GRASS);
                c.fill_rect(col, ground + 1, 1, h - ground - 1, GROUND);
            }
        }
        if !gap && rng.chance(40) {
            let py = ground - rng.next_between(4, 6);
            c.fill_rect(x, py, run, 1, BRICK);
            c.fill_rect(x, py - 1, run, 1, COIN);
        }
        ground = (ground + rng.next_between(-1, 1)).clamp(h - 8, h - 3);
        x += run;
    }

    for _ in 0..18 {
        let cx = rng.next_between(0, i32::from(c.width) - 4);
        let cy = rng.next_between(1, 7);
        c.fill_rect(cx, cy, rng.next_between(2, 4), 1, CLOUD);
    }
    for mx in (0..i32::from(c.width)).step_by(10) {
        c.set(mx, 0, MARKER);
    }

    c.into_source()
}

/// Vertical shaft: 120 rows between stone walls, one screen wide.
fn vertical_level() -> Vec<u8> {
    let width = SCREEN_TILES_H as u8;
    let mut c = Canvas::new(width, 120, SKY);
    let mut rng = SimpleRng::new(LEVEL_SEED ^ 0xffff);
    let w = i32::from(width);
    let h = i32::from(c.height);

    c.fill_rect(0, 0, 2, h, STONE);
    c.fill_rect(w - 2, 0, 2, h, STONE);

    let mut y = 4;
    while y < h - 4 {
        let len = rng.next_between(5, 12);
        let from_left = rng.chance(50);
        let px = if from_left { 2 } else { w - 2 - len };
        c.fill_rect(px, y, len, 1, BRICK);
        if rng.chance(50) {
            c.fill_rect(px + 1, y - 1, len - 2, 1, COIN);
        }
        y += rng.next_between(4, 7);
    }

    c.fill_rect(2, h - 3, w - 4, 3, WATER);
    for my in (0..h).step_by(10) {
        c.set(0, my, MARKER);
    }

    c.into_source()
}

/// Free-roaming overworld: 96x96 tiles of fields, lakes and walled rooms.
fn open_level() -> Vec<u8> {
    let mut c = Canvas::new(96, 96, GRASS);
    let mut rng = SimpleRng::new(LEVEL_SEED.rotate_left(7));
    let size = 96;

    for _ in 0..10 {
        let lx = rng.next_between(0, size - 10);
        let ly = rng.next_between(0, size - 8);
        let lw = rng.next_between(4, 10);
        let lh = rng.next_between(3, 7);
        c.fill_rect(lx, ly, lw, lh, WATER);
    }

    // Rooms on a 12-tile grid with doorways in the middle of each wall.
    for gy in (0..size).step_by(12) {
        for gx in (0..size).step_by(12) {
            if !rng.chance(45) {
                continue;
            }
            c.fill_rect(gx + 1, gy + 1, 10, 10, GROUND);
            c.fill_rect(gx + 1, gy + 1, 10, 1, STONE);
            c.fill_rect(gx + 1, gy + 10, 10, 1, STONE);
            c.fill_rect(gx + 1, gy + 1, 1, 10, STONE);
            c.fill_rect(gx + 10, gy + 1, 1, 10, STONE);
            c.set(gx + 5, gy + 1, GROUND);
            c.set(gx + 5, gy + 10, GROUND);
            c.set(gx + 1, gy + 5, GROUND);
            c.set(gx + 10, gy + 5, GROUND);
            c.set(gx + 5, gy + 5, COIN);
        }
    }

    for gy in (0..size).step_by(12) {
        for gx in (0..size).step_by(12) {
            c.set(gx, gy, MARKER);
        }
    }

    c.into_source()
}
