//! Viewport module - clamped camera plus incremental toroidal refresh
//!
//! The viewport keeps a fixed-size buffer consistent with a camera moving over a larger
//! [`TileMap`]. World tile `w` along an axis lives in buffer slot `w mod buffer_tiles`, so
//! scrolling by one tile only needs the single strip entering the resident window to be
//! repainted; every other slot already holds the right world tile.
//!
//! Along a scrolled axis with camera tile `ct`, the resident window is
//! `[ct - TRAILING_MARGIN, ct - TRAILING_MARGIN + buffer_tiles)`: two tiles behind the camera
//! and the rest ahead of it. Along a fixed axis it is simply the screen, `[0, screen_tiles)`.
//!
//! Per frame the driver calls [`Viewport::move_to`] (or [`Viewport::move_by`]) and then
//! [`Viewport::refresh`]. Refresh compares the new raw scroll offset with the previous one; if
//! the tile bits differ the camera crossed exactly one tile boundary and one strip is
//! repainted for that axis. Moving faster than one tile per refresh is a caller bug and panics.

use std::ops::Range;

use arrayvec::ArrayVec;

use crate::display::TileDisplay;
use crate::error::ConfigError;
use crate::tilemap::TileMap;
use crate::types::{
    Axis, ScrollDirection, ScrollMode, TileId, SCREEN_TILES_H, SCREEN_TILES_V, TILE_HEIGHT,
    TILE_WIDTH, TRAILING_MARGIN, VRAM_TILES_H, VRAM_TILES_V,
};

/// Buffer, screen and tile dimensions along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisGeometry {
    /// Buffer capacity in tiles (addressing wraps modulo this).
    pub buffer_tiles: u16,
    /// Visible screen span in tiles.
    pub screen_tiles: u16,
    /// Tile size in pixels; must be a power of two.
    pub tile_size: u16,
}

impl AxisGeometry {
    pub const fn new(buffer_tiles: u16, screen_tiles: u16, tile_size: u16) -> Self {
        Self {
            buffer_tiles,
            screen_tiles,
            tile_size,
        }
    }

    /// Buffer span in pixels; the raw scroll offset wraps at this value.
    pub fn span(&self) -> i32 {
        i32::from(self.buffer_tiles) * i32::from(self.tile_size)
    }

    fn validate(&self, axis: Axis, scrolled: bool, map_len: u16) -> Result<(), ConfigError> {
        if !self.tile_size.is_power_of_two() {
            return Err(ConfigError::TileSizeNotPowerOfTwo {
                axis,
                size: self.tile_size,
            });
        }
        if self.screen_tiles == 0 {
            return Err(ConfigError::EmptyScreen { axis });
        }

        // A scrolled axis also needs the trailing margin and the partially exposed tile.
        let required = if scrolled {
            self.screen_tiles.saturating_add(TRAILING_MARGIN + 1)
        } else {
            self.screen_tiles
        };
        if self.buffer_tiles < required {
            return Err(ConfigError::BufferTooSmall {
                axis,
                buffer: self.buffer_tiles,
                screen: self.screen_tiles,
                required,
            });
        }
        if self.span() > i32::from(u16::MAX) + 1 {
            return Err(ConfigError::OffsetSpanOverflow {
                axis,
                buffer: self.buffer_tiles,
                tile_size: self.tile_size,
            });
        }
        if scrolled && map_len < self.screen_tiles {
            return Err(ConfigError::MapSmallerThanScreen {
                axis,
                map: map_len,
                screen: self.screen_tiles,
            });
        }
        Ok(())
    }
}

/// Scroll mode plus per-axis geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    pub mode: ScrollMode,
    pub horizontal: AxisGeometry,
    pub vertical: AxisGeometry,
}

impl ViewportConfig {
    /// Default 32x32 buffer, 28x28 screen, 8x8 tiles.
    pub fn new(mode: ScrollMode) -> Self {
        Self {
            mode,
            horizontal: AxisGeometry::new(VRAM_TILES_H, SCREEN_TILES_H, TILE_WIDTH),
            vertical: AxisGeometry::new(VRAM_TILES_V, SCREEN_TILES_V, TILE_HEIGHT),
        }
    }

    pub fn with_horizontal(mut self, geometry: AxisGeometry) -> Self {
        self.horizontal = geometry;
        self
    }

    pub fn with_vertical(mut self, geometry: AxisGeometry) -> Self {
        self.vertical = geometry;
        self
    }

    pub fn axis(&self, axis: Axis) -> &AxisGeometry {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(ScrollMode::Both)
    }
}

/// One strip repainted by [`Viewport::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintedStrip {
    /// Axis whose tile boundary was crossed (a column for horizontal, a row for vertical).
    pub axis: Axis,
    pub direction: ScrollDirection,
    /// World column/row that was painted.
    pub world: i32,
    /// Buffer column/row it landed in.
    pub buffer: u16,
    /// Cells written (zero when the strip lies outside the map).
    pub cells: u16,
}

/// What a refresh repainted; empty when no tile boundary was crossed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    strips: ArrayVec<PaintedStrip, 2>,
}

impl RefreshReport {
    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    pub fn strips(&self) -> &[PaintedStrip] {
        &self.strips
    }

    /// Total number of cells written.
    pub fn cells_painted(&self) -> u32 {
        self.strips.iter().map(|s| u32::from(s.cells)).sum()
    }

    /// The strip painted for `axis`, if that axis crossed a boundary.
    pub fn strip(&self, axis: Axis) -> Option<&PaintedStrip> {
        self.strips.iter().find(|s| s.axis == axis)
    }
}

/// Camera and scroll bookkeeping for one axis.
#[derive(Debug, Clone, Copy)]
struct AxisScroll {
    geometry: AxisGeometry,
    scrolled: bool,
    map_len: u16,
    /// Camera position in pixels.
    camera: i32,
    /// Raw scroll offset applied by the previous refresh or fill.
    last_offset: u16,
    /// Camera tile at the previous refresh or fill.
    last_tile: i32,
}

impl AxisScroll {
    fn max_camera(&self) -> i32 {
        if !self.scrolled {
            return 0;
        }
        (i32::from(self.map_len) - i32::from(self.geometry.screen_tiles))
            * i32::from(self.geometry.tile_size)
    }

    fn clamp(&self, target: i32) -> i32 {
        target.clamp(0, self.max_camera())
    }

    fn camera_tile(&self) -> i32 {
        self.camera / i32::from(self.geometry.tile_size)
    }

    fn raw_offset(&self) -> u16 {
        self.camera.rem_euclid(self.geometry.span()) as u16
    }

    /// World tiles currently resident in the buffer.
    fn window(&self) -> Range<i32> {
        if self.scrolled {
            let start = self.camera_tile() - i32::from(TRAILING_MARGIN);
            start..start + i32::from(self.geometry.buffer_tiles)
        } else {
            0..i32::from(self.geometry.screen_tiles)
        }
    }

    /// Resident window clipped to the map.
    fn paint_window(&self) -> Range<i32> {
        let window = self.window();
        window.start.max(0)..window.end.min(i32::from(self.map_len))
    }

    #[inline(always)]
    fn to_buffer(&self, world: i32) -> u16 {
        world.rem_euclid(i32::from(self.geometry.buffer_tiles)) as u16
    }

    fn to_world(&self, buffer: u16) -> Option<i32> {
        let window = self.window();
        let len = i32::from(self.geometry.buffer_tiles);
        let world = window.start + (i32::from(buffer) - window.start).rem_euclid(len);
        (window.contains(&world) && (0..i32::from(self.map_len)).contains(&world)).then_some(world)
    }

    /// Panics if the camera tile moved more than one step since the previous refresh or fill.
    ///
    /// Raw offsets wrap every buffer span, so the check uses world tiles.
    fn assert_single_step(&self, axis: Axis) {
        let steps = (self.camera_tile() - self.last_tile).abs();
        assert!(
            steps <= 1,
            "{} camera moved {steps} tiles; at most one tile per refresh is supported",
            axis.as_str()
        );
    }

    /// Detect a tile-boundary crossing between two raw offsets at most one tile apart.
    fn crossing(&self, prev: u16, next: u16) -> Option<ScrollDirection> {
        let mask = !(self.geometry.tile_size - 1);
        if prev & mask == next & mask {
            return None;
        }

        let span = self.geometry.span();
        let (prev, next) = (i32::from(prev), i32::from(next));
        if (next - prev).rem_euclid(span) < (prev - next).rem_euclid(span) {
            Some(ScrollDirection::Forward)
        } else {
            Some(ScrollDirection::Backward)
        }
    }

    /// World strip exposed by a crossing in `direction`.
    fn exposed_strip(&self, direction: ScrollDirection) -> i32 {
        let window = self.window();
        match direction {
            ScrollDirection::Forward => window.end - 1,
            ScrollDirection::Backward => window.start,
        }
    }
}

/// A scrolling view over one [`TileMap`] that drives a toroidal [`TileDisplay`].
#[derive(Debug, Clone)]
pub struct Viewport<'a> {
    map: &'a TileMap,
    config: ViewportConfig,
    horizontal: AxisScroll,
    vertical: AxisScroll,
}

impl<'a> Viewport<'a> {
    /// Validate `config` against `map` and place the camera at the origin.
    ///
    /// Nothing is painted; call [`Viewport::fill`] (or use [`Viewport::init`]) before the
    /// first refresh.
    pub fn new(map: &'a TileMap, config: ViewportConfig) -> Result<Self, ConfigError> {
        let axis_scroll = |axis: Axis| -> Result<AxisScroll, ConfigError> {
            let geometry = *config.axis(axis);
            let scrolled = config.mode.scrolls(axis);
            let map_len = map.len_along(axis);
            geometry.validate(axis, scrolled, map_len)?;
            Ok(AxisScroll {
                geometry,
                scrolled,
                map_len,
                camera: 0,
                last_offset: 0,
                last_tile: 0,
            })
        };

        Ok(Self {
            map,
            config,
            horizontal: axis_scroll(Axis::Horizontal)?,
            vertical: axis_scroll(Axis::Vertical)?,
        })
    }

    /// Build a viewport at the origin and fill `display` completely.
    pub fn init(
        map: &'a TileMap,
        config: ViewportConfig,
        display: &mut impl TileDisplay,
    ) -> Result<Self, ConfigError> {
        let mut viewport = Self::new(map, config)?;
        let cells = viewport.fill(display);
        tracing::info!(
            mode = config.mode.as_str(),
            map_width = map.width(),
            map_height = map.height(),
            cells,
            "viewport initialised"
        );
        Ok(viewport)
    }

    pub fn map(&self) -> &'a TileMap {
        self.map
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn mode(&self) -> ScrollMode {
        self.config.mode
    }

    fn axis(&self, axis: Axis) -> &AxisScroll {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// Camera position in pixels.
    pub fn camera(&self) -> (i32, i32) {
        (self.horizontal.camera, self.vertical.camera)
    }

    /// Camera position in whole tiles.
    pub fn camera_tile(&self) -> (i32, i32) {
        (self.horizontal.camera_tile(), self.vertical.camera_tile())
    }

    /// Largest camera position on each axis.
    pub fn max_camera(&self) -> (i32, i32) {
        (self.horizontal.max_camera(), self.vertical.max_camera())
    }

    /// Raw scroll offset recorded by the last refresh or fill.
    pub fn last_offset(&self) -> (u16, u16) {
        (self.horizontal.last_offset, self.vertical.last_offset)
    }

    /// World tiles resident in the buffer along `axis` (unclipped).
    pub fn resident_window(&self, axis: Axis) -> Range<i32> {
        self.axis(axis).window()
    }

    /// Move the camera, clamping each axis to the map.
    ///
    /// Fixed axes stay at 0.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.horizontal.camera = self.horizontal.clamp(x);
        self.vertical.camera = self.vertical.clamp(y);
    }

    /// Move the camera by a delta, clamping each axis to the map.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.camera();
        self.move_to(x.saturating_add(dx), y.saturating_add(dy));
    }

    /// Paint every resident cell from the current camera and record the scroll offset.
    ///
    /// Returns the number of cells painted.
    pub fn fill(&mut self, display: &mut impl TileDisplay) -> u32 {
        let mut cells = 0u32;
        for x in self.horizontal.paint_window() {
            cells += u32::from(self.paint_strip(Axis::Horizontal, x, display));
        }

        self.horizontal.last_offset = self.horizontal.raw_offset();
        self.vertical.last_offset = self.vertical.raw_offset();
        self.horizontal.last_tile = self.horizontal.camera_tile();
        self.vertical.last_tile = self.vertical.camera_tile();
        display.set_scroll_offset(self.horizontal.last_offset, self.vertical.last_offset);

        tracing::debug!(camera = ?self.camera(), cells, "full buffer fill");
        cells
    }

    /// Teleport the camera (clamped) and refill the whole buffer.
    ///
    /// This is the supported way to move by more than one tile at once.
    pub fn jump_to(&mut self, x: i32, y: i32, display: &mut impl TileDisplay) -> u32 {
        self.move_to(x, y);
        self.fill(display)
    }

    /// Apply the current camera position to `display`.
    ///
    /// Sets the scroll offset and repaints the strip exposed on each axis whose tile boundary
    /// was crossed since the previous call. A second call without an intervening move paints
    /// nothing.
    ///
    /// # Panics
    ///
    /// Panics if the camera moved more than one tile on an axis since the previous refresh or
    /// fill.
    pub fn refresh(&mut self, display: &mut impl TileDisplay) -> RefreshReport {
        self.horizontal.assert_single_step(Axis::Horizontal);
        self.vertical.assert_single_step(Axis::Vertical);

        let next_x = self.horizontal.raw_offset();
        let next_y = self.vertical.raw_offset();
        display.set_scroll_offset(next_x, next_y);

        let mut report = RefreshReport::default();
        for (axis, next) in [(Axis::Horizontal, next_x), (Axis::Vertical, next_y)] {
            let scroll = self.axis(axis);
            if !scroll.scrolled {
                continue;
            }
            let Some(direction) = scroll.crossing(scroll.last_offset, next) else {
                continue;
            };

            let world = scroll.exposed_strip(direction);
            let cells = self.paint_strip(axis, world, display);
            tracing::trace!(
                axis = axis.as_str(),
                ?direction,
                world,
                cells,
                "repainted exposed strip"
            );
            report.strips.push(PaintedStrip {
                axis,
                direction,
                world,
                buffer: scroll.to_buffer(world),
                cells,
            });
        }

        self.horizontal.last_offset = next_x;
        self.vertical.last_offset = next_y;
        self.horizontal.last_tile = self.horizontal.camera_tile();
        self.vertical.last_tile = self.vertical.camera_tile();
        report
    }

    /// Paint one world column (`axis` = horizontal) or row (`axis` = vertical) across the
    /// resident window of the orthogonal axis.
    ///
    /// Strips outside the map paint nothing.
    fn paint_strip(&self, axis: Axis, world: i32, display: &mut impl TileDisplay) -> u16 {
        let along = self.axis(axis);
        let across = self.axis(axis.orthogonal());
        if world < 0 || world >= i32::from(along.map_len) {
            return 0;
        }

        let slot = along.to_buffer(world);
        let mut cells = 0u16;
        for other in across.paint_window() {
            let (x, y, bx, by) = match axis {
                Axis::Horizontal => (world, other, slot, across.to_buffer(other)),
                Axis::Vertical => (other, world, across.to_buffer(other), slot),
            };
            if let Some(tile) = self.map.get(x, y) {
                display.paint_cell(bx, by, tile);
                cells += 1;
            }
        }
        cells
    }

    /// World coordinates buffer cell (`bx`, `by`) stands for, if it is resident and on the map.
    pub fn world_for_cell(&self, bx: u16, by: u16) -> Option<(i32, i32)> {
        let x = self.horizontal.to_world(bx)?;
        let y = self.vertical.to_world(by)?;
        Some((x, y))
    }

    /// Tile buffer cell (`bx`, `by`) must hold under the current camera.
    pub fn expected_tile(&self, bx: u16, by: u16) -> Option<TileId> {
        let (x, y) = self.world_for_cell(bx, by)?;
        self.map.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::TileBuffer;

    fn map(width: u8, height: u8) -> TileMap {
        let tiles = (0..(width as usize * height as usize))
            .map(|i| (i % 251) as u8)
            .collect();
        TileMap::new(width, height, tiles).unwrap()
    }

    #[test]
    fn clamps_each_axis_independently() {
        let m = map(40, 40);
        let mut vp = Viewport::new(&m, ViewportConfig::default()).unwrap();

        vp.move_to(-5, 1_000);
        assert_eq!(vp.camera(), (0, (40 - 28) * 8));

        vp.move_to(97, -1);
        assert_eq!(vp.camera(), (96, 0));
    }

    #[test]
    fn fixed_axis_stays_pinned() {
        let m = map(40, 40);
        let mut vp = Viewport::new(&m, ViewportConfig::new(ScrollMode::Horizontal)).unwrap();
        vp.move_to(10, 50);
        assert_eq!(vp.camera(), (10, 0));
        assert_eq!(vp.resident_window(Axis::Vertical), 0..28);
    }

    #[test]
    fn crossing_direction_handles_offset_wraparound() {
        let m = map(80, 40);
        let vp = Viewport::new(&m, ViewportConfig::default()).unwrap();
        let h = vp.horizontal;

        assert_eq!(h.crossing(7, 8), Some(ScrollDirection::Forward));
        assert_eq!(h.crossing(8, 7), Some(ScrollDirection::Backward));
        assert_eq!(h.crossing(255, 0), Some(ScrollDirection::Forward));
        assert_eq!(h.crossing(0, 255), Some(ScrollDirection::Backward));
        assert_eq!(h.crossing(8, 15), None);
    }

    #[test]
    #[should_panic(expected = "at most one tile per refresh")]
    fn multi_tile_jump_is_a_precondition_violation() {
        let m = map(80, 40);
        let mut buf = TileBuffer::new(32, 32);
        let mut vp = Viewport::init(&m, ViewportConfig::default(), &mut buf).unwrap();
        vp.move_to(16, 0);
        vp.refresh(&mut buf);
    }

    #[test]
    #[should_panic(expected = "moved 31 tiles")]
    fn jump_of_buffer_width_minus_one_is_not_a_backward_step() {
        let m = map(96, 96);
        let mut buf = TileBuffer::new(32, 32);
        let mut vp = Viewport::init(&m, ViewportConfig::default(), &mut buf).unwrap();
        vp.move_to(31 * 8, 0);
        vp.refresh(&mut buf);
    }

    #[test]
    #[should_panic(expected = "vertical camera moved 32 tiles")]
    fn jump_of_whole_buffer_width_is_detected() {
        let m = map(96, 96);
        let mut buf = TileBuffer::new(32, 32);
        let mut vp = Viewport::init(&m, ViewportConfig::default(), &mut buf).unwrap();
        vp.move_to(0, 32 * 8);
        vp.refresh(&mut buf);
    }

    #[test]
    fn single_steps_after_jump_to_are_accepted() {
        let m = map(96, 96);
        let mut buf = TileBuffer::new(32, 32);
        let mut vp = Viewport::init(&m, ViewportConfig::default(), &mut buf).unwrap();
        vp.jump_to(40 * 8, 33 * 8, &mut buf);
        vp.move_by(-8, 8);
        assert_eq!(vp.refresh(&mut buf).strips().len(), 2);
    }

    #[test]
    fn resident_window_keeps_two_tiles_behind_camera() {
        let m = map(80, 80);
        let mut vp = Viewport::new(&m, ViewportConfig::default()).unwrap();
        vp.move_to(40, 12);
        assert_eq!(vp.resident_window(Axis::Horizontal), 3..35);
        assert_eq!(vp.resident_window(Axis::Vertical), -1..31);
        assert_eq!(vp.world_for_cell(3, 0), Some((3, 0)));
        assert_eq!(vp.world_for_cell(2, 0), Some((34, 0)));
        // Row -1 is resident but off the map.
        assert_eq!(vp.world_for_cell(3, 31), None);
    }

    #[test]
    fn rejects_buffer_without_look_ahead() {
        let m = map(80, 80);
        let config = ViewportConfig::default().with_horizontal(AxisGeometry::new(30, 28, 8));
        assert_eq!(
            Viewport::new(&m, config).err(),
            Some(ConfigError::BufferTooSmall {
                axis: Axis::Horizontal,
                buffer: 30,
                screen: 28,
                required: 31,
            })
        );
    }

    #[test]
    fn rejects_non_power_of_two_tiles_and_small_maps() {
        let m = map(80, 80);
        let config = ViewportConfig::default().with_vertical(AxisGeometry::new(32, 28, 6));
        assert!(matches!(
            Viewport::new(&m, config),
            Err(ConfigError::TileSizeNotPowerOfTwo { size: 6, .. })
        ));

        let narrow = map(20, 80);
        assert_eq!(
            Viewport::new(&narrow, ViewportConfig::default()).err(),
            Some(ConfigError::MapSmallerThanScreen {
                axis: Axis::Horizontal,
                map: 20,
                screen: 28,
            })
        );
        // A fixed axis may be smaller than the screen.
        assert!(Viewport::new(&narrow, ViewportConfig::new(ScrollMode::Vertical)).is_ok());
    }

    #[test]
    fn rejects_offset_span_beyond_u16() {
        let m = map(255, 255);
        let config = ViewportConfig::default().with_horizontal(AxisGeometry::new(512, 28, 256));
        assert!(matches!(
            Viewport::new(&m, config),
            Err(ConfigError::OffsetSpanOverflow { .. })
        ));
    }
}
