//! Display collaborator seam and an in-memory toroidal tile buffer.
//!
//! The viewport never touches hardware registers. It emits two operations through
//! [`TileDisplay`]: paint one buffer cell, and set the scroll offset the display applies when
//! presenting the buffer. [`TileBuffer`] is the in-memory implementation used by tests and by
//! the terminal front-end, which reads it back through the scroll offset.

use crate::types::TileId;

/// Sink for the viewport's paint and scroll-offset operations.
pub trait TileDisplay {
    /// Store `tile` in buffer cell (`bx`, `by`).
    fn paint_cell(&mut self, bx: u16, by: u16, tile: TileId);

    /// Set the raw scroll offset (pixels, already reduced modulo the buffer span).
    fn set_scroll_offset(&mut self, x: u16, y: u16);
}

impl<T: TileDisplay + ?Sized> TileDisplay for &mut T {
    fn paint_cell(&mut self, bx: u16, by: u16, tile: TileId) {
        (**self).paint_cell(bx, by, tile);
    }

    fn set_scroll_offset(&mut self, x: u16, y: u16) {
        (**self).set_scroll_offset(x, y);
    }
}

/// Fixed-size toroidal buffer of tile cells ("VRAM").
///
/// Cells never written hold `None`, which lets tests tell stale or unpainted cells apart from
/// tile 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBuffer {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (by * width + bx)
    cells: Vec<Option<TileId>>,
    scroll: (u16, u16),
    paints: u64,
}

impl TileBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; len],
            scroll: (0, 0),
            paints: 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, bx: u16, by: u16) -> Option<usize> {
        if bx >= self.width || by >= self.height {
            return None;
        }
        Some((by as usize) * (self.width as usize) + (bx as usize))
    }

    /// Contents of a buffer cell, `None` if never painted or out of range.
    pub fn get(&self, bx: u16, by: u16) -> Option<TileId> {
        self.idx(bx, by).and_then(|i| self.cells[i])
    }

    /// Cell at an unbounded coordinate, wrapped onto the buffer.
    pub fn get_wrapped(&self, x: i32, y: i32) -> Option<TileId> {
        let bx = x.rem_euclid(i32::from(self.width)) as u16;
        let by = y.rem_euclid(i32::from(self.height)) as u16;
        self.get(bx, by)
    }

    /// Last scroll offset set by the viewport.
    pub fn scroll_offset(&self) -> (u16, u16) {
        self.scroll
    }

    /// Number of cells painted since creation or the last [`TileBuffer::reset_paint_count`].
    pub fn paint_count(&self) -> u64 {
        self.paints
    }

    pub fn reset_paint_count(&mut self) {
        self.paints = 0;
    }
}

impl TileDisplay for TileBuffer {
    fn paint_cell(&mut self, bx: u16, by: u16, tile: TileId) {
        if let Some(i) = self.idx(bx, by) {
            self.cells[i] = Some(tile);
            self.paints += 1;
        }
    }

    fn set_scroll_offset(&mut self, x: u16, y: u16) {
        self.scroll = (x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paints_are_stored_and_counted() {
        let mut buf = TileBuffer::new(4, 3);
        assert_eq!(buf.get(1, 2), None);

        buf.paint_cell(1, 2, 7);
        buf.paint_cell(1, 2, 9);
        assert_eq!(buf.get(1, 2), Some(9));
        assert_eq!(buf.paint_count(), 2);

        buf.reset_paint_count();
        assert_eq!(buf.paint_count(), 0);
        assert_eq!(buf.get(1, 2), Some(9));
    }

    #[test]
    fn out_of_range_paints_are_dropped() {
        let mut buf = TileBuffer::new(2, 2);
        buf.paint_cell(2, 0, 1);
        buf.paint_cell(0, 2, 1);
        assert_eq!(buf.paint_count(), 0);
    }

    #[test]
    fn wrapped_reads_use_euclidean_modulo() {
        let mut buf = TileBuffer::new(4, 4);
        buf.paint_cell(3, 0, 5);
        assert_eq!(buf.get_wrapped(-1, 0), Some(5));
        assert_eq!(buf.get_wrapped(7, 4), Some(5));
    }

    #[test]
    fn works_through_a_mutable_reference() {
        fn paint_one(mut display: impl TileDisplay) {
            display.paint_cell(0, 0, 3);
            display.set_scroll_offset(12, 34);
        }

        let mut buf = TileBuffer::new(2, 2);
        paint_one(&mut buf);
        assert_eq!(buf.get(0, 0), Some(3));
        assert_eq!(buf.scroll_offset(), (12, 34));
    }
}
