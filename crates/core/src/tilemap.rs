//! TileMap module - the read-only world grid
//!
//! A map is a `width x height` grid of single-byte tile identifiers stored row-major in a flat
//! boxed slice. It is decoded once from its source bytes and never mutated afterwards.
//!
//! Source format (bit-exact):
//!
//! ```text
//! byte 0      width in tiles
//! byte 1      height in tiles
//! byte 2..    width * height tile identifiers, row-major
//! ```

use crate::error::{ConfigError, OutOfRange};
use crate::types::{Axis, TileId};

/// Size of the map source header (width byte + height byte).
pub const MAP_HEADER_LEN: usize = 2;

/// Immutable 2-D grid of tile identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: u16,
    height: u16,
    /// Flat array of tiles, row-major order (y * width + x)
    tiles: Box<[TileId]>,
}

impl TileMap {
    /// Build a map from decoded parts.
    ///
    /// `tiles` must hold exactly `width * height` identifiers.
    pub fn new(width: u8, height: u8, tiles: Vec<TileId>) -> Result<Self, ConfigError> {
        let (width, height) = (u16::from(width), u16::from(height));
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if tiles.len() != expected {
            return Err(ConfigError::TruncatedTiles {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles: tiles.into_boxed_slice(),
        })
    }

    /// Parse a map from its source bytes.
    ///
    /// Bytes following the tile stream are ignored.
    pub fn from_bytes(src: &[u8]) -> Result<Self, ConfigError> {
        let [width, height, body @ ..] = src else {
            return Err(ConfigError::MissingHeader { len: src.len() });
        };
        let (width, height) = (u16::from(*width), u16::from(*height));
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyDimensions { width, height });
        }

        let expected = (width as usize) * (height as usize);
        if body.len() < expected {
            return Err(ConfigError::TruncatedTiles {
                expected,
                actual: body.len(),
            });
        }
        if body.len() > expected {
            tracing::debug!(
                trailing = body.len() - expected,
                "ignoring bytes after the map tile stream"
            );
        }

        Ok(Self {
            width,
            height,
            tiles: body[..expected].into(),
        })
    }

    /// Encode the map back into its source format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MAP_HEADER_LEN + self.tiles.len());
        // Both constructors take single-byte dimensions.
        out.push(self.width as u8);
        out.push(self.height as u8);
        out.extend_from_slice(&self.tiles);
        out
    }

    /// Width in tiles
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of tiles (`width * height`)
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: a map has at least one tile.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at a row-major linear index.
    pub fn tile_at(&self, index: usize) -> Result<TileId, OutOfRange> {
        self.tiles.get(index).copied().ok_or(OutOfRange {
            index,
            len: self.tiles.len(),
        })
    }

    /// Tile at world coordinates, or `None` outside the grid.
    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> Option<TileId> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(self.tiles[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Length of the map along `axis`, in tiles.
    pub fn len_along(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TileMap {
        // 3x2 map:
        // 1 2 3
        // 4 5 6
        TileMap::from_bytes(&[3, 2, 1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn parses_header_and_row_major_tiles() {
        let map = sample();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.len(), 6);
        assert_eq!(map.get(0, 0), Some(1));
        assert_eq!(map.get(2, 0), Some(3));
        assert_eq!(map.get(0, 1), Some(4));
        assert_eq!(map.get(2, 1), Some(6));
        assert_eq!(map.tile_at(4), Ok(5));
    }

    #[test]
    fn get_rejects_coordinates_outside_grid() {
        let map = sample();
        assert_eq!(map.get(-1, 0), None);
        assert_eq!(map.get(0, -1), None);
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.get(0, 2), None);
    }

    #[test]
    fn tile_at_reports_out_of_range() {
        let map = sample();
        assert_eq!(map.tile_at(6), Err(OutOfRange { index: 6, len: 6 }));
    }

    #[test]
    fn zero_dimensions_are_configuration_errors() {
        assert_eq!(
            TileMap::from_bytes(&[0, 4]),
            Err(ConfigError::EmptyDimensions {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            TileMap::new(2, 0, Vec::new()),
            Err(ConfigError::EmptyDimensions {
                width: 2,
                height: 0
            })
        );
    }

    #[test]
    fn short_sources_are_rejected() {
        assert_eq!(
            TileMap::from_bytes(&[7]),
            Err(ConfigError::MissingHeader { len: 1 })
        );
        assert_eq!(
            TileMap::from_bytes(&[2, 2, 1, 1, 1]),
            Err(ConfigError::TruncatedTiles {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn trailing_bytes_are_ignored_and_encoding_restores_source() {
        let map = TileMap::from_bytes(&[2, 1, 9, 8, 0xff, 0xff]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.to_bytes(), vec![2, 1, 9, 8]);
    }
}
