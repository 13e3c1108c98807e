//! Error types for map loading and viewport configuration.
//!
//! Configuration errors are fatal: they are detected when a map or viewport is built and are
//! never recovered from. Camera displacement above one tile per refresh is a caller logic error
//! and panics instead (see [`crate::Viewport::refresh`]).

use crate::types::Axis;

/// Fatal configuration error detected at construction time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("map source is {len} bytes, shorter than the 2-byte header")]
    MissingHeader { len: usize },

    #[error("map dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: u16, height: u16 },

    #[error("map declares {expected} tiles but {actual} are present")]
    TruncatedTiles { expected: usize, actual: usize },

    #[error("{} tile size {size} is not a power of two", .axis.as_str())]
    TileSizeNotPowerOfTwo { axis: Axis, size: u16 },

    #[error("{} screen span must be at least one tile", .axis.as_str())]
    EmptyScreen { axis: Axis },

    #[error(
        "{} buffer of {buffer} tiles cannot hold a {screen}-tile screen plus look-ahead (needs {required})",
        .axis.as_str()
    )]
    BufferTooSmall {
        axis: Axis,
        buffer: u16,
        screen: u16,
        required: u16,
    },

    #[error("{} buffer span of {buffer} tiles x {tile_size}px overflows the scroll offset", .axis.as_str())]
    OffsetSpanOverflow {
        axis: Axis,
        buffer: u16,
        tile_size: u16,
    },

    #[error("map is {map} tiles along the {} axis, smaller than the {screen}-tile screen", .axis.as_str())]
    MapSmallerThanScreen { axis: Axis, map: u16, screen: u16 },
}

/// A linear tile index beyond the end of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("tile index {index} is out of range for a map of {len} tiles")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}
