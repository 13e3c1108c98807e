//! Core scrolling logic - pure, deterministic, and testable
//!
//! This crate keeps a small toroidal tile buffer consistent with a camera moving over a much
//! larger read-only tile map, repainting only the strip of tiles that enters view on each
//! tile-boundary crossing. It performs no I/O: paint and scroll-offset operations go through
//! the [`TileDisplay`] trait, which the terminal front-end and the tests implement.
//!
//! # Module Structure
//!
//! - [`tilemap`]: immutable map grid parsed from `[width, height, tiles...]` source bytes
//! - [`viewport`]: camera clamping, crossing detection and incremental strip redraw
//! - [`display`]: the display collaborator trait and an in-memory [`TileBuffer`]
//! - [`levels`]: deterministic demo maps for each scroll mode
//! - [`rng`]: small LCG used for level generation and randomized tests
//! - [`error`]: configuration and lookup errors
//!
//! # Example
//!
//! ```
//! use tile_scroll_core::{TileBuffer, TileMap, Viewport, ViewportConfig};
//! use tile_scroll_types::{ScrollMode, VRAM_TILES_H, VRAM_TILES_V};
//!
//! // 64x64 map where every tile stores its column.
//! let mut src = vec![64, 64];
//! src.extend((0..64 * 64).map(|i| (i % 64) as u8));
//! let map = TileMap::from_bytes(&src).unwrap();
//!
//! let mut vram = TileBuffer::new(VRAM_TILES_H, VRAM_TILES_V);
//! let mut viewport =
//!     Viewport::init(&map, ViewportConfig::new(ScrollMode::Both), &mut vram).unwrap();
//!
//! // Scroll right one whole tile, one pixel per frame.
//! for _ in 0..8 {
//!     viewport.move_by(1, 0);
//!     viewport.refresh(&mut vram);
//! }
//!
//! // Column 30 entered the resident window and landed in buffer column 30.
//! assert_eq!(vram.get(30, 0), Some(30));
//! assert_eq!(vram.scroll_offset(), (8, 0));
//! ```

pub mod display;
pub mod error;
pub mod levels;
pub mod rng;
pub mod tilemap;
pub mod viewport;

pub use tile_scroll_types as types;

// Re-export commonly used types for convenience
pub use display::{TileBuffer, TileDisplay};
pub use error::{ConfigError, OutOfRange};
pub use rng::SimpleRng;
pub use tilemap::TileMap;
pub use viewport::{AxisGeometry, PaintedStrip, RefreshReport, Viewport, ViewportConfig};
