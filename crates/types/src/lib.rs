//! Shared types and constants for toroidal tile scrolling.
//!
//! Everything in this crate is plain data with no dependencies, usable from the core
//! algorithm, the input layer and the terminal front-end alike.
//!
//! # Buffer Geometry
//!
//! The default geometry mirrors a classic tile-mode video chip: a 32x32 tile buffer with
//! 8x8 pixel tiles, of which a 28x28 tile screen is visible at a time.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TILE_WIDTH` | 8 | Tile width in pixels (power of two) |
//! | `TILE_HEIGHT` | 8 | Tile height in pixels (power of two) |
//! | `VRAM_TILES_H` | 32 | Buffer width in tiles |
//! | `VRAM_TILES_V` | 32 | Buffer height in tiles |
//! | `SCREEN_TILES_H` | 28 | Visible screen width in tiles |
//! | `SCREEN_TILES_V` | 28 | Visible screen height in tiles |
//! | `TRAILING_MARGIN` | 2 | Tiles kept resident behind the camera |
//! | `TICK_MS` | 16 | Fixed frame interval (~60 FPS) |
//!
//! The raw scroll offset wraps at `VRAM_TILES_H * TILE_WIDTH` = 256 pixels, i.e. it fits the
//! single-byte scroll register of 8-bit tile hardware.
//!
//! # Examples
//!
//! ```
//! use tile_scroll_types::{Axis, HeldDirections, ScrollMode};
//!
//! let mode = ScrollMode::from_str("horiz-vert").unwrap();
//! assert!(mode.scrolls(Axis::Horizontal));
//! assert!(mode.scrolls(Axis::Vertical));
//!
//! let held = HeldDirections { right: true, up: true, ..HeldDirections::default() };
//! assert_eq!(held.delta(1), (1, -1));
//! ```

/// Tile identifier as stored in the map and the buffer.
pub type TileId = u8;

/// Tile width in pixels
pub const TILE_WIDTH: u16 = 8;

/// Tile height in pixels
pub const TILE_HEIGHT: u16 = 8;

/// Buffer ("VRAM") width in tiles
pub const VRAM_TILES_H: u16 = 32;

/// Buffer ("VRAM") height in tiles
pub const VRAM_TILES_V: u16 = 32;

/// Visible screen width in tiles
pub const SCREEN_TILES_H: u16 = 28;

/// Visible screen height in tiles
pub const SCREEN_TILES_V: u16 = 28;

/// Number of tiles kept resident behind the camera along a scrolled axis.
///
/// The remaining `buffer - TRAILING_MARGIN` tiles start at the camera tile and run ahead of it.
pub const TRAILING_MARGIN: u16 = 2;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default camera speed in pixels per frame.
pub const DEFAULT_SCROLL_SPEED: i32 = 1;


/// One of the two scroll axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Columns scroll past (camera x).
    Horizontal,
    /// Rows scroll past (camera y).
    Vertical,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }

    /// The other axis.
    pub fn orthogonal(&self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Which axes a viewport scrolls along.
///
/// - **Horizontal**: side-scrolling; the screen shows the top rows of the map.
/// - **Vertical**: top-down scrolling; the screen shows the leftmost columns of the map.
/// - **Both**: free scrolling in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollMode {
    Horizontal,
    Vertical,
    #[default]
    Both,
}

impl ScrollMode {
    /// Parse a scroll mode (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_scroll_types::ScrollMode;
    ///
    /// assert_eq!(ScrollMode::from_str("horiz"), Some(ScrollMode::Horizontal));
    /// assert_eq!(ScrollMode::from_str("vertical"), Some(ScrollMode::Vertical));
    /// assert_eq!(ScrollMode::from_str("horiz-vert"), Some(ScrollMode::Both));
    /// assert_eq!(ScrollMode::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" | "horiz" | "h" => Some(ScrollMode::Horizontal),
            "vertical" | "vert" | "v" => Some(ScrollMode::Vertical),
            "both" | "horiz-vert" | "hv" => Some(ScrollMode::Both),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollMode::Horizontal => "horizontal",
            ScrollMode::Vertical => "vertical",
            ScrollMode::Both => "both",
        }
    }

    /// Whether the camera moves along `axis` in this mode.
    pub fn scrolls(&self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (ScrollMode::Both, _)
                | (ScrollMode::Horizontal, Axis::Horizontal)
                | (ScrollMode::Vertical, Axis::Vertical)
        )
    }
}

/// Direction of a tile-boundary crossing along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Camera moved towards larger world coordinates (right/down).
    Forward,
    /// Camera moved towards smaller world coordinates (left/up).
    Backward,
}

/// Directional intents currently held, sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldDirections {
    /// Camera delta for one frame at `speed` pixels per frame.
    ///
    /// Left takes precedence over right and up over down when both are held.
    pub fn delta(&self, speed: i32) -> (i32, i32) {
        let dx = if self.left {
            -speed
        } else if self.right {
            speed
        } else {
            0
        };
        let dy = if self.up {
            -speed
        } else if self.down {
            speed
        } else {
            0
        };
        (dx, dy)
    }

    pub fn is_idle(&self) -> bool {
        !(self.left || self.right || self.up || self.down)
    }
}

/// Actions produced by the input layer for the driving loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    /// Hold the camera moving left
    MoveLeft,
    /// Hold the camera moving right
    MoveRight,
    /// Hold the camera moving up
    MoveUp,
    /// Hold the camera moving down
    MoveDown,
    /// Switch between the screen view and the whole-buffer view
    ToggleBufferView,
    /// Jump back to the map origin and refill the buffer
    JumpHome,
}
