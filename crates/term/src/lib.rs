//! Terminal presentation for the tile scroller.
//!
//! The tile buffer is drawn into a plain character framebuffer which is then flushed to the
//! terminal, either whole or as a diff against the previous frame. No widget toolkit is
//! involved, so each tile maps to an exact number of terminal cells (two columns by default).

pub mod fb;
pub mod renderer;
pub mod scroll_view;

pub use tile_scroll_core as core;
pub use tile_scroll_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use scroll_view::{tile_glyph, ScrollStatus, ScrollView, TermSize, ViewMode};
