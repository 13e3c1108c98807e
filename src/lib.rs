//! Tile scroller (workspace facade crate).
//!
//! Re-exports the workspace crates as `tile_scroll::{core,input,term,types}` and hosts the
//! demo's environment configuration.

pub mod config;

pub use tile_scroll_core as core;
pub use tile_scroll_input as input;
pub use tile_scroll_term as term;
pub use tile_scroll_types as types;
