//! Terminal input module (driver-facing).
//!
//! Maps `crossterm` key events into [`crate::types::ScrollAction`]s and tracks which
//! directions are currently held, so the driving loop can sample
//! [`crate::types::HeldDirections`] once per frame. Terminals that never report key releases
//! are handled with a release timeout.

pub mod handler;
pub mod map;

pub use tile_scroll_types as types;

pub use handler::HeldInput;
pub use map::{handle_key_event, should_quit};
