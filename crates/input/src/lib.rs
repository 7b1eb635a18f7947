//! Terminal input module.
//!
//! Maps `crossterm` key events to [`crate::types::Command`]s and tracks the
//! held soft-drop key, including on terminals that never report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{is_soft_drop_key, map_key, should_quit};
