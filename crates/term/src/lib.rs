//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: sessions are drawn into a plain
//! framebuffer by [`GameView`] (pure, unit-testable), and [`TerminalRenderer`]
//! flushes that framebuffer to the terminal through `crossterm`.
//!
//! Board cells are drawn two columns wide to compensate for the usual
//! terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
