//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every gameplay rule and the session state machine. It has
//! no dependency on the terminal, the clock, or the filesystem: the host feeds
//! it commands and elapsed time and reads back snapshots and events.
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven piece masks, clockwise rotation, spawn anchors
//! - [`rng`]: seeded LCG and the no-immediate-repeat piece generator
//! - [`board`]: 21x12 walled well, line detection and collapse
//! - [`piece`]: a live piece (kind, mask, anchor)
//! - [`collision`]: occupancy checks, kick search, drop distance
//! - [`scoring`]: line clear table, level and gravity curve
//! - [`session`]: phases, timers, commands, events
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - **Generator**: uniform over the six kinds that differ from the last one
//! - **Rotation**: clockwise only, with a 20-offset kick search
//! - **Locking**: a piece locks on the first gravity step it cannot fall
//! - **Hold**: unlimited swaps, the returning piece keeps its position
//! - **Scoring**: 10 per lock, 100/250/450/700 for 1-4 lines
//! - **Levels**: one per 1000 points, gravity from 800ms down to 300ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, SessionConfig};
//! use blockfall_types::Command;
//!
//! let mut session = GameSession::new(SessionConfig::default());
//! session.skip_intro();
//!
//! session.apply(Command::MoveRight);
//! session.apply(Command::Rotate);
//! session.apply(Command::HardDrop);
//!
//! assert_eq!(session.score(), 10);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::advance`](session::GameSession::advance) every frame
//! with the elapsed milliseconds. Gravity, the session clock and the
//! Ready/Go/finish gates are all accumulator-driven from there.

pub mod board;
pub mod catalog;
pub mod collision;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, FullRows};
pub use catalog::{shape_of, spawn_position, Shape};
pub use collision::{can_move_by, can_occupy, drop_row, try_rotate};
pub use piece::Piece;
pub use rng::{next_random_kind, PieceGenerator, SimpleRng};
pub use scoring::{gravity_interval_ms, level_for_score, line_clear_score};
pub use session::{GameSession, Phase, SessionConfig};
pub use snapshot::{BoardGrid, SessionSnapshot};
