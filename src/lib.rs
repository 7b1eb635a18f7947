//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `blockfall::{core,input,ranking,term,types}` and holds the host
//! configuration used by the terminal binary.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_ranking as ranking;
pub use blockfall_term as term;
pub use blockfall_types as types;
