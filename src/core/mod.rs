//! Core logic – scroll source, header state machine, animation timer.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod animation;
pub mod header;
pub mod sticky;
pub mod viewport;
