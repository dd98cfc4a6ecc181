//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads the header flags and turns them into cells on the
//! terminal.  It never mutates header state.

pub mod app_bar;
pub mod content_slot;
pub mod layout;
pub mod page;
pub mod slide;
pub mod theme;
