//! Core model – colours, grid geometry, and per-cell state.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared with the render thread.

pub mod cells;
pub mod color;
pub mod grid;
