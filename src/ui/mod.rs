//! UI / rendering layer — everything that touches Ratatui.
//!
//! This layer turns the widget's pixel frames into terminal cells.  No grid
//! state lives here.

pub mod layout;
pub mod terminal;
pub mod theme;
