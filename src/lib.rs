//! An interactive cell grid widget.
//!
//! A [`GridSurface`] tiles a host surface with fixed-size cells, maps pointer
//! presses to cells, and repaints the whole grid on a dedicated render thread
//! while the host surface exists.  The host plugs in through the traits in
//! [`host`]; the `grid-surface` binary is one such host, running in a
//! terminal.

pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod surface;

pub use crate::core::{
    cells::CellColorMap,
    color::{Color, Palette},
    grid::{CellIndex, CellRect, CellSize, GridGeometry},
};
pub use crate::error::GridError;
pub use crate::host::{
    Canvas, DrawingSurface, PointerEvent, PointerPhase, SurfaceCallbacks, SurfaceSize,
};
pub use crate::surface::{GridState, GridSurface};
