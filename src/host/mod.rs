//! Interfaces between the widget and whatever environment hosts it.
//!
//! The host owns the real drawing surface and the input dispatch.  It hands
//! the widget a [`DrawingSurface`] to render into, drives the widget's
//! lifecycle through [`SurfaceCallbacks`], and forwards [`PointerEvent`]s.
//! Nothing here knows about terminals; see `ui::terminal` for one host.

pub mod pixels;

use crate::core::{color::Color, grid::CellRect};
use crate::error::GridError;

// ───────────────────────────────────────── drawing ───────────

/// Immediate-mode 2D drawing target for one frame.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Paint the whole canvas.
    fn fill(&mut self, color: Color);
    /// Paint an axis-aligned rectangle, clipped to the canvas.
    fn fill_rect(&mut self, rect: CellRect, color: Color);
}

/// A surface whose buffers can be locked, drawn into, and presented.
///
/// Called from the render thread, hence `Send + Sync`.
pub trait DrawingSurface: Send + Sync + 'static {
    type Canvas: Canvas + Send;

    /// Acquire a drawable buffer.  `None` means the surface is not
    /// available right now and the frame should be skipped.
    fn lock_canvas(&self) -> Option<Self::Canvas>;

    /// Release the buffer and present what was drawn into it.
    fn unlock_canvas_and_post(&self, canvas: Self::Canvas);
}

// ───────────────────────────────────────── lifecycle ─────────

/// Pixel dimensions of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Lifecycle notifications the host sends to a widget.
pub trait SurfaceCallbacks {
    /// The surface exists and can be drawn to.
    fn surface_created(&mut self, size: SurfaceSize) -> Result<(), GridError>;
    /// The surface was resized (rotation, terminal resize, ...).
    fn surface_changed(&mut self, size: SurfaceSize);
    /// The surface is going away; must not return while still drawing to it.
    fn surface_destroyed(&mut self) -> Result<(), GridError>;
}

// ───────────────────────────────────────── input ─────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
}

/// A single-pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub const fn new(x: f32, y: f32, phase: PointerPhase) -> Self {
        Self { x, y, phase }
    }

    pub const fn press(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Press)
    }

    pub const fn release(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Release)
    }
}
