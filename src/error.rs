//! Errors surfaced by the widget's lifecycle.
//!
//! Cell indices outside the grid are not errors; those writes are dropped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// The OS refused to create the render thread.
    #[error("failed to spawn render thread: {0}")]
    SpawnRenderThread(#[source] std::io::Error),

    /// The render thread panicked before it could be joined cleanly.
    #[error("render thread panicked")]
    RenderThreadPanicked,
}
