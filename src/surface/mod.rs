//! The grid widget: geometry, per-cell colours, pointer handling, and the
//! render thread that repaints it.
//!
//! All mutable widget state lives in [`GridState`] behind one mutex shared
//! with the render thread.  A pointer event holds the lock for one cell
//! write; a frame holds it for the whole repaint, so a frame never shows a
//! half-applied update.

pub mod render_loop;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::core::{
    cells::CellColorMap,
    color::{Color, Palette},
    grid::{CellIndex, CellRect, CellSize, GridGeometry},
};
use crate::error::GridError;
use crate::host::{
    Canvas, DrawingSurface, PointerEvent, PointerPhase, SurfaceCallbacks, SurfaceSize,
};

use self::render_loop::RenderLoop;

/// Default pause between frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── state ─────────────

/// Geometry, colours, and palette of one widget.
#[derive(Debug, Clone)]
pub struct GridState {
    geometry: GridGeometry,
    colors: CellColorMap,
    palette: Palette,
}

impl GridState {
    /// A grid with no cells yet; it is laid out by [`GridState::initialize`].
    pub fn new(cell: CellSize, palette: Palette) -> Self {
        Self {
            geometry: GridGeometry::empty(cell),
            colors: CellColorMap::default(),
            palette,
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn cell_size(&self) -> CellSize {
        self.geometry.cell
    }

    /// Lay the grid out for a new surface size.  Every cell starts over in
    /// the default colour.
    pub fn initialize(&mut self, size: SurfaceSize) {
        self.geometry = GridGeometry::new(size.width, size.height, self.geometry.cell);
        self.colors = CellColorMap::new(
            self.geometry.rows,
            self.geometry.columns,
            self.palette.default_cell,
        );
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<CellIndex> {
        self.geometry.hit_test(x, y)
    }

    /// Ignored when `(row, col)` is outside the grid.
    pub fn set_cell_color(&mut self, row: usize, col: usize, color: Color) {
        self.colors.set(row, col, color);
    }

    pub fn cell_color(&self, row: usize, col: usize) -> Option<Color> {
        self.colors.get(row, col)
    }

    pub fn fill(&mut self, color: Color) {
        self.colors.fill(color);
    }

    /// Press selects the cell under the pointer, release restores it to the
    /// default colour.  Moves are ignored.  Returns the cell that changed.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> Option<CellIndex> {
        let color = match event.phase {
            PointerPhase::Press => self.palette.selected_cell,
            PointerPhase::Release => self.palette.default_cell,
            PointerPhase::Move => return None,
        };
        let cell = self.hit_test(event.x, event.y)?;
        self.set_cell_color(cell.row, cell.col, color);
        Some(cell)
    }

    /// Full repaint: background first, then every cell in row-major order.
    pub fn render_frame<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.fill(self.palette.background);
        for (idx, color) in self.colors.iter() {
            if let Some(rect) = self.geometry.cell_rect(idx.row, idx.col) {
                canvas.fill_rect(rect, color);
            }
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// An interactive grid drawn onto a host-provided [`DrawingSurface`].
///
/// Input methods take `&self` and may be called from the host's dispatch
/// thread while the render thread is drawing.
pub struct GridSurface<S: DrawingSurface> {
    surface: Arc<S>,
    state: Arc<Mutex<GridState>>,
    render_loop: RenderLoop,
}

impl<S: DrawingSurface> GridSurface<S> {
    /// 10×10 cells, the default palette, and a 16 ms frame interval.
    pub fn new(surface: Arc<S>) -> Self {
        Self {
            surface,
            state: Arc::new(Mutex::new(GridState::new(
                CellSize::default(),
                Palette::default(),
            ))),
            render_loop: RenderLoop::new(DEFAULT_FRAME_INTERVAL),
        }
    }

    /// Cell size is fixed for the widget's lifetime.  Setting it starts the
    /// grid over unsized, so `initialize` must run again.
    pub fn with_cell_size(self, cell: CellSize) -> Self {
        {
            let mut state = self.lock_state();
            let palette = state.palette;
            *state = GridState::new(cell, palette);
        }
        self
    }

    pub fn with_palette(self, palette: Palette) -> Self {
        self.lock_state().palette = palette;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.render_loop.set_frame_interval(interval);
        self
    }

    fn lock_state(&self) -> MutexGuard<'_, GridState> {
        lock_state(&self.state)
    }

    pub fn cell_size(&self) -> CellSize {
        self.lock_state().cell_size()
    }

    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    pub fn geometry(&self) -> GridGeometry {
        *self.lock_state().geometry()
    }

    pub fn palette(&self) -> Palette {
        *self.lock_state().palette()
    }

    /// Re-tile the grid for `size`, discarding all cell colours.
    pub fn initialize(&self, size: SurfaceSize) {
        let mut state = self.lock_state();
        state.initialize(size);
        let g = state.geometry();
        tracing::debug!(
            width = size.width,
            height = size.height,
            rows = g.rows,
            columns = g.columns,
            margin_x = g.margin_x,
            margin_y = g.margin_y,
            "grid initialized"
        );
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<CellIndex> {
        self.lock_state().hit_test(x, y)
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Option<CellRect> {
        self.lock_state().geometry().cell_rect(row, col)
    }

    pub fn set_cell_color(&self, row: usize, col: usize, color: Color) {
        self.lock_state().set_cell_color(row, col, color);
    }

    pub fn cell_color(&self, row: usize, col: usize) -> Option<Color> {
        self.lock_state().cell_color(row, col)
    }

    pub fn fill(&self, color: Color) {
        self.lock_state().fill(color);
    }

    pub fn on_pointer_event(&self, event: PointerEvent) -> Option<CellIndex> {
        let changed = self.lock_state().on_pointer_event(event);
        if let Some(cell) = changed {
            tracing::trace!(
                row = cell.row,
                col = cell.col,
                phase = ?event.phase,
                "cell updated"
            );
        }
        changed
    }

    /// Draw one frame into `canvas` without going through the surface.
    pub fn render_frame<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        self.lock_state().render_frame(canvas);
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    /// Start repainting on the render thread.  No-op while already running.
    pub fn start(&mut self) -> Result<(), GridError> {
        let surface = Arc::clone(&self.surface);
        let state = Arc::clone(&self.state);
        self.render_loop.start(move || {
            draw_frame(surface.as_ref(), &state);
        })
    }

    /// Stop repainting; returns once the render thread has exited.
    pub fn stop(&mut self) -> Result<(), GridError> {
        self.render_loop.stop()
    }
}

impl<S: DrawingSurface> SurfaceCallbacks for GridSurface<S> {
    fn surface_created(&mut self, size: SurfaceSize) -> Result<(), GridError> {
        tracing::info!(width = size.width, height = size.height, "surface created");
        self.surface_changed(size);
        self.start()
    }

    /// Only an actual size change re-tiles (and so clears) the grid.
    fn surface_changed(&mut self, size: SurfaceSize) {
        let current = self.geometry();
        if current.surface_width == size.width && current.surface_height == size.height {
            return;
        }
        self.initialize(size);
    }

    fn surface_destroyed(&mut self) -> Result<(), GridError> {
        tracing::info!("surface destroyed");
        self.stop()
    }
}

/// One iteration of the render loop.  Returns `false` when the surface had
/// no buffer and the frame was skipped.
fn draw_frame<S: DrawingSurface + ?Sized>(surface: &S, state: &Mutex<GridState>) -> bool {
    let Some(mut canvas) = surface.lock_canvas() else {
        return false;
    };
    lock_state(state).render_frame(&mut canvas);
    surface.unlock_canvas_and_post(canvas);
    true
}

/// The state is plain data, so a panic elsewhere leaves it usable.
fn lock_state(state: &Mutex<GridState>) -> MutexGuard<'_, GridState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
