//! In-memory pixel canvas and a headless drawing surface built on it.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::{Canvas, DrawingSurface, SurfaceSize};
use crate::core::{color::Color, grid::CellRect};

/// A `width × height` buffer of colours, row-major by `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// One scanline, left to right.
    pub fn row(&self, y: u32) -> &[Color] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }
}

impl Canvas for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, rect: CellRect, color: Color) {
        let right = rect.right.min(self.width);
        let bottom = rect.bottom.min(self.height);
        if rect.left >= right || rect.top >= bottom {
            return;
        }
        let stride = self.width as usize;
        for y in rect.top..bottom {
            let start = y as usize * stride;
            self.pixels[start + rect.left as usize..start + right as usize].fill(color);
        }
    }
}

// ───────────────────────────────────────── surface ───────────

#[derive(Debug)]
struct BufferState {
    size: SurfaceSize,
    available: bool,
    last_frame: Option<PixelCanvas>,
    frames_posted: u64,
}

/// Headless [`DrawingSurface`]: frames are drawn into fresh [`PixelCanvas`]
/// buffers and the most recent posted one is kept for inspection.
#[derive(Debug)]
pub struct BufferSurface {
    state: Mutex<BufferState>,
    posted: Condvar,
}

impl BufferSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            state: Mutex::new(BufferState {
                size,
                available: true,
                last_frame: None,
                frames_posted: 0,
            }),
            posted: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn size(&self) -> SurfaceSize {
        self.lock().size
    }

    /// Later buffers are allocated at the new size.
    pub fn resize(&self, size: SurfaceSize) {
        self.lock().size = size;
    }

    /// While unavailable, `lock_canvas` returns `None`.
    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    pub fn frames_posted(&self) -> u64 {
        self.lock().frames_posted
    }

    pub fn last_frame(&self) -> Option<PixelCanvas> {
        self.lock().last_frame.clone()
    }

    /// Block until at least `count` frames have been posted in total, or
    /// `timeout` elapses.  Returns whether the count was reached.
    pub fn wait_for_frames(&self, count: u64, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        while state.frames_posted < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            state = match self.posted.wait_timeout(state, remaining) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        true
    }
}

impl DrawingSurface for BufferSurface {
    type Canvas = PixelCanvas;

    fn lock_canvas(&self) -> Option<PixelCanvas> {
        let state = self.lock();
        state
            .available
            .then(|| PixelCanvas::new(state.size.width, state.size.height))
    }

    fn unlock_canvas_and_post(&self, canvas: PixelCanvas) {
        let mut state = self.lock();
        state.last_frame = Some(canvas);
        state.frames_posted += 1;
        self.posted.notify_all();
    }
}
