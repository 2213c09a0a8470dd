//! A [`DrawingSurface`] backed by the terminal.
//!
//! One terminal cell is one pixel: frames are drawn into a [`PixelCanvas`]
//! the size of the grid area, and posting paints each pixel as a cell
//! background through Ratatui.

use std::io::Stderr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Terminal,
};

use grid_surface::host::pixels::PixelCanvas;
use grid_surface::{Canvas, DrawingSurface};

use super::{layout::SurfaceLayout, theme::Theme};

pub type TermBackend = CrosstermBackend<Stderr>;

/// Terminal-backed drawing surface shared with the render thread.
pub struct TerminalSurface<B: Backend = TermBackend> {
    terminal: Mutex<Terminal<B>>,
    status: Mutex<String>,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal: Mutex::new(terminal),
            status: Mutex::new(String::new()),
        }
    }

    /// Exclusive access to the terminal, e.g. for setup and teardown.
    pub fn terminal(&self) -> MutexGuard<'_, Terminal<B>> {
        self.terminal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Text shown in the status bar from the next frame on.
    pub fn set_status(&self, text: impl Into<String>) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    fn status(&self) -> String {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<B: Backend + Send + 'static> DrawingSurface for TerminalSurface<B> {
    type Canvas = PixelCanvas;

    fn lock_canvas(&self) -> Option<PixelCanvas> {
        let size = self.terminal().size().ok()?;
        let surface = SurfaceLayout::surface_size(size);
        Some(PixelCanvas::new(surface.width, surface.height))
    }

    fn unlock_canvas_and_post(&self, canvas: PixelCanvas) {
        let status = self.status();
        let mut terminal = self.terminal();
        let result = terminal.draw(|frame| {
            let layout = SurfaceLayout::from_area(frame.area());
            frame.render_widget(PixelWidget { canvas: &canvas }, layout.grid_area);
            let bar = Line::from(vec![
                Span::styled(" grid-surface ", Theme::status_cell_style()),
                Span::raw(" "),
                Span::raw(status),
            ]);
            frame.render_widget(
                Paragraph::new(bar).style(Theme::status_bar_style()),
                layout.status_area,
            );
        });
        if let Err(e) = result {
            tracing::warn!("terminal draw failed: {e}");
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// Paints a pixel canvas as cell backgrounds, anchored at the area's
/// top-left.  Pixels outside the area are cut off.
pub struct PixelWidget<'a> {
    pub canvas: &'a PixelCanvas,
}

impl Widget for PixelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = u32::from(area.width).min(self.canvas.width());
        let height = u32::from(area.height).min(self.canvas.height());
        for y in 0..height {
            for (x, &color) in self.canvas.row(y).iter().take(width as usize).enumerate() {
                let pos = (area.x + x as u16, area.y + y as u16);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_symbol(" ").set_bg(Theme::terminal_color(color));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_surface::{CellRect, Color};
    use ratatui::backend::TestBackend;
    use ratatui::style::Color as TermColor;

    #[test]
    fn pixels_become_cell_backgrounds() {
        let mut canvas = PixelCanvas::new(3, 2);
        canvas.fill(Color::BLACK);
        let rect = CellRect {
            left: 1,
            top: 1,
            right: 2,
            bottom: 2,
        };
        canvas.fill_rect(rect, Color::RED);

        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        PixelWidget { canvas: &canvas }.render(area, &mut buf);

        assert_eq!(buf[(0, 0)].bg, TermColor::Rgb(0, 0, 0));
        assert_eq!(buf[(1, 1)].bg, TermColor::Rgb(255, 0, 0));
    }

    #[test]
    fn posted_frame_reaches_the_terminal() {
        let terminal = Terminal::new(TestBackend::new(4, 3)).unwrap();
        let surface = TerminalSurface::new(terminal);
        surface.set_status("ready");

        let mut canvas = surface.lock_canvas().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (4, 2));
        canvas.fill(Color::RED);
        surface.unlock_canvas_and_post(canvas);

        let terminal = surface.terminal();
        let buf = terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].bg, TermColor::Rgb(255, 0, 0));
        assert_eq!(buf[(3, 1)].bg, TermColor::Rgb(255, 0, 0));
        // Status bar on the last row.
        assert_eq!(buf[(1, 2)].symbol(), "g");
    }
}
