//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect, Size};

use grid_surface::SurfaceSize;

/// Grid surface on top, one-line status bar at the bottom.
pub struct SurfaceLayout {
    pub grid_area: Rect,
    pub status_area: Rect,
}

impl SurfaceLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // grid surface (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            grid_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Pixel size of the grid surface for a terminal of `size`.
    pub fn surface_size(size: Size) -> SurfaceSize {
        let area = Self::from_area(Rect::new(0, 0, size.width, size.height)).grid_area;
        SurfaceSize::new(u32::from(area.width), u32::from(area.height))
    }
}
