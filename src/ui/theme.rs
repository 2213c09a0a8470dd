//! Terminal styles and colour conversion.

use ratatui::style::{Color as TermColor, Modifier, Style};

use grid_surface::Color;

/// Central theme for the terminal chrome around the grid.
pub struct Theme;

impl Theme {
    pub fn status_bar_style() -> Style {
        Style::default().bg(TermColor::DarkGray).fg(TermColor::White)
    }

    pub fn status_cell_style() -> Style {
        Style::default()
            .bg(TermColor::DarkGray)
            .fg(TermColor::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    /// Fully transparent pixels fall back to the terminal's own background.
    pub fn terminal_color(color: Color) -> TermColor {
        if color.alpha() == 0 {
            TermColor::Reset
        } else {
            TermColor::Rgb(color.red(), color.green(), color.blue())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_rgb_and_transparent() {
        assert_eq!(Theme::terminal_color(Color::from_rgb(1, 2, 3)), TermColor::Rgb(1, 2, 3));
        assert_eq!(Theme::terminal_color(Color::TRANSPARENT), TermColor::Reset);
    }
}
