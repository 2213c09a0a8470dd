//! User configuration — cell size, palette, frame pacing, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/grid-surface/config.toml` (default
//! `~/.config/grid-surface/config.toml`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::{
    color::{Color, Palette},
    grid::CellSize,
};

const CELL_SIZE_RANGE: (u32, u32) = (1, 256);
const MAX_FRAME_INTERVAL_MS: u64 = 1000;

/// Host configuration for the grid widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Cell width in surface pixels (terminal columns for the terminal host).
    pub cell_width: u32,
    /// Cell height in surface pixels (terminal rows for the terminal host).
    pub cell_height: u32,
    /// Pause between rendered frames.
    pub frame_interval_ms: u64,
    pub palette: Palette,
}

impl Default for GridConfig {
    /// Terminal cells are about twice as tall as wide, so 4×2 looks square.
    fn default() -> Self {
        Self {
            cell_width: 4,
            cell_height: 2,
            frame_interval_ms: 16,
            palette: Palette::default(),
        }
    }
}

impl GridConfig {
    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Keep values inside the supported ranges.
    pub fn clamp(&mut self) {
        let (lo, hi) = CELL_SIZE_RANGE;
        self.cell_width = self.cell_width.clamp(lo, hi);
        self.cell_height = self.cell_height.clamp(lo, hi);
        self.frame_interval_ms = self.frame_interval_ms.min(MAX_FRAME_INTERVAL_MS);
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`; a missing or unreadable file means defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    /// Parse the `key = value` format.  Unknown keys and malformed values
    /// are skipped, leaving the default in place.
    pub fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "cell_width" => {
                    if let Ok(v) = value.parse() {
                        config.cell_width = v;
                    }
                }
                "cell_height" => {
                    if let Ok(v) = value.parse() {
                        config.cell_height = v;
                    }
                }
                "frame_interval_ms" => {
                    if let Ok(v) = value.parse() {
                        config.frame_interval_ms = v;
                    }
                }
                "background" => {
                    if let Some(c) = Color::parse_hex(value) {
                        config.palette.background = c;
                    }
                }
                "default_cell" => {
                    if let Some(c) = Color::parse_hex(value) {
                        config.palette.default_cell = c;
                    }
                }
                "selected_cell" => {
                    if let Some(c) = Color::parse_hex(value) {
                        config.palette.selected_cell = c;
                    }
                }
                other => tracing::debug!("ignoring unknown config key {other:?}"),
            }
        }

        config.clamp();
        config
    }

    pub fn serialise(&self) -> String {
        let lines = [
            "# grid-surface configuration".to_string(),
            String::new(),
            "# Cell size in terminal cells".to_string(),
            format!("cell_width = {}", self.cell_width),
            format!("cell_height = {}", self.cell_height),
            String::new(),
            "# Pause between frames (0 = render back to back)".to_string(),
            format!("frame_interval_ms = {}", self.frame_interval_ms),
            String::new(),
            "# Colours: #RRGGBB or #AARRGGBB".to_string(),
            format!("background = \"{}\"", self.palette.background),
            format!("default_cell = \"{}\"", self.palette.default_cell),
            format!("selected_cell = \"{}\"", self.palette.selected_cell),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/grid-surface/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("grid-surface").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(GridConfig::parse_config(""), GridConfig::default());
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = GridConfig::default();
        config.cell_width = 7;
        config.cell_height = 3;
        config.frame_interval_ms = 40;
        config.palette.selected_cell = Color::from_argb(0x80, 1, 2, 3);
        assert_eq!(GridConfig::parse_config(&config.serialise()), config);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let text = "\
            # comment\n\
            [section]\n\
            cell_width = wide\n\
            background = #12\n\
            no_equals_sign\n\
            mystery = 1\n\
            cell_height = 5\n";
        let config = GridConfig::parse_config(text);
        assert_eq!(config.cell_width, GridConfig::default().cell_width);
        assert_eq!(config.palette.background, Palette::default().background);
        assert_eq!(config.cell_height, 5);
    }

    #[test]
    fn values_are_clamped() {
        let text = "cell_width = 0\ncell_height = 9999\nframe_interval_ms = 60000";
        let config = GridConfig::parse_config(text);
        assert_eq!(config.cell_width, 1);
        assert_eq!(config.cell_height, 256);
        assert_eq!(config.frame_interval(), Duration::from_millis(1000));
    }
}
