//! Terminal host for the grid widget.
//!
//! Every terminal cell is one pixel of the grid surface.  Press the left
//! mouse button on a cell to select it, release to clear it.  Run with
//! `--write-config` to save the effective settings and exit.

mod app;
mod ui;

use std::io::{self, stderr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use grid_surface::config::GridConfig;
use grid_surface::{Color, GridGeometry, GridSurface, SurfaceCallbacks};

use crate::app::event::{spawn_event_reader, AppEvent};
use crate::ui::{layout::SurfaceLayout, terminal::TerminalSurface};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Interactive cell grid in the terminal")]
struct Cli {
    /// Cell width in terminal columns.
    #[arg(long)]
    cell_width: Option<u32>,

    /// Cell height in terminal rows.
    #[arg(long)]
    cell_height: Option<u32>,

    /// Pause between frames, in milliseconds.
    #[arg(long = "frame-ms")]
    frame_ms: Option<u64>,

    /// Colour of a pressed cell (`#RRGGBB`).
    #[arg(long, value_parser = parse_color)]
    selected: Option<Color>,

    /// Colour of an idle cell (`#RRGGBB`).
    #[arg(long, value_parser = parse_color)]
    default: Option<Color>,

    /// Colour behind the cells (`#RRGGBB`).
    #[arg(long, value_parser = parse_color)]
    background: Option<Color>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::parse_hex(s).ok_or_else(|| format!("expected #RRGGBB or #AARRGGBB, got {s:?}"))
}

impl Cli {
    /// Flags win over the config file.
    fn apply(&self, config: &mut GridConfig) {
        if let Some(w) = self.cell_width {
            config.cell_width = w;
        }
        if let Some(h) = self.cell_height {
            config.cell_height = h;
        }
        if let Some(ms) = self.frame_ms {
            config.frame_interval_ms = ms;
        }
        if let Some(c) = self.selected {
            config.palette.selected_cell = c;
        }
        if let Some(c) = self.default {
            config.palette.default_cell = c;
        }
        if let Some(c) = self.background {
            config.palette.background = c;
        }
        config.clamp();
    }
}

fn status_text(geometry: &GridGeometry, last: Option<String>) -> String {
    let mut text = format!(
        "{}×{} cells | press: select | release: clear | q: quit",
        geometry.rows, geometry.columns
    );
    if let Some(last) = last {
        text.push_str(" | ");
        text.push_str(&last);
    }
    text
}

// ───────────────────────────────────────── event loop ────────

async fn run(
    grid: &mut GridSurface<TerminalSurface>,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let size = grid.surface().terminal().size()?;
    grid.surface_created(SurfaceLayout::surface_size(size))?;
    grid.surface().set_status(status_text(&grid.geometry(), None));

    while let Some(event) = events.recv().await {
        match event {
            AppEvent::Pointer(pointer) => {
                if let Some(cell) = grid.on_pointer_event(pointer) {
                    let last = format!("{:?} ({}, {})", pointer.phase, cell.row, cell.col);
                    grid.surface().set_status(status_text(&grid.geometry(), Some(last)));
                }
            }
            AppEvent::Resize(w, h) => {
                let size = SurfaceLayout::surface_size(ratatui::layout::Size::new(w, h));
                grid.surface_changed(size);
                grid.surface().set_status(status_text(&grid.geometry(), None));
            }
            AppEvent::Quit => break,
            AppEvent::Tick => {}
        }
    }

    grid.surface_destroyed()?;
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = GridConfig::load();
    cli.apply(&mut config);

    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let terminal = Terminal::new(backend)?;

    let surface = Arc::new(TerminalSurface::new(terminal));
    let mut grid = GridSurface::new(Arc::clone(&surface))
        .with_cell_size(config.cell_size())
        .with_palette(config.palette)
        .with_frame_interval(config.frame_interval());

    let mut events = spawn_event_reader(Duration::from_millis(100));
    let outcome = run(&mut grid, &mut events).await;
    // The render thread must be gone before the terminal is restored.
    let stopped = grid.stop();

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    {
        let mut terminal = surface.terminal();
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;
    }

    outcome?;
    stopped?;
    Ok(())
}
