//! Terminal tile scroller (default binary).
//!
//! Walks a camera over a tile map with the keyboard. The tile buffer is refreshed
//! incrementally every frame and shown either as the visible screen or as the whole
//! wrap-around buffer. Settings come from `TILE_SCROLL_*` environment variables.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tile_scroll::config::DemoConfig;
use tile_scroll::core::{TileBuffer, TileMap, Viewport};
use tile_scroll::input::{handle_key_event, should_quit, HeldInput};
use tile_scroll::term::{FrameBuffer, ScrollStatus, ScrollView, TermSize, TerminalRenderer};
use tile_scroll::types::{ScrollAction, TICK_MS};

fn main() -> Result<()> {
    let config = DemoConfig::from_env();
    let _log_guard = match &config.log_path {
        Some(path) => Some(init_logging(path)?),
        None => None,
    };
    tracing::info!(?config, "starting tile scroller");

    // Load before touching the terminal so errors print normally.
    let map = config.load_map()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &map);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}

/// Send tracing output to `path`. A TUI owns stderr, so there is no console layer.
fn init_logging(path: &Path) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn run(term: &mut TerminalRenderer, config: &DemoConfig, map: &TileMap) -> Result<()> {
    let viewport_config = config.viewport_config();
    let mut vram = TileBuffer::new(
        viewport_config.horizontal.buffer_tiles,
        viewport_config.vertical.buffer_tiles,
    );
    let mut viewport = Viewport::init(map, viewport_config, &mut vram)?;

    let mut view = ScrollView::new(viewport_config);
    let mut input = HeldInput::new();
    let mut status = ScrollStatus {
        mode: config.mode,
        camera: viewport.camera(),
        total_paints: vram.paint_count(),
        ..ScrollStatus::default()
    };

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&vram, &status, TermSize::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        input.handle_key_press(key.code);

                        if key.kind == KeyEventKind::Press {
                            match handle_key_event(key) {
                                Some(ScrollAction::ToggleBufferView) => {
                                    view.toggle_view_mode();
                                    tracing::debug!(view = ?view.view_mode(), "view toggled");
                                }
                                Some(ScrollAction::JumpHome) => {
                                    input.reset();
                                    let cells = viewport.jump_to(0, 0, &mut vram);
                                    status.strips = 0;
                                    status.cells = cells;
                                    tracing::info!(cells, "jumped to map origin");
                                }
                                _ => {}
                            }
                        }
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let (dx, dy) = input.sample().delta(config.speed);
            if dx != 0 || dy != 0 {
                viewport.move_by(dx, dy);
                let report = viewport.refresh(&mut vram);
                status.strips = report.strips().len() as u8;
                status.cells = report.cells_painted();
            }
            status.camera = viewport.camera();
            status.total_paints = vram.paint_count();
        }
    }
}
