//! Tickerboard TUI: a live quote board with click-to-sort headers.
//!
//! Layout:
//! 1. Quote table: one row per quote, header shows the sort arrow
//! 2. Status bar: last update, sort, pending refresh, error count
//! 3. Overlays: help, error history, price history chart
//!
//! Quotes refresh on startup, on a timer, on `r`, and after every sort
//! change. Fetching happens on a worker thread; the UI never blocks.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use tickerboard_core::{BoardConfig, HttpQuoteSource};

use crate::app::{AppState, RefreshTrigger};
use crate::worker::WorkerCommand;

#[derive(Parser)]
#[command(name = "tickerboard", about = "Live stock quote board for the terminal")]
struct Args {
    /// Path to a TOML config file. Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root URL of the quote service (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds between automatic refreshes (overrides the config file).
    #[arg(long)]
    interval: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = BoardConfig::resolve(args.config.as_deref())?
        .with_overrides(args.base_url, args.interval)?;
    let log_path = init_logger();
    info!(
        "starting: base_url={} interval={}s log={:?}",
        config.base_url, config.refresh_interval_secs, log_path
    );

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    let source = HttpQuoteSource::new(config.base_url.clone(), config.request_timeout())?;

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(Arc::new(source), cmd_rx, resp_tx)
        .context("failed to spawn worker thread")?;

    let mut app = AppState::new(
        cmd_tx.clone(),
        resp_rx,
        config.base_url.clone(),
        config.refresh_interval(),
        config.history_period,
        Instant::now(),
    );
    app.request_refresh(RefreshTrigger::Startup);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Stop the dispatcher. In-flight fetch threads are not cancelled or
    // joined.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    drop(app);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // 4. Timer
        app.tick(Instant::now());

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to `<cache dir>/tickerboard/tickerboard.log`; the terminal belongs
/// to the UI. Logging stays off if the file cannot be opened.
fn init_logger() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("tickerboard");
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("tickerboard.log");
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Some(path)
}
