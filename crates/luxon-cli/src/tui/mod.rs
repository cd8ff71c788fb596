//! Main entry point for the TUI dashboard.
//!
//! This module ties together all the TUI components and provides the main
//! event loop for the terminal user interface. It handles:
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The main event loop with input handling and rendering
//! - Graceful shutdown coordination
//!
//! The dashboard owns the terminal, so its logs go to a file instead of
//! stderr (see [`log_path`]).

pub mod app;
pub mod input;
pub mod ui;
pub mod worker;

pub use app::{App, Overlay};
pub use luxon_core::{Command, MonitorUpdate};
pub use worker::MonitorWorker;

use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use luxon_core::{DEFAULT_TEST_VALUE, LightMonitor, StreamOptions};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_POLL_INTERVAL_MS;
use crate::sensor::SensorSource;

/// Settings for a dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub source: SensorSource,
    pub poll_interval: Duration,
    /// Initial slider value.
    pub test_value: f32,
    /// Enter test mode right away.
    pub start_in_test: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            source: SensorSource::default(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            test_value: DEFAULT_TEST_VALUE,
            start_in_test: false,
        }
    }
}

/// Where the dashboard writes its log.
pub fn log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("luxon")
        .join("dashboard.log")
}

/// Send tracing output to [`log_path`].
///
/// `RUST_LOG` is honored unless `verbose` forces debug level.
pub fn init_logging(verbose: bool) -> Result<()> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// Set up the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It:
/// 1. Opens the sensor and spawns the background worker
/// 2. Runs the main event loop
/// 3. Shuts the worker down, which releases the sensor
pub async fn run(options: DashboardOptions) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (update_tx, update_rx) = mpsc::channel::<MonitorUpdate>(64);

    let sensor = options.source.open()?;
    info!(sensor = sensor.name(), "Starting dashboard");
    let monitor = LightMonitor::new(sensor, StreamOptions::with_interval(options.poll_interval));
    let worker = MonitorWorker::new(monitor, cmd_rx, update_tx);
    let worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(update_rx, options.test_value);
    if options.start_in_test {
        let _ = cmd_tx.try_send(Command::EnterTest {
            test_value: app.test_value,
        });
    }

    let mut terminal = setup_terminal()?;

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx).await;

    request_shutdown(cmd_tx);

    restore_terminal()?;

    // Wait for the worker to release the sensor
    let _ = worker_handle.await;

    result
}

/// Ask the worker to stop and close the command channel.
///
/// The worker also stops once the channel closes, so a full command queue
/// cannot keep it alive.
fn request_shutdown(cmd_tx: mpsc::Sender<Command>) {
    if cmd_tx.try_send(Command::Shutdown).is_err() {
        debug!("Command queue full, closing it to stop the worker");
    }
}

/// Main event loop for the TUI.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
) -> Result<()> {
    while !app.should_quit() {
        app.clean_expired_messages();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = input::handle_key(key.code, key.modifiers, app.overlay);
            if let Some(cmd) = input::apply_action(app, action) {
                let _ = command_tx.try_send(cmd);
            }
        }

        // Non-blocking receive of monitor updates
        while let Ok(update) = app.update_rx.try_recv() {
            app.handle_update(update);
        }

        if app.worker_stopped {
            app.should_quit = true;
        }
    }

    Ok(())
}
