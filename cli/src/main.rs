//! Lumen CLI - binary entry point and terminal session management.
//!
//! # Startup Order
//!
//! Failures that make the dashboard pointless halt with a diagnostic BEFORE
//! the terminal is put into raw mode, so the message actually reaches the
//! user:
//!
//! 1. Configuration (a missing API key never becomes an empty credential)
//! 2. IP geolocation (no coordinate, no dashboard)
//! 3. Event store read - NOT fatal; a broken store renders as a broken
//!    store inside the dashboard
//! 4. Terminal session + initial resolution of the default category
//!
//! # Event Loop
//!
//! Draw, poll for input, repeat. A confirmed category selection runs one
//! blocking resolution (network call, then speech) to completion before the
//! next frame; there is no background work and nothing to cancel.

use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use lumen_config::{LumenConfig, Settings};
use lumen_engine::{
    Announcer, App, CommandAnnouncer, EventStore, IpLocator, NullAnnouncer, places,
};
use lumen_tui::Action;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.lumen/logs/lumen.log
    if let Some(config_dir) = lumen_config::config_dir() {
        candidates.push(config_dir.join("logs").join("lumen.log"));
    }

    // Fallback: ./.lumen/logs/lumen.log (useful in constrained environments)
    candidates.push(PathBuf::from(".lumen").join("logs").join("lumen.log"));

    candidates
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode and the alternate screen are restored on every exit path,
/// including panics and early returns, so the terminal stays usable.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = LumenConfig::load().context("could not load config.toml")?;
    let settings =
        Settings::resolve(config.as_ref()).context("dashboard configuration is incomplete")?;

    let location = IpLocator::new()
        .locate()
        .await
        .context("could not determine the host location")?;
    tracing::info!(%location, "Host geolocated");

    // A broken store is shown inside the dashboard, not fatal out here.
    let events = EventStore::read(&settings.db_path, &settings.table);

    let announcer: Box<dyn Announcer> = if settings.speech_enabled {
        match CommandAnnouncer::detect(settings.speech_command.as_deref()) {
            Some(found) => Box::new(found),
            None => Box::new(NullAnnouncer),
        }
    } else {
        Box::new(NullAnnouncer)
    };

    let places_client = places::PlacesClient::new(settings.api_key.clone());
    let mut app = App::new(location, places_client, events, announcer);

    // Resolve the default category up front so the first frame already
    // carries a result.
    app.resolve_selected().await;

    let mut session = TerminalSession::new()?;
    let result = run_app(&mut session.terminal, &mut app).await;
    drop(session);
    result
}

const POLL_INTERVAL: Duration = Duration::from_millis(50);

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|frame| lumen_tui::draw(frame, app))?;

        if !crossterm::event::poll(POLL_INTERVAL)? {
            continue;
        }
        match crossterm::event::read()? {
            Event::Key(key) => match lumen_tui::handle_key(app, key) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::Resolve) => {
                    // One blocking interaction; the UI resumes when the
                    // provider (and any speech) is done.
                    app.resolve_selected().await;
                }
                None => {}
            },
            _ => {}
        }
    }
}
