//! ticonv CLI - Binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`ticonv_engine`] (application state) and [`ticonv_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed
//! cleanup.
//!
//! ```text
//! main() -> Cli::parse() -> Settings::resolve()
//!             |
//!             +-- curate    -> TerminalSession::new() -> run_app() -> App + TUI
//!             +-- convert   -> batch generate with fallback colors
//!             +-- check     -> parse report
//!             +-- plaintext -> LaTeX/unicode filter
//! ```
//!
//! # Event Loop
//!
//! The interactive loop is synchronous: render, block on the next terminal
//! event, apply it, repeat. Every session transition finishes before the next
//! event is read.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ticonv_engine::{App, Settings, SettingsOverrides, TiconvConfig, ticonv_dir};
use ticonv_tui::{draw, handle_events};

#[derive(Parser)]
#[command(name = "ticonv", version)]
#[command(about = "Convert graphing-calculator equations into TI-BASIC programs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Config file to use instead of ~/.ticonv/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Run input lines through the LaTeX/unicode plaintext filter first
    #[arg(long, global = true)]
    plaintext: bool,
    /// File that receives lines that are not equations
    #[arg(long, global = true)]
    rejects: Option<PathBuf>,
    /// Directory for generated program files
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Step through equations and assign colors (default)
    Curate {
        /// Equation file, one `y = expression {constraint}` per line
        input: Option<PathBuf>,
    },
    /// Generate programs without prompting; every equation gets BLACK
    Convert {
        /// Equation file
        input: Option<PathBuf>,
    },
    /// Parse only: list equations with their kind and the rejected lines
    Check {
        /// Equation file
        input: Option<PathBuf>,
    },
    /// Convert LaTeX/unicode equation lines to plain text
    Plaintext {
        /// File to convert
        input: PathBuf,
        /// Output file
        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_ticonv_log_file();

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

fn open_ticonv_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in ticonv_log_file_candidates() {
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

fn ticonv_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.ticonv/logs/ticonv.log
    if let Some(dir) = ticonv_dir() {
        candidates.push(dir.join("logs").join("ticonv.log"));
    }

    // Fallback: ./.ticonv/logs/ticonv.log
    candidates.push(PathBuf::from(".ticonv").join("logs").join("ticonv.log"));

    candidates
}

/// Explicit `--config` must load; the default location is best-effort.
fn load_config(explicit: Option<&PathBuf>) -> Result<Option<TiconvConfig>> {
    match explicit {
        Some(path) => TiconvConfig::load_from(path)
            .map(Some)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(TiconvConfig::load().ok().flatten()),
    }
}

/// Terminal state for the interactive session.
///
/// Enables raw mode, bracketed paste and the alternate screen; all of it is
/// restored on drop, including after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen, DisableBracketedPaste);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let input = match &cli.command {
        None | Some(Commands::Plaintext { .. }) => None,
        Some(Commands::Curate { input } | Commands::Convert { input } | Commands::Check { input }) => {
            input.clone()
        }
    };
    let settings = Settings::resolve(
        config.as_ref(),
        SettingsOverrides {
            input,
            rejects: cli.rejects,
            out_dir: cli.out_dir,
            plaintext: cli.plaintext,
        },
    );

    match cli.command {
        None | Some(Commands::Curate { .. }) => curate(&settings),
        Some(Commands::Convert { .. }) => {
            let summary = commands::convert(&settings)?;
            println!("{summary}");
            Ok(())
        }
        Some(Commands::Check { .. }) => {
            let report = commands::check(&settings)?;
            print!("{report}");
            Ok(())
        }
        Some(Commands::Plaintext { input, output }) => {
            let count = commands::plaintext(&input, &output)?;
            println!("Plaintext written to {} ({count} lines)", output.display());
            Ok(())
        }
    }
}

fn curate(settings: &Settings) -> Result<()> {
    let session = commands::load_session(settings)?;
    let mut app = App::new(session.session, settings)
        .with_source(settings.input.clone(), session.rejected);

    let run_result = {
        let mut terminal = TerminalSession::new()?;
        run_app(&mut terminal.terminal, &mut app)
    };

    if let Err(err) = run_result {
        eprintln!("Error: {err:?}");
    }

    let view = app.view();
    println!(
        "Processed {}/{} equations, {} colored.",
        view.processed, view.total, view.assigned
    );
    Ok(())
}

fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if handle_events(app)? {
            return Ok(());
        }
    }
}
