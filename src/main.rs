use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

mod app;
mod model;
mod storage;
mod ui;

use app::App;
use app::constants::{STATUS_COPY_CANCELLED, STATUS_NOTHING_TO_COPY};
use model::{AppAction, ConfigOverrides, CopyOutcome};

/// Browse an Android device over adb, multi-select entries, and pull them to
/// the local machine while watching the tool's output live.
#[derive(Debug, Parser)]
#[command(name = "droidbrowse", version, about)]
struct Cli {
    /// Remote directory to start in; also the upper navigation boundary
    #[arg(long)]
    start_dir: Option<String>,

    /// adb binary to invoke
    #[arg(long)]
    adb: Option<String>,

    /// Device serial, passed to adb as -s
    #[arg(short, long)]
    serial: Option<String>,
}

/// Restores the terminal on every exit path, panics included.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = io::stdout().flush();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        start_dir: cli.start_dir,
        adb_path: cli.adb,
        serial: cli.serial,
    };
    let mut app = App::load(&overrides)?;

    enable_raw_mode().context("enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("enter alternate screen")?;
    let _guard = TerminalGuard;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    run_app(&mut terminal, &mut app)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Screen size is read once; mid-session resizing is not handled.
    let (_cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    app.set_viewport_rows(rows);

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, app))?;

        let Event::Key(key) = event::read().context("read key")? else {
            continue;
        };
        if app.handle_key(key)? {
            return Ok(());
        }

        if let Some(action) = app.pending_action.take() {
            match action {
                AppAction::RunCopyFlow => {
                    let outcome = app.run_copy_flow(terminal)?;
                    app.browser.clear_selection();
                    match outcome {
                        CopyOutcome::Cancelled => app.set_status(STATUS_COPY_CANCELLED),
                        CopyOutcome::NoTargets => app.set_status(STATUS_NOTHING_TO_COPY),
                        CopyOutcome::Completed { targets } => {
                            app.set_status(format!("Copied {targets} item(s)"));
                        }
                    }
                }
            }
        }
    }
}
