use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::app::App;
use crate::model::CopyOutcome;
use crate::ui::panels::draw_copy_prompt;

/// The copy flow: confirm, then one fully-streamed pull per target, then the
/// paged viewer. The whole thing is modal; the main loop regains control only
/// when the viewer is dismissed (or the flow short-circuits).
impl App {
    pub(crate) fn run_copy_flow<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<CopyOutcome>
    where
        B::Error: Send + Sync + 'static,
    {
        terminal
            .draw(|frame| draw_copy_prompt(frame))
            .context("draw copy prompt")?;
        let key = read_key()?;
        if key.code != KeyCode::Char('c') {
            return Ok(CopyOutcome::Cancelled);
        }

        let outcome = self.run_copy_targets(terminal)?;
        if matches!(outcome, CopyOutcome::Completed { .. }) {
            self.log.paged_view(terminal, self.viewport_rows)?;
        }
        Ok(outcome)
    }

    /// Resolves targets and streams one copy command per target, in selection
    /// order, each to completion before the next starts.
    pub(crate) fn run_copy_targets<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<CopyOutcome>
    where
        B::Error: Send + Sync + 'static,
    {
        let targets = self.browser.targets_for_copy();
        if targets.is_empty() {
            return Ok(CopyOutcome::NoTargets);
        }
        for name in &targets {
            // Resolved at invocation time; the listing may be long gone by
            // the time a later target runs.
            let remote = format!("{}{}", self.browser.current_dir, name);
            let argv = self.bridge.pull_args(&remote);
            self.log_line(&format!("pull {remote}"));
            self.log.append_and_stream(&argv, terminal)?;
        }
        Ok(CopyOutcome::Completed {
            targets: targets.len(),
        })
    }
}

/// Blocks until a key event arrives, swallowing everything else.
fn read_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read().context("read key")? {
            return Ok(key);
        }
    }
}
