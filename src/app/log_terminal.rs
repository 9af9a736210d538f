use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::app::constants::STREAM_POLL_INTERVAL;
use crate::ui::panels::{draw_live_tail, draw_log_viewer};

/// Append-only output log. Grows for the lifetime of the process; the live
/// tail renders its end while a command runs and the paged viewer scrolls
/// over all of it afterwards.
pub(crate) struct LogTerminal {
    pub(crate) lines: Vec<String>,
}

impl LogTerminal {
    pub(crate) fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Records the invocation line, runs the command, and appends its output
    /// as it arrives, redrawing the live tail after every line.
    ///
    /// One reader thread per output channel feeds a single channel of lines,
    /// so stdout/stderr interleave in arrival order (best effort, no global
    /// order). The bounded `recv_timeout` lets the loop notice process exit
    /// even when no output arrives. Exit status is not recorded: whatever the
    /// tool printed is the whole story the viewer gets.
    pub(crate) fn append_and_stream<B: Backend>(
        &mut self,
        argv: &[String],
        terminal: &mut Terminal<B>,
    ) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        self.lines.push(format!("$ {}", argv.join(" ")));
        self.draw_tail(terminal)?;

        let (program, args) = argv.split_first().context("empty command")?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn {program}"))?;

        let (tx, rx) = mpsc::channel();
        if let Some(stdout) = child.stdout.take() {
            spawn_line_reader(stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_line_reader(stderr, tx.clone());
        }
        drop(tx);

        loop {
            match rx.recv_timeout(STREAM_POLL_INTERVAL) {
                Ok(line) => {
                    self.lines.push(line);
                    self.draw_tail(terminal)?;
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if child.try_wait().context("poll child")?.is_some() {
                        // Exited with nothing readable for a full poll
                        // interval; pick up lines that raced in and stop.
                        while let Ok(line) = rx.try_recv() {
                            self.lines.push(line);
                            self.draw_tail(terminal)?;
                        }
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    // Both channels hit end-of-stream.
                    child.wait().context("wait for child")?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Modal scrollable viewer over the full buffer, entered at the bottom.
    /// Blocks until dismissed; no browser keys are processed while active.
    pub(crate) fn paged_view<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        viewport_height: u16,
    ) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        let visible = viewer_rows(viewport_height);
        if visible == 0 {
            return Ok(());
        }
        let mut scroll = self.lines.len().saturating_sub(visible);
        loop {
            terminal.draw(|frame| draw_log_viewer(frame, self, scroll))?;
            let Event::Key(key) = event::read().context("read key")? else {
                continue;
            };
            if key.code == KeyCode::Char('q') {
                return Ok(());
            }
            scroll = apply_viewer_key(key.code, scroll, self.lines.len(), visible);
        }
    }

    fn draw_tail<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        terminal
            .draw(|frame| draw_live_tail(frame, self))
            .context("draw live tail")?;
        Ok(())
    }
}

/// Scroll transition for one viewer key, clamped to
/// `[0, max(0, total - visible)]`.
pub(crate) fn apply_viewer_key(
    code: KeyCode,
    scroll: usize,
    total: usize,
    visible: usize,
) -> usize {
    let max = total.saturating_sub(visible);
    match code {
        KeyCode::Char('j') => (scroll + 1).min(max),
        KeyCode::Char('k') => scroll.saturating_sub(1),
        KeyCode::Char('d') => (scroll + visible / 2).min(max),
        KeyCode::Char('u') => scroll.saturating_sub(visible / 2),
        KeyCode::Char('g') => 0,
        KeyCode::Char('G') => max,
        _ => scroll,
    }
}

/// Lines visible in the viewer below its single header row.
pub(crate) fn viewer_rows(viewport_height: u16) -> usize {
    usize::from(viewport_height.saturating_sub(crate::app::constants::LOG_HEADER_ROWS))
}

fn spawn_line_reader<R: Read + Send + 'static>(stream: R, tx: mpsc::Sender<String>) {
    std::thread::spawn(move || {
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}
