use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::app::constants::LOG_HEADER_ROWS;
use crate::app::log_terminal::LogTerminal;
use crate::ui::helpers::{display_name, item_style};

const HELP_LINE: &str = "q:quit  j/k:move  l:enter  h:up  =:home  TAB:select  c:clear  s:notify  o:copy";
const LIVE_TAIL_HEADER: &str = "Copy output (live) - the full log opens in the viewer afterwards";
const VIEWER_HEADER: &str = "Log viewer - j/k:line  d/u:half page  g/G:top/bottom  q:back";
const COPY_PROMPT: &str =
    "COPY MODE: press 'c' to copy the selection (or the entry under the cursor), any other key to cancel.";

/// Entry list over a two-line status/help footer. Pure view of the browser
/// state: the scroll window is whatever the browser computed on the last
/// mutation.
pub(crate) fn draw_browser(frame: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(frame.area());
    draw_entry_list(frame, app, layout[0]);
    draw_status_line(frame, app, layout[1]);
    frame.render_widget(Paragraph::new(HELP_LINE), layout[2]);
}

fn draw_entry_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let browser = &app.browser;
    let start = browser.start.min(browser.items.len());
    let end = (start + usize::from(area.height)).min(browser.items.len());
    let lines: Vec<Line> = browser.items[start..end]
        .iter()
        .enumerate()
        .map(|(offset, item)| {
            let idx = start + offset;
            let style = item_style(browser.selected.contains(&idx), idx == browser.highlighted);
            Line::styled(display_name(item, area.width), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_status_line(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status = format!(
        "Dir: {} | Sel: {} | {}",
        app.browser.current_dir,
        app.browser.selected.len(),
        app.status
    );
    frame.render_widget(
        Paragraph::new(status).style(Style::default().add_modifier(Modifier::BOLD)),
        area,
    );
}

/// Single-line confirmation prompt shown before a copy runs.
pub(crate) fn draw_copy_prompt(frame: &mut Frame<'_>) {
    frame.render_widget(Paragraph::new(COPY_PROMPT), frame.area());
}

/// Last lines of the buffer under a one-row header, redrawn after every
/// appended line while a command runs.
pub(crate) fn draw_live_tail(frame: &mut Frame<'_>, log: &LogTerminal) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(LOG_HEADER_ROWS), Constraint::Min(0)].as_ref())
        .split(frame.area());
    frame.render_widget(
        Paragraph::new(LIVE_TAIL_HEADER).style(Style::default().add_modifier(Modifier::BOLD)),
        layout[0],
    );
    let visible = usize::from(layout[1].height);
    let start = log.lines.len().saturating_sub(visible);
    let lines: Vec<Line> = log.lines[start..].iter().map(|l| Line::raw(l.as_str())).collect();
    frame.render_widget(Paragraph::new(lines), layout[1]);
}

/// Full-buffer viewer at an explicit scroll offset.
pub(crate) fn draw_log_viewer(frame: &mut Frame<'_>, log: &LogTerminal, scroll: usize) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(LOG_HEADER_ROWS), Constraint::Min(0)].as_ref())
        .split(frame.area());
    frame.render_widget(
        Paragraph::new(VIEWER_HEADER).style(Style::default().add_modifier(Modifier::BOLD)),
        layout[0],
    );
    let scroll = scroll.min(log.lines.len());
    let end = (scroll + usize::from(layout[1].height)).min(log.lines.len());
    let lines: Vec<Line> = log.lines[scroll..end]
        .iter()
        .map(|l| Line::raw(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bridge::MockBridge;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn buffer_content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with_listing() -> App {
        let bridge = Arc::new(MockBridge::default());
        bridge.set_listing(
            "/sdcard/",
            Ok(["Download/", "DCIM/", "a.txt", "b.txt"]
                .map(String::from)
                .to_vec()),
        );
        App::for_test(bridge, "/sdcard/")
    }

    #[test]
    fn draw_browser_shows_entries_and_footer() {
        let app = app_with_listing();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| draw_browser(frame, &app)).unwrap();
        let content = buffer_content(&terminal);
        assert!(content.contains("Download/"));
        assert!(content.contains("a.txt"));
        assert!(content.contains("Dir: /sdcard/"));
        assert!(content.contains("Sel: 0"));
        assert!(content.contains("TAB:select"));
    }

    #[test]
    fn draw_browser_windows_the_list_by_scroll_offset() {
        let bridge = Arc::new(MockBridge::default());
        bridge.set_listing(
            "/sdcard/",
            Ok((0..30).map(|i| format!("file{i:02}.txt")).collect()),
        );
        let mut app = App::for_test(bridge, "/sdcard/");
        app.browser.start = 10;
        app.browser.highlighted = 10;
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| draw_browser(frame, &app)).unwrap();
        let content = buffer_content(&terminal);
        assert!(!content.contains("file00.txt"));
        assert!(content.contains("file10.txt"));
    }

    #[test]
    fn draw_browser_truncates_wide_names() {
        let bridge = Arc::new(MockBridge::default());
        bridge.set_listing(
            "/sdcard/",
            Ok(vec!["a-name-much-wider-than-the-screen.tar.gz".to_string()]),
        );
        let app = App::for_test(bridge, "/sdcard/");
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| draw_browser(frame, &app)).unwrap();
        let content = buffer_content(&terminal);
        assert!(content.contains("a-name-much-wide..."));
    }

    #[test]
    fn draw_browser_handles_an_empty_listing() {
        let bridge = Arc::new(MockBridge::default());
        let app = App::for_test(bridge, "/sdcard/");
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal.draw(|frame| draw_browser(frame, &app)).unwrap();
        assert!(buffer_content(&terminal).contains("Dir: /sdcard/"));
    }

    #[test]
    fn draw_copy_prompt_smoke() {
        let mut terminal = Terminal::new(TestBackend::new(120, 4)).unwrap();
        terminal.draw(|frame| draw_copy_prompt(frame)).unwrap();
        assert!(buffer_content(&terminal).contains("COPY MODE"));
    }

    #[test]
    fn live_tail_shows_only_the_newest_lines() {
        let mut log = LogTerminal::new();
        log.lines = (0..20).map(|i| format!("line{i:02}")).collect();
        // 6 rows: 1 header + 5 tail lines, so line15..line19 are visible.
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal.draw(|frame| draw_live_tail(frame, &log)).unwrap();
        let content = buffer_content(&terminal);
        assert!(content.contains("Copy output"));
        assert!(!content.contains("line14"));
        assert!(content.contains("line15"));
        assert!(content.contains("line19"));
    }

    #[test]
    fn viewer_shows_the_window_at_the_scroll_offset() {
        let mut log = LogTerminal::new();
        log.lines = (0..20).map(|i| format!("line{i:02}")).collect();
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|frame| draw_log_viewer(frame, &log, 3))
            .unwrap();
        let content = buffer_content(&terminal);
        assert!(content.contains("Log viewer"));
        assert!(!content.contains("line02"));
        assert!(content.contains("line03"));
        assert!(content.contains("line07"));
        assert!(!content.contains("line08"));
    }

    #[test]
    fn viewer_tolerates_an_out_of_range_scroll() {
        let mut log = LogTerminal::new();
        log.lines = vec!["only".to_string()];
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|frame| draw_log_viewer(frame, &log, 99))
            .unwrap();
        assert!(buffer_content(&terminal).contains("Log viewer"));
    }
}
