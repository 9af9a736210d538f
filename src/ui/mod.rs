use ratatui::Frame;

use crate::app::App;

mod helpers;
pub(crate) mod panels;

/// Main-loop draw: the browser fills the whole screen. The copy prompt, live
/// tail, and log viewer are drawn by their modal flows directly.
pub(crate) fn draw_ui(frame: &mut Frame<'_>, app: &App) {
    panels::draw_browser(frame, app);
}
