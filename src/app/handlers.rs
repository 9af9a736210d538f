use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::app::notify::{selection_notification, send_desktop_notification};
use crate::model::AppAction;

impl App {
    /// Browser-surface key dispatch. Returns `Ok(true)` to quit. The copy
    /// trigger only queues an action: the flow needs the terminal, which the
    /// main loop owns.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }
        let rows = self.viewport_rows;
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('j') => self.browser.move_down(rows),
            KeyCode::Char('k') => self.browser.move_up(),
            KeyCode::Tab => self.browser.toggle_select(rows),
            KeyCode::Char('h') => {
                self.browser.go_up(rows);
                self.note_listing_error();
            }
            KeyCode::Char('l') => {
                self.browser.enter_directory(rows);
                self.note_listing_error();
            }
            KeyCode::Char('=') => {
                self.browser.go_home(rows);
                self.note_listing_error();
            }
            KeyCode::Char('c') => self.browser.clear_selection(),
            KeyCode::Char('s') => self.notify_selection(),
            KeyCode::Char('o') => self.pending_action = Some(AppAction::RunCopyFlow),
            _ => {}
        }
        Ok(false)
    }

    fn notify_selection(&mut self) {
        let names = self.browser.selected_names();
        let (title, body) = selection_notification(&names);
        send_desktop_notification(&title, &body);
        self.set_status(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bridge::MockBridge;
    use std::sync::Arc;

    fn press(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
    }

    fn app_with_listing() -> App {
        let bridge = Arc::new(MockBridge::default());
        bridge.set_listing(
            "/sdcard/",
            Ok(["Download/", "DCIM/", "a.txt", "b.txt"]
                .map(String::from)
                .to_vec()),
        );
        bridge.set_listing("/sdcard/Download/", Ok(vec!["x.bin".to_string()]));
        App::for_test(bridge, "/sdcard/")
    }

    #[test]
    fn q_quits_and_other_keys_do_not() {
        let mut app = app_with_listing();
        assert!(app.handle_key(press('q')).unwrap());
        assert!(!app.handle_key(press('j')).unwrap());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app_with_listing();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(key).unwrap());
    }

    #[test]
    fn plain_c_clears_the_selection_instead_of_quitting() {
        let mut app = app_with_listing();
        app.browser.highlighted = 2;
        app.browser.toggle_select(24);
        assert!(!app.handle_key(press('c')).unwrap());
        assert!(app.browser.selected.is_empty());
    }

    #[test]
    fn movement_keys_drive_the_cursor() {
        let mut app = app_with_listing();
        app.handle_key(press('j')).unwrap();
        app.handle_key(press('j')).unwrap();
        assert_eq!(app.browser.highlighted, 2);
        app.handle_key(press('k')).unwrap();
        assert_eq!(app.browser.highlighted, 1);
    }

    #[test]
    fn tab_selects_the_highlighted_file() {
        let mut app = app_with_listing();
        app.browser.highlighted = 2;
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE))
            .unwrap();
        assert!(app.browser.selected.contains(&2));
    }

    #[test]
    fn l_and_h_navigate_in_and_out() {
        let mut app = app_with_listing();
        app.handle_key(press('l')).unwrap();
        assert_eq!(app.browser.current_dir, "/sdcard/Download/");
        app.handle_key(press('h')).unwrap();
        assert_eq!(app.browser.current_dir, "/sdcard/");
    }

    #[test]
    fn equals_goes_home() {
        let mut app = app_with_listing();
        app.handle_key(press('l')).unwrap();
        app.handle_key(press('=')).unwrap();
        assert_eq!(app.browser.current_dir, "/sdcard/");
        assert_eq!(app.browser.highlighted, 0);
    }

    #[test]
    fn o_queues_the_copy_flow() {
        let mut app = app_with_listing();
        app.handle_key(press('o')).unwrap();
        assert_eq!(app.pending_action, Some(AppAction::RunCopyFlow));
    }

    #[test]
    fn s_updates_the_status_line() {
        let mut app = app_with_listing();
        app.handle_key(press('s')).unwrap();
        assert_eq!(app.status, "No files selected");
        app.browser.highlighted = 2;
        app.browser.toggle_select(24);
        app.handle_key(press('s')).unwrap();
        assert_eq!(app.status, "Selected (1)");
    }

    #[test]
    fn unmapped_keys_change_nothing() {
        let mut app = app_with_listing();
        app.handle_key(press('z')).unwrap();
        assert_eq!(app.browser.highlighted, 0);
        assert!(app.browser.selected.is_empty());
        assert_eq!(app.pending_action, None);
    }
}
