use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::app::bridge::{AdbBridge, Bridge};
use crate::app::browser::Browser;
use crate::app::constants::STATUS_READY;
use crate::app::log_terminal::LogTerminal;
use crate::app::logging::prune_log_file;
use crate::model::{AppAction, ConfigFile, ConfigOverrides};
use crate::storage::{config_path, load_or_init_config, log_path};

pub(crate) mod bridge;
pub(crate) mod browser;
pub(crate) mod constants;
pub(crate) mod copy;
pub(crate) mod handlers;
pub(crate) mod log_terminal;
pub(crate) mod logging;
pub(crate) mod notify;

pub(crate) struct App {
    pub(crate) log_path: PathBuf,
    pub(crate) config: ConfigFile,
    pub(crate) bridge: Arc<dyn Bridge>,
    pub(crate) browser: Browser,
    pub(crate) log: LogTerminal,
    pub(crate) status: String,
    pub(crate) pending_action: Option<AppAction>,
    /// Screen rows, read once at startup. Mid-session resizing is out of
    /// scope, so every cursor/scroll computation uses this value.
    pub(crate) viewport_rows: u16,
}

impl App {
    pub(crate) fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let config_path = config_path()?;
        let mut config = load_or_init_config(&config_path)?;
        config.apply_overrides(overrides);

        let log_path = log_path()?;
        prune_log_file(&log_path);

        let bridge: Arc<dyn Bridge> =
            Arc::new(AdbBridge::new(config.adb_path.clone(), config.serial.clone()));
        let browser = Browser::new(bridge.clone(), &config.start_dir);

        let mut app = Self {
            log_path,
            config,
            bridge,
            browser,
            log: LogTerminal::new(),
            status: STATUS_READY.to_string(),
            pending_action: None,
            viewport_rows: 0,
        };
        app.note_listing_error();
        app.log_line(&format!(
            "session started in {} via {}",
            app.browser.current_dir, app.config.adb_path
        ));
        Ok(app)
    }

    pub(crate) fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = rows;
    }

    /// Moves a stashed reload failure into the session log. The browser view
    /// itself stays silent: an empty directory and a failed listing look the
    /// same on screen.
    pub(crate) fn note_listing_error(&mut self) {
        if let Some(err) = self.browser.last_error.take() {
            self.log_line(&format!(
                "listing failed for {}: {err}",
                self.browser.current_dir
            ));
        }
    }
}

#[cfg(test)]
impl App {
    pub(crate) fn for_test(bridge: Arc<dyn Bridge>, start_dir: &str) -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let mut log_path = std::env::temp_dir();
        log_path.push(format!("droidbrowse-app-test-{nanos}.log"));
        let browser = Browser::new(bridge.clone(), start_dir);
        Self {
            log_path,
            config: ConfigFile::default(),
            bridge,
            browser,
            log: LogTerminal::new(),
            status: STATUS_READY.to_string(),
            pending_action: None,
            viewport_rows: 24,
        }
    }
}
