use std::fs;
use std::io::Write;
use std::path::Path;

use crate::app::App;
use crate::app::constants::{
    LOG_MAX_ENTRIES, LOG_RETENTION_DAYS, LOG_SEPARATOR, LOG_TIMESTAMP_FORMAT,
};

impl App {
    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.status = message.clone();
        self.log_line(&message);
    }

    /// Appends a timestamped line to the session log file. The file is an
    /// ambient record only; nothing in the UI reads it back.
    pub(crate) fn log_line(&self, message: &str) {
        let timestamp = chrono::Local::now().format(LOG_TIMESTAMP_FORMAT);
        let line = format!("{timestamp}{LOG_SEPARATOR}{message}");
        if let Some(parent) = self.log_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(mut file) = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
        {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Drops session-log lines older than the retention window and caps the
/// remainder. Lines whose timestamp does not parse are dropped too.
pub(crate) fn prune_log_file(path: &Path) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    let cutoff = chrono::Local::now().naive_local() - chrono::Duration::days(LOG_RETENTION_DAYS);
    let mut kept: Vec<&str> = content
        .lines()
        .filter(|line| {
            line.split_once(LOG_SEPARATOR)
                .and_then(|(timestamp, _)| {
                    chrono::NaiveDateTime::parse_from_str(timestamp, LOG_TIMESTAMP_FORMAT).ok()
                })
                .is_some_and(|parsed| parsed >= cutoff)
        })
        .collect();
    if kept.len() > LOG_MAX_ENTRIES {
        kept = kept.split_off(kept.len() - LOG_MAX_ENTRIES);
    }
    if kept.is_empty() {
        let _ = fs::remove_file(path);
    } else {
        let _ = fs::write(path, kept.join("\n") + "\n");
    }
}
