use std::collections::BTreeSet;
use std::sync::Arc;

use crate::app::bridge::Bridge;
use crate::app::constants::BROWSER_FOOTER_ROWS;

/// Navigation and selection state for one remote directory.
///
/// `items` is always `dirs ++ files`: every index below `dirs.len()` is a
/// directory and everything at or above it is a file. The whole state is
/// rebuilt on every reload and the selection never survives one.
pub(crate) struct Browser {
    bridge: Arc<dyn Bridge>,
    pub(crate) start_dir: String,
    pub(crate) current_dir: String,
    pub(crate) dirs: Vec<String>,
    pub(crate) files: Vec<String>,
    pub(crate) items: Vec<String>,
    pub(crate) highlighted: usize,
    pub(crate) start: usize,
    pub(crate) selected: BTreeSet<usize>,
    pub(crate) last_error: Option<String>,
}

impl Browser {
    pub(crate) fn new(bridge: Arc<dyn Bridge>, start_dir: &str) -> Self {
        let start_dir = normalize_dir(start_dir);
        let mut browser = Self {
            bridge,
            current_dir: start_dir.clone(),
            start_dir,
            dirs: Vec::new(),
            files: Vec::new(),
            items: Vec::new(),
            highlighted: 0,
            start: 0,
            selected: BTreeSet::new(),
            last_error: None,
        };
        browser.reload(true, true, 0);
        browser
    }

    /// Re-fetches the listing and rebuilds the item order (directories first,
    /// tool order preserved within each group). A failing bridge degrades to
    /// an empty listing; the error text is stashed for the session log only.
    ///
    /// Without `reset_scroll` the window is shifted up by one viewport of
    /// rows, compensating for the upward navigation this reload follows.
    pub(crate) fn reload(&mut self, reset_cursor: bool, reset_scroll: bool, viewport_height: u16) {
        let lines = match self.bridge.list_dir(&self.current_dir) {
            Ok(lines) => lines,
            Err(err) => {
                self.last_error = Some(err.to_string());
                Vec::new()
            }
        };
        self.dirs = lines.iter().filter(|l| l.ends_with('/')).cloned().collect();
        self.files = lines.iter().filter(|l| !l.ends_with('/')).cloned().collect();
        self.items = self.dirs.iter().chain(self.files.iter()).cloned().collect();

        if reset_cursor {
            self.highlighted = 0;
        } else {
            self.highlighted = self.highlighted.min(self.items.len().saturating_sub(1));
        }

        if reset_scroll {
            self.start = 0;
        } else {
            self.start = self
                .start
                .saturating_sub(list_rows(viewport_height));
        }
        // The window may never begin below the cursor.
        self.start = self.start.min(self.highlighted);

        self.selected.clear();
    }

    /// Moves to the parent directory. The start directory is a soft jail:
    /// like the filesystem root it refuses to go further up, even though the
    /// device has ancestors above it.
    pub(crate) fn go_up(&mut self, viewport_height: u16) {
        if self.current_dir == "/" || self.current_dir == self.start_dir {
            return;
        }
        self.current_dir = parent_dir(&self.current_dir);
        self.reload(false, false, viewport_height);
    }

    pub(crate) fn go_home(&mut self, viewport_height: u16) {
        self.current_dir = self.start_dir.clone();
        self.reload(true, true, viewport_height);
    }

    pub(crate) fn enter_directory(&mut self, viewport_height: u16) {
        let Some(item) = self.items.get(self.highlighted).cloned() else {
            return;
        };
        if !item.ends_with('/') {
            return;
        }
        self.current_dir.push_str(&item);
        self.reload(true, true, viewport_height);
    }

    pub(crate) fn move_down(&mut self, viewport_height: u16) {
        if self.highlighted + 1 < self.items.len() {
            self.highlighted += 1;
            if self.highlighted >= self.start + list_rows(viewport_height) {
                self.start += 1;
            }
        }
    }

    pub(crate) fn move_up(&mut self) {
        if self.highlighted > 0 {
            self.highlighted -= 1;
            if self.highlighted < self.start {
                self.start -= 1;
            }
        }
    }

    /// Flips selection of the highlighted item. Directories are never
    /// selectable; the rule lives here and only here. Adding a selection
    /// auto-advances the cursor (kept as the final statement so the heuristic
    /// stays detachable from the selection logic).
    pub(crate) fn toggle_select(&mut self, viewport_height: u16) {
        if self.items.is_empty() || self.highlighted < self.dirs.len() {
            return;
        }
        if self.selected.remove(&self.highlighted) {
            return;
        }
        self.selected.insert(self.highlighted);
        self.move_down(viewport_height);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Select-or-cursor rule: the selected items (ascending index) when any
    /// exist, else the single highlighted item, else nothing.
    pub(crate) fn targets_for_copy(&self) -> Vec<String> {
        if !self.selected.is_empty() {
            return self
                .selected
                .iter()
                .filter_map(|&idx| self.items.get(idx).cloned())
                .collect();
        }
        match self.items.get(self.highlighted) {
            Some(item) => vec![item.clone()],
            None => Vec::new(),
        }
    }

    pub(crate) fn selected_names(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|&idx| self.items.get(idx).cloned())
            .collect()
    }
}

/// Rows available to the entry list once the status/help footer is reserved.
fn list_rows(viewport_height: u16) -> usize {
    usize::from(viewport_height.saturating_sub(BROWSER_FOOTER_ROWS))
}

fn normalize_dir(dir: &str) -> String {
    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}

fn parent_dir(path: &str) -> String {
    path.trim_end_matches('/')
        .rsplit_once('/')
        .map(|(base, _)| {
            if base.is_empty() {
                "/".to_string()
            } else {
                format!("{base}/")
            }
        })
        .unwrap_or_else(|| "/".to_string())
}
