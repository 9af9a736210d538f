use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_START_DIR: &str = "/sdcard/";
pub(crate) const DEFAULT_ADB_PATH: &str = "adb";

/// On-disk configuration. Unknown fields are ignored and missing fields fall
/// back to defaults so old config files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct ConfigFile {
    pub(crate) start_dir: String,
    pub(crate) adb_path: String,
    pub(crate) serial: Option<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            start_dir: DEFAULT_START_DIR.to_string(),
            adb_path: DEFAULT_ADB_PATH.to_string(),
            serial: None,
        }
    }
}

/// One-run overrides collected from the command line; `None` keeps the
/// configured value.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConfigOverrides {
    pub(crate) start_dir: Option<String>,
    pub(crate) adb_path: Option<String>,
    pub(crate) serial: Option<String>,
}

impl ConfigFile {
    pub(crate) fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(start_dir) = &overrides.start_dir {
            self.start_dir = start_dir.clone();
        }
        if let Some(adb_path) = &overrides.adb_path {
            self.adb_path = adb_path.clone();
        }
        if let Some(serial) = &overrides.serial {
            self.serial = Some(serial.clone());
        }
    }
}

/// Work the key handler hands back to the main loop because it needs the
/// terminal (the copy flow runs its own modal draws and key reads).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppAction {
    RunCopyFlow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CopyOutcome {
    Cancelled,
    NoTargets,
    Completed { targets: usize },
}
