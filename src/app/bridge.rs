use std::process::Command;

use anyhow::{Context, Result};

#[cfg(test)]
use std::collections::HashMap;

/// The command-line bridge to the device. Listing is executed here; copying
/// is only *described* here (as an argument vector) because the log terminal
/// owns the spawn so it can stream the output live.
pub(crate) trait Bridge: Send + Sync {
    /// Raw listing lines for `dir`: one entry name per line, directories
    /// marked with a trailing slash. Callers treat any error as an empty
    /// directory.
    fn list_dir(&self, dir: &str) -> Result<Vec<String>>;

    /// Argument vector that copies `remote_path` to the local machine.
    fn pull_args(&self, remote_path: &str) -> Vec<String>;
}

#[derive(Debug, Clone)]
pub(crate) struct AdbBridge {
    adb_path: String,
    serial: Option<String>,
}

impl AdbBridge {
    pub(crate) fn new(adb_path: impl Into<String>, serial: Option<String>) -> Self {
        Self {
            adb_path: adb_path.into(),
            serial,
        }
    }

    fn base_args(&self) -> Vec<String> {
        let mut args = vec![self.adb_path.clone()];
        if let Some(serial) = &self.serial {
            args.push("-s".to_string());
            args.push(serial.clone());
        }
        args
    }
}

impl Bridge for AdbBridge {
    fn list_dir(&self, dir: &str) -> Result<Vec<String>> {
        let mut argv = self.base_args();
        argv.extend(["shell", "ls", "-p", dir].map(String::from));
        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .output()
            .with_context(|| format!("run {}", argv.join(" ")))?;
        if !output.status.success() {
            anyhow::bail!("listing exited with {}", output.status);
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    fn pull_args(&self, remote_path: &str) -> Vec<String> {
        let mut argv = self.base_args();
        argv.push("pull".to_string());
        argv.push(remote_path.to_string());
        argv
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct MockBridge {
    listings: std::sync::Mutex<HashMap<String, Vec<String>>>,
    errors: std::sync::Mutex<HashMap<String, String>>,
    /// Prefix prepended to the remote path by `pull_args`; tests that stream
    /// for real point this at a runnable command.
    pull_prefix: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockBridge {
    pub(crate) fn set_listing(&self, dir: &str, result: Result<Vec<String>>) {
        match result {
            Ok(lines) => {
                self.listings.lock().unwrap().insert(dir.to_string(), lines);
            }
            Err(err) => {
                self.errors
                    .lock()
                    .unwrap()
                    .insert(dir.to_string(), err.to_string());
            }
        }
    }

    pub(crate) fn set_pull_prefix(&self, prefix: &[&str]) {
        *self.pull_prefix.lock().unwrap() = prefix.iter().map(|s| s.to_string()).collect();
    }
}

#[cfg(test)]
impl Bridge for MockBridge {
    fn list_dir(&self, dir: &str) -> Result<Vec<String>> {
        if let Some(err) = self.errors.lock().unwrap().get(dir) {
            return Err(anyhow::anyhow!(err.to_string()));
        }
        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(dir)
            .cloned()
            .unwrap_or_default())
    }

    fn pull_args(&self, remote_path: &str) -> Vec<String> {
        let prefix = self.pull_prefix.lock().unwrap();
        let mut argv = if prefix.is_empty() {
            vec!["adb".to_string(), "pull".to_string()]
        } else {
            prefix.clone()
        };
        argv.push(remote_path.to_string());
        argv
    }
}
