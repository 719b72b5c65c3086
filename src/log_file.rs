use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DebugError, Result};

/// Append-only text log. Holds no handle: every line is written through a
/// fresh open / exclusive lock / write / close cycle, so several instances
/// may share one file.
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> LogFile {
        LogFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` followed by a newline.
    pub fn append(&self, line: &str) -> Result<()> {
        log::trace!("append to {}: {line}", self.path.display());
        self.write_line(line).map_err(|source| DebugError::LogWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.lock()?;
        let mut data = String::with_capacity(line.len() + 1);
        data.push_str(line);
        data.push('\n');
        file.write_all(data.as_bytes())?;
        file.unlock()
    }
}
