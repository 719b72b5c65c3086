use std::path::PathBuf;

use crate::DEFAULT_LOG_FILE_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_file: PathBuf,
}

impl Config {
    pub fn new(log_file: impl Into<PathBuf>) -> Config {
        Config {
            log_file: log_file.into(),
        }
    }
}

impl Default for Config {
    /// `debug.log` inside the system temp directory.
    fn default() -> Self {
        Config::new(std::env::temp_dir().join(DEFAULT_LOG_FILE_NAME))
    }
}
