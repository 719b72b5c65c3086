pub mod config;
pub mod debugger;
pub mod error;
pub mod log_file;
pub mod report;
pub mod timer;
pub mod utils;

pub use debugger::Debugger;
pub use error::{DebugError, Result};
pub use timer::CallSite;

pub const DEFAULT_LABEL: &str = "Default process name";
pub const DEFAULT_LOG_FILE_NAME: &str = "debug.log";

pub const SEPARATOR_LEN: usize = 7;
pub const HEADER_SYMBOL: char = '*';
pub const SUMMARY_TITLE: &str = "      DEBUG INFO SUMMARY      ";
