use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;

use crate::config::Config;
use crate::error::{DebugError, Result};
use crate::log_file::LogFile;
use crate::report::{self, SummaryRecord};
use crate::timer::{CallSite, TimerEntry, TimerStack};
use crate::utils::time::{format_elapsed, format_timestamp};
use crate::DEFAULT_LABEL;

/// Marks the start and end of named operations, appending a line per event
/// to a log file, and writes a per-file summary of the finished ones.
///
/// ```no_run
/// let mut dbg = debug_timer::Debugger::with_log_file("/tmp/debug.log");
/// dbg.start(Some("load"))?;
/// dbg.end(None)?;
/// dbg.summary()?;
/// # Ok::<(), debug_timer::DebugError>(())
/// ```
///
/// Timers nest: `end` always closes the most recently started timer that is
/// still open. Not meant to be shared between threads.
#[derive(Debug)]
pub struct Debugger {
    log: LogFile,
    timers: TimerStack,
    records: Vec<SummaryRecord>,
}

impl Debugger {
    pub fn new(config: Config) -> Debugger {
        log::debug!("debug log: {}", config.log_file.display());
        Debugger {
            log: LogFile::new(config.log_file),
            timers: TimerStack::new(),
            records: Vec::new(),
        }
    }

    pub fn with_log_file(path: impl Into<PathBuf>) -> Debugger {
        Debugger::new(Config::new(path))
    }

    pub fn log_file(&self) -> &Path {
        self.log.path()
    }

    /// Finished timers in the order they were closed.
    pub fn records(&self) -> &[SummaryRecord] {
        &self.records
    }

    pub fn open_timers(&self) -> usize {
        self.timers.len()
    }

    /// Opens a timer at the caller's location. Without a label the
    /// [`DEFAULT_LABEL`] placeholder is used.
    #[track_caller]
    pub fn start(&mut self, label: Option<&str>) -> Result<()> {
        self.start_at(label, CallSite::caller())
    }

    pub fn start_at(&mut self, label: Option<&str>, site: CallSite) -> Result<()> {
        let entry = TimerEntry::new(label.unwrap_or(DEFAULT_LABEL), site);
        self.write_to_logs(&format!(
            "{} | {} | Line {} | START: {}",
            format_timestamp(&entry.started_at),
            entry.site.file,
            entry.site.line,
            entry.label
        ))?;
        log::debug!("start '{}' at {}", entry.label, entry.site);
        self.timers.push(entry);
        Ok(())
    }

    /// Closes the most recently opened timer at the caller's location.
    ///
    /// Without a label (or with [`DEFAULT_LABEL`]) the label given to the
    /// matching `start` is reused. Fails with [`DebugError::NoOpenTimer`]
    /// when nothing is open.
    #[track_caller]
    pub fn end(&mut self, label: Option<&str>) -> Result<()> {
        self.end_at(label, CallSite::caller())
    }

    pub fn end_at(&mut self, label: Option<&str>, site: CallSite) -> Result<()> {
        let now = Instant::now();
        let ended_at = Local::now();
        let Some(entry) = self.timers.peek() else {
            log::warn!("end at {site} without an open timer");
            return Err(DebugError::NoOpenTimer);
        };
        let label = match label {
            Some(l) if l != DEFAULT_LABEL => l.to_string(),
            _ => entry.label.clone(),
        };
        let start_line = entry.start_line();
        let elapsed = entry.elapsed_until(now);

        self.write_to_logs(&format!(
            "{} | {} | Line {} | END: {}. Took {} second(s)",
            format_timestamp(&ended_at),
            site.file,
            site.line,
            label,
            format_elapsed(elapsed)
        ))?;
        // popped only once the line is written
        self.timers.pop();
        log::debug!("end '{label}' at {site} in {elapsed:.2?}");

        self.records.push(SummaryRecord {
            file: site.file,
            label,
            start_line,
            end_line: site.line,
            elapsed,
        });
        Ok(())
    }

    /// Summary table lines for the records so far, `None` if there are none.
    pub fn render_summary(&self) -> Option<Vec<String>> {
        report::render(&self.records)
    }

    /// Appends the summary table to the log. Does nothing when no timer has
    /// been closed yet.
    pub fn summary(&self) -> Result<()> {
        let Some(lines) = self.render_summary() else {
            log::debug!("no finished timers, summary skipped");
            return Ok(());
        };
        for line in &lines {
            self.write_to_logs(line)?;
        }
        log::debug!(
            "summary of {} records written to {}",
            self.records.len(),
            self.log.path().display()
        );
        Ok(())
    }

    pub fn write_to_logs(&self, line: &str) -> Result<()> {
        self.log.append(line)
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Debugger::new(Config::default())
    }
}
