use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// Source file and line of an instrumented call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: Cow<'static, str>,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> CallSite {
        CallSite {
            file: file.into(),
            line,
        }
    }

    /// Location of the nearest caller that is not `#[track_caller]` itself.
    #[track_caller]
    pub fn caller() -> CallSite {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(loc: &'static Location<'static>) -> Self {
        CallSite::new(loc.file(), loc.line())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One open `start` awaiting its `end`.
#[derive(Debug, Clone)]
pub struct TimerEntry {
    pub label: String,
    pub site: CallSite,
    pub started_at: DateTime<Local>,
    started: Instant,
}

impl TimerEntry {
    pub fn new(label: impl Into<String>, site: CallSite) -> TimerEntry {
        TimerEntry {
            label: label.into(),
            site,
            started_at: Local::now(),
            started: Instant::now(),
        }
    }

    pub fn start_line(&self) -> u32 {
        self.site.line
    }

    pub fn elapsed_until(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }
}

/// Open timers; `end` always closes the most recently opened one.
#[derive(Debug, Default)]
pub struct TimerStack {
    entries: Vec<TimerEntry>,
}

impl TimerStack {
    pub fn new() -> TimerStack {
        TimerStack::default()
    }

    pub fn push(&mut self, entry: TimerEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<TimerEntry> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&TimerEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::assert_le;
    use pretty_assertions::assert_eq;

    #[track_caller]
    fn tracked() -> CallSite {
        CallSite::caller()
    }

    #[test]
    fn test_caller() {
        let site = CallSite::caller();
        assert_eq!(site, CallSite::new(file!(), line!() - 1));
        let site = tracked();
        assert_eq!(site.line, line!() - 1);
        assert_eq!(site.to_string(), format!("{}:{}", file!(), site.line));
    }

    #[test]
    fn test_lifo() {
        let mut stack = TimerStack::new();
        assert!(stack.is_empty());
        stack.push(TimerEntry::new("A", CallSite::new("a.rs", 1)));
        stack.push(TimerEntry::new("B", CallSite::new("a.rs", 2)));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek().map(|e| e.label.as_str()), Some("B"));

        let b = stack.pop().unwrap();
        assert_eq!((b.label.as_str(), b.start_line()), ("B", 2));
        let a = stack.pop().unwrap();
        assert_eq!((a.label.as_str(), a.start_line()), ("A", 1));
        assert!(stack.pop().is_none());
        assert!(stack.peek().is_none());
    }

    #[test]
    fn test_elapsed() {
        let entry = TimerEntry::new("A", CallSite::new("a.rs", 1));
        let now = Instant::now();
        let elapsed = entry.elapsed_until(now);
        assert_le!(elapsed, now.elapsed() + Duration::from_secs(1));
        // an instant taken before the entry saturates to zero
        if let Some(before) = now.checked_sub(Duration::from_secs(5)) {
            assert_eq!(entry.elapsed_until(before), Duration::ZERO);
        }
    }
}
