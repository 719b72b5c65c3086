use std::borrow::Cow;
use std::time::Duration;

use crate::utils::strings::{fill, text_width};
use crate::utils::time::format_elapsed;
use crate::{HEADER_SYMBOL, SEPARATOR_LEN, SUMMARY_TITLE};

/// A finished start/end pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    /// File of the `end` call.
    pub file: Cow<'static, str>,
    pub label: String,
    pub start_line: u32,
    pub end_line: u32,
    pub elapsed: Duration,
}

impl SummaryRecord {
    pub fn elapsed_str(&self) -> String {
        format_elapsed(self.elapsed)
    }
}

/// Builds one summary row. `msg_allowance` is the widest label plus
/// [`SEPARATOR_LEN`]; the label is padded with dashes up to it.
pub fn format_row(record: &SummaryRecord, msg_allowance: usize) -> String {
    let label_dashes = fill('-', msg_allowance.saturating_sub(text_width(&record.label)));
    format!(
        "{}{}Lines: {}-{}{}{} second(s)",
        record.label,
        label_dashes,
        record.start_line,
        record.end_line,
        fill('-', SEPARATOR_LEN),
        record.elapsed_str()
    )
}

/// Renders the summary table, one log line per item (blank lines are empty
/// strings). Returns `None` when there is nothing to report.
///
/// Records are grouped by file in first-seen order and keep their
/// insertion order inside a group. The table width is the longest row,
/// rounded down to an even number so the title centers evenly.
pub fn render(records: &[SummaryRecord]) -> Option<Vec<String>> {
    let longest_msg = records.iter().map(|r| text_width(&r.label)).max()?;
    let msg_allowance = longest_msg + SEPARATOR_LEN;

    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    for record in records {
        let row = format_row(record, msg_allowance);
        match groups.iter().position(|(file, _)| *file == record.file) {
            Some(i) => groups[i].1.push(row),
            None => groups.push((&*record.file, vec![row])),
        }
    }

    let mut width = groups
        .iter()
        .filter_map(|(_, rows)| rows.iter().map(|r| text_width(r)).max())
        .max()
        .unwrap_or(0);
    if width % 2 == 1 {
        width -= 1;
    }

    let border = fill(HEADER_SYMBOL, width);
    let side = fill(
        HEADER_SYMBOL,
        width.saturating_sub(text_width(SUMMARY_TITLE)) / 2,
    );
    let rule = fill('-', width);

    let mut lines = vec![
        String::new(),
        border.clone(),
        format!("{side}{SUMMARY_TITLE}{side}"),
        border,
    ];
    for (file, rows) in groups {
        lines.push(format!("File: {file}"));
        lines.push(rule.clone());
        lines.extend(rows);
        lines.push(String::new());
        lines.push(String::new());
    }
    Some(lines)
}
