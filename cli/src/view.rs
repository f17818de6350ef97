//! View model derived from one scan outcome.
//!
//! A fresh `MenuView` is built for every cycle and replaces the previous one
//! wholesale; nothing is carried over between scans.

use portpeek_core::{PortRecord, PortStatus, RecordFilter, ScanOutcome};

/// Status glyph shown in front of each record.
pub fn glyph(status: PortStatus) -> &'static str {
    match status {
        PortStatus::Listening => "🟢",
        PortStatus::Established => "🔵",
    }
}

/// One line of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuLine {
    /// `<glyph> Port <n>: <command>`
    Record(String),
    /// Guidance headline or an empty-list message.
    Notice(String),
    /// Remediation hint.
    Hint(&'static str),
}

impl std::fmt::Display for MenuLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuLine::Record(text) | MenuLine::Notice(text) => f.write_str(text),
            MenuLine::Hint(text) => write!(f, "  {}", text),
        }
    }
}

/// Everything the terminal shows for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub lines: Vec<MenuLine>,
    /// Records shown after filtering.
    pub shown: usize,
    /// Records the scan found.
    pub total: usize,
}

impl MenuView {
    pub fn from_outcome(outcome: &ScanOutcome, filter: &RecordFilter) -> Self {
        let records = outcome.records();
        let filtered = filter.apply(records);

        let mut lines: Vec<MenuLine> = filtered.iter().map(record_line).collect();

        if let Some(guidance) = outcome.guidance() {
            lines.push(MenuLine::Notice(guidance.headline));
            if let Some(hint) = guidance.hint {
                lines.push(MenuLine::Hint(hint));
            }
        } else if filtered.is_empty() {
            lines.push(MenuLine::Notice("No matching ports".to_string()));
        }

        Self {
            lines,
            shown: filtered.len(),
            total: records.len(),
        }
    }

    /// Render as newline-terminated text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }

    /// Footer summarizing the counts, e.g. "Total: 3 ports".
    pub fn summary(&self) -> String {
        if self.shown == self.total {
            format!("Total: {} ports", self.total)
        } else {
            format!("Showing {} of {} ports", self.shown, self.total)
        }
    }
}

fn record_line(record: &PortRecord) -> MenuLine {
    MenuLine::Record(format!("{} {}", glyph(record.status), record.label()))
}
