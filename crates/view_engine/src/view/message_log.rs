//! Scrolling message log exposed to templates through a [`ValueMap`]
//!
//! Templates show log lines through plain placeholders keyed `log_0`,
//! `log_1`, ... (oldest first) or `log_last1`, `log_last2`, ... (newest
//! first).

use super::value_map::ValueMap;

/// Append-only list of message lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    lines: Vec<String>,
}

impl MessageLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Drop all lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines, oldest first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write `log_0 .. log_{max_lines-1}`, oldest first; missing lines are blank
    pub fn apply_full(&self, map: &mut ValueMap, max_lines: usize) {
        for index in 0..max_lines {
            let value = self.lines.get(index).map_or("", String::as_str);
            map.set(format!("log_{index}"), value);
        }
    }

    /// Write `log_last1 .. log_last{count}`, newest first; missing lines are blank
    pub fn apply_last(&self, map: &mut ValueMap, count: usize) {
        for index in 0..count {
            let value = self
                .lines
                .len()
                .checked_sub(index + 1)
                .map_or("", |pos| self.lines[pos].as_str());
            map.set(format!("log_last{}", index + 1), value);
        }
    }
}
