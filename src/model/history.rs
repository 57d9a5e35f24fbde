//! Bounded calculation history.
//!
//! Newest entry first. Inserting beyond [`HISTORY_CAPACITY`] evicts the oldest.
//! In-memory only; nothing survives a restart.

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Maximum number of entries kept in the history.
pub const HISTORY_CAPACITY: usize = 10;

/// One successful evaluation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    expression: String,
    result: String,
    timestamp: DateTime<Local>,
}

impl HistoryEntry {
    /// Entry for `expression` evaluating to `result` at `timestamp`.
    pub fn new(
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            timestamp,
        }
    }

    /// The expression as it was typed (before sanitization).
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Canonical decimal rendering of the result.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Local time of the evaluation.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// Ring of the most recent evaluations, newest at the front.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    /// Empty log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Record an evaluation stamped with the current local time.
    pub fn record(&mut self, expression: impl Into<String>, result: impl Into<String>) {
        self.record_at(expression, result, Local::now());
    }

    /// Record an evaluation with an explicit timestamp.
    pub fn record_at(
        &mut self,
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp: DateTime<Local>,
    ) {
        self.entries
            .push_front(HistoryEntry::new(expression, result, timestamp));
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Look up the entry at `index` (0 is the newest).
    ///
    /// Read-only: selecting an entry never reorders the log.
    pub fn select(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Number of stored entries, at most [`HISTORY_CAPACITY`].
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before the first successful evaluation.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn new_log_is_empty() {
        let log = HistoryLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.select(0).is_none());
    }

    #[test]
    fn record_prepends_newest_first() {
        let mut log = HistoryLog::new();
        log.record_at("1 + 1", "2", ts(0));
        log.record_at("2 + 2", "4", ts(1));

        let expressions: Vec<&str> = log.entries().map(HistoryEntry::expression).collect();
        assert_eq!(expressions, vec!["2 + 2", "1 + 1"]);
    }

    #[test]
    fn eleventh_record_evicts_oldest() {
        let mut log = HistoryLog::new();
        for i in 1..=11 {
            log.record_at(format!("{i} + 0"), i.to_string(), ts(i));
        }

        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.select(0).unwrap().result(), "11", "newest should be first");
        assert_eq!(log.select(9).unwrap().result(), "2", "oldest kept should be 2");
        assert!(
            log.entries().all(|e| e.result() != "1"),
            "first entry should have been evicted"
        );
    }

    #[test]
    fn select_does_not_reorder() {
        let mut log = HistoryLog::new();
        log.record_at("1", "1", ts(0));
        log.record_at("2", "2", ts(1));
        log.record_at("3", "3", ts(2));

        let before: Vec<HistoryEntry> = log.entries().cloned().collect();
        let picked = log.select(2).cloned();
        let after: Vec<HistoryEntry> = log.entries().cloned().collect();

        assert_eq!(picked.map(|e| e.result().to_string()), Some("1".to_string()));
        assert_eq!(before, after);
    }

    #[test]
    fn record_stamps_current_time() {
        let before = Local::now();
        let mut log = HistoryLog::new();
        log.record("2 + 3", "5");
        let after = Local::now();

        let stamp = log.select(0).unwrap().timestamp();
        assert!(stamp >= before && stamp <= after);
    }
}
