//! In-session question history
//!
//! Kept in memory only; nothing is written to disk.

use chrono::{DateTime, Utc};

/// How a question ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Answered with this many rows
    Rows(usize),
    /// Failed with this message
    Failed(String),
}

/// Single history entry
#[derive(Debug, Clone)]
pub struct QueryEntry {
    pub question: String,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u128,
    pub outcome: QueryOutcome,
}

impl QueryEntry {
    pub fn new(question: impl Into<String>, duration_ms: u128, outcome: QueryOutcome) -> Self {
        Self {
            question: question.into(),
            timestamp: Utc::now(),
            duration_ms,
            outcome,
        }
    }

    /// One-line summary like `12ms • 3 rows`
    pub fn summary(&self) -> String {
        match &self.outcome {
            QueryOutcome::Rows(n) => format!("{}ms • {} rows", self.duration_ms, n),
            QueryOutcome::Failed(message) => format!("{}ms • failed: {}", self.duration_ms, message),
        }
    }
}

/// Newest-first list of answered questions
#[derive(Debug, Clone)]
pub struct QueryHistory {
    entries: Vec<QueryEntry>,
    max_entries: usize,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 1000,
        }
    }

    pub fn add_entry(&mut self, entry: QueryEntry) {
        self.entries.insert(0, entry);

        if self.entries.len() > self.max_entries {
            self.entries.truncate(self.max_entries);
        }
    }

    /// Most recent `n` entries
    pub fn last_n(&self, n: usize) -> &[QueryEntry] {
        let end = n.min(self.entries.len());
        &self.entries[..end]
    }

    pub fn total_queries(&self) -> usize {
        self.entries.len()
    }

    /// Text listing for the results viewer
    pub fn to_lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["No questions asked yet".to_string()];
        }

        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{:>3}. [{}] {}  ({})",
                    i + 1,
                    entry.timestamp.format("%H:%M:%S"),
                    entry.question,
                    entry.summary()
                )
            })
            .collect()
    }
}

impl Default for QueryHistory {
    fn default() -> Self {
        Self::new()
    }
}
