//! Result log, newest first, capped.

use crate::event::{WinnerEvent, WinnerSink};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    /// Local wall-clock time, "HH:MM".
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit:   usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self { entries: VecDeque::new(), limit }
    }

    /// Restore saved entries, dropping any beyond the limit.
    pub fn from_entries(entries: impl IntoIterator<Item = HistoryEntry>, limit: usize) -> Self {
        let mut entries: VecDeque<HistoryEntry> = entries.into_iter().collect();
        entries.truncate(limit);
        Self { entries, limit }
    }

    pub fn record(&mut self, text: impl Into<String>, at: DateTime<Local>) {
        self.entries.push_front(HistoryEntry {
            text: text.into(),
            date: at.format("%H:%M").to_string(),
        });
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl WinnerSink for History {
    fn on_winner(&mut self, winner: &WinnerEvent) {
        self.record(format!("Wheel: {}", winner.name), Local::now());
    }
}
