// src/pipeline/event_log.rs
//
// Bounded in-memory record of status transitions. Persistence is left to
// whoever consumes the entries.

use super::status_monitor::{LogLevel, StatusTransition};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// "[14:03:27] CRITICAL: Status Change: ..."
    pub fn display_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.level.as_str(),
            self.message
        )
    }
}

pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, transition: &StatusTransition) {
        self.record_at(Local::now(), transition.level, transition.message.clone());
    }

    pub fn record_at(&mut self, timestamp: DateTime<Local>, level: LogLevel, message: String) {
        if self.entries.len() >= self.capacity {
            debug!("Event log full ({} entries), dropping oldest", self.capacity);
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            timestamp,
            level,
            message,
        });
    }

    /// Newest first
    pub fn recent(&self, count: usize) -> Vec<String> {
        self.entries
            .iter()
            .rev()
            .take(count)
            .map(LogEntry::display_line)
            .collect()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn drain(&mut self) -> Vec<LogEntry> {
        self.entries.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
