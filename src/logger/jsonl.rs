//! JSONL session log: append-only line-delimited JSON.
//!
//! Each line is a self-contained JSON object. Lines are assembled in
//! memory and written with a single `write_all` so a tailing process
//! never sees partial lines.
//!
//! Fallback chain: configured file path, then stderr with a
//! `[WVIZ-LOG]` prefix, then silent discard — the viewer must never
//! fail because logging failed.

#![allow(missing_docs)]

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::errors::VizError;

/// Severity level for log events. Ordered so a floor comparison can
/// filter entries below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Session event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SessionStart,
    SessionStop,
    DataLoaded,
    DataReloaded,
    Resize,
    Error,
}

/// A single JSONL log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    pub event: EventType,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cases: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: Utc::now().to_rfc3339(),
            event,
            severity,
            path: None,
            cases: None,
            skipped: None,
            cols: None,
            rows: None,
            error_code: None,
            details: None,
        }
    }
}

/// Append-only JSONL logger.
#[derive(Debug, Clone)]
pub struct JsonlLogger {
    path: Option<PathBuf>,
    enabled: bool,
    floor: Severity,
}

impl JsonlLogger {
    /// Logger writing to the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            enabled: true,
            floor: Severity::Info,
        }
    }

    /// Logger that falls back straight to stderr.
    #[must_use]
    pub const fn stderr_only() -> Self {
        Self {
            path: None,
            enabled: true,
            floor: Severity::Info,
        }
    }

    /// Logger that discards everything.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            path: None,
            enabled: false,
            floor: Severity::Info,
        }
    }

    /// Build from the log section of the config file.
    #[must_use]
    pub fn from_config(config: &crate::core::config::LogConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        config
            .path
            .clone()
            .map_or_else(Self::stderr_only, Self::new)
    }

    /// Log everything, even when the config left logging disabled
    /// (events then go to stderr).
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.enabled = true;
        self.floor = Severity::Info;
        self
    }

    /// Suppress everything below error severity.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.floor = Severity::Error;
        self
    }

    pub fn log_simple(&self, event: EventType) {
        self.write(LogEntry::new(event, Severity::Info));
    }

    /// Log a dataset (re)load with its counts.
    pub fn log(&self, event: EventType, path: &Path, cases: usize, skipped: usize) {
        let mut entry = LogEntry::new(
            event,
            if skipped > 0 {
                Severity::Warning
            } else {
                Severity::Info
            },
        );
        entry.path = Some(path.display().to_string());
        entry.cases = Some(cases);
        entry.skipped = Some(skipped);
        self.write(entry);
    }

    pub fn log_resize(&self, cols: u16, rows: u16) {
        let mut entry = LogEntry::new(EventType::Resize, Severity::Info);
        entry.cols = Some(cols);
        entry.rows = Some(rows);
        self.write(entry);
    }

    pub fn log_error(&self, error: &VizError) {
        let mut entry = LogEntry::new(EventType::Error, Severity::Error);
        entry.error_code = Some(error.code().to_owned());
        entry.details = Some(error.to_string());
        self.write(entry);
    }

    fn write(&self, entry: LogEntry) {
        if !self.enabled || entry.severity < self.floor {
            return;
        }
        let Ok(mut line) = serde_json::to_string(&entry) else {
            return;
        };
        line.push('\n');

        if let Some(path) = &self.path
            && let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path)
            && file.write_all(line.as_bytes()).is_ok()
        {
            return;
        }
        eprint!("[WVIZ-LOG] {line}");
    }
}
