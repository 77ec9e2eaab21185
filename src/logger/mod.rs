//! Session event logging: JSONL append-only with graceful degradation.

pub mod jsonl;

pub use jsonl::{EventType, JsonlLogger, LogEntry, Severity};
