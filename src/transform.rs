//! Per-record transforms applied between source and sink.
//!
//! A transform is pure apart from logging: it takes a borrowed record and
//! returns a new record to forward, or [`Outcome::Drop`]. This keeps
//! transforms unit-testable without a live broker.

use crate::record::{Outcome, Record};
use tracing::{debug, warn};

pub trait Transform: Send + Sync {
    fn apply(&self, record: &Record) -> Outcome;
}

/// Parses the payload as UTF-8 JSON and re-encodes it compactly.
///
/// Malformed payloads are dropped with a log line carrying the failing
/// input; the relay keeps running. A re-encode failure likewise drops only
/// the affected record.
pub struct JsonPassthrough;

impl Transform for JsonPassthrough {
    fn apply(&self, record: &Record) -> Outcome {
        let text = match std::str::from_utf8(&record.payload) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    topic = %record.topic,
                    partition = record.partition,
                    offset = record.offset,
                    payload = %record.payload_text(),
                    "Dropping record with non-UTF-8 payload: {}",
                    e
                );
                return Outcome::Drop;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    topic = %record.topic,
                    partition = record.partition,
                    offset = record.offset,
                    payload = %text,
                    "Failed to parse JSON: {}",
                    e
                );
                return Outcome::Drop;
            }
        };

        debug!(
            topic = %record.topic,
            partition = record.partition,
            offset = record.offset,
            "Parsed JSON record"
        );

        match serde_json::to_vec(&value) {
            Ok(payload) => {
                let mut forwarded = Record::new(
                    record.topic.clone(),
                    record.partition,
                    record.offset,
                    payload,
                );
                forwarded.key = record.key.clone();
                forwarded.timestamp_ms = record.timestamp_ms;
                Outcome::Forward(forwarded)
            }
            Err(e) => {
                warn!(
                    topic = %record.topic,
                    partition = record.partition,
                    offset = record.offset,
                    "Failed to re-encode JSON, dropping record: {}",
                    e
                );
                Outcome::Drop
            }
        }
    }
}
