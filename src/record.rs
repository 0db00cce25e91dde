use serde::{Deserialize, Serialize};

/// A single record pulled from the source topic.
///
/// The payload is opaque bytes; for the JSON pass-through transform it is
/// expected to be UTF-8 JSON text. A record is immutable once constructed:
/// transforms produce a new record rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<Vec<u8>>,
    pub payload: Vec<u8>,
    /// Broker-assigned timestamp in milliseconds, when available.
    pub timestamp_ms: Option<i64>,
}

impl Record {
    pub fn new(topic: impl Into<String>, partition: i32, offset: i64, payload: Vec<u8>) -> Self {
        Self {
            topic: topic.into(),
            partition,
            offset,
            key: None,
            payload,
            timestamp_ms: None,
        }
    }

    pub fn with_key(mut self, key: Vec<u8>) -> Self {
        self.key = Some(key);
        self
    }

    /// Payload as UTF-8 text, lossy for diagnostics.
    pub fn payload_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

/// Result of applying a transform to a record.
///
/// Drop is a first-class signal rather than a nullable sentinel, so an
/// intentionally empty payload is never confused with a discarded record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Forward this record to the sink.
    Forward(Record),
    /// Discard the record; nothing reaches the sink.
    Drop,
}

impl Outcome {
    pub fn is_drop(&self) -> bool {
        matches!(self, Outcome::Drop)
    }
}
