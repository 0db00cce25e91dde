//! Error types and result handling for topic-relay.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use topic_relay::{Error, Result};
//!
//! fn connect_to_broker() -> Result<()> {
//!     // Simulating a connection error
//!     Err(Error::Connection("broker unreachable".to_string()))
//! }
//!
//! match connect_to_broker() {
//!     Ok(()) => println!("Connected"),
//!     Err(Error::Connection(msg)) => eprintln!("Connection error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for topic-relay operations.
///
/// Fatal variants (`Connection`, `Authentication`, `Delivery`) terminate the
/// relay and propagate to the process exit code. Per-record variants
/// (`Parse`, `Serialization`) are logged where they occur and the offending
/// record is dropped; they never escape the relay loop.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error, from the config file or environment overrides.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Kafka client error reported by librdkafka.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// JSON serialization error when re-encoding a record payload.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed JSON in an inbound record payload.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse
        message: String,
    },

    /// I/O error, typically while checking the CA certificate path.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Broker unreachable, or the TLS material could not be loaded.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Authentication failure against a broker.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A send failed after the client's retry policy was exhausted.
    #[error("Delivery error: {message}")]
    Delivery {
        /// Description of the delivery failure
        message: String,
    },

    /// Graceful shutdown was requested (e.g., via Ctrl+C).
    ///
    /// This is not really an error but uses the error mechanism
    /// to cleanly exit the relay loop.
    #[error("Shutdown requested")]
    Shutdown,
}

impl Error {
    /// Whether this error should terminate the relay process.
    ///
    /// Per-record errors return `false`; the relay logs them and continues
    /// with the next record.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Parse { .. } | Error::Serialization(_))
    }
}

/// A convenient Result type alias for topic-relay operations.
///
/// This is equivalent to `std::result::Result<T, topic_relay::Error>`.
///
/// # Example
///
/// ```rust
/// use topic_relay::Result;
///
/// fn do_something() -> Result<String> {
///     Ok("Success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
