use std::env;
use topic_relay::config::{Config, RelayConfig, SinkConfig, SourceConfig};

/// Get test configuration from environment variables
pub fn get_test_config() -> Config {
    // Use TEST_ prefix for test environment variables
    let brokers: Vec<String> = env::var("TEST_KAFKA_BROKERS")
        .unwrap_or_else(|_| "localhost:9092".to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();

    let source = SourceConfig {
        brokers: brokers.clone(),
        topic: format!("test_input_{}", std::process::id()),
        group_id: format!("test_group_{}", std::process::id()),
        auto_offset_reset: "earliest".to_string(),
        tls: None,
        sasl: None,
    };

    let sink = SinkConfig {
        brokers,
        topic: format!("test_output_{}", std::process::id()),
        compression: "none".to_string(), // No compression for tests
        acks: "all".to_string(),
        linger_ms: 0,  // Immediate sending for tests
        batch_size: 1, // Small batches for tests
        message_timeout_ms: 5_000,
        tls: None,
        sasl: None,
    };

    let relay = RelayConfig {
        poll_timeout_ms: 100,
        checkpoint_interval_secs: 2, // Frequent checkpoints for tests
        flush_timeout_secs: 5,
    };

    Config {
        source,
        sink,
        relay,
    }
}
