use std::io::Write;
use tempfile::NamedTempFile;
use topic_relay::Config;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_minimal_config_with_defaults() {
    let file = write_config(
        r#"
[source]
brokers = ["localhost:9092"]
topic = "test-input"
group_id = "relay-group"

[sink]
brokers = ["localhost:9092"]
topic = "test-output"
"#,
    );

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.source.topic, "test-input");
    assert_eq!(config.source.auto_offset_reset, "earliest");
    assert_eq!(config.sink.topic, "test-output");
    assert_eq!(config.sink.acks, "all");
    assert_eq!(config.sink.compression, "snappy");
    assert!(config.source.tls.is_none());

    // Relay section is optional
    assert_eq!(config.relay.checkpoint_interval_secs, 10);
    assert_eq!(config.relay.poll_timeout_ms, 100);
}

#[test]
fn test_tls_and_relay_sections() {
    let file = write_config(
        r#"
[source]
brokers = ["broker-a:9094", "broker-b:9094"]
topic = "test-input"
group_id = "relay-group"

[source.tls]
ca_cert_path = "/etc/relay/ca.crt"

[sink]
brokers = ["broker-c:9094"]
topic = "test-output"

[sink.tls]
ca_cert_path = "/etc/relay/ca.crt"
verify_hostname = false

[sink.sasl]
username = "relay"
password = "secret"

[relay]
checkpoint_interval_secs = 0
poll_timeout_ms = 250
"#,
    );

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.source.brokers.len(), 2);

    // Hostname verification defaults to enabled
    let source_tls = config.source.tls.as_ref().unwrap();
    assert!(source_tls.verify_hostname);

    // And is only off when explicitly disabled
    let sink_tls = config.sink.tls.as_ref().unwrap();
    assert!(!sink_tls.verify_hostname);

    let sasl = config.sink.sasl.as_ref().unwrap();
    assert_eq!(sasl.mechanism, "PLAIN");

    // 0 disables periodic checkpointing
    assert_eq!(config.relay.checkpoint_interval_secs, 0);
    assert_eq!(config.relay.poll_timeout_ms, 250);
}

#[test]
fn test_missing_required_fields_rejected() {
    let file = write_config(
        r#"
[source]
brokers = ["localhost:9092"]
topic = "test-input"

[sink]
brokers = ["localhost:9092"]
topic = "test-output"
"#,
    );

    // group_id is required on the source
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_rejected() {
    assert!(Config::from_file("/nonexistent/config.toml").is_err());
}
