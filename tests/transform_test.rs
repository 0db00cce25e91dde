use serde_json::{json, Value};
use topic_relay::{JsonPassthrough, Outcome, Record, Transform};

fn apply_payload(payload: &[u8]) -> Outcome {
    let record = Record::new("test-input", 0, 0, payload.to_vec());
    JsonPassthrough.apply(&record)
}

#[test]
fn test_well_formed_record_round_trips() {
    let outcome = apply_payload(br#"{"id":1,"val":"hi"}"#);

    let forwarded = match outcome {
        Outcome::Forward(record) => record,
        Outcome::Drop => panic!("well-formed JSON must be forwarded"),
    };

    let parsed: Value = serde_json::from_slice(&forwarded.payload).unwrap();
    assert_eq!(parsed, json!({"id": 1, "val": "hi"}));
}

#[test]
fn test_whitespace_normalized_but_structure_preserved() {
    let input = br#"  { "id" : 2 ,  "val" : "hello" }  "#;
    match apply_payload(input) {
        Outcome::Forward(record) => {
            let original: Value = serde_json::from_slice(input).unwrap();
            let forwarded: Value = serde_json::from_slice(&record.payload).unwrap();
            assert_eq!(original, forwarded);
            // Compact re-encoding
            assert!(!record.payload.contains(&b'\n'));
        }
        Outcome::Drop => panic!("expected forward"),
    }
}

#[test]
fn test_malformed_input_never_reaches_sink() {
    for payload in [
        b"not-json".as_slice(),
        b"{\"open\":",
        b"[1, 2,",
        b"\xff\xfe",
        b"",
    ] {
        assert!(
            apply_payload(payload).is_drop(),
            "payload {:?} should be dropped",
            String::from_utf8_lossy(payload)
        );
    }
}

#[test]
fn test_scalar_and_array_payloads_forward() {
    for payload in [
        b"42".as_slice(),
        b"true",
        b"null",
        b"\"plain string\"",
        b"[1,2,3]",
    ] {
        assert!(
            !apply_payload(payload).is_drop(),
            "payload {:?} is valid JSON and should forward",
            String::from_utf8_lossy(payload)
        );
    }
}

#[test]
fn test_transform_does_not_mutate_input() {
    let record = Record::new("test-input", 1, 5, br#"{"a": 1}"#.to_vec());
    let before = record.clone();

    let _ = JsonPassthrough.apply(&record);

    assert_eq!(record, before);
}

#[test]
fn test_deeply_nested_structure_round_trips() {
    let original = json!({
        "order": {
            "id": 981,
            "lines": [
                {"sku": "a-1", "qty": 2, "price": 9.99},
                {"sku": "b-7", "qty": 1, "price": null}
            ],
            "tags": []
        }
    });
    let payload = serde_json::to_vec(&original).unwrap();

    match apply_payload(&payload) {
        Outcome::Forward(record) => {
            let forwarded: Value = serde_json::from_slice(&record.payload).unwrap();
            assert_eq!(original, forwarded);
        }
        Outcome::Drop => panic!("expected forward"),
    }
}
