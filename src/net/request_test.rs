use super::*;
use serde_json::json;

fn body(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).expect("serialize fixture")
}

// =============================================================
// process_response: binary bypass
// =============================================================

#[test]
fn image_content_type_passes_bytes_through_untouched() {
    let bytes = vec![0xff, 0xd8, 0xff, 0xe0, 0x00];
    let processed = process_response(Some("image/jpeg"), bytes.clone()).expect("processed");
    assert_eq!(processed, Processed::Binary(bytes));
}

#[test]
fn image_bypass_never_inspects_envelope_fields() {
    // A JSON-looking body under an image content type must not be parsed.
    let bytes = body(json!({"code": -1, "msg": "ignored"}));
    let processed = process_response(Some("image/png"), bytes.clone()).expect("processed");
    assert_eq!(processed, Processed::Binary(bytes));
}

// =============================================================
// process_response: envelope handling
// =============================================================

#[test]
fn success_envelope_unwraps_to_data() {
    let processed = process_response(
        Some("application/json"),
        body(json!({"code": 1, "msg": "ok", "data": {"id": 1}})),
    )
    .expect("processed");

    assert_eq!(processed, Processed::Data(json!({"id": 1})));
}

#[test]
fn failure_envelope_carries_the_message() {
    let processed = process_response(
        Some("application/json"),
        body(json!({"code": -1, "msg": "bad credentials", "data": null})),
    )
    .expect("processed");

    assert_eq!(processed, Processed::Failure("bad credentials".to_owned()));
}

#[test]
fn failure_envelope_without_msg_yields_empty_message() {
    let processed = process_response(None, body(json!({"code": -1}))).expect("processed");
    assert_eq!(processed, Processed::Failure(String::new()));
}

#[test]
fn success_envelope_without_data_yields_null() {
    let processed =
        process_response(Some("application/json"), body(json!({"code": 1, "msg": "ok"})))
            .expect("processed");
    assert_eq!(processed, Processed::Data(serde_json::Value::Null));
}

#[test]
fn non_envelope_body_is_a_decode_error() {
    let result = process_response(Some("application/json"), b"not json".to_vec());
    assert!(matches!(result, Err(RequestError::Decode(_))));
}

#[test]
fn missing_code_is_a_decode_error() {
    let result = process_response(None, body(json!({"msg": "ok", "data": {}})));
    assert!(matches!(result, Err(RequestError::Decode(_))));
}

// =============================================================
// Envelope wire format
// =============================================================

#[test]
fn envelope_deserializes_all_fields() {
    let envelope: Envelope =
        serde_json::from_value(json!({"code": 1, "msg": "ok", "data": [1, 2]}))
            .expect("deserialize");

    assert_eq!(envelope.code, SUCCESS_CODE);
    assert_eq!(envelope.msg.as_deref(), Some("ok"));
    assert_eq!(envelope.data, json!([1, 2]));
}

#[test]
fn envelope_tolerates_null_msg() {
    let envelope: Envelope =
        serde_json::from_value(json!({"code": 1, "msg": null, "data": {}})).expect("deserialize");
    assert!(envelope.msg.is_none());
}

// =============================================================
// BinaryReply
// =============================================================

#[test]
fn binary_reply_header_lookup_is_case_insensitive() {
    let reply = BinaryReply {
        content_type: "image/jpeg".to_owned(),
        bytes: Vec::new(),
        headers: vec![("x-captcha-key".to_owned(), "key-1".to_owned())],
    };

    assert_eq!(reply.header("X-Captcha-Key"), Some("key-1"));
    assert_eq!(reply.header("x-captcha-key"), Some("key-1"));
    assert!(reply.header("x-other").is_none());
}
