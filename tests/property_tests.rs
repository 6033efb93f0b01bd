//! Property-based tests for the chat relay.
//!
//! These tests use proptest to check message validation and upstream
//! payload construction for arbitrary inputs.

use chat_relay::{
    services::chat_service::{build_payload, extract_message, MAX_TOKENS, MODEL, TEMPERATURE},
    AppError,
};
use proptest::prelude::*;
use serde_json::{json, Value};

/// JSON values that count as an absent message
fn empty_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!(false)),
        Just(json!(0)),
        Just(json!(0.0)),
        Just(json!("")),
        Just(json!([])),
        Just(json!({})),
    ]
}

/// Non-empty JSON values that are not strings
fn non_string_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!(true)),
        any::<i64>().prop_filter("non-zero", |n| *n != 0).prop_map(|n| json!(n)),
        prop::collection::vec(".*", 1..3).prop_map(|v| json!(v)),
        ".*".prop_map(|s| json!({ "text": s })),
    ]
}

proptest! {
    /// Property: any non-empty string message passes validation unchanged
    #[test]
    fn prop_non_empty_message_is_accepted(message in ".+") {
        let body = json!({ "message": message.clone() });
        let extracted = extract_message(&body).unwrap();
        prop_assert_eq!(extracted.as_str(), Some(message.as_str()));
    }

    /// Property: a non-empty message is forwarded whatever its JSON type
    #[test]
    fn prop_non_string_message_is_accepted(value in non_string_value_strategy()) {
        let body = json!({ "message": value.clone() });
        prop_assert_eq!(extract_message(&body).unwrap(), &value);

        let payload = build_payload(&value);
        prop_assert_eq!(&payload.messages[0].content, &value);
    }

    /// Property: empty values are rejected like an absent message
    #[test]
    fn prop_empty_message_is_rejected(value in empty_value_strategy()) {
        let body = json!({ "message": value });
        prop_assert!(matches!(extract_message(&body), Err(AppError::MissingMessage)));
    }

    /// Property: other fields never stand in for a missing message
    #[test]
    fn prop_other_fields_do_not_count(key in "[a-z_]{1,12}", value in ".*") {
        prop_assume!(key != "message");
        let mut fields = serde_json::Map::new();
        fields.insert(key, Value::String(value));
        let body = Value::Object(fields);
        prop_assert!(matches!(extract_message(&body), Err(AppError::MissingMessage)));
    }

    /// Property: the payload always carries exactly one user message with the
    /// inbound text, and fixed model/temperature/max_tokens
    #[test]
    fn prop_payload_shape(message in ".+") {
        let payload = build_payload(&json!(message));

        prop_assert_eq!(payload.model.as_str(), MODEL);
        prop_assert_eq!(payload.temperature, TEMPERATURE);
        prop_assert_eq!(payload.max_tokens, MAX_TOKENS);
        prop_assert_eq!(payload.messages.len(), 1);
        prop_assert_eq!(payload.messages[0].role.as_str(), "user");
        prop_assert_eq!(payload.messages[0].content.as_str(), Some(message.as_str()));
    }

    /// Property: the serialized payload round-trips the message text exactly,
    /// including quotes, escapes, and non-ASCII characters
    #[test]
    fn prop_payload_serialization_preserves_text(message in "\\PC+") {
        let wire = serde_json::to_value(build_payload(&json!(message))).unwrap();

        prop_assert_eq!(wire["messages"][0]["content"].as_str(), Some(message.as_str()));
        prop_assert_eq!(wire["messages"].as_array().map(Vec::len), Some(1));
        prop_assert_eq!(&wire["temperature"], &json!(0.7));
        prop_assert_eq!(&wire["max_tokens"], &json!(1024));
    }
}
