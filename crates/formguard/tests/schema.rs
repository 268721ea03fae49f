//! Integration tests for object schemas.

use formguard::prelude::*;
use formguard::SchemaConfig;
use serde_json::json;

fn signup() -> ObjectSchema {
    ObjectSchema::builder()
        .field("username", formguard::string().min(3))
        .field("age", formguard::integer().min(18))
        .field("email", formguard::email())
        .field("password", formguard::password().min(8).contains_number())
        .field("newsletter", formguard::boolean().nullable())
        .build()
}

#[test]
fn valid_payload_returns_coerced_data() {
    let data = signup()
        .parse_data(&json!({
            "username": "  ada  ",
            "age": "36",
            "email": "ada@example.com",
            "password": "analytical1",
            "password_confirmation": "analytical1"
        }))
        .unwrap();

    assert_eq!(data["username"], json!("ada"));
    assert_eq!(data["age"], json!(36));
    assert_eq!(data["newsletter"], json!(null));
    assert!(!data.contains_key("password_confirmation"));
}

#[test]
fn one_message_per_field() {
    let errors = signup()
        .parse_data(&json!({
            "username": "ada",
            "age": 15,
            "email": "ada@example.com",
            "password": "short"
        }))
        .unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("age"), Some("age must be at least 18."));
    assert_eq!(
        errors.get("password"),
        Some("password must be at least 8 characters long.")
    );
}

#[test]
fn confirmation_mismatch_is_independent() {
    let errors = signup()
        .parse_data(&json!({
            "username": "ada",
            "age": 36,
            "email": "ada@example.com",
            "password": "x",
            "password_confirmation": "y"
        }))
        .unwrap_err();

    assert!(errors.get("password").is_some());
    assert_eq!(errors.get("password_confirmation"), Some("Passwords do not match"));
}

#[test]
fn missing_fields_are_required() {
    let errors = signup().parse_data(&json!({})).unwrap_err();
    assert_eq!(
        errors.field_names(),
        vec!["age", "email", "password", "username"]
    );
    assert_eq!(errors.get("email"), Some("email is required"));
}

#[test]
fn errors_serialize_as_flat_map() {
    let schema = ObjectSchema::builder()
        .field("age", formguard::integer().min(18))
        .build();
    let errors = schema.parse_data(&json!({ "age": 15 })).unwrap_err();
    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        json!({ "age": "age must be at least 18." })
    );
}

#[test]
fn configured_schema_matches_builder() {
    let config = SchemaConfig::from_json(
        r#"{ "fields": { "age": { "type": "integer", "min": 18 } } }"#,
    )
    .unwrap();
    let schema = config.build().unwrap();

    let built = ObjectSchema::builder()
        .field("age", formguard::integer().min(18))
        .build();

    for input in [json!({ "age": 15 }), json!({ "age": 21 }), json!({})] {
        assert_eq!(schema.parse_data(&input), built.parse_data(&input));
    }
}
