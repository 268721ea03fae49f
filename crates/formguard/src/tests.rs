//! Property-based tests for the validation model.

#[cfg(test)]
mod property_tests {
    use crate::prelude::*;
    use crate::validators::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    // Strategy for file descriptors around a 5 MB limit
    fn descriptor_strategy() -> impl Strategy<Value = Value> {
        (
            prop_oneof![Just("image/png"), Just("application/pdf")],
            0u64..(10 * 1024 * 1024),
        )
            .prop_map(|(mime, size)| json!({ "type": mime, "size": size }))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Trimmed text is returned and the length rule sees the trimmed length
        #[test]
        fn string_data_is_trimmed(
            core in "[a-z]{0,12}",
            left in " {0,3}",
            right in " {0,3}",
        ) {
            let validator = StringValidator::new().min(3).nullable();
            let result = validator.validate(&json!(format!("{left}{core}{right}")));

            if core.is_empty() {
                prop_assert_eq!(result.unwrap(), None);
            } else if core.len() < 3 {
                prop_assert!(result.is_err());
            } else {
                prop_assert_eq!(result.unwrap(), Some(OneOrMany::One(core)));
            }
        }

        // Any i64 rendered as a string coerces back to itself
        #[test]
        fn integer_string_coercion(n in any::<i64>()) {
            let validator = IntegerValidator::new();
            prop_assert_eq!(validator.validate(&json!(n.to_string())).unwrap(), Some(n));
        }

        // positive() agrees with the sign of the value
        #[test]
        fn positive_matches_sign(n in -1000i64..1000) {
            let validator = IntegerValidator::new().positive();
            prop_assert_eq!(validator.validate(&json!(n)).is_ok(), n > 0);
        }

        // Every failing password rule contributes exactly one error
        #[test]
        fn password_error_count(secret in "[a-zA-Z0-9!@#_ ]{1,16}") {
            let validator = PasswordValidator::new()
                .min(8)
                .contains_number()
                .contains_special_char()
                .contains_uppercase();

            let expected = [
                secret.chars().count() < 8,
                !secret.chars().any(|c| c.is_ascii_digit()),
                !secret.chars().any(|c| SPECIAL_CHARS.contains(c)),
                !secret.chars().any(|c| c.is_ascii_uppercase()),
            ]
            .iter()
            .filter(|failed| **failed)
            .count();

            match validator.validate(&json!(secret)) {
                Ok(_) => prop_assert_eq!(expected, 0),
                Err(errors) => prop_assert_eq!(errors.len(), expected),
            }
        }

        // A batch passes iff every element passes on its own
        #[test]
        fn file_batch_is_all_or_nothing(files in prop::collection::vec(descriptor_strategy(), 1..6)) {
            let validator = FileValidator::new().max_size(5);
            let each_ok = files.iter().all(|f| validator.validate(f).is_ok());
            prop_assert_eq!(validator.validate(&Value::Array(files)).is_ok(), each_ok);
        }

        // validate never mutates the validator
        #[test]
        fn validate_is_idempotent(raw in prop_oneof![
            Just(Value::Null),
            "[ a-z0-9@.]{0,12}".prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
        ]) {
            let validator = EmailValidator::new().max(10);
            prop_assert_eq!(validator.validate(&raw), validator.validate(&raw));

            let schema = ObjectSchema::builder()
                .field("email", EmailValidator::new().max(10))
                .field("age", IntegerValidator::new().min(18))
                .build();
            let data = json!({ "email": raw.clone(), "age": raw });
            prop_assert_eq!(schema.parse_data(&data), schema.parse_data(&data));
        }
    }
}
