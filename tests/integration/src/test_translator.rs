//! End-to-end translation scenarios.

use dynamap_core::error::TranslationError;
use dynamap_core::expression::{Translator, UpdateDescription, UpdateExpr};
use dynamap_model::Value;

use crate::user_metadata;

#[test]
fn test_should_translate_single_assignment() {
    let update = UpdateDescription::new().set("name", "x");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    assert_eq!(result.expression, "SET #a0 = :p0");
    assert_eq!(result.attribute_names.len(), 1);
    assert_eq!(result.attribute_names["#a0"], "name");
    assert_eq!(result.parameters.len(), 1);
    assert_eq!(result.parameters[0].placeholder, ":p0");
    assert_eq!(result.parameters[0].value, Value::string("x"));
}

#[test]
fn test_should_use_native_increment_for_unformatted_number() {
    let update = UpdateDescription::new().increment("score", 10);
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    assert_eq!(result.expression, "ADD #a0 :p0");
    assert_eq!(result.parameters[0].value.as_n(), Some("10"));
}

#[test]
fn test_should_use_path_arithmetic_for_formatted_number() {
    let update = UpdateDescription::new().increment("balance", 10);
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    assert_eq!(result.expression, "SET #a0 = #a0 + :p0");
    assert_eq!(result.parameters[0].value.as_n(), Some("10.00"));
}

#[test]
fn test_should_render_remove_without_parameters() {
    let update = UpdateDescription::new().remove("description");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    assert_eq!(result.expression, "REMOVE #a0");
    assert!(result.parameters.is_empty());
}

#[test]
fn test_should_combine_set_and_remove_categories() {
    let update = UpdateDescription::new().set("name", "x").remove("description");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    assert_eq!(result.expression, "SET #a0 = :p0 REMOVE #a1");
}

#[test]
fn test_should_defer_encryption_and_keep_plaintext_intact() {
    let update = UpdateDescription::new().set("ssn", "123-45-6789");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    assert_eq!(result.expression, "SET #a0 = :p0");
    assert!(result.has_deferred_encryption());

    let param = &result.parameters[0];
    assert_eq!(param.placeholder, ":p0");
    assert_eq!(param.value, Value::string("123-45-6789"));
    assert!(param.requires_encryption);
    assert_eq!(param.field_name, "ssn");
    assert_eq!(param.attribute_name, "ssn");
}

#[test]
fn test_should_format_timestamp_through_value_pipeline() {
    let update = UpdateDescription::new().set("lastSeen", "2024-05-01T10:30:00Z");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    assert_eq!(result.attribute_names["#a0"], "lastSeenDate");
    assert_eq!(result.parameters[0].value, Value::string("2024-05-01"));
}

#[test]
fn test_should_translate_all_clause_categories_together() {
    let update = UpdateDescription::new()
        .set("name", "x")
        .increment("score", 1)
        .remove("description")
        .delete_from_set("tags", Value::string_set(["old"]));
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    assert_eq!(
        result.expression,
        "SET #a0 = :p0 ADD #a1 :p1 REMOVE #a2 DELETE #a3 :p2"
    );
}

#[test]
fn test_should_be_deterministic_across_calls() {
    let update = UpdateDescription::new()
        .set("name", "x")
        .set_default("score", 0)
        .append("history", vec![Value::string("e1")])
        .remove("description");
    let translator = Translator::new();
    let metadata = user_metadata();

    let first = translator.translate(&update, &metadata).unwrap();
    let second = translator.translate(&update, &metadata).unwrap();

    assert_eq!(first.expression, second.expression);
    assert_eq!(first.attribute_names, second.attribute_names);
    assert_eq!(first.parameters, second.parameters);
}

#[test]
fn test_should_keep_placeholders_consistent_with_expression() {
    let update = UpdateDescription::new()
        .set("name", "x")
        .set_default("score", 0)
        .increment("balance", 2)
        .remove("description");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    // Every allocated name placeholder is referenced by the expression, and
    // every captured parameter placeholder appears exactly once.
    for placeholder in result.attribute_names.keys() {
        assert!(
            result.expression.contains(placeholder),
            "{placeholder} not referenced in {}",
            result.expression
        );
    }
    for param in &result.parameters {
        assert_eq!(
            result.expression.matches(&param.placeholder).count(),
            1,
            "{} should appear once in {}",
            param.placeholder,
            result.expression
        );
    }
    // Each targeted attribute resolves through exactly one placeholder.
    let mut attributes: Vec<&str> =
        result.attribute_names.values().map(String::as_str).collect();
    attributes.sort_unstable();
    attributes.dedup();
    assert_eq!(attributes.len(), result.attribute_names.len());
}

#[test]
fn test_should_reject_duplicate_target_in_any_category_mix() {
    let metadata = user_metadata();

    let same_category = UpdateDescription::new().set("name", "a").set("name", "b");
    let err = Translator::new()
        .translate(&same_category, &metadata)
        .unwrap_err();
    assert!(matches!(err, TranslationError::DuplicateAttribute { .. }));

    let cross_category = UpdateDescription::new().set("name", "a").remove("name");
    let err = Translator::new()
        .translate(&cross_category, &metadata)
        .unwrap_err();
    assert!(
        matches!(err, TranslationError::DuplicateAttribute { attribute_name } if attribute_name == "name")
    );
}

#[test]
fn test_should_reject_unknown_field_before_rendering() {
    let update = UpdateDescription::new().set("name", "x").set("ghost", "y");
    let err = Translator::new()
        .translate(&update, &user_metadata())
        .unwrap_err();
    assert!(matches!(err, TranslationError::UnknownField { field_name } if field_name == "ghost"));
}

#[test]
fn test_should_fail_closed_on_hand_built_shapes() {
    let metadata = user_metadata();

    // A function call outside the recognized set.
    let unknown_call = UpdateDescription::new().set_expr(
        "name",
        UpdateExpr::Call {
            function: "to_upper".to_owned(),
            args: vec![UpdateExpr::FieldRef("name".to_owned())],
        },
    );
    let err = Translator::new()
        .translate(&unknown_call, &metadata)
        .unwrap_err();
    match err {
        TranslationError::UnsupportedShape { field_name, shape } => {
            assert_eq!(field_name, "name");
            assert!(shape.contains("to_upper"));
        }
        other => panic!("expected UnsupportedShape, got {other:?}"),
    }

    // Arithmetic referencing a different field.
    let cross_field = UpdateDescription::new().set_expr(
        "score",
        UpdateExpr::Binary {
            op: dynamap_core::expression::BinaryOp::Add,
            left: Box::new(UpdateExpr::FieldRef("balance".to_owned())),
            right: Box::new(UpdateExpr::Literal(Value::from(1))),
        },
    );
    let err = Translator::new()
        .translate(&cross_field, &metadata)
        .unwrap_err();
    assert!(matches!(err, TranslationError::UnsupportedShape { .. }));
}

#[test]
fn test_should_report_format_failure_with_full_context() {
    let update = UpdateDescription::new().set("lastSeen", "not-a-timestamp");
    let err = Translator::new()
        .translate(&update, &user_metadata())
        .unwrap_err();

    match err {
        TranslationError::FormatFailed {
            field_name,
            attribute_name,
            format,
            value,
            ..
        } => {
            assert_eq!(field_name, "lastSeen");
            assert_eq!(attribute_name, "lastSeenDate");
            assert_eq!(format, "%Y-%m-%d");
            assert_eq!(value, Value::string("not-a-timestamp"));
        }
        other => panic!("expected FormatFailed, got {other:?}"),
    }
}
