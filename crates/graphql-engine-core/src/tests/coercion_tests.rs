//! Tests for input coercion of variable values, literals and arguments.

use crate::InputValueError;
use crate::Value;
use crate::Variables;
use crate::coercion::coerce_arguments;
use crate::coercion::coerce_literal;
use crate::coercion::coerce_value;
use crate::coercion::coerce_variables;
use crate::schema::EnumType;
use crate::schema::FieldDefinition;
use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::tests::fixtures::parse;
use crate::tests::fixtures::validation_schema;
use crate::tests::fixtures::variables;
use graphql_engine_parser::ast;
use indexmap::IndexMap;

/// The literal given as argument `v` of the first field of `{ f(v: ...) }`.
fn literal(source: &str) -> ast::Value {
    let doc = parse(&format!("{{ f(v: {source}) }}"));
    let operation = doc.operations().next().expect("one operation");
    match &operation.selection_set.selections[0] {
        ast::Selection::Field(field) => field.arguments[0].value.clone(),
        other => panic!("expected a field, got {other:?}"),
    }
}

fn filter_type() -> TypeRef {
    TypeRef::named("DogFilter")
}

// =============================================================================
// coerce_value
// =============================================================================

/// A single value given for a list type becomes a one-element list.
#[test]
fn single_value_is_wrapped_in_a_list() {
    let schema = validation_schema();
    let ty = TypeRef::list(TypeRef::named("Int"));
    assert_eq!(
        coerce_value(&schema, &ty, &Value::Int(3), "$x"),
        Ok(Value::List(vec![Value::Int(3)])),
    );
}

/// Errors carry the path to the offending part of the value.
#[test]
fn nested_errors_report_their_path() {
    let schema = validation_schema();
    let ty = TypeRef::list(TypeRef::named_non_null("String"));
    let err = coerce_value(
        &schema,
        &ty,
        &Value::List(vec!["a".into(), Value::Null]),
        "$tags",
    )
    .unwrap_err();
    assert_eq!(
        err,
        InputValueError::UnexpectedNull {
            path: "$tags[1]".to_string(),
            expected: "String!".to_string(),
        },
    );
    assert_eq!(err.path(), "$tags[1]");
}

/// Input objects get defaults filled in and reject unknown fields.
#[test]
fn input_object_defaults_and_unknown_fields() {
    let schema = validation_schema();
    let coerced = coerce_value(
        &schema,
        &filter_type(),
        &Value::object([("name", "Odie")]),
        "$filter",
    )
    .unwrap();
    assert_eq!(coerced, Value::object([("name", Value::from("Odie")), ("minAge", 0.into())]));

    let err = coerce_value(
        &schema,
        &filter_type(),
        &Value::object([("name", "Odie"), ("color", "RED")]),
        "$filter",
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Field \"color\" is not defined by type \"DogFilter\" (at $filter)",
    );
}

/// A required input field that is missing is reported with its type.
#[test]
fn missing_required_input_field() {
    let schema = validation_schema();
    let err = coerce_value(&schema, &filter_type(), &Value::Object(IndexMap::new()), "$f")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Field \"DogFilter.name\" of required type \"String!\" was not provided (at $f)",
    );
}

/// Enum values arrive as strings in JSON variables.
#[test]
fn enum_values_from_strings() {
    let schema = validation_schema();
    let ty = TypeRef::named("Color");
    assert_eq!(
        coerce_value(&schema, &ty, &"RED".into(), "$c"),
        Ok(Value::Enum("RED".to_string())),
    );
    assert_eq!(
        coerce_value(&schema, &ty, &"PURPLE".into(), "$c").unwrap_err().to_string(),
        "Value \"PURPLE\" does not exist in \"Color\" enum. (at $c)",
    );
}

/// Integers widen to floats; out-of-range `Int`s are rejected.
#[test]
fn numeric_scalars() {
    let schema = validation_schema();
    assert_eq!(
        coerce_value(&schema, &TypeRef::named("Float"), &Value::Int(2), "$f"),
        Ok(Value::Float(2.0)),
    );
    assert!(
        coerce_value(&schema, &TypeRef::named("Int"), &Value::Int(i128::from(i32::MAX) + 1), "$i")
            .is_err()
    );
    assert!(coerce_value(&schema, &TypeRef::named("Int"), &Value::Float(1.5), "$i").is_err());
}

// =============================================================================
// coerce_literal
// =============================================================================

/// Enum literals map through the enum's internal values.
#[test]
fn mapped_enum_literal() {
    let schema = Schema::builder()
        .register_type(EnumType::new("Level").with_mapped_value("HIGH", 3))
        .register_type(
            ObjectType::new("Query")
                .with_field(FieldDefinition::new("level", TypeRef::named("Level"))),
        )
        .build()
        .unwrap();
    assert_eq!(
        coerce_literal(&schema, &TypeRef::named("Level"), &literal("HIGH"), None, "v"),
        Ok(Some(Value::Int(3))),
    );
}

/// A schema with the fixed-width integer scalars and a query that uses one.
fn width_schema() -> Schema {
    Schema::builder()
        .with_width_scalars()
        .register_type(
            ObjectType::new("Query")
                .with_field(FieldDefinition::new("big", TypeRef::named("UInt64"))),
        )
        .build()
        .unwrap()
}

/// Unsigned literals beyond the signed 32 and 64-bit ranges reach their
/// scalar intact; each kind still rejects what it cannot hold.
#[test]
fn wide_unsigned_literals() {
    let schema = width_schema();
    let coerce = |type_name: &str, source: &str| {
        coerce_literal(&schema, &TypeRef::named(type_name), &literal(source), None, "v")
    };

    assert_eq!(
        coerce("UInt64", "18446744073709551615"),
        Ok(Some(Value::Int(u64::MAX.into()))),
    );
    assert_eq!(
        coerce("UInt64", "9223372036854775808"),
        Ok(Some(Value::Int(i128::from(i64::MAX) + 1))),
    );
    assert_eq!(coerce("UInt32", "4294967295"), Ok(Some(Value::Int(u32::MAX.into()))));

    assert_eq!(
        coerce("UInt64", "18446744073709551616").unwrap_err().to_string(),
        "UInt64 cannot represent value out of range: 18446744073709551616 (at v)",
    );
    assert_eq!(
        coerce("UInt32", "4294967296").unwrap_err().to_string(),
        "UInt32 cannot represent value out of range: 4294967296 (at v)",
    );
    assert!(coerce("Int64", "9223372036854775808").is_err());
    assert!(coerce("UInt64", "-1").is_err());
}

/// A string literal is not an enum value.
#[test]
fn string_literal_for_enum_is_rejected() {
    let schema = validation_schema();
    let err = coerce_literal(&schema, &TypeRef::named("Color"), &literal("\"RED\""), None, "v")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Enum \"Color\" cannot represent non-enum value: \"RED\" (at v)",
    );
}

/// Without bound variables any variable reference is accepted as absent;
/// with them, the bound value is used.
#[test]
fn variable_references() {
    let schema = validation_schema();
    let ty = TypeRef::named_non_null("Int");
    assert_eq!(coerce_literal(&schema, &ty, &literal("$n"), None, "v"), Ok(None));

    let bound = variables([("n", Value::Int(4))]);
    assert_eq!(
        coerce_literal(&schema, &ty, &literal("$n"), Some(&bound), "v"),
        Ok(Some(Value::Int(4))),
    );
}

/// Object literals coerce field by field, filling defaults.
#[test]
fn object_literal() {
    let schema = validation_schema();
    assert_eq!(
        coerce_literal(&schema, &filter_type(), &literal("{name: \"Odie\", minAge: 2}"), None, "v"),
        Ok(Some(Value::object([("name", Value::from("Odie")), ("minAge", 2.into())]))),
    );
    assert_eq!(
        coerce_literal(&schema, &filter_type(), &literal("{minAge: 2}"), None, "v")
            .unwrap_err()
            .to_string(),
        "Field \"DogFilter.name\" of required type \"String!\" was not provided (at v)",
    );
}

// =============================================================================
// coerce_arguments and coerce_variables
// =============================================================================

/// Defaults apply to omitted arguments; required ones must be given.
#[test]
fn arguments_use_defaults_and_require_non_null() {
    let schema = validation_schema();
    let query = schema.object_type("Query").unwrap();
    let count = query.field("count").unwrap();
    let coerced = coerce_arguments(&schema, count.arguments(), &[], &Variables::new()).unwrap();
    assert_eq!(coerced.get("limit"), Some(&Value::Int(10)));

    let search = query.field("search").unwrap();
    assert_eq!(
        coerce_arguments(&schema, search.arguments(), &[], &Variables::new()).unwrap_err(),
        InputValueError::MissingArgument {
            argument: "term".to_string(),
            ty: "String!".to_string(),
        },
    );
}

/// Defaults fill missing variables; required ones are reported, all in
/// one pass.
#[test]
fn variables_are_coerced_against_definitions() {
    let schema = validation_schema();
    let doc = parse("query ($limit: Int = 5, $term: String!, $tags: [String]) { count }");
    let operation = doc.operations().next().unwrap();

    let coerced = coerce_variables(
        &schema,
        &operation.variable_definitions,
        &variables([("term", "x".into()), ("tags", "solo".into())]),
    )
    .unwrap();
    assert_eq!(coerced.get("limit"), Some(&Value::Int(5)));
    assert_eq!(coerced.get("tags"), Some(&Value::List(vec!["solo".into()])));

    let errors = coerce_variables(
        &schema,
        &operation.variable_definitions,
        &variables([("limit", "five".into())]),
    )
    .unwrap_err();
    let messages: Vec<&str> = errors.iter().map(|err| err.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Variable \"$limit\" got invalid value \"five\"; Int cannot represent non-integer \
             value: \"five\" (at $limit)",
            "Variable \"$term\" of required type \"String!\" was not provided.",
        ],
    );
}

/// An explicit null for a non-null variable is its own error.
#[test]
fn null_for_non_null_variable() {
    let schema = validation_schema();
    let doc = parse("query ($term: String!) { search(term: $term) { __typename } }");
    let operation = doc.operations().next().unwrap();
    let errors = coerce_variables(
        &schema,
        &operation.variable_definitions,
        &variables([("term", Value::Null)]),
    )
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Variable \"$term\" of non-null type \"String!\" must not be null.",
    );
}
