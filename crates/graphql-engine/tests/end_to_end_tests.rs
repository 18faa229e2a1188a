//! End-to-end tests through the public API: requests go in as strings and
//! come out as serialized responses.

use graphql_engine::ExecutionContext;
use graphql_engine::ExecutionOptions;
use graphql_engine::FieldValue;
use graphql_engine::PathSegment;
use graphql_engine::Request;
use graphql_engine::Response;
use graphql_engine::Value;
use graphql_engine::Variables;
use graphql_engine::apply_selection_set;
use graphql_engine::execute_request;
use graphql_engine::flatten;
use graphql_engine::parse_executable_document;
use graphql_engine::schema::FieldDefinition;
use graphql_engine::schema::InterfaceType;
use graphql_engine::schema::ObjectType;
use graphql_engine::schema::Schema;
use graphql_engine::schema::TypeRef;
use graphql_engine::selection::SelectionSet;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

struct Dog {
    name: String,
    woofs: bool,
}

struct Cat {
    name: String,
    meows: bool,
}

/// `Query.pets: [Pet]` over one dog and one cat, both held as host
/// objects.
fn pets_schema() -> Schema {
    Schema::builder()
        .register_type(
            InterfaceType::new("Pet")
                .with_field(FieldDefinition::new("name", TypeRef::named("String"))),
        )
        .register_type(
            ObjectType::new("Dog")
                .implements("Pet")
                .backed_by::<Dog>()
                .with_field(FieldDefinition::new("name", TypeRef::named("String")).resolve(
                    |_, dog, _| {
                        let dog = dog.downcast_ref::<Dog>().ok_or("expected a Dog")?;
                        Ok(FieldValue::value(dog.name.as_str()))
                    },
                ))
                .with_field(FieldDefinition::new("woofs", TypeRef::named("Boolean")).resolve(
                    |_, dog, _| {
                        let dog = dog.downcast_ref::<Dog>().ok_or("expected a Dog")?;
                        Ok(FieldValue::value(dog.woofs))
                    },
                )),
        )
        .register_type(
            ObjectType::new("Cat")
                .implements("Pet")
                .backed_by::<Cat>()
                .with_field(FieldDefinition::new("name", TypeRef::named("String")).resolve(
                    |_, cat, _| {
                        let cat = cat.downcast_ref::<Cat>().ok_or("expected a Cat")?;
                        Ok(FieldValue::value(cat.name.as_str()))
                    },
                ))
                .with_field(FieldDefinition::new("meows", TypeRef::named("Boolean")).resolve(
                    |_, cat, _| {
                        let cat = cat.downcast_ref::<Cat>().ok_or("expected a Cat")?;
                        Ok(FieldValue::value(cat.meows))
                    },
                )),
        )
        .register_type(ObjectType::new("Query").with_field(
            FieldDefinition::new("pets", TypeRef::list(TypeRef::named("Pet"))).resolve(
                |_, _, _| {
                    Ok(FieldValue::list([
                        FieldValue::object(Dog {
                            name: "Odie".to_string(),
                            woofs: true,
                        }),
                        FieldValue::object(Cat {
                            name: "Garfield".to_string(),
                            meows: false,
                        }),
                    ]))
                },
            ),
        ))
        .build()
        .expect("pets schema builds")
}

/// `Query { a, b, tags: [String!]!, echo(x: Int): Int }`. Every resolver
/// sets `called`.
fn letters_schema(called: Arc<AtomicBool>) -> Schema {
    let field = |name: &str, ty: TypeRef, value: Value| {
        let called = Arc::clone(&called);
        FieldDefinition::new(name, ty).resolve(move |_, _, _| {
            called.store(true, Ordering::SeqCst);
            Ok(FieldValue::value(value.clone()))
        })
    };
    Schema::builder()
        .register_type(
            ObjectType::new("Query")
                .with_field(field("a", TypeRef::named("String"), "a".into()))
                .with_field(field("b", TypeRef::named("String"), "b".into()))
                .with_field(field(
                    "tags",
                    TypeRef::non_null(TypeRef::list(TypeRef::named_non_null("String"))),
                    Value::List(vec!["x".into(), Value::Null, "z".into()]),
                ))
                .with_field(
                    field("echo", TypeRef::named("Int"), Value::Int(0)).with_argument(
                        graphql_engine::schema::InputValueDefinition::new(
                            "x",
                            TypeRef::named("Int"),
                        ),
                    ),
                ),
        )
        .build()
        .expect("letters schema builds")
}

fn run(schema: &Schema, request: Request) -> Response {
    execute_request(schema, &ExecutionContext::new(), &request, &ExecutionOptions::default())
}

fn data_json(response: &Response) -> serde_json::Value {
    serde_json::to_value(&response.data).expect("data serializes")
}

fn messages(response: &Response) -> Vec<&str> {
    response.errors.iter().map(|err| err.message.as_str()).collect()
}

// =============================================================================
// Execution
// =============================================================================

/// Interface fields resolve against each element's concrete type.
#[test]
fn pets_through_an_interface() {
    let response = run(
        &pets_schema(),
        Request::new("{ pets { name ... on Dog { woofs } ... on Cat { meows } } }"),
    );
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        serde_json::to_string(&response).unwrap(),
        r#"{"data":{"pets":[{"name":"Odie","woofs":true},{"name":"Garfield","meows":false}]}}"#,
    );
}

/// The parallel strategy yields the same response.
#[test]
fn pets_in_parallel() {
    let response = execute_request(
        &pets_schema(),
        &ExecutionContext::new(),
        &Request::new("{ pets { name ... on Dog { woofs } ... on Cat { meows } } }"),
        &ExecutionOptions::parallel(),
    );
    assert_eq!(
        data_json(&response),
        json!({"pets": [{"name": "Odie", "woofs": true}, {"name": "Garfield", "meows": false}]}),
    );
}

#[test]
fn include_false_drops_field() {
    let schema = letters_schema(Arc::default());
    let response = run(&schema, Request::new("{ a, b @include(if: false) }"));
    assert_eq!(data_json(&response), json!({"a": "a"}));
    assert!(response.errors.is_empty());
}

/// `@skip(if: true)` wins over any `@include`; `@skip(if: false)` with
/// `@include(if: true)` keeps the field.
#[test]
fn skip_and_include_together() {
    let schema = letters_schema(Arc::default());
    let response = run(
        &schema,
        Request::new(
            "{ a @skip(if: true) @include(if: false) b @skip(if: false) @include(if: true) \
             c: a @include(if: true) @skip(if: true) }",
        ),
    );
    assert_eq!(data_json(&response), json!({"b": "b"}));
}

/// An undeclared variable fails validation before any resolver runs.
#[test]
fn undeclared_variable_runs_nothing() {
    let called = Arc::new(AtomicBool::new(false));
    let schema = letters_schema(Arc::clone(&called));
    let response = run(&schema, Request::new("{ a echo(x: $x) }").with_variable("x", 1));
    assert_eq!(response.data, None);
    assert_eq!(messages(&response), vec!["Variable \"$x\" is not defined."]);
    assert!(!called.load(Ordering::SeqCst));
}

/// A null element in `[String!]!` nulls all of `data` and is reported
/// once, at the element.
#[test]
fn null_element_of_non_null_list() {
    let schema = letters_schema(Arc::default());
    let response = run(&schema, Request::new("{ a tags }"));
    assert_eq!(response.data, Some(Value::Null));
    assert_eq!(response.errors.len(), 1);
    let error = &response.errors[0];
    assert_eq!(error.path, vec![PathSegment::from("tags"), PathSegment::from(1)]);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": null,
            "errors": [{
                "message": "Cannot return null for non-null field Query.tags.",
                "locations": [{"line": 1, "column": 5}],
                "path": ["tags", 1],
            }],
        }),
    );
}

// =============================================================================
// Fragments
// =============================================================================

/// A spread cycle is reported naming both fragments.
#[test]
fn fragment_cycle_names_both_fragments() {
    let schema = letters_schema(Arc::default());
    let source = "{ ...A } fragment A on Query { a ...B } fragment B on Query { b ...A }";

    let response = run(&schema, Request::new(source));
    assert_eq!(response.data, None);
    assert!(
        response
            .errors
            .iter()
            .any(|err| err.message.contains("\"A\"") && err.message.contains("\"B\"")),
        "{:?}",
        messages(&response),
    );

    let document = parse_executable_document(source).unwrap();
    let errors = apply_selection_set(&schema, &document, None, &Variables::new()).unwrap_err();
    assert_eq!(
        errors.errors()[0].message,
        "Cannot spread fragment \"A\" within itself via \"B\".",
    );
}

#[test]
fn unused_fragment_is_reported() {
    let schema = letters_schema(Arc::default());
    let response = run(&schema, Request::new("{ a } fragment Extra on Query { b }"));
    assert_eq!(response.data, None);
    assert_eq!(messages(&response), vec!["Fragment \"Extra\" is never used."]);
}

/// Flattening a flat selection set is a no-op.
#[test]
fn flatten_is_idempotent() {
    let schema = letters_schema(Arc::default());
    let document = parse_executable_document(
        "{ a ...F a @skip(if: false) ... on Query { b } } fragment F on Query { a tags }",
    )
    .unwrap();
    let (_, selection_set) =
        apply_selection_set(&schema, &document, None, &Variables::new()).unwrap();
    let flat = flatten(&selection_set).unwrap();
    let aliases: Vec<&str> = flat.iter().map(|s| s.alias.as_str()).collect();
    assert_eq!(aliases, vec!["a", "tags", "b"]);

    let reflattened = flatten(&SelectionSet {
        selections: flat.clone(),
        fragments: vec![],
    })
    .unwrap();
    assert_eq!(reflattened, flat);
}

// =============================================================================
// Parsing
// =============================================================================

/// Parsing the same text twice gives the same document.
#[test]
fn parsing_is_deterministic() {
    let source = r#"
        query Pets($first: Int = 10, $kind: [String!]) @cached {
          pets(first: $first, kind: $kind) {
            name
            ... on Dog { woofs }
            ...CatFields @include(if: true)
          }
        }

        fragment CatFields on Cat { meows description: name(format: "long") }
    "#;
    let first = parse_executable_document(source).unwrap();
    let second = parse_executable_document(source).unwrap();
    assert_eq!(first, second);
}
