//! Tests for `execute()`: value completion per type kind, non-null
//! propagation, resolver failures, directives, cancellation and the two
//! execution strategies.

use crate::ExecutionContext;
use crate::ExecutionOptions;
use crate::FieldError;
use crate::FieldValue;
use crate::GraphQLError;
use crate::PathSegment;
use crate::Value;
use crate::Variables;
use crate::apply_selection_set;
use crate::execute;
use crate::schema::DirectiveDefinition;
use crate::schema::DirectiveLocation;
use crate::schema::EnumType;
use crate::schema::FieldDefinition;
use crate::schema::InputValueDefinition;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::schema::UnionType;
use crate::selection::Directive;
use crate::tests::fixtures::parse;
use crate::tests::fixtures::pets_schema;
use crate::tests::fixtures::to_json;
use graphql_engine_parser::ast::AstPos;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

fn string_field(name: &str, value: &'static str) -> FieldDefinition {
    FieldDefinition::new(name, TypeRef::named("String"))
        .resolve(move |_, _, _| Ok(FieldValue::value(value)))
}

fn pet_object(name: &str, extra_field: &str) -> ObjectType {
    ObjectType::new(name)
        .implements("Pet")
        .with_field(FieldDefinition::new("name", TypeRef::named_non_null("String")))
        .with_field(FieldDefinition::new(extra_field, TypeRef::named("Boolean")))
}

/// A schema with one root field per behavior under test. Values given as
/// maps are read by the default resolver.
fn exec_schema() -> Schema {
    let query = ObjectType::new("Query")
        .with_field(string_field("a", "a"))
        .with_field(string_field("b", "b"))
        .with_field(
            FieldDefinition::new("greet", TypeRef::named("String"))
                .with_argument(
                    InputValueDefinition::new("name", TypeRef::named("String")).with_default("world"),
                )
                .resolve(|_, _, args| {
                    let name = args.get("name").and_then(Value::as_str).unwrap_or_default();
                    Ok(FieldValue::value(format!("hello {name}")))
                }),
        )
        .with_field(
            FieldDefinition::new(
                "tags",
                TypeRef::non_null(TypeRef::list(TypeRef::named_non_null("String"))),
            )
            .resolve(|_, _, _| Ok(FieldValue::value(Value::List(vec!["x".into(), Value::Null])))),
        )
        .with_field(
            FieldDefinition::new("looseTags", TypeRef::list(TypeRef::named("String")))
                .resolve(|_, _, _| Ok(FieldValue::value(Value::List(vec!["x".into(), Value::Null])))),
        )
        .with_field(FieldDefinition::new("fail", TypeRef::named("String")).resolve(|_, _, _| {
            Err(FieldError::new("boom").with_extension("code", "E_BOOM"))
        }))
        .with_field(
            FieldDefinition::new("panics", TypeRef::named("String"))
                .resolve(|_, _, _| panic!("kaboom")),
        )
        .with_field(
            FieldDefinition::new("profile", TypeRef::named("Profile")).resolve(|_, _, _| {
                Ok(FieldValue::value(Value::object([
                    ("id", Value::from("1")),
                    ("nick", Value::Null),
                    ("bio", Value::from("hi")),
                ])))
            }),
        )
        .with_field(
            FieldDefinition::new("search", TypeRef::list(TypeRef::named("SearchResult"))).resolve(
                |_, _, _| {
                    Ok(FieldValue::list([
                        FieldValue::value(Value::object([
                            ("__typename", Value::from("Dog")),
                            ("name", Value::from("Rex")),
                            ("barks", Value::from(true)),
                        ])),
                        FieldValue::value(Value::object([
                            ("name", Value::from("Tom")),
                            ("meows", Value::from(false)),
                        ]))
                        .with_type("Cat"),
                    ]))
                },
            ),
        )
        .with_field(FieldDefinition::new("mystery", TypeRef::named("Pet")).resolve(|_, _, _| {
            Ok(FieldValue::value(Value::object([("name", "Nobody")])))
        }))
        .with_field(FieldDefinition::new("impostor", TypeRef::named("Pet")).resolve(|_, _, _| {
            Ok(FieldValue::value(Value::object([("name", "Sly")])).with_type("Profile"))
        }))
        .with_field(
            FieldDefinition::new("level", TypeRef::named("Level"))
                .resolve(|_, _, _| Ok(FieldValue::value(2))),
        )
        .with_field(
            FieldDefinition::new("levels", TypeRef::list(TypeRef::named("Level")))
                .resolve(|_, _, _| Ok(FieldValue::list([FieldValue::value(1), FieldValue::value(2)]))),
        )
        .with_field(
            FieldDefinition::new("badLevel", TypeRef::named("Level"))
                .resolve(|_, _, _| Ok(FieldValue::value(7))),
        )
        .with_field(
            FieldDefinition::new("notAList", TypeRef::list(TypeRef::named("String")))
                .resolve(|_, _, _| Ok(FieldValue::value("x"))),
        )
        .with_field(
            FieldDefinition::new("badInt", TypeRef::named("Int"))
                .resolve(|_, _, _| Ok(FieldValue::value("abc"))),
        )
        .with_field(
            FieldDefinition::new("viewer", TypeRef::named("String"))
                .resolve(|ctx, _, _| Ok(FieldValue::value(ctx.data::<String>().cloned()))),
        )
        .with_field(
            FieldDefinition::new("path", TypeRef::list(TypeRef::named("String"))).resolve(
                |ctx, _, _| {
                    Ok(FieldValue::list(
                        ctx.path().iter().map(|segment| FieldValue::value(segment.to_string())),
                    ))
                },
            ),
        )
        .with_field(FieldDefinition::new("stop", TypeRef::named("String")).resolve(|ctx, _, _| {
            ctx.execution().cancel();
            Ok(FieldValue::value("stopped"))
        }));

    Schema::builder()
        .register_type(
            EnumType::new("Level")
                .with_mapped_value("LOW", 1)
                .with_mapped_value("HIGH", 2),
        )
        .register_type(
            InterfaceType::new("Pet")
                .with_field(FieldDefinition::new("name", TypeRef::named_non_null("String"))),
        )
        .register_type(pet_object("Dog", "barks"))
        .register_type(pet_object("Cat", "meows"))
        .register_type(UnionType::new("SearchResult").with_member("Dog").with_member("Cat"))
        .register_type(
            ObjectType::new("Profile")
                .with_field(FieldDefinition::new("id", TypeRef::named_non_null("ID")))
                .with_field(FieldDefinition::new("nick", TypeRef::named_non_null("String")))
                .with_field(FieldDefinition::new("bio", TypeRef::named("String"))),
        )
        .register_type(query)
        .register_directive(
            DirectiveDefinition::new("upper", [DirectiveLocation::Field]).wrap(|_, _, next| {
                let value = next()?;
                let upper = value.as_value().and_then(Value::as_str).map(str::to_uppercase);
                Ok(upper.map(Value::String).map_or(value, FieldValue::Value))
            }),
        )
        .register_directive(
            DirectiveDefinition::new("hidden", [DirectiveLocation::Field])
                .wrap(|_, _, _| Ok(FieldValue::Skip)),
        )
        .build()
        .expect("execution schema builds")
}

/// Resolves and executes the only operation of `source`, skipping
/// validation.
fn run_with(
    schema: &Schema,
    ctx: &ExecutionContext,
    source: &str,
    options: &ExecutionOptions,
) -> (serde_json::Value, Vec<GraphQLError>) {
    let document = parse(source);
    let (kind, selection_set) = apply_selection_set(schema, &document, None, &Variables::new())
        .unwrap_or_else(|errors| panic!("`{source}` failed to resolve: {errors}"));
    let root_type = schema.root_type(kind).expect("schema has the root type");
    let (data, errors) =
        execute(ctx, schema, root_type, &FieldValue::Null, &selection_set, options);
    (to_json(&data), errors.into_errors())
}

fn run(source: &str) -> (serde_json::Value, Vec<GraphQLError>) {
    run_with(&exec_schema(), &ExecutionContext::new(), source, &ExecutionOptions::default())
}

fn messages(errors: &[GraphQLError]) -> Vec<&str> {
    errors.iter().map(|err| err.message.as_str()).collect()
}

fn path(segments: &[PathSegment]) -> String {
    segments.iter().map(ToString::to_string).collect::<Vec<_>>().join(".")
}

// =============================================================================
// Leaves, arguments and lists
// =============================================================================

#[test]
fn leaf_fields() {
    let (data, errors) = run("{ a b __typename }");
    assert_eq!(data, json!({"a": "a", "b": "b", "__typename": "Query"}));
    assert!(errors.is_empty());
}

/// Resolvers see coerced arguments with defaults applied.
#[test]
fn arguments_reach_resolvers() {
    let (data, _) = run("{ greet other: greet(name: \"odie\") }");
    assert_eq!(data, json!({"greet": "hello world", "other": "hello odie"}));
}

/// Response keys keep query order, aliases included.
#[test]
fn response_follows_query_order() {
    let (data, _) = run("{ b x: a a }");
    let keys: Vec<&String> = data.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["b", "x", "a"]);
}

#[test]
fn nullable_list_elements() {
    let (data, errors) = run("{ looseTags }");
    assert_eq!(data, json!({"looseTags": ["x", null]}));
    assert!(errors.is_empty());
}

/// A null element of `[String!]!` nulls the list, and with it the whole
/// (non-nullable) response, with one error pointing at the element.
#[test]
fn non_null_element_fails_the_list() {
    let (data, errors) = run("{ a tags }");
    assert_eq!(data, json!(null));
    assert_eq!(messages(&errors), vec!["Cannot return null for non-null field Query.tags."]);
    assert_eq!(errors[0].path, vec![PathSegment::from("tags"), PathSegment::from(1)]);
}

/// A non-null violation nulls the nearest nullable ancestor only.
#[test]
fn null_bubbles_to_nearest_nullable() {
    let (data, errors) = run("{ a profile { id nick bio } }");
    assert_eq!(data, json!({"a": "a", "profile": null}));
    assert_eq!(
        messages(&errors),
        vec!["Cannot return null for non-null field Profile.nick."],
    );
    assert_eq!(path(&errors[0].path), "profile.nick");
}

#[test]
fn enums_serialize_by_name() {
    let (data, errors) = run("{ level levels badLevel }");
    assert_eq!(data, json!({"level": "HIGH", "levels": ["LOW", "HIGH"], "badLevel": null}));
    assert_eq!(messages(&errors), vec!["7 is not a valid enum value for type \"Level\""]);
}

#[test]
fn leaf_shape_errors() {
    let (data, errors) = run("{ notAList badInt }");
    assert_eq!(data, json!({"notAList": null, "badInt": null}));
    assert_eq!(
        messages(&errors),
        vec![
            "Expected a list for field \"Query.notAList\", found a string \"x\".",
            "Int cannot represent non-integer value: \"abc\"",
        ],
    );
}

// =============================================================================
// Resolver failures
// =============================================================================

/// A resolver error nulls its field and keeps its extensions.
#[test]
fn resolver_error() {
    let (data, errors) = run("{ a fail }");
    assert_eq!(data, json!({"a": "a", "fail": null}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "boom");
    assert_eq!(errors[0].extensions.get("code"), Some(&Value::from("E_BOOM")));
    assert_eq!(path(&errors[0].path), "fail");
    assert_eq!(errors[0].locations[0].column, 5);
}

/// A panicking resolver becomes a field error; siblings still resolve.
#[test]
fn resolver_panic_is_contained() {
    let (data, errors) = run("{ panics b }");
    assert_eq!(data, json!({"panics": null, "b": "b"}));
    assert_eq!(messages(&errors), vec!["resolver panicked: kaboom"]);
    assert!(errors[0].extensions.contains_key("stacktrace"));
}

/// Without validation, an unknown field is reported at run time.
#[test]
fn unknown_field_at_runtime() {
    let (data, errors) = run("{ nope a }");
    assert_eq!(data, json!({"nope": null, "a": "a"}));
    assert_eq!(messages(&errors), vec!["Cannot query field \"nope\" on type \"Query\"."]);
}

// =============================================================================
// Abstract types
// =============================================================================

/// Concrete types come from a `__typename` key or an explicit type name.
#[test]
fn union_resolution_by_type_name() {
    let (data, errors) = run(
        "{ search { __typename ... on Dog { name barks } ... on Cat { name meows } } }",
    );
    assert_eq!(
        data,
        json!({"search": [
            {"__typename": "Dog", "name": "Rex", "barks": true},
            {"__typename": "Cat", "name": "Tom", "meows": false},
        ]}),
    );
    assert!(errors.is_empty());
}

/// Host objects resolve to the object type they back.
#[test]
fn interface_resolution_by_backing_type() {
    let (data, errors) = run_with(
        &pets_schema(),
        &ExecutionContext::new(),
        "{ pets { name ... on Dog { woofs } ... on Cat { meows } } }",
        &ExecutionOptions::default(),
    );
    assert_eq!(
        data,
        json!({"pets": [{"name": "Odie", "woofs": true}, {"name": "Garfield", "meows": false}]}),
    );
    assert!(errors.is_empty());
}

#[test]
fn unresolvable_abstract_type() {
    let (data, errors) = run("{ mystery { name } impostor { name } }");
    assert_eq!(data, json!({"mystery": null, "impostor": null}));
    assert_eq!(
        messages(&errors),
        vec![
            "Abstract type \"Pet\" must resolve to an Object type at runtime for field \
             \"Query.mystery\".",
            "Runtime Object type \"Profile\" is not a possible type for \"Pet\".",
        ],
    );
}

// =============================================================================
// Directives
// =============================================================================

#[test]
fn skip_and_include() {
    let (data, _) = run("{ a @include(if: true) b @skip(if: true) greet @skip(if: false) @include(if: false) }");
    assert_eq!(data, json!({"a": "a"}));
}

/// A `@skip` whose condition is not a Boolean is reported at the field
/// carrying it.
#[test]
fn bad_skip_condition_names_the_field() {
    let schema = exec_schema();
    let document = parse("{ a b }");
    let (kind, mut selection_set) =
        apply_selection_set(&schema, &document, None, &Variables::new()).unwrap();
    selection_set.selections[1].directives = vec![Directive {
        name: "skip".to_string(),
        args: [("if".to_string(), Value::from("yes"))].into_iter().collect(),
        location: AstPos { line: 1, column: 6 },
    }];
    let root_type = schema.root_type(kind).expect("schema has the root type");
    let (data, errors) = execute(
        &ExecutionContext::new(),
        &schema,
        root_type,
        &FieldValue::Null,
        &selection_set,
        &ExecutionOptions::default(),
    );

    assert_eq!(data, Value::Null);
    let errors = errors.into_errors();
    assert_eq!(
        messages(&errors),
        vec!["Directive \"@skip\" requires a Boolean \"if\" argument."],
    );
    assert_eq!(path(&errors[0].path), "b");
    assert_eq!(errors[0].locations, vec![AstPos { line: 1, column: 6 }]);
}

/// Directive wrappers run around the resolver and may drop the field.
#[test]
fn directive_wrappers() {
    let (data, errors) = run("{ a @upper b @hidden greet }");
    assert_eq!(data, json!({"a": "A", "greet": "hello world"}));
    assert!(errors.is_empty());
}

// =============================================================================
// Context and cancellation
// =============================================================================

#[test]
fn resolvers_see_context() {
    let ctx = ExecutionContext::new().with_data("ada".to_string());
    let (data, _) = run_with(&exec_schema(), &ctx, "{ viewer here: path }", &ExecutionOptions::default());
    assert_eq!(data, json!({"viewer": "ada", "here": ["here"]}));
}

/// A cancelled execution resolves nothing and reports it once.
#[test]
fn cancelled_before_start() {
    let ctx = ExecutionContext::new();
    ctx.cancel();
    let (data, errors) = run_with(&exec_schema(), &ctx, "{ a b }", &ExecutionOptions::default());
    assert_eq!(data, json!({"a": null, "b": null}));
    assert_eq!(messages(&errors), vec!["execution cancelled"]);
    assert_eq!(path(&errors[0].path), "a");
}

/// Fields scheduled after a cancellation are not resolved.
#[test]
fn cancelled_mid_execution() {
    let (data, errors) = run("{ a stop b }");
    assert_eq!(data, json!({"a": "a", "stop": "stopped", "b": null}));
    assert_eq!(messages(&errors), vec!["execution cancelled"]);
    assert_eq!(path(&errors[0].path), "b");
}

#[test]
fn expired_deadline_cancels() {
    let ctx = ExecutionContext::new().with_deadline(Instant::now());
    let (data, errors) = run_with(&exec_schema(), &ctx, "{ a }", &ExecutionOptions::default());
    assert_eq!(data, json!({"a": null}));
    assert_eq!(errors.len(), 1);
}

// =============================================================================
// Strategies
// =============================================================================

/// Parallel execution produces the same data and the same errors, in the
/// same (query) order, as serial execution.
#[test]
fn parallel_matches_serial() {
    let source = "{ fail a search { __typename ... on Dog { name } } looseTags panics profile { nick } levels b }";
    let schema = exec_schema();
    let ctx = ExecutionContext::new();
    let (serial_data, serial_errors) = run_with(&schema, &ctx, source, &ExecutionOptions::default());
    let (parallel_data, parallel_errors) =
        run_with(&schema, &ctx, source, &ExecutionOptions::parallel());
    assert_eq!(serial_data, parallel_data);
    assert_eq!(messages(&serial_errors), messages(&parallel_errors));
    let paths = |errors: &[GraphQLError]| -> Vec<String> {
        errors.iter().map(|err| path(&err.path)).collect()
    };
    assert_eq!(paths(&serial_errors), paths(&parallel_errors));
    assert_eq!(paths(&parallel_errors), vec!["fail", "panics", "profile.nick"]);
}

/// Mutation root fields run one after another even in parallel mode.
#[test]
fn mutation_fields_run_serially() {
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::default();
    let mut mutation = ObjectType::new("Mutation");
    for (idx, name) in ["first", "second", "third"].into_iter().enumerate() {
        let log = Arc::clone(&log);
        mutation = mutation.with_field(FieldDefinition::new(name, TypeRef::named("String")).resolve(
            move |_, _, _| {
                std::thread::sleep(Duration::from_millis(10 * (3 - idx as u64)));
                log.lock().unwrap().push(name);
                Ok(FieldValue::value(name))
            },
        ));
    }
    let schema = Schema::builder()
        .register_type(ObjectType::new("Query").with_field(string_field("a", "a")))
        .register_type(mutation)
        .build()
        .unwrap();

    let (data, _) = run_with(
        &schema,
        &ExecutionContext::new(),
        "mutation { third first second }",
        &ExecutionOptions::parallel(),
    );
    assert_eq!(data, json!({"third": "third", "first": "first", "second": "second"}));
    assert_eq!(*log.lock().unwrap(), vec!["third", "first", "second"]);
}
