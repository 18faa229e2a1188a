//! Schemas and helpers shared by the test modules.

use crate::FieldValue;
use crate::GraphQLError;
use crate::Value;
use crate::ValidationOptions;
use crate::Variables;
use crate::schema::EnumType;
use crate::schema::FieldDefinition;
use crate::schema::InputObjectType;
use crate::schema::InputValueDefinition;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::schema::UnionType;
use crate::validate;
use graphql_engine_parser::ast;
use graphql_engine_parser::parse_executable_document;

/// A resolver-free schema for static checks:
///
/// ```graphql
/// interface Pet { name: String! }
/// type Dog implements Pet { name: String!, barks: Boolean, friends: [Dog] }
/// type Cat implements Pet { name: String!, meows: Boolean }
/// union SearchResult = Dog | Cat
/// enum Color { RED, GREEN, BLUE }
/// input DogFilter { name: String!, minAge: Int = 0 }
/// type Query {
///   dog: Dog
///   pets: [Pet]
///   search(term: String!): [SearchResult]
///   count(limit: Int = 10): Int
///   tags: [String!]!
///   findDog(filter: DogFilter): Dog
///   paint(color: Color!): String
/// }
/// type Mutation { rename(name: String!): Dog }
/// type Subscription { petAdded: Pet, dogAdded: Dog }
/// ```
pub(super) fn validation_schema() -> Schema {
    Schema::builder()
        .register_type(
            InterfaceType::new("Pet")
                .with_field(FieldDefinition::new("name", TypeRef::named_non_null("String"))),
        )
        .register_type(
            ObjectType::new("Dog")
                .implements("Pet")
                .with_field(FieldDefinition::new("name", TypeRef::named_non_null("String")))
                .with_field(FieldDefinition::new("barks", TypeRef::named("Boolean")))
                .with_field(FieldDefinition::new(
                    "friends",
                    TypeRef::list(TypeRef::named("Dog")),
                )),
        )
        .register_type(
            ObjectType::new("Cat")
                .implements("Pet")
                .with_field(FieldDefinition::new("name", TypeRef::named_non_null("String")))
                .with_field(FieldDefinition::new("meows", TypeRef::named("Boolean"))),
        )
        .register_type(UnionType::new("SearchResult").with_member("Dog").with_member("Cat"))
        .register_type(
            EnumType::new("Color")
                .with_value("RED")
                .with_value("GREEN")
                .with_value("BLUE"),
        )
        .register_type(
            InputObjectType::new("DogFilter")
                .with_field(InputValueDefinition::new("name", TypeRef::named_non_null("String")))
                .with_field(InputValueDefinition::new("minAge", TypeRef::named("Int")).with_default(0)),
        )
        .register_type(
            ObjectType::new("Query")
                .with_field(FieldDefinition::new("dog", TypeRef::named("Dog")))
                .with_field(FieldDefinition::new("pets", TypeRef::list(TypeRef::named("Pet"))))
                .with_field(
                    FieldDefinition::new("search", TypeRef::list(TypeRef::named("SearchResult")))
                        .with_argument(InputValueDefinition::new(
                            "term",
                            TypeRef::named_non_null("String"),
                        )),
                )
                .with_field(
                    FieldDefinition::new("count", TypeRef::named("Int")).with_argument(
                        InputValueDefinition::new("limit", TypeRef::named("Int")).with_default(10),
                    ),
                )
                .with_field(FieldDefinition::new(
                    "tags",
                    TypeRef::non_null(TypeRef::list(TypeRef::named_non_null("String"))),
                ))
                .with_field(
                    FieldDefinition::new("findDog", TypeRef::named("Dog")).with_argument(
                        InputValueDefinition::new("filter", TypeRef::named("DogFilter")),
                    ),
                )
                .with_field(
                    FieldDefinition::new("paint", TypeRef::named("String")).with_argument(
                        InputValueDefinition::new("color", TypeRef::named_non_null("Color")),
                    ),
                ),
        )
        .register_type(
            ObjectType::new("Mutation").with_field(
                FieldDefinition::new("rename", TypeRef::named("Dog")).with_argument(
                    InputValueDefinition::new("name", TypeRef::named_non_null("String")),
                ),
            ),
        )
        .register_type(
            ObjectType::new("Subscription")
                .with_field(FieldDefinition::new("petAdded", TypeRef::named("Pet")))
                .with_field(FieldDefinition::new("dogAdded", TypeRef::named("Dog"))),
        )
        .build()
        .expect("validation schema builds")
}

/// Host type backing `Dog` in [`pets_schema`].
pub(super) struct Dog {
    pub name: &'static str,
    pub woofs: bool,
}

/// Host type backing `Cat` in [`pets_schema`].
pub(super) struct Cat {
    pub name: &'static str,
    pub meows: bool,
}

/// An executable schema whose `pets` resolver returns host objects; the
/// concrete type of each is found from its backing Rust type.
pub(super) fn pets_schema() -> Schema {
    Schema::builder()
        .register_type(
            InterfaceType::new("Pet")
                .with_field(FieldDefinition::new("name", TypeRef::named_non_null("String"))),
        )
        .register_type(
            ObjectType::new("Dog")
                .implements("Pet")
                .backed_by::<Dog>()
                .with_field(
                    FieldDefinition::new("name", TypeRef::named_non_null("String")).resolve(
                        |_, parent, _| {
                            let dog = parent.downcast_ref::<Dog>().ok_or("not a dog")?;
                            Ok(FieldValue::value(dog.name))
                        },
                    ),
                )
                .with_field(
                    FieldDefinition::new("woofs", TypeRef::named("Boolean")).resolve(
                        |_, parent, _| {
                            let dog = parent.downcast_ref::<Dog>().ok_or("not a dog")?;
                            Ok(FieldValue::value(dog.woofs))
                        },
                    ),
                ),
        )
        .register_type(
            ObjectType::new("Cat")
                .implements("Pet")
                .backed_by::<Cat>()
                .with_field(
                    FieldDefinition::new("name", TypeRef::named_non_null("String")).resolve(
                        |_, parent, _| {
                            let cat = parent.downcast_ref::<Cat>().ok_or("not a cat")?;
                            Ok(FieldValue::value(cat.name))
                        },
                    ),
                )
                .with_field(
                    FieldDefinition::new("meows", TypeRef::named("Boolean")).resolve(
                        |_, parent, _| {
                            let cat = parent.downcast_ref::<Cat>().ok_or("not a cat")?;
                            Ok(FieldValue::value(cat.meows))
                        },
                    ),
                ),
        )
        .register_type(
            ObjectType::new("Query").with_field(
                FieldDefinition::new("pets", TypeRef::list(TypeRef::named("Pet"))).resolve(
                    |_, _, _| {
                        Ok(FieldValue::list([
                            FieldValue::object(Dog {
                                name: "Odie",
                                woofs: true,
                            }),
                            FieldValue::object(Cat {
                                name: "Garfield",
                                meows: false,
                            }),
                        ]))
                    },
                ),
            ),
        )
        .build()
        .expect("pets schema builds")
}

/// Parses `source`, panicking on a syntax error.
pub(super) fn parse(source: &str) -> ast::Document {
    parse_executable_document(source).expect("document parses")
}

/// Validates `source` against `schema` without variables or limits.
pub(super) fn validate_source(schema: &Schema, source: &str) -> Vec<GraphQLError> {
    validate(schema, &parse(source), None, &ValidationOptions::default())
}

/// The messages of [`validate_source`].
pub(super) fn validation_messages(schema: &Schema, source: &str) -> Vec<String> {
    validate_source(schema, source)
        .into_iter()
        .map(|err| err.message)
        .collect()
}

/// Builds a variable map from `(name, value)` pairs.
pub(super) fn variables<const N: usize>(pairs: [(&str, Value); N]) -> Variables {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Converts response data to JSON for comparison with `serde_json::json!`.
pub(super) fn to_json(value: &Value) -> serde_json::Value {
    serde_json::to_value(value).expect("values serialize")
}

/// Fragments `F0` through `F{count}` on `on_type`, where each fragment
/// spreads the next one twice and the last selects `leaf`. Spreading `F0`
/// reaches the leaf along 2^count paths.
pub(super) fn doubling_fragments(count: usize, on_type: &str, leaf: &str) -> String {
    let mut source = String::new();
    for idx in 0..count {
        let next = idx + 1;
        source.push_str(&format!("fragment F{idx} on {on_type} {{ ...F{next} ...F{next} }}\n"));
    }
    source.push_str(&format!("fragment F{count} on {on_type} {{ {leaf} }}\n"));
    source
}
