use crate::schema::DirectiveDefinition;
use crate::schema::GraphQLType;
use crate::schema::InputObjectTypeValidator;
use crate::schema::ObjectOrInterfaceTypeValidator;
use crate::schema::ScalarKind;
use crate::schema::ScalarType;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::UnionTypeValidator;
use crate::schema::type_validators::validate_directive;
use graphql_engine_parser::ast::OperationKind;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, Vec<SchemaBuildError>>;

/// Assembles a [`Schema`].
///
/// The built-in scalars (`Int`, `Float`, `String`, `Boolean`, `ID`) and the
/// `@skip`/`@include` directives are pre-registered. Problems are collected
/// as types are registered and reported together by [`build`].
///
/// [`build`]: SchemaBuilder::build
#[derive(Debug)]
pub struct SchemaBuilder {
    types: IndexMap<String, GraphQLType>,
    directives: IndexMap<String, DirectiveDefinition>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    errors: Vec<SchemaBuildError>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        let builtin_scalars = [
            ScalarType::new("Int", ScalarKind::Int),
            ScalarType::new("Float", ScalarKind::Float),
            ScalarType::new("String", ScalarKind::String),
            ScalarType::new("Boolean", ScalarKind::Boolean),
            ScalarType::new("ID", ScalarKind::ID),
        ];
        let builtin_directives = [DirectiveDefinition::skip(), DirectiveDefinition::include()];
        Self {
            types: builtin_scalars
                .into_iter()
                .map(|scalar| (scalar.name.clone(), GraphQLType::Scalar(scalar)))
                .collect(),
            directives: builtin_directives
                .into_iter()
                .map(|directive| (directive.name.clone(), directive))
                .collect(),
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            errors: vec![],
        }
    }

    /// Registers the fixed-width numeric scalars, each named after its
    /// [`ScalarKind`] (`Int8`, `UInt32`, `Float32`, ...).
    pub fn with_width_scalars(mut self) -> Self {
        for (name, kind) in [
            ("Int8", ScalarKind::Int8),
            ("Int16", ScalarKind::Int16),
            ("Int64", ScalarKind::Int64),
            ("UInt8", ScalarKind::UInt8),
            ("UInt16", ScalarKind::UInt16),
            ("UInt32", ScalarKind::UInt32),
            ("UInt64", ScalarKind::UInt64),
            ("Float32", ScalarKind::Float32),
        ] {
            self = self.register_type(ScalarType::new(name, kind));
        }
        self
    }

    pub fn register_type(mut self, type_: impl Into<GraphQLType>) -> Self {
        let type_ = type_.into();
        let type_name = type_.name().to_string();
        if type_name.starts_with("__") {
            self.errors.push(SchemaBuildError::InvalidDunderPrefixedTypeName { type_name });
        } else if self.types.contains_key(&type_name) {
            self.errors.push(SchemaBuildError::DuplicateTypeDefinition { type_name });
        } else {
            self.types.insert(type_name, type_);
        }
        self
    }

    pub fn register_directive(mut self, directive: DirectiveDefinition) -> Self {
        if self.directives.contains_key(&directive.name) {
            self.errors.push(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: directive.name.clone(),
            });
        } else {
            self.directives.insert(directive.name.clone(), directive);
        }
        self
    }

    /// Defaults to the type named `Query`.
    pub fn query_type(mut self, type_name: impl Into<String>) -> Self {
        self.query_type = Some(type_name.into());
        self
    }

    /// Defaults to the type named `Mutation`, if one is registered.
    pub fn mutation_type(mut self, type_name: impl Into<String>) -> Self {
        self.mutation_type = Some(type_name.into());
        self
    }

    /// Defaults to the type named `Subscription`, if one is registered.
    pub fn subscription_type(mut self, type_name: impl Into<String>) -> Self {
        self.subscription_type = Some(type_name.into());
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut errors = self.errors;

        let query_type = match self.query_type {
            Some(name) => Some(name),
            None if self.types.contains_key("Query") => Some("Query".to_string()),
            None => {
                errors.push(SchemaBuildError::NoQueryType);
                None
            },
        };
        let mutation_type = self.mutation_type.or_else(|| {
            self.types
                .get("Mutation")
                .filter(|t| t.as_object().is_some())
                .map(|_| "Mutation".to_string())
        });
        let subscription_type = self.subscription_type.or_else(|| {
            self.types
                .get("Subscription")
                .filter(|t| t.as_object().is_some())
                .map(|_| "Subscription".to_string())
        });

        for (operation, root) in [
            (OperationKind::Query, &query_type),
            (OperationKind::Mutation, &mutation_type),
            (OperationKind::Subscription, &subscription_type),
        ] {
            let Some(type_name) = root else {
                continue;
            };
            match self.types.get(type_name) {
                Some(GraphQLType::Object(_)) => (),
                Some(_) => errors.push(SchemaBuildError::RootTypeNotObject {
                    operation,
                    type_name: type_name.to_string(),
                }),
                None => errors.push(SchemaBuildError::RootTypeNotDefined {
                    operation,
                    type_name: type_name.to_string(),
                }),
            }
        }

        let schema = Schema {
            types: self.types,
            directives: self.directives,
            query_type: query_type.unwrap_or_default(),
            mutation_type,
            subscription_type,
        };

        // Final validation of all types together.
        for type_ in schema.types.values() {
            match type_ {
                GraphQLType::Scalar(_) | GraphQLType::Enum(_) => (),

                GraphQLType::InputObject(type_) => errors.append(
                    &mut InputObjectTypeValidator::new(type_, &schema).validate(),
                ),

                GraphQLType::Interface(type_) => errors.append(
                    &mut ObjectOrInterfaceTypeValidator::new(&type_.data, &schema).validate(),
                ),

                GraphQLType::Object(type_) => errors.append(
                    &mut ObjectOrInterfaceTypeValidator::new(&type_.data, &schema).validate(),
                ),

                GraphQLType::Union(type_) => errors.append(
                    &mut UnionTypeValidator::new(type_, &schema).validate(),
                ),
            }
        }
        for directive in schema.directives.values() {
            errors.append(&mut validate_directive(directive, &schema));
        }

        if errors.is_empty() {
            tracing::debug!(types = schema.types.len(), "built schema");
            Ok(schema)
        } else {
            Err(errors)
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
