//! Input coercion: variable values, argument literals and default values
//! checked against their declared input types.

use crate::GraphQLError;
use crate::Value;
use crate::resolver::Arguments;
use crate::schema::GraphQLType;
use crate::schema::InputValueDefinition;
use crate::schema::Schema;
use crate::schema::TypeRef;
use graphql_engine_parser::ast;
use indexmap::IndexMap;

/// Coerced variable values, keyed by name without the `$`.
pub type Variables = IndexMap<String, Value>;

/// Why an input value does not fit its type. `path` locates the offending
/// part within the whole value, e.g. `$input.tags[1]`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InputValueError {
    #[error("Expected value of non-null type \"{expected}\", found null (at {path})")]
    UnexpectedNull { path: String, expected: String },

    #[error("{reason} (at {path})")]
    InvalidValue { path: String, reason: String },

    #[error("Expected an input object of type \"{type_name}\", found {found} (at {path})")]
    ExpectedObject {
        path: String,
        type_name: String,
        found: String,
    },

    #[error("Field \"{field_name}\" is not defined by type \"{type_name}\" (at {path})")]
    UnknownField {
        path: String,
        type_name: String,
        field_name: String,
    },

    #[error(
        "Field \"{type_name}.{field_name}\" of required type \"{field_type}\" was not \
         provided (at {path})"
    )]
    MissingField {
        path: String,
        type_name: String,
        field_name: String,
        field_type: String,
    },

    #[error("Argument \"{argument}\" of required type \"{ty}\" was not provided")]
    MissingArgument { argument: String, ty: String },

    #[error("Unknown type \"{type_name}\" (at {path})")]
    UnknownType { path: String, type_name: String },

    #[error("\"{type_name}\" is not an input type (at {path})")]
    NotAnInputType { path: String, type_name: String },
}

impl InputValueError {
    pub fn path(&self) -> &str {
        match self {
            InputValueError::UnexpectedNull { path, .. }
            | InputValueError::InvalidValue { path, .. }
            | InputValueError::ExpectedObject { path, .. }
            | InputValueError::UnknownField { path, .. }
            | InputValueError::MissingField { path, .. }
            | InputValueError::UnknownType { path, .. }
            | InputValueError::NotAnInputType { path, .. } => path,
            InputValueError::MissingArgument { argument, .. } => argument,
        }
    }
}

type Result<T> = std::result::Result<T, InputValueError>;

fn field_path(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}

fn index_path(path: &str, idx: usize) -> String {
    format!("{path}[{idx}]")
}

fn leaf_input_type<'s>(schema: &'s Schema, name: &str, path: &str) -> Result<&'s GraphQLType> {
    match schema.get_type(name) {
        None => Err(InputValueError::UnknownType {
            path: path.to_string(),
            type_name: name.to_string(),
        }),
        Some(named) if !named.is_input_type() => Err(InputValueError::NotAnInputType {
            path: path.to_string(),
            type_name: name.to_string(),
        }),
        Some(named) => Ok(named),
    }
}

/// Coerces an already-materialized value (a variable from the request, or
/// a default) to `ty`.
///
/// A non-list value given for a list type is wrapped in a one-element list.
/// Enum values may be given as strings.
pub fn coerce_value(schema: &Schema, ty: &TypeRef, value: &Value, path: &str) -> Result<Value> {
    match ty {
        TypeRef::NonNull(inner) => {
            if value.is_null() {
                return Err(InputValueError::UnexpectedNull {
                    path: path.to_string(),
                    expected: ty.to_string(),
                });
            }
            coerce_value(schema, inner, value, path)
        },
        _ if value.is_null() => Ok(Value::Null),
        TypeRef::List(item) => match value {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item_value)| {
                    coerce_value(schema, item, item_value, &index_path(path, idx))
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            single => Ok(Value::List(vec![coerce_value(schema, item, single, path)?])),
        },
        TypeRef::Named(name) => match leaf_input_type(schema, name, path)? {
            GraphQLType::Scalar(scalar) => {
                scalar.parse_input(value).map_err(|reason| InputValueError::InvalidValue {
                    path: path.to_string(),
                    reason,
                })
            },
            GraphQLType::Enum(enum_) => match value.as_str() {
                Some(enum_name) => enum_.parse_input(enum_name).map_err(|reason| {
                    InputValueError::InvalidValue {
                        path: path.to_string(),
                        reason,
                    }
                }),
                None => Err(InputValueError::InvalidValue {
                    path: path.to_string(),
                    reason: format!(
                        "Enum \"{}\" cannot represent non-string value: {value}",
                        enum_.name(),
                    ),
                }),
            },
            GraphQLType::InputObject(input) => {
                let Value::Object(provided) = value else {
                    return Err(InputValueError::ExpectedObject {
                        path: path.to_string(),
                        type_name: input.name().to_string(),
                        found: value.to_string(),
                    });
                };
                if let Some(unknown) = provided.keys().find(|key| input.field(key).is_none()) {
                    return Err(InputValueError::UnknownField {
                        path: path.to_string(),
                        type_name: input.name().to_string(),
                        field_name: unknown.to_string(),
                    });
                }
                let mut coerced = IndexMap::new();
                for field in input.fields().values() {
                    let child_path = field_path(path, field.name());
                    match provided.get(field.name()) {
                        Some(field_value) => {
                            coerced.insert(
                                field.name().to_string(),
                                coerce_value(schema, field.ty(), field_value, &child_path)?,
                            );
                        },
                        None => {
                            if let Some(default) = fill_default(schema, input.name(), field, path)? {
                                coerced.insert(field.name().to_string(), default);
                            }
                        },
                    }
                }
                Ok(Value::Object(coerced))
            },
            GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_) => {
                Err(InputValueError::NotAnInputType {
                    path: path.to_string(),
                    type_name: name.to_string(),
                })
            },
        },
    }
}

/// The value for an input field that was not provided: its default, an
/// error if it is required, or nothing.
fn fill_default(
    schema: &Schema,
    type_name: &str,
    field: &InputValueDefinition,
    path: &str,
) -> Result<Option<Value>> {
    match field.default_value() {
        Some(default) => {
            coerce_value(schema, field.ty(), default, &field_path(path, field.name())).map(Some)
        },
        None if field.ty().is_non_null() => Err(InputValueError::MissingField {
            path: path.to_string(),
            type_name: type_name.to_string(),
            field_name: field.name().to_string(),
            field_type: field.ty().to_string(),
        }),
        None => Ok(None),
    }
}

/// Converts a literal to a [`Value`] without type information. Variables
/// are replaced by their bound value (or null).
pub(crate) fn literal_to_value(literal: &ast::Value, variables: Option<&Variables>) -> Value {
    match literal {
        ast::Value::Variable { name, .. } => variables
            .and_then(|vars| vars.get(name.as_str()))
            .cloned()
            .unwrap_or(Value::Null),
        ast::Value::Int { .. } => literal
            .as_i128()
            .map(Value::Int)
            .unwrap_or_else(|| literal.as_f64().map_or(Value::Null, Value::Float)),
        ast::Value::Float { .. } => literal.as_f64().map_or(Value::Null, Value::Float),
        ast::Value::String { value, .. } => Value::String(value.clone()),
        ast::Value::Boolean { value, .. } => Value::Boolean(*value),
        ast::Value::Null { .. } => Value::Null,
        ast::Value::Enum { value, .. } => Value::Enum(value.clone()),
        ast::Value::List { values, .. } => Value::List(
            values.iter().map(|value| literal_to_value(value, variables)).collect(),
        ),
        ast::Value::Object { fields, .. } => Value::Object(
            fields
                .iter()
                .map(|field| (field.name.value.clone(), literal_to_value(&field.value, variables)))
                .collect(),
        ),
    }
}

/// Coerces a literal from the document to `ty`.
///
/// With `variables` bound, variable references take their coerced value and
/// an unbound variable counts as absent (`Ok(None)`). Without them (during
/// validation) any variable reference is accepted as-is and also yields
/// `Ok(None)`; the variable rules check those positions separately.
pub fn coerce_literal(
    schema: &Schema,
    ty: &TypeRef,
    literal: &ast::Value,
    variables: Option<&Variables>,
    path: &str,
) -> Result<Option<Value>> {
    if let ast::Value::Variable { name, .. } = literal {
        let bound = variables.and_then(|vars| vars.get(name.as_str())).cloned();
        if bound.as_ref().is_some_and(Value::is_null) && ty.is_non_null() {
            return Err(InputValueError::UnexpectedNull {
                path: path.to_string(),
                expected: ty.to_string(),
            });
        }
        return Ok(bound);
    }

    match ty {
        TypeRef::NonNull(inner) => {
            if matches!(literal, ast::Value::Null { .. }) {
                return Err(InputValueError::UnexpectedNull {
                    path: path.to_string(),
                    expected: ty.to_string(),
                });
            }
            coerce_literal(schema, inner, literal, variables, path)
        },
        _ if matches!(literal, ast::Value::Null { .. }) => Ok(Some(Value::Null)),
        TypeRef::List(item) => match literal {
            ast::Value::List { values, .. } => {
                let mut coerced = Vec::with_capacity(values.len());
                for (idx, value) in values.iter().enumerate() {
                    let element = coerce_literal(schema, item, value, variables, &index_path(path, idx))?;
                    if element.is_none() && variables.is_some() && item.is_non_null() {
                        return Err(InputValueError::UnexpectedNull {
                            path: index_path(path, idx),
                            expected: item.to_string(),
                        });
                    }
                    coerced.push(element.unwrap_or(Value::Null));
                }
                Ok(Some(Value::List(coerced)))
            },
            single => Ok(coerce_literal(schema, item, single, variables, path)?
                .map(|value| Value::List(vec![value]))),
        },
        TypeRef::Named(name) => match leaf_input_type(schema, name, path)? {
            GraphQLType::Scalar(scalar) => {
                if matches!(literal, ast::Value::List { .. } | ast::Value::Object { .. })
                    && scalar.kind() != crate::schema::ScalarKind::Custom
                {
                    return Err(InputValueError::InvalidValue {
                        path: path.to_string(),
                        reason: format!("{} cannot represent value: {literal}", scalar.name()),
                    });
                }
                scalar
                    .parse_input(&literal_to_value(literal, variables))
                    .map(Some)
                    .map_err(|reason| InputValueError::InvalidValue {
                        path: path.to_string(),
                        reason,
                    })
            },
            GraphQLType::Enum(enum_) => match literal {
                ast::Value::Enum { value, .. } => enum_
                    .parse_input(value)
                    .map(Some)
                    .map_err(|reason| InputValueError::InvalidValue {
                        path: path.to_string(),
                        reason,
                    }),
                other => Err(InputValueError::InvalidValue {
                    path: path.to_string(),
                    reason: format!(
                        "Enum \"{}\" cannot represent non-enum value: {other}",
                        enum_.name(),
                    ),
                }),
            },
            GraphQLType::InputObject(input) => {
                let ast::Value::Object { fields, .. } = literal else {
                    return Err(InputValueError::ExpectedObject {
                        path: path.to_string(),
                        type_name: input.name().to_string(),
                        found: literal.to_string(),
                    });
                };
                for (idx, field) in fields.iter().enumerate() {
                    if input.field(field.name.as_str()).is_none() {
                        return Err(InputValueError::UnknownField {
                            path: path.to_string(),
                            type_name: input.name().to_string(),
                            field_name: field.name.value.clone(),
                        });
                    }
                    if fields[..idx].iter().any(|prev| prev.name.value == field.name.value) {
                        return Err(InputValueError::InvalidValue {
                            path: path.to_string(),
                            reason: format!(
                                "There can be only one input field named \"{}\"",
                                field.name,
                            ),
                        });
                    }
                }
                let mut coerced = IndexMap::new();
                for field_def in input.fields().values() {
                    let child_path = field_path(path, field_def.name());
                    let provided = fields.iter().find(|f| f.name.value == field_def.name());
                    let value = match provided {
                        Some(provided) => {
                            coerce_literal(schema, field_def.ty(), &provided.value, variables, &child_path)?
                        },
                        None => None,
                    };
                    match value {
                        Some(value) => {
                            coerced.insert(field_def.name().to_string(), value);
                        },
                        // A variable reference during validation counts as
                        // provided.
                        None if provided.is_some() && variables.is_none() => (),
                        None => {
                            if let Some(default) = fill_default(schema, input.name(), field_def, path)? {
                                coerced.insert(field_def.name().to_string(), default);
                            }
                        },
                    }
                }
                Ok(Some(Value::Object(coerced)))
            },
            GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_) => {
                Err(InputValueError::NotAnInputType {
                    path: path.to_string(),
                    type_name: name.to_string(),
                })
            },
        },
    }
}

/// Binds the arguments given in the document to their definitions, in
/// definition order. Unknown arguments are ignored.
pub fn coerce_arguments(
    schema: &Schema,
    definitions: &IndexMap<String, InputValueDefinition>,
    arguments: &[ast::Argument],
    variables: &Variables,
) -> Result<Arguments> {
    let mut coerced = Arguments::new();
    for definition in definitions.values() {
        let given = arguments
            .iter()
            .find(|arg| arg.name.value == definition.name())
            .map(|arg| &arg.value);
        let value = match given {
            Some(literal) => {
                coerce_literal(schema, definition.ty(), literal, Some(variables), definition.name())?
            },
            None => None,
        };
        match (value, definition.default_value()) {
            (Some(value), _) => {
                coerced.insert(definition.name().to_string(), value);
            },
            (None, Some(default)) => {
                coerced.insert(
                    definition.name().to_string(),
                    coerce_value(schema, definition.ty(), default, definition.name())?,
                );
            },
            (None, None) if definition.ty().is_non_null() => {
                return Err(InputValueError::MissingArgument {
                    argument: definition.name().to_string(),
                    ty: definition.ty().to_string(),
                });
            },
            (None, None) => (),
        }
    }
    Ok(coerced)
}

/// Coerces the request's variable values against an operation's variable
/// definitions.
///
/// Defaults fill in missing values; required variables must be provided.
/// Every faulty variable is reported.
pub fn coerce_variables(
    schema: &Schema,
    definitions: &[ast::VariableDefinition],
    provided: &Variables,
) -> std::result::Result<Variables, Vec<GraphQLError>> {
    let mut coerced = Variables::new();
    let mut errors = vec![];
    for definition in definitions {
        let name = definition.variable.as_str();
        let ty = TypeRef::from_ast(&definition.var_type);
        let location = definition.location();

        match schema.get_type(ty.innermost_name()) {
            Some(named) if named.is_input_type() => (),
            _ => {
                errors.push(
                    GraphQLError::new(format!(
                        "Variable \"${name}\" cannot be non-input type \"{ty}\"."
                    ))
                    .with_location(location),
                );
                continue;
            },
        }

        match provided.get(name) {
            Some(value) if value.is_null() && ty.is_non_null() => {
                errors.push(
                    GraphQLError::new(format!(
                        "Variable \"${name}\" of non-null type \"{ty}\" must not be null."
                    ))
                    .with_location(location),
                );
            },
            Some(value) => match coerce_value(schema, &ty, value, &format!("${name}")) {
                Ok(value) => {
                    coerced.insert(name.to_string(), value);
                },
                Err(err) => errors.push(
                    GraphQLError::new(format!("Variable \"${name}\" got invalid value {value}; {err}"))
                        .with_location(location),
                ),
            },
            None => match &definition.default_value {
                Some(default) => {
                    match coerce_literal(schema, &ty, default, Some(&Variables::new()), &format!("${name}")) {
                        Ok(Some(value)) => {
                            coerced.insert(name.to_string(), value);
                        },
                        Ok(None) => (),
                        Err(err) => errors.push(
                            GraphQLError::new(format!(
                                "Variable \"${name}\" has invalid default value {default}; {err}"
                            ))
                            .with_location(default.location()),
                        ),
                    }
                },
                None if ty.is_non_null() => errors.push(
                    GraphQLError::new(format!(
                        "Variable \"${name}\" of required type \"{ty}\" was not provided."
                    ))
                    .with_location(location),
                ),
                None => (),
            },
        }
    }
    if errors.is_empty() { Ok(coerced) } else { Err(errors) }
}
