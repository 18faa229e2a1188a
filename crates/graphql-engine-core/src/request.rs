//! The full request pipeline: parse, validate, resolve, execute.

use crate::GraphQLError;
use crate::Value;
use crate::coercion::Variables;
use crate::execution::ExecutionContext;
use crate::execution::ExecutionOptions;
use crate::execution::execute;
use crate::resolver::FieldValue;
use crate::schema::Schema;
use crate::selection::apply_selection_set;
use crate::validation::ValidationOptions;
use crate::validation::validate;
use graphql_engine_parser::parse_executable_document;
use indexmap::IndexMap;

/// A GraphQL request as sent by a client.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: Variables,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

/// The response shape of GraphQL over HTTP. `data` is absent when the
/// request failed before execution started.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, Value>,
}

impl Response {
    pub fn from_errors(errors: impl IntoIterator<Item = GraphQLError>) -> Self {
        Self {
            data: None,
            errors: errors.into_iter().collect(),
            extensions: IndexMap::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs `request` against `schema` with a null root value.
pub fn execute_request(
    schema: &Schema,
    ctx: &ExecutionContext,
    request: &Request,
    options: &ExecutionOptions,
) -> Response {
    execute_request_with_root(schema, ctx, request, &FieldValue::Null, options)
}

/// Runs `request` against `schema`; `root_value` is the parent value seen
/// by root field resolvers.
pub fn execute_request_with_root(
    schema: &Schema,
    ctx: &ExecutionContext,
    request: &Request,
    root_value: &FieldValue,
    options: &ExecutionOptions,
) -> Response {
    let document = match parse_executable_document(&request.query) {
        Ok(document) => document,
        Err(err) => {
            tracing::debug!(error = %err.message(), "request failed to parse");
            return Response::from_errors([err.into()]);
        },
    };
    tracing::trace!(definitions = document.definitions.len(), "parsed request");

    let validation_options = ValidationOptions {
        max_depth: options.max_depth,
    };
    let errors = validate(schema, &document, Some(&request.variables), &validation_options);
    if !errors.is_empty() {
        return Response::from_errors(errors);
    }

    let (operation_kind, selection_set) = match apply_selection_set(
        schema,
        &document,
        request.operation_name.as_deref(),
        &request.variables,
    ) {
        Ok(resolved) => resolved,
        Err(errors) => return Response::from_errors(errors),
    };

    let Some(root_type) = schema.root_type(operation_kind) else {
        return Response::from_errors([GraphQLError::new(format!(
            "Schema is not configured for {operation_kind}s."
        ))]);
    };

    let (data, errors) = execute(ctx, schema, root_type, root_value, &selection_set, options);
    Response {
        data: Some(data),
        errors: errors.into_errors(),
        extensions: IndexMap::new(),
    }
}
