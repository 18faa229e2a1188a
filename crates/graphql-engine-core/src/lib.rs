//! Schema type graph, validation, selection-set resolution and execution
//! for GraphQL executable documents.
//!
//! The phases compose as [`execute_request`] does: parse the query,
//! [`validate`] it, [`apply_selection_set`] to bind variables and
//! fragments, then [`execute`] the result against the schema's resolvers.

pub mod coercion;
mod error;
pub mod execution;
mod request;
pub mod resolver;
pub mod schema;
pub mod selection;
pub mod validation;
mod value;

pub use coercion::InputValueError;
pub use coercion::Variables;
pub use error::GraphQLError;
pub use error::MultiError;
pub use error::PathSegment;
pub use execution::ExecutionContext;
pub use execution::ExecutionOptions;
pub use execution::ExecutionStrategy;
pub use execution::execute;
pub use request::Request;
pub use request::Response;
pub use request::execute_request;
pub use request::execute_request_with_root;
pub use resolver::Arguments;
pub use resolver::FieldError;
pub use resolver::FieldValue;
pub use resolver::HostObject;
pub use resolver::ResolveContext;
pub use selection::apply_selection_set;
pub use selection::flatten;
pub use validation::ValidationOptions;
pub use validation::validate;
pub use value::Value;

#[cfg(test)]
mod tests;
