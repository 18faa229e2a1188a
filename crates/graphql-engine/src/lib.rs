//! A GraphQL query engine.
//!
//! Build a [`Schema`](schema::Schema) with resolvers, then hand requests to
//! [`execute_request`]:
//!
//! ```rust
//! use graphql_engine::ExecutionContext;
//! use graphql_engine::ExecutionOptions;
//! use graphql_engine::FieldValue;
//! use graphql_engine::Request;
//! use graphql_engine::execute_request;
//! use graphql_engine::schema::FieldDefinition;
//! use graphql_engine::schema::ObjectType;
//! use graphql_engine::schema::Schema;
//! use graphql_engine::schema::TypeRef;
//!
//! let schema = Schema::builder()
//!     .register_type(ObjectType::new("Query").with_field(
//!         FieldDefinition::new("hello", TypeRef::named("String"))
//!             .resolve(|_, _, _| Ok(FieldValue::value("world"))),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let response = execute_request(
//!     &schema,
//!     &ExecutionContext::new(),
//!     &Request::new("{ hello }"),
//!     &ExecutionOptions::default(),
//! );
//! assert!(response.is_ok());
//! ```

pub use graphql_engine_core::*;

/// The lexer, parser and AST of executable documents.
pub mod parser {
    pub use graphql_engine_parser::*;
}

pub use graphql_engine_parser::parse_executable_document;
