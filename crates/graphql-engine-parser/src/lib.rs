//! Lexing and parsing of GraphQL executable documents (operations and
//! fragments) into an owned AST.
//!
//! ```rust
//! use graphql_engine_parser::parse_executable_document;
//!
//! let doc = parse_executable_document("{ hero { name } }").unwrap();
//! assert_eq!(doc.definitions.len(), 1);
//! ```

pub mod ast;
mod graphql_error_note;
mod graphql_parse_error;
mod graphql_parse_error_kind;
mod graphql_parser;
mod graphql_source_span;
mod graphql_string_parsing_error;
mod graphql_token_stream;
mod source_position;
pub mod token;
pub mod token_source;

pub use graphql_error_note::GraphQLErrorNote;
pub use graphql_error_note::GraphQLErrorNoteKind;
pub use graphql_error_note::GraphQLErrorNotes;
pub use graphql_parse_error::GraphQLParseError;
pub use graphql_parse_error_kind::GraphQLParseErrorKind;
pub use graphql_parse_error_kind::InvalidValueReason;
pub use graphql_parser::GraphQLParser;
pub use graphql_source_span::GraphQLSourceSpan;
pub use graphql_string_parsing_error::GraphQLStringParsingError;
pub use graphql_token_stream::GraphQLTokenStream;
pub use smallvec::SmallVec;
pub use smallvec::smallvec;
pub use source_position::SourcePosition;

/// Parses `source` as an executable document.
///
/// The first syntax fault aborts parsing and is returned as the error.
pub fn parse_executable_document(
    source: &str,
) -> Result<ast::Document, GraphQLParseError> {
    GraphQLParser::new(source).parse_executable_document()
}

#[cfg(test)]
mod tests;
