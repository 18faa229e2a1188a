//! Lexers producing [`GraphQLToken`](crate::token::GraphQLToken)s.

mod graphql_token_source;
mod str_graphql_token_source;

pub use graphql_token_source::GraphQLTokenSource;
pub use str_graphql_token_source::StrGraphQLTokenSource;
