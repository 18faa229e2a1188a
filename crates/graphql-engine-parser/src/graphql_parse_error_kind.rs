use crate::GraphQLStringParsingError;

/// Machine-readable category of a [`GraphQLParseError`](crate::GraphQLParseError).
///
/// The human-readable explanation lives in the error's `message` and
/// `notes`; variants only carry what a tool would branch on.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GraphQLParseErrorKind {
    /// The grammar called for one of `expected` but another token was found.
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The document ended in the middle of a construct.
    #[error("unexpected end of input")]
    UnexpectedEof { expected: Vec<String> },

    /// The lexer produced an error token (bad character, malformed number,
    /// unterminated string, ...).
    #[error("lexer error")]
    LexerError,

    /// A `{`, `[` or `(` was never closed before the end of input.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter { delimiter: String },

    /// A literal could not be decoded into a value.
    #[error("invalid value")]
    InvalidValue(InvalidValueReason),

    /// A name was used where the grammar reserves it (a fragment named `on`).
    #[error("reserved name: `{name}`")]
    ReservedName { name: String },

    /// A construct that must be non-empty was empty (e.g. `{}` or `()`).
    #[error("empty {construct}")]
    InvalidEmptyConstruct { construct: String },

    /// Well-formed tokens arranged in a way the grammar forbids (a variable
    /// inside a default value).
    #[error("invalid syntax")]
    InvalidSyntax,

    /// Nesting exceeded the parser's recursion limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

/// Why a literal failed to decode.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidValueReason {
    #[error("float `{0}` is not finite")]
    FloatNotFinite(String),

    #[error(transparent)]
    String(#[from] GraphQLStringParsingError),
}
