/// Failure to decode the raw text of a string literal into its value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GraphQLStringParsingError {
    #[error("Invalid escape sequence: `{0}`")]
    InvalidEscapeSequence(String),

    #[error("Invalid unicode escape: `{0}`")]
    InvalidUnicodeEscape(String),

    #[error("Unterminated string: missing closing quote")]
    UnterminatedString,
}
