use crate::GraphQLSourceSpan;
use smallvec::SmallVec;

/// How a [`GraphQLErrorNote`] is rendered (`note:`, `help:` or `spec:`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphQLErrorNoteKind {
    General,
    Help,
    Spec,
}

/// Supplementary context attached to a lexer or parser error.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLErrorNote {
    pub kind: GraphQLErrorNoteKind,
    pub message: String,
    /// A related location, e.g. where an unclosed delimiter was opened.
    pub span: Option<GraphQLSourceSpan>,
}

impl GraphQLErrorNote {
    fn of_kind(kind: GraphQLErrorNoteKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self::of_kind(GraphQLErrorNoteKind::General, message)
    }

    /// A `note:` pointing at a second location in the source.
    pub fn general_with_span(message: impl Into<String>, span: GraphQLSourceSpan) -> Self {
        Self {
            span: Some(span),
            ..Self::general(message)
        }
    }

    pub fn help(message: impl Into<String>) -> Self {
        Self::of_kind(GraphQLErrorNoteKind::Help, message)
    }

    /// A link to the relevant section of the GraphQL language reference.
    pub fn spec(url: impl Into<String>) -> Self {
        Self::of_kind(GraphQLErrorNoteKind::Spec, url)
    }

    pub(crate) fn prefix(&self) -> &'static str {
        match self.kind {
            GraphQLErrorNoteKind::General => "note",
            GraphQLErrorNoteKind::Help => "help",
            GraphQLErrorNoteKind::Spec => "spec",
        }
    }
}

/// Most errors carry zero to two notes.
pub type GraphQLErrorNotes = SmallVec<[GraphQLErrorNote; 2]>;
