use crate::GraphQLErrorNote;
use crate::GraphQLErrorNotes;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::ast::AstPos;

/// A located syntax fault produced by the lexer or parser.
///
/// Parsing stops at the first fault, so a document yields at most one of
/// these.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct GraphQLParseError {
    message: String,
    span: GraphQLSourceSpan,
    kind: GraphQLParseErrorKind,
    notes: GraphQLErrorNotes,
}

impl GraphQLParseError {
    pub fn new(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        kind: GraphQLParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: GraphQLErrorNotes::new(),
        }
    }

    /// Wraps an `Error` token emitted by the lexer, keeping its notes.
    pub fn from_lexer_error(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        notes: GraphQLErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind: GraphQLParseErrorKind::LexerError,
            notes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }

    pub fn kind(&self) -> &GraphQLParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &GraphQLErrorNotes {
        &self.notes
    }

    /// 1-based location of the fault.
    pub fn location(&self) -> AstPos {
        self.span.start_pos()
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::general(message));
    }

    pub fn add_note_with_span(
        &mut self,
        message: impl Into<String>,
        span: GraphQLSourceSpan,
    ) {
        self.notes
            .push(GraphQLErrorNote::general_with_span(message, span));
    }

    pub fn add_help(&mut self, message: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::help(message));
    }

    pub fn add_spec(&mut self, url: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::spec(url));
    }

    /// `line:column: error: message`
    pub fn format_oneline(&self) -> String {
        let pos = self.location();
        format!("{}:{}: error: {}", pos.line, pos.column, self.message)
    }

    /// Multi-line rendering with a source excerpt and caret underline, for
    /// terminal output.
    ///
    /// ```text
    /// error: expected `}`, found end of input
    ///   --> query.graphql:3:1
    ///    |
    ///  3 | 
    ///    | ^
    ///    = note: opening `{` here
    /// ```
    pub fn format_detailed(&self, file_name: &str, source: &str) -> String {
        let pos = self.location();
        let mut out = format!(
            "error: {}\n  --> {file_name}:{}:{}\n",
            self.message, pos.line, pos.column,
        );
        if let Some(excerpt) = source_excerpt(source, &self.span) {
            out.push_str(&excerpt);
        }
        for note in &self.notes {
            out.push_str(&format!("   = {}: {}", note.prefix(), note.message));
            if let Some(span) = &note.span {
                let at = span.start_pos();
                out.push_str(&format!(" ({}:{})", at.line, at.column));
            }
            out.push('\n');
        }
        out
    }
}

fn source_excerpt(source: &str, span: &GraphQLSourceSpan) -> Option<String> {
    let line_idx = span.start_inclusive.line();
    let line = source.lines().nth(line_idx).unwrap_or("");
    if line_idx > source.lines().count() {
        return None;
    }
    let display_line = (line_idx + 1).to_string();
    let gutter = display_line.len().max(2);
    let col_start = span.start_inclusive.col_utf8();
    let width = if span.end_exclusive.line() == line_idx
        && span.end_exclusive.col_utf8() > col_start
    {
        span.end_exclusive.col_utf8() - col_start
    } else {
        1
    };
    Some(format!(
        "{:>gutter$} |\n{display_line:>gutter$} | {line}\n{:>gutter$} | {}{}\n",
        "",
        "",
        " ".repeat(col_start),
        "^".repeat(width),
    ))
}
