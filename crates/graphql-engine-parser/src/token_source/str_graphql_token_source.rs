//! A lexer over `&str` input.
//!
//! Token values borrow from the source (`Cow::Borrowed`), so lexing a
//! document allocates only for error messages.
//!
//! ```rust
//! use graphql_engine_parser::token::GraphQLTokenKind;
//! use graphql_engine_parser::token_source::StrGraphQLTokenSource;
//!
//! let kinds: Vec<_> = StrGraphQLTokenSource::new("{ name }")
//!     .map(|token| token.kind)
//!     .collect();
//! assert_eq!(kinds.len(), 4);
//! assert_eq!(kinds[3], GraphQLTokenKind::Eof);
//! ```

use crate::GraphQLErrorNote;
use crate::GraphQLErrorNotes;
use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use crate::smallvec;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use std::borrow::Cow;

const INT_VALUE_SPEC_URL: &str =
    "https://spec.graphql.org/October2021/#sec-Int-Value";
const FLOAT_VALUE_SPEC_URL: &str =
    "https://spec.graphql.org/October2021/#sec-Float-Value";

pub struct StrGraphQLTokenSource<'src> {
    source: &'src str,

    /// The unlexed text is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,
    curr_line: usize,
    curr_col_utf8: usize,
    curr_col_utf16: usize,

    /// Set after a `\r` so that a following `\n` does not count as a
    /// second line break.
    last_char_was_cr: bool,

    finished: bool,
}

impl<'src> StrGraphQLTokenSource<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col_utf8: 0,
            curr_col_utf16: 0,
            last_char_was_cr: false,
            finished: false,
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(
            self.curr_line,
            self.curr_col_utf8,
            self.curr_col_utf16,
            self.curr_byte_offset,
        )
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes one character, advancing the byte offset and the
    /// line/column counters. `\n`, `\r` and `\r\n` each end one line.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        match ch {
            '\n' if self.last_char_was_cr => {
                self.last_char_was_cr = false;
            },
            '\n' | '\r' => {
                self.curr_line += 1;
                self.curr_col_utf8 = 0;
                self.curr_col_utf16 = 0;
                self.last_char_was_cr = ch == '\r';
            },
            _ => {
                self.curr_col_utf8 += 1;
                self.curr_col_utf16 += ch.len_utf16();
                self.last_char_was_cr = false;
            },
        }
        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char()
            && pred(ch)
        {
            self.consume();
        }
    }

    fn make_span(&self, start: SourcePosition) -> GraphQLSourceSpan {
        GraphQLSourceSpan::new(start, self.curr_position())
    }

    fn punctuator(
        &mut self,
        start: SourcePosition,
        kind: GraphQLTokenKind<'src>,
    ) -> GraphQLToken<'src> {
        self.consume();
        GraphQLToken::new(kind, self.make_span(start))
    }

    fn error_token(
        &self,
        start: SourcePosition,
        message: impl Into<String>,
        error_notes: GraphQLErrorNotes,
    ) -> GraphQLToken<'src> {
        GraphQLToken::new(
            GraphQLTokenKind::error(message, error_notes),
            self.make_span(start),
        )
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    fn next_token(&mut self) -> GraphQLToken<'src> {
        loop {
            self.consume_while(|ch| {
                matches!(ch, ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}')
            });

            let start = self.curr_position();
            let Some(ch) = self.peek_char() else {
                return GraphQLToken::new(
                    GraphQLTokenKind::Eof,
                    self.make_span(start),
                );
            };

            return match ch {
                '#' => {
                    self.skip_comment();
                    continue;
                },
                '&' => self.punctuator(start, GraphQLTokenKind::Ampersand),
                '@' => self.punctuator(start, GraphQLTokenKind::At),
                '!' => self.punctuator(start, GraphQLTokenKind::Bang),
                ':' => self.punctuator(start, GraphQLTokenKind::Colon),
                '}' => self.punctuator(start, GraphQLTokenKind::CurlyBraceClose),
                '{' => self.punctuator(start, GraphQLTokenKind::CurlyBraceOpen),
                '$' => self.punctuator(start, GraphQLTokenKind::Dollar),
                '=' => self.punctuator(start, GraphQLTokenKind::Equals),
                ')' => self.punctuator(start, GraphQLTokenKind::ParenClose),
                '(' => self.punctuator(start, GraphQLTokenKind::ParenOpen),
                '|' => self.punctuator(start, GraphQLTokenKind::Pipe),
                ']' => self.punctuator(start, GraphQLTokenKind::SquareBracketClose),
                '[' => self.punctuator(start, GraphQLTokenKind::SquareBracketOpen),
                '.' => self.lex_ellipsis(start),
                '"' => self.lex_string(start),
                c if is_name_start(c) => self.lex_name(start),
                c if c == '-' || c.is_ascii_digit() => self.lex_number(start),
                _ => self.lex_invalid_character(start),
            };
        }
    }

    /// A comment runs from `#` to the end of the line.
    fn skip_comment(&mut self) {
        let rest = self.remaining().as_bytes();
        let len = memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
        let comment = &self.remaining()[..len];
        // Comments never contain line terminators, so only columns move.
        self.curr_col_utf8 += comment.chars().count();
        self.curr_col_utf16 += comment.encode_utf16().count();
        self.curr_byte_offset += len;
        self.last_char_was_cr = false;
    }

    // =========================================================================
    // Ellipsis
    // =========================================================================

    /// `...` is the only token starting with `.`; anything else is an
    /// error, with a hint when two dots suggest a mistyped spread.
    fn lex_ellipsis(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            return GraphQLToken::new(
                GraphQLTokenKind::Ellipsis,
                self.make_span(start),
            );
        }

        if self.remaining().starts_with("..") {
            self.consume();
            self.consume();
            return self.error_token(
                start,
                "Unexpected `..` (use `...` for spread operator)",
                smallvec![GraphQLErrorNote::help(
                    "Add one more `.` to form the spread operator `...`",
                )],
            );
        }

        self.consume();
        self.error_token(start, "Unexpected `.`", smallvec![])
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// `/[_A-Za-z][_0-9A-Za-z]*/`; `true`, `false` and `null` get their own
    /// token kinds.
    fn lex_name(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let name_start = self.curr_byte_offset;
        self.consume_while(is_name_continue);
        let name = &self.source[name_start..self.curr_byte_offset];

        let kind = match name {
            "true" => GraphQLTokenKind::True,
            "false" => GraphQLTokenKind::False,
            "null" => GraphQLTokenKind::Null,
            _ => GraphQLTokenKind::Name(Cow::Borrowed(name)),
        };
        GraphQLToken::new(kind, self.make_span(start))
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// `-? (0 | [1-9][0-9]*) ('.' [0-9]+)? ([eE] [+-]? [0-9]+)?`
    fn lex_number(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if let Some(ch) = self.peek_char()
                    && ch.is_ascii_digit()
                {
                    return self.lex_number_error(
                        start,
                        num_start,
                        "Invalid number: leading zeros are not allowed",
                        INT_VALUE_SPEC_URL,
                    );
                }
            },
            Some(ch) if ch.is_ascii_digit() => {
                self.consume_while(|ch| ch.is_ascii_digit());
            },
            _ => return self.error_token(start, "Unexpected `-`", smallvec![]),
        }

        if self.peek_char() == Some('.') {
            if !self.peek_char_nth(1).is_some_and(|ch| ch.is_ascii_digit()) {
                return self.lex_number_error(
                    start,
                    num_start,
                    "Invalid number: expected a digit after `.`",
                    FLOAT_VALUE_SPEC_URL,
                );
            }
            is_float = true;
            self.consume();
            self.consume_while(|ch| ch.is_ascii_digit());
        }

        if let Some(ch) = self.peek_char()
            && (ch == 'e' || ch == 'E')
        {
            is_float = true;
            self.consume();
            if let Some(ch) = self.peek_char()
                && (ch == '+' || ch == '-')
            {
                self.consume();
            }
            if !self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                return self.lex_number_error(
                    start,
                    num_start,
                    "Invalid number: exponent must have at least one digit",
                    FLOAT_VALUE_SPEC_URL,
                );
            }
            self.consume_while(|ch| ch.is_ascii_digit());
        }

        if let Some(ch) = self.peek_char()
            && (ch == '.' || is_name_start(ch))
        {
            return self.lex_number_error(
                start,
                num_start,
                "Invalid number: a number may not be directly followed by a \
                 name or `.`",
                INT_VALUE_SPEC_URL,
            );
        }

        let text = Cow::Borrowed(&self.source[num_start..self.curr_byte_offset]);
        let kind = if is_float {
            GraphQLTokenKind::FloatValue(text)
        } else {
            GraphQLTokenKind::IntValue(text)
        };
        GraphQLToken::new(kind, self.make_span(start))
    }

    fn lex_number_error(
        &mut self,
        start: SourcePosition,
        num_start: usize,
        message: &str,
        spec_url: &str,
    ) -> GraphQLToken<'src> {
        self.consume_while(|ch| {
            ch.is_ascii_alphanumeric() || matches!(ch, '.' | '+' | '-' | '_')
        });
        let invalid_text = &self.source[num_start..self.curr_byte_offset];
        self.error_token(
            start,
            format!("{message}: `{invalid_text}`"),
            smallvec![GraphQLErrorNote::spec(spec_url)],
        )
    }

    // =========================================================================
    // Strings
    // =========================================================================

    fn lex_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let str_start = self.curr_byte_offset;
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string(start, str_start);
        }

        self.consume();
        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    return self.error_token(
                        start.clone(),
                        "Unterminated string literal",
                        smallvec![
                            GraphQLErrorNote::general_with_span(
                                "String started here",
                                GraphQLSourceSpan::empty_at(start),
                            ),
                            GraphQLErrorNote::help(
                                "Add a closing `\"`, or use a block string \
                                 (`\"\"\"`) for multi-line text",
                            ),
                        ],
                    );
                },
                Some('"') => {
                    self.consume();
                    break;
                },
                Some('\\') => {
                    self.consume();
                    if let Some(ch) = self.peek_char()
                        && ch != '\n'
                        && ch != '\r'
                    {
                        self.consume();
                    }
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        GraphQLToken::new(
            GraphQLTokenKind::StringValue(Cow::Borrowed(text)),
            self.make_span(start),
        )
    }

    fn lex_block_string(
        &mut self,
        start: SourcePosition,
        str_start: usize,
    ) -> GraphQLToken<'src> {
        for _ in 0..3 {
            self.consume();
        }

        loop {
            if self.remaining().starts_with("\\\"\"\"") {
                for _ in 0..4 {
                    self.consume();
                }
                continue;
            }
            if self.remaining().starts_with("\"\"\"") {
                for _ in 0..3 {
                    self.consume();
                }
                break;
            }
            if self.consume().is_none() {
                return self.error_token(
                    start.clone(),
                    "Unterminated block string",
                    smallvec![
                        GraphQLErrorNote::general_with_span(
                            "Block string started here",
                            GraphQLSourceSpan::empty_at(start),
                        ),
                        GraphQLErrorNote::help("Add closing `\"\"\"`"),
                    ],
                );
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        GraphQLToken::new(
            GraphQLTokenKind::StringValue(Cow::Borrowed(text)),
            self.make_span(start),
        )
    }

    fn lex_invalid_character(
        &mut self,
        start: SourcePosition,
    ) -> GraphQLToken<'src> {
        let described = self.peek_char().map(describe_char).unwrap_or_default();
        self.consume();
        self.error_token(
            start,
            format!("Unexpected character {described}"),
            smallvec![],
        )
    }
}

impl<'src> Iterator for StrGraphQLTokenSource<'src> {
    type Item = GraphQLToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, GraphQLTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Printable characters are shown in backticks; invisible ones also get
/// their code point so the user can find them.
fn describe_char(ch: char) -> String {
    if ch.is_control() || (ch.is_whitespace() && ch != ' ') || is_invisible(ch) {
        format!("`{ch}` (U+{:04X})", ch as u32)
    } else {
        format!("`{ch}`")
    }
}

fn is_invisible(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{206F}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}
