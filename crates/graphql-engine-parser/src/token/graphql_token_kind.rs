use crate::GraphQLErrorNotes;
use crate::GraphQLStringParsingError;
use std::borrow::Cow;
use std::iter::Peekable;
use std::num::ParseFloatError;
use std::num::ParseIntError;
use std::str::Chars;

/// The kind of a lexed token.
///
/// Numeric and string literals keep their raw source text; decoding happens
/// when the parser builds a value so that literal rules can be applied where
/// the value is used. Negative numbers lex as one token (`IntValue("-1")`).
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLTokenKind<'src> {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `&`
    Ampersand,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Literals (raw source text)
    // =========================================================================
    Name(Cow<'src, str>),
    /// e.g. `"-123"`
    IntValue(Cow<'src, str>),
    /// e.g. `"1.5e-3"`
    FloatValue(Cow<'src, str>),
    /// Includes the surrounding quotes, e.g. `"\"a\\nb\""` or a `"""` block.
    StringValue(Cow<'src, str>),

    True,
    False,
    Null,

    Eof,

    /// A malformed lexeme. Lexing continues past it; the parser turns the
    /// first one it sees into a syntax fault.
    Error {
        message: String,
        error_notes: GraphQLErrorNotes,
    },
}

impl<'src> GraphQLTokenKind<'src> {
    pub fn error(
        message: impl Into<String>,
        error_notes: GraphQLErrorNotes,
    ) -> Self {
        GraphQLTokenKind::Error {
            message: message.into(),
            error_notes,
        }
    }

    /// The source text of a punctuator token.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            GraphQLTokenKind::Ampersand => Some("&"),
            GraphQLTokenKind::At => Some("@"),
            GraphQLTokenKind::Bang => Some("!"),
            GraphQLTokenKind::Colon => Some(":"),
            GraphQLTokenKind::CurlyBraceClose => Some("}"),
            GraphQLTokenKind::CurlyBraceOpen => Some("{"),
            GraphQLTokenKind::Dollar => Some("$"),
            GraphQLTokenKind::Ellipsis => Some("..."),
            GraphQLTokenKind::Equals => Some("="),
            GraphQLTokenKind::ParenClose => Some(")"),
            GraphQLTokenKind::ParenOpen => Some("("),
            GraphQLTokenKind::Pipe => Some("|"),
            GraphQLTokenKind::SquareBracketClose => Some("]"),
            GraphQLTokenKind::SquareBracketOpen => Some("["),

            GraphQLTokenKind::Name(_)
            | GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::StringValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Eof
            | GraphQLTokenKind::Error { .. } => None,
        }
    }

    pub fn is_punctuator(&self) -> bool {
        self.as_punctuator_str().is_some()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GraphQLTokenKind::Error { .. })
    }

    /// Describes the token the way it appears in "expected X, found Y"
    /// messages.
    pub fn display(&self) -> String {
        match self {
            GraphQLTokenKind::Name(name) => format!("`{name}`"),
            GraphQLTokenKind::IntValue(raw)
            | GraphQLTokenKind::FloatValue(raw) => format!("`{raw}`"),
            GraphQLTokenKind::StringValue(_) => "string".to_string(),
            GraphQLTokenKind::True => "`true`".to_string(),
            GraphQLTokenKind::False => "`false`".to_string(),
            GraphQLTokenKind::Null => "`null`".to_string(),
            GraphQLTokenKind::Eof => "end of input".to_string(),
            GraphQLTokenKind::Error { message, .. } => message.clone(),
            punct => format!("`{}`", punct.as_punctuator_str().unwrap_or("?")),
        }
    }

    /// Parses an `IntValue`'s raw text. `None` for other kinds.
    pub fn parse_int_value(&self) -> Option<Result<i64, ParseIntError>> {
        match self {
            GraphQLTokenKind::IntValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Parses a `FloatValue`'s raw text. `None` for other kinds.
    pub fn parse_float_value(&self) -> Option<Result<f64, ParseFloatError>> {
        match self {
            GraphQLTokenKind::FloatValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Decodes a `StringValue`'s raw text into its content: escape
    /// sequences for `"..."` strings, indentation stripping and the `\"""`
    /// escape for block strings. `None` for other kinds.
    pub fn parse_string_value(
        &self,
    ) -> Option<Result<String, GraphQLStringParsingError>> {
        match self {
            GraphQLTokenKind::StringValue(raw) => Some(decode_string(raw)),
            _ => None,
        }
    }
}

fn decode_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.starts_with("\"\"\"") {
        decode_block_string(raw)
    } else {
        decode_quoted_string(raw)
    }
}

fn decode_quoted_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(GraphQLStringParsingError::UnterminatedString);
    }
    let body = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => out.push(decode_unicode_escape(&mut chars)?),
            Some(other) => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(
                    format!("\\{other}"),
                ));
            },
            None => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(
                    "\\".to_string(),
                ));
            },
        }
    }

    Ok(out)
}

/// Decodes the part of a unicode escape following `\u`: either four hex
/// digits (possibly the leading half of a surrogate pair) or a braced
/// variable-width code point.
fn decode_unicode_escape(
    chars: &mut Peekable<Chars<'_>>,
) -> Result<char, GraphQLStringParsingError> {
    let invalid =
        |text: String| GraphQLStringParsingError::InvalidUnicodeEscape(text);

    if chars.peek() == Some(&'{') {
        chars.next();
        let mut hex = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => return Err(invalid(format!("\\u{{{hex}{c}"))),
                None => return Err(invalid(format!("\\u{{{hex}"))),
            }
        }
        return u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| invalid(format!("\\u{{{hex}}}")));
    }

    let lead = read_hex4(chars).map_err(invalid)?;
    if (0xD800..=0xDBFF).contains(&lead) {
        // A leading surrogate must be followed by an escaped trailing one.
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            let trail = read_hex4(&mut lookahead).map_err(invalid)?;
            if (0xDC00..=0xDFFF).contains(&trail) {
                *chars = lookahead;
                let code_point =
                    0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00);
                return char::from_u32(code_point)
                    .ok_or_else(|| invalid(format!("\\u{lead:04X}\\u{trail:04X}")));
            }
        }
        return Err(invalid(format!("\\u{lead:04X}")));
    }
    char::from_u32(lead).ok_or_else(|| invalid(format!("\\u{lead:04X}")))
}

fn read_hex4(chars: &mut Peekable<Chars<'_>>) -> Result<u32, String> {
    let mut hex = String::with_capacity(4);
    for _ in 0..4 {
        match chars.next() {
            Some(c) if c.is_ascii_hexdigit() => hex.push(c),
            Some(c) => return Err(format!("\\u{hex}{c}")),
            None => return Err(format!("\\u{hex}")),
        }
    }
    u32::from_str_radix(&hex, 16).map_err(|_| format!("\\u{hex}"))
}

/// Block string value per
/// <https://spec.graphql.org/October2021/#BlockStringValue()>.
fn decode_block_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.len() < 6 || !raw.ends_with("\"\"\"") {
        return Err(GraphQLStringParsingError::UnterminatedString);
    }
    let body = raw[3..raw.len() - 3].replace("\\\"\"\"", "\"\"\"");
    let lines: Vec<&str> = body
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    let indent_of = |line: &str| -> usize {
        line.len() - line.trim_start_matches([' ', '\t']).len()
    };
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| indent_of(line) < line.len())
        .map(|line| indent_of(line))
        .min();

    let mut stripped: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| match common_indent {
            Some(indent) if idx > 0 && line.len() >= indent => &line[indent..],
            _ => *line,
        })
        .collect();

    let is_blank = |line: &&str| line.trim_matches([' ', '\t']).is_empty();
    while stripped.first().is_some_and(is_blank) {
        stripped.remove(0);
    }
    while stripped.last().is_some_and(is_blank) {
        stripped.pop();
    }

    Ok(stripped.join("\n"))
}
