//! Tests for decoding string literals into their values.

use crate::GraphQLStringParsingError;
use crate::token::GraphQLTokenKind;
use std::borrow::Cow;

fn decode(raw: &str) -> Result<String, GraphQLStringParsingError> {
    GraphQLTokenKind::StringValue(Cow::Borrowed(raw))
        .parse_string_value()
        .expect("StringValue token")
}

// =============================================================================
// Quoted strings
// =============================================================================

#[test]
fn decodes_simple_escapes() {
    assert_eq!(
        decode(r#""a\"b\\c\/d\be\ff\ng\rh\ti""#).unwrap(),
        "a\"b\\c/d\u{0008}e\u{000C}f\ng\rh\ti",
    );
}

#[test]
fn decodes_fixed_width_unicode_escape() {
    assert_eq!(decode(r#""\u0041\u00e9""#).unwrap(), "Aé");
}

#[test]
fn decodes_braced_unicode_escape() {
    assert_eq!(decode(r#""\u{1F600}""#).unwrap(), "😀");
}

#[test]
fn decodes_surrogate_pair() {
    assert_eq!(decode(r#""\uD83D\uDE00""#).unwrap(), "😀");
}

#[test]
fn lone_leading_surrogate_is_rejected() {
    assert_eq!(
        decode(r#""\uD83Dx""#),
        Err(GraphQLStringParsingError::InvalidUnicodeEscape(
            "\\uD83D".to_string(),
        )),
    );
}

#[test]
fn unknown_escape_is_rejected() {
    assert_eq!(
        decode(r#""\q""#),
        Err(GraphQLStringParsingError::InvalidEscapeSequence(
            "\\q".to_string(),
        )),
    );
}

#[test]
fn short_unicode_escape_is_rejected() {
    assert!(matches!(
        decode(r#""\u12""#),
        Err(GraphQLStringParsingError::InvalidUnicodeEscape(_)),
    ));
}

#[test]
fn non_string_tokens_do_not_decode() {
    assert!(GraphQLTokenKind::Null.parse_string_value().is_none());
}

// =============================================================================
// Block strings
// =============================================================================

#[test]
fn block_string_strips_common_indentation() {
    let raw = "\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n  \"\"\"";
    assert_eq!(
        decode(raw).unwrap(),
        "Hello,\n  World!\n\nYours,\n  GraphQL.",
    );
}

/// The first line is never part of the common indentation computation.
#[test]
fn block_string_keeps_first_line_as_is() {
    assert_eq!(decode("\"\"\"  first\n    second\"\"\"").unwrap(), "  first\nsecond");
}

#[test]
fn block_string_unescapes_triple_quote() {
    assert_eq!(decode(r#""""say \""" twice""""#).unwrap(), r#"say """ twice"#);
}

#[test]
fn block_string_does_not_process_escapes() {
    assert_eq!(decode(r#""""a\nb""""#).unwrap(), r"a\nb");
}

#[test]
fn block_string_normalizes_crlf() {
    assert_eq!(decode("\"\"\"\r\n  a\r\n  b\r\n\"\"\"").unwrap(), "a\nb");
}
