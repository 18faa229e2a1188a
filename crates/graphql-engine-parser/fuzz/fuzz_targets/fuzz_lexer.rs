#![no_main]

use graphql_engine_parser::token::GraphQLTokenKind;
use graphql_engine_parser::token_source::StrGraphQLTokenSource;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut saw_eof = false;
    for token in StrGraphQLTokenSource::new(s) {
        assert!(!saw_eof, "token produced after Eof");
        assert!(
            token.span.start_inclusive.byte_offset() <= token.span.end_exclusive.byte_offset()
        );
        saw_eof = matches!(token.kind, GraphQLTokenKind::Eof);
    }
    assert!(saw_eof, "lexer must end with Eof");
});
