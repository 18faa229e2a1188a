#![no_main]

use graphql_engine_parser::GraphQLParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let first = GraphQLParser::new(s).parse_executable_document();
    let second = GraphQLParser::new(s).parse_executable_document();
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
});
