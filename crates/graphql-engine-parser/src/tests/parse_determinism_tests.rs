//! Property tests: parsing is a pure function of its input.

use crate::tests::utils::parse;
use proptest::prelude::*;

/// Small GraphQL-ish fragments, so that generated inputs hit the grammar
/// instead of failing on the first character.
fn graphql_like_source() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(vec![
        "{", "}", "(", ")", "[", "]", ":", "$", "@", "!", "=", "...", "on ",
        "query ", "fragment ", "a ", "b ", "Int ", "1 ", "-2.5 ", "\"s\" ",
        "true ", "null ", "# c\n", "\n", ", ",
    ]);
    prop::collection::vec(pieces, 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn parsing_twice_gives_identical_results(source in graphql_like_source()) {
        let first = format!("{:?}", parse(&source));
        let second = format!("{:?}", parse(&source));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_input_never_panics(source in "\\PC{0,64}") {
        let _ = parse(&source);
    }

    #[test]
    fn valid_shorthand_queries_parse(names in prop::collection::vec("[a-z_][a-z0-9_]{0,6}", 1..8)) {
        let source = format!("{{ {} }}", names.join(" "));
        let doc = parse(&source);
        prop_assert!(doc.is_ok(), "{:?}", doc);
    }
}
