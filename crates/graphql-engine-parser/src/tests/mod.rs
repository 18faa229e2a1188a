mod graphql_parser_document_tests;
mod graphql_parser_error_tests;
mod graphql_parser_selection_tests;
mod graphql_token_stream_tests;
mod parse_determinism_tests;
mod string_value_decoding_tests;
mod utils;
