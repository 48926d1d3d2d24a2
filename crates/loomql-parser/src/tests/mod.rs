mod query_parser_tests;
mod schema_parser_tests;
