//! Lexer and parsers for the loomql schema and query languages.
//!
//! The two grammars share one token model and one character-level lexer;
//! neither has any knowledge of linking or execution. [`parse_schema`]
//! produces a raw, unlinked [`ast::RawSchema`]; [`parse_query`] produces an
//! ordered [`ast::QueryDocument`] of message invocations.

pub mod ast;
mod delimited;
mod lexer;
mod literal;
mod parse_error;
mod query_parser;
mod schema_parser;
mod source_position;
pub mod token;
mod token_stream;

pub use lexer::Lexer;
pub use parse_error::ParseError;
pub use query_parser::parse_query;
pub use schema_parser::parse_schema;
pub use source_position::SourcePosition;
pub use token_stream::TokenStream;

#[cfg(test)]
mod tests;
