//! Core engine for loomql: schema linking, query validation, static cost
//! analysis, and asynchronous query resolution over user-registered
//! resolvers.
//!
//! Construction and execution are two phases with distinct error types:
//! [`GraphBuilder::build`] raises fatal [`BuildError`]s once, at setup;
//! [`Graph::execute`] rejects each failing query with a single
//! path-tagged [`GraphError`].

mod build_error;
mod cost;
mod execute;
mod graph;
mod graph_builder;
mod graph_error;
pub mod resolver;
pub mod schema;
mod validate;

pub use build_error::BuildError;
pub use graph::ExecuteOptions;
pub use graph::Graph;
pub use graph_builder::GraphBuilder;
pub use graph_error::GraphError;
pub use graph_error::GraphErrorKind;

/// The parser crate, re-exported for access to the raw AST ([`ast::Want`]
/// in particular, which resolvers receive in their info structs).
///
/// [`ast::Want`]: loomql_parser::ast::Want
pub use loomql_parser as parser;

#[cfg(test)]
mod tests;
