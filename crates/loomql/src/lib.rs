//! A schema-driven query engine: schema text is linked into a cyclic type
//! graph once, and client queries are parsed, validated, cost-bounded, and
//! executed against user-registered async resolvers.

pub use loomql_core::*;
