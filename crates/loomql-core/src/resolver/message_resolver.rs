use crate::GraphError;
use crate::resolver::Data;
use async_trait::async_trait;
use loomql_parser::ast::Want;
use serde_json::Value;

/// Per-call information passed to a message resolver.
pub struct ResolveInfo<'a> {
    /// The caller-supplied execution context.
    pub context: &'a Value,

    /// The requested output selection, so resolvers can project their
    /// data fetch to what was actually asked for.
    pub wants: &'a [Want],
}

/// The resolver for one declared message: receives the fully resolved
/// inputs (scalar-coerced, directive chains applied) and produces the data
/// tree the requested wants are resolved against.
#[async_trait]
pub trait MessageResolver: Send + Sync {
    async fn resolve(&self, inputs: Value, info: ResolveInfo<'_>) -> Result<Data, GraphError>;
}
