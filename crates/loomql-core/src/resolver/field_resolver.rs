use crate::GraphError;
use crate::resolver::Data;
use async_trait::async_trait;
use loomql_parser::ast::Want;
use serde_json::Value;

/// Per-call information passed to a deferred field resolver.
pub struct FieldInfo<'a> {
    /// The caller-supplied execution context.
    pub context: &'a Value,

    /// The nested selection requested under this field.
    pub wants: &'a [Want],

    /// The dotted path of the field being resolved.
    pub path: &'a str,
}

/// A deferred object field: invoked with the want's resolved call-site
/// arguments when (and only when) the field is requested.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(&self, args: Value, info: FieldInfo<'_>) -> Result<Data, GraphError>;
}
