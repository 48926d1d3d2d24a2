use crate::GraphError;
use async_trait::async_trait;
use serde_json::Value;

/// Conversion functions for one declared scalar type.
///
/// `incoming` coerces raw query literals before they reach a message
/// resolver; `outgoing` converts resolver-produced values before they are
/// assigned into the result object. Both may suspend (e.g. to consult an
/// external service) and both reject by returning an error, which the
/// engine wraps with the dotted path of the value at fault.
#[async_trait]
pub trait ScalarResolver: Send + Sync {
    /// Coerces a raw input literal into the scalar's internal
    /// representation.
    async fn incoming(&self, value: Value) -> Result<Value, GraphError>;

    /// Converts an internal value into its external representation.
    async fn outgoing(&self, value: Value) -> Result<Value, GraphError>;
}
