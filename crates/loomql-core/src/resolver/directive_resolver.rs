use crate::GraphError;
use crate::resolver::FieldVisit;
use crate::resolver::InputVisit;
use async_trait::async_trait;
use serde_json::Value;

/// The behavior hook for one declared directive.
///
/// Directives execute as ordered chains. Each visitor either returns a
/// value directly (short-circuiting the rest of the chain) or calls
/// `visit.chain.proceed()` to obtain the next-in-chain's result and
/// transform it. The defaults forward unchanged, so metadata-only
/// directives need no overrides.
#[async_trait]
pub trait DirectiveResolver: Send + Sync {
    /// Visits an input value before coercion. The chain's terminal action
    /// performs the scalar's `incoming` conversion on the raw literal.
    async fn input_visitor(&self, visit: InputVisit<'_>) -> Result<Value, GraphError> {
        visit.chain.proceed().await
    }

    /// Visits a requested output field. The chain's terminal action
    /// invokes the underlying field resolver and resolves the subtree.
    async fn field_visitor(&self, visit: FieldVisit<'_>) -> Result<Value, GraphError> {
        visit.chain.proceed().await
    }
}
