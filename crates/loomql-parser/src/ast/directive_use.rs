use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use smallvec::SmallVec;

/// Storage for the directive uses attached to one field/input/message.
/// Uses SmallVec to avoid heap allocation for the common case of 0-2
/// directives per declaration.
pub type DirectiveUseVec = SmallVec<[DirectiveUse; 2]>;

/// A directive invocation site attached to a field, input, type, or
/// message: `@cost(cost: 5, multipliers: ["friends"])`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DirectiveUse {
    pub name: String,

    /// Literal argument values, in source order.
    pub args: Map<String, Value>,
}
