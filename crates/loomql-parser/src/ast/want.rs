use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A requested output field: `alias(: fieldName)? (args)? ({ want* })?`.
///
/// Message invocations are the top-level wants of a query document; their
/// `args` hold the message's input literal.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Want {
    /// The key this node's result is assigned under. Equal to `field_name`
    /// unless an explicit alias was written.
    pub alias: String,

    /// The schema field (or message) this want targets.
    pub field_name: String,

    /// Literal argument values supplied at the call site.
    pub args: Map<String, Value>,

    /// Nested selections. Empty for scalar leaves.
    pub wants: Vec<Want>,
}
