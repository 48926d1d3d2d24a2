use crate::ast::Want;
use serde::Deserialize;
use serde::Serialize;

/// A parsed query: an ordered list of message invocations. Order is the
/// execution order and the result-key order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct QueryDocument {
    pub messages: Vec<Want>,
}
