//! The built-in `Number`, `String`, and `Boolean` scalars.

use crate::GraphError;
use crate::resolver::ScalarResolver;
use async_trait::async_trait;
use serde_json::Value;

/// `Number`: accepts JSON numbers unchanged in both directions.
pub struct NumberScalar;

#[async_trait]
impl ScalarResolver for NumberScalar {
    async fn incoming(&self, value: Value) -> Result<Value, GraphError> {
        match value {
            Value::Number(_) => Ok(value),
            other => Err(GraphError::reject(format!("value is not a number: {other}"))),
        }
    }

    async fn outgoing(&self, value: Value) -> Result<Value, GraphError> {
        match value {
            Value::Number(_) => Ok(value),
            other => Err(GraphError::reject(format!("value is not a number: {other}"))),
        }
    }
}

/// `String`: strict on the way in; stringifies any defined value on the
/// way out.
pub struct StringScalar;

#[async_trait]
impl ScalarResolver for StringScalar {
    async fn incoming(&self, value: Value) -> Result<Value, GraphError> {
        match value {
            Value::String(_) => Ok(value),
            other => Err(GraphError::reject(format!(
                "cannot turn value into a string: {other}",
            ))),
        }
    }

    async fn outgoing(&self, value: Value) -> Result<Value, GraphError> {
        match value {
            Value::String(_) => Ok(value),
            other => Ok(Value::String(other.to_string())),
        }
    }
}

/// `Boolean`: strict in both directions.
pub struct BooleanScalar;

#[async_trait]
impl ScalarResolver for BooleanScalar {
    async fn incoming(&self, value: Value) -> Result<Value, GraphError> {
        match value {
            Value::Bool(_) => Ok(value),
            other => Err(GraphError::reject(format!("value is not a boolean: {other}"))),
        }
    }

    async fn outgoing(&self, value: Value) -> Result<Value, GraphError> {
        match value {
            Value::Bool(_) => Ok(value),
            other => Err(GraphError::reject(format!("value is not a boolean: {other}"))),
        }
    }
}
