//! Shared fixtures for engine tests.

use crate::GraphError;
use crate::resolver::Data;
use crate::resolver::MessageResolver;
use crate::resolver::ResolveInfo;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// A message resolver that returns a clone of a fixed data tree.
pub(crate) struct StaticMessage(pub(crate) Data);

#[async_trait]
impl MessageResolver for StaticMessage {
    async fn resolve(&self, _inputs: Value, _info: ResolveInfo<'_>) -> Result<Data, GraphError> {
        Ok(self.0.clone())
    }
}

/// A message resolver that returns its `n` input unchanged and counts its
/// invocations.
pub(crate) struct EchoN {
    pub(crate) calls: Arc<AtomicUsize>,
}

impl EchoN {
    pub(crate) fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl MessageResolver for EchoN {
    async fn resolve(&self, inputs: Value, _info: ResolveInfo<'_>) -> Result<Data, GraphError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Data::Value(
            inputs.get("n").cloned().unwrap_or(Value::Null),
        ))
    }
}

/// A message resolver that returns the whole resolved input object as its
/// data, for observing input coercion and directive transforms.
pub(crate) struct EchoInputs;

#[async_trait]
impl MessageResolver for EchoInputs {
    async fn resolve(&self, inputs: Value, _info: ResolveInfo<'_>) -> Result<Data, GraphError> {
        Ok(Data::Value(inputs))
    }
}
