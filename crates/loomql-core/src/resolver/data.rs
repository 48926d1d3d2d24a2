use crate::resolver::FieldResolver;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Runtime data produced by message and field resolvers.
///
/// A plain JSON value is traversed structurally; an [`Object`] may defer
/// individual fields to [`Lazy`] resolvers that run on demand with the
/// want's resolved arguments. A stored plain value behaves exactly like a
/// resolver returning that constant.
///
/// [`Object`]: Data::Object
/// [`Lazy`]: Data::Lazy
#[derive(Clone)]
pub enum Data {
    /// A concrete JSON value.
    Value(Value),

    /// An object whose entries may themselves be deferred.
    Object(IndexMap<String, Data>),

    /// A sequence of items.
    List(Vec<Data>),

    /// A deferred field, resolved on demand.
    Lazy(Arc<dyn FieldResolver>),
}

impl Data {
    pub fn null() -> Self {
        Data::Value(Value::Null)
    }

    /// Wraps a field resolver as a deferred object entry.
    pub fn lazy(resolver: impl FieldResolver + 'static) -> Self {
        Data::Lazy(Arc::new(resolver))
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        Data::Value(value)
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Data::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Data::List(items) => f.debug_tuple("List").field(items).finish(),
            Data::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}
