//! Chain-of-responsibility execution of directive chains.
//!
//! The remaining chain is an explicit continuation value: each directive
//! receives a chain holding the directives after it plus a terminal
//! action, and decides whether to call [`proceed`] or to short-circuit
//! with its own result. Consuming the chain by value rules out the
//! shared-index hazards of closure-captured counters.
//!
//! [`proceed`]: InputChain::proceed

use crate::GraphError;
use crate::resolver::DirectiveResolver;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use loomql_parser::ast::DirectiveUse;
use loomql_parser::ast::Want;
use serde_json::Map;
use serde_json::Value;
use std::sync::Arc;

pub(crate) type DirectiveTable = IndexMap<String, Arc<dyn DirectiveResolver>>;

type Terminal<'a> = Box<dyn FnOnce() -> BoxFuture<'a, Result<Value, GraphError>> + Send + 'a>;

/// Arguments passed to a directive's input visitor.
pub struct InputVisit<'a> {
    /// The name of the input being resolved.
    pub field_name: &'a str,

    /// The raw literal, before any coercion.
    pub value: &'a Value,

    /// This directive use's literal arguments.
    pub args: &'a Map<String, Value>,

    /// The caller-supplied execution context.
    pub context: &'a Value,

    /// The rest of the chain; its terminal action performs the scalar's
    /// `incoming` conversion (or recurses into nested inputs).
    pub chain: InputChain<'a>,
}

/// Arguments passed to a directive's field visitor.
pub struct FieldVisit<'a> {
    /// The name of the field (or message) being resolved.
    pub field_name: &'a str,

    /// The nested selection requested under this field.
    pub wants: &'a [Want],

    /// This directive use's literal arguments.
    pub args: &'a Map<String, Value>,

    /// The field's resolved call-site arguments.
    pub input_args: &'a Value,

    /// The caller-supplied execution context.
    pub context: &'a Value,

    /// The rest of the chain; its terminal action invokes the underlying
    /// resolver and resolves the field's subtree.
    pub chain: FieldChain<'a>,
}

/// The remainder of an input directive chain.
pub struct InputChain<'a> {
    pub(crate) directives: &'a [DirectiveUse],
    pub(crate) table: &'a DirectiveTable,
    pub(crate) field_name: &'a str,
    pub(crate) value: &'a Value,
    pub(crate) context: &'a Value,
    pub(crate) terminal: Terminal<'a>,
}

impl InputChain<'_> {
    /// Runs the rest of the chain: the next directive's input visitor, or
    /// the terminal action once no directives remain.
    pub async fn proceed(self) -> Result<Value, GraphError> {
        let InputChain {
            directives,
            table,
            field_name,
            value,
            context,
            terminal,
        } = self;
        match directives.split_first() {
            None => terminal().await,
            Some((use_, rest)) => {
                let resolver = table.get(&use_.name).ok_or_else(|| {
                    GraphError::reject(format!(
                        "no resolver registered for directive `@{}`",
                        use_.name,
                    ))
                })?;
                let visit = InputVisit {
                    field_name,
                    value,
                    args: &use_.args,
                    context,
                    chain: InputChain {
                        directives: rest,
                        table,
                        field_name,
                        value,
                        context,
                        terminal,
                    },
                };
                resolver.input_visitor(visit).await
            }
        }
    }
}

/// The remainder of a field directive chain.
pub struct FieldChain<'a> {
    pub(crate) directives: &'a [DirectiveUse],
    pub(crate) table: &'a DirectiveTable,
    pub(crate) field_name: &'a str,
    pub(crate) wants: &'a [Want],
    pub(crate) input_args: &'a Value,
    pub(crate) context: &'a Value,
    pub(crate) terminal: Terminal<'a>,
}

impl FieldChain<'_> {
    /// Runs the rest of the chain: the next directive's field visitor, or
    /// the terminal action once no directives remain.
    pub async fn proceed(self) -> Result<Value, GraphError> {
        let FieldChain {
            directives,
            table,
            field_name,
            wants,
            input_args,
            context,
            terminal,
        } = self;
        match directives.split_first() {
            None => terminal().await,
            Some((use_, rest)) => {
                let resolver = table.get(&use_.name).ok_or_else(|| {
                    GraphError::reject(format!(
                        "no resolver registered for directive `@{}`",
                        use_.name,
                    ))
                })?;
                let visit = FieldVisit {
                    field_name,
                    wants,
                    args: &use_.args,
                    input_args,
                    context,
                    chain: FieldChain {
                        directives: rest,
                        table,
                        field_name,
                        wants,
                        input_args,
                        context,
                        terminal,
                    },
                };
                resolver.field_visitor(visit).await
            }
        }
    }
}
