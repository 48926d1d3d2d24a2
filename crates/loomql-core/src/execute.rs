//! The resolution engine: executes a validated, cost-admitted query tree
//! message by message.
//!
//! Messages run sequentially in query order. Within one message, sibling
//! inputs, sibling wants, and array elements resolve concurrently —
//! fanned out and joined in a single task, so no locking is needed: the
//! linked schema is read-only and every branch writes a disjoint result
//! key. The first branch to fail aborts the join and its error propagates;
//! later siblings' results are discarded.

use crate::GraphError;
use crate::resolver::Data;
use crate::resolver::DirectiveTable;
use crate::resolver::FieldChain;
use crate::resolver::FieldInfo;
use crate::resolver::FieldResolver;
use crate::resolver::InputChain;
use crate::resolver::MessageTable;
use crate::resolver::ResolveInfo;
use crate::resolver::ScalarTable;
use crate::schema::FieldDef;
use crate::schema::FieldKind;
use crate::schema::Schema;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::future::try_join_all;
use indexmap::IndexMap;
use loomql_parser::ast::QueryDocument;
use loomql_parser::ast::Want;
use serde_json::Map;
use serde_json::Value;
use std::sync::Arc;

pub(crate) struct Executor<'g> {
    pub(crate) schema: &'g Schema,
    pub(crate) messages: &'g MessageTable,
    pub(crate) directives: &'g DirectiveTable,
    pub(crate) scalars: &'g ScalarTable,
    pub(crate) context: &'g Value,
}

/// A borrowed view over resolver-produced data, uniform across plain JSON
/// values and [`Data`] trees.
#[derive(Clone, Copy)]
enum DataNode<'a> {
    Data(&'a Data),
    Value(&'a Value),
}

impl<'a> DataNode<'a> {
    fn is_null(&self) -> bool {
        matches!(
            self,
            DataNode::Data(Data::Value(Value::Null)) | DataNode::Value(Value::Null),
        )
    }

    fn is_object(&self) -> bool {
        matches!(
            self,
            DataNode::Data(Data::Object(_))
                | DataNode::Data(Data::Value(Value::Object(_)))
                | DataNode::Value(Value::Object(_)),
        )
    }

    fn lazy(&self) -> Option<&'a Arc<dyn FieldResolver>> {
        match self {
            DataNode::Data(Data::Lazy(resolver)) => Some(resolver),
            _ => None,
        }
    }

    fn get(&self, name: &str) -> Option<DataNode<'a>> {
        match self {
            DataNode::Data(Data::Object(map)) => map.get(name).map(DataNode::Data),
            DataNode::Data(Data::Value(Value::Object(map))) => {
                map.get(name).map(DataNode::Value)
            }
            DataNode::Value(Value::Object(map)) => map.get(name).map(DataNode::Value),
            _ => None,
        }
    }

    fn items(&self) -> Option<Vec<DataNode<'a>>> {
        match self {
            DataNode::Data(Data::List(items)) => {
                Some(items.iter().map(DataNode::Data).collect())
            }
            DataNode::Data(Data::Value(Value::Array(items))) => {
                Some(items.iter().map(DataNode::Value).collect())
            }
            DataNode::Value(Value::Array(items)) => {
                Some(items.iter().map(DataNode::Value).collect())
            }
            _ => None,
        }
    }

    fn to_value(&self, path: &str) -> Result<Value, GraphError> {
        match self {
            DataNode::Value(value) => Ok((*value).clone()),
            DataNode::Data(data) => data_to_value(data, path),
        }
    }
}

fn data_to_value(data: &Data, path: &str) -> Result<Value, GraphError> {
    match data {
        Data::Value(value) => Ok(value.clone()),
        Data::Object(map) => map
            .iter()
            .map(|(key, nested)| Ok((key.clone(), data_to_value(nested, path)?)))
            .collect::<Result<Map<String, Value>, GraphError>>()
            .map(Value::Object),
        Data::List(items) => items
            .iter()
            .map(|nested| data_to_value(nested, path))
            .collect::<Result<Vec<Value>, GraphError>>()
            .map(Value::Array),
        Data::Lazy(_) => Err(GraphError::resolution(
            "cannot convert a deferred field to a plain value",
            path,
        )),
    }
}

impl<'g> Executor<'g> {
    /// Executes the whole query tree. Result keys are assigned under each
    /// message's alias, in query order; a failure aborts the remaining
    /// messages.
    pub(crate) async fn run(&self, document: &QueryDocument) -> Result<Value, GraphError> {
        let mut result = Map::new();
        for message in &document.messages {
            let value = self.resolve_message(message).await?;
            result.insert(message.alias.clone(), value);
        }
        Ok(Value::Object(result))
    }

    /// Resolves one message invocation: inputs, then the message-level
    /// directive chain whose terminal invokes the registered resolver and
    /// resolves the requested wants against its data.
    async fn resolve_message(&self, message: &Want) -> Result<Value, GraphError> {
        let def = self.schema.message(&message.field_name).ok_or_else(|| {
            GraphError::validation(
                format!("no recognized message type: {}", message.field_name),
                &message.alias,
            )
        })?;
        let resolver = self.messages.get(&message.field_name).ok_or_else(|| {
            GraphError::resolution(
                format!("no resolver registered for message {}", message.field_name),
                &message.alias,
            )
        })?;

        tracing::debug!(message = %message.field_name, alias = %message.alias, "resolving message");

        let inputs = Value::Object(
            self.resolve_inputs(&message.args, &def.inputs, &message.alias)
                .await?,
        );

        let path = message.alias.clone();
        let chain = FieldChain {
            directives: def.directives.as_slice(),
            table: self.directives,
            field_name: &message.field_name,
            wants: &message.wants,
            input_args: &inputs,
            context: self.context,
            terminal: Box::new({
                let inputs = &inputs;
                move || {
                    async move {
                        let data = resolver
                            .resolve(
                                inputs.clone(),
                                ResolveInfo {
                                    context: self.context,
                                    wants: &message.wants,
                                },
                            )
                            .await
                            .map_err(|err| err.located(&path))?;
                        self.resolve_entry(
                            Some(DataNode::Data(&data)),
                            &def.output,
                            &message.wants,
                            path.clone(),
                        )
                        .await
                    }
                    .boxed()
                }
            }),
        };
        chain
            .proceed()
            .await
            .map_err(|err| err.located(&message.alias))
    }

    // =========================================================================
    // Input resolution
    // =========================================================================

    /// Resolves every supplied input concurrently against its declared
    /// definition, preserving the supplied key order.
    fn resolve_inputs<'e>(
        &'e self,
        supplied: &'e Map<String, Value>,
        defs: &'e IndexMap<String, FieldDef>,
        parent_path: &'e str,
    ) -> BoxFuture<'e, Result<Map<String, Value>, GraphError>> {
        async move {
            let entries = supplied.iter().map(|(name, value)| async move {
                let path = format!("{parent_path}.{name}");
                let def = defs.get(name).ok_or_else(|| {
                    GraphError::validation(format!("unrecognized input {path}"), path.clone())
                })?;
                let resolved = self.resolve_input(value, def, name, path).await?;
                Ok::<_, GraphError>((name.clone(), resolved))
            });
            Ok(try_join_all(entries).await?.into_iter().collect())
        }
        .boxed()
    }

    /// Resolves one input value through its directive chain; the chain's
    /// terminal coerces scalars and recurses into nested types/arrays.
    /// Applies the nullability policy to the chain's result.
    fn resolve_input<'e>(
        &'e self,
        value: &'e Value,
        def: &'e FieldDef,
        field_name: &'e str,
        path: String,
    ) -> BoxFuture<'e, Result<Value, GraphError>> {
        async move {
            let terminal_path = path.clone();
            let chain = InputChain {
                directives: def.directives.as_slice(),
                table: self.directives,
                field_name,
                value,
                context: self.context,
                terminal: Box::new(move || {
                    self.input_terminal(value, def, field_name, terminal_path)
                        .boxed()
                }),
            };
            let resolved = chain.proceed().await.map_err(|err| err.located(&path))?;

            if resolved.is_null() && !def.nullable {
                return Err(GraphError::resolution(
                    "non-nullable input received null",
                    path,
                ));
            }
            Ok(resolved)
        }
        .boxed()
    }

    async fn input_terminal(
        &self,
        value: &Value,
        def: &FieldDef,
        field_name: &str,
        path: String,
    ) -> Result<Value, GraphError> {
        match &def.kind {
            FieldKind::Scalar { scalar } => {
                if value.is_null() {
                    return Ok(Value::Null);
                }
                let resolver = self.scalars.get(scalar).ok_or_else(|| {
                    GraphError::resolution(
                        format!("no resolver registered for scalar {scalar}"),
                        &path,
                    )
                })?;
                resolver
                    .incoming(value.clone())
                    .await
                    .map_err(|err| err.located(&path))
            }
            FieldKind::Object { type_name } => {
                let Some(nested) = value.as_object() else {
                    return Ok(Value::Null);
                };
                let fields = self.schema.fields_of(type_name, &path)?;
                let resolved = self.resolve_inputs(nested, fields, &path).await?;
                Ok(Value::Object(resolved))
            }
            FieldKind::List { item } => {
                let Some(elements) = value.as_array() else {
                    return Ok(Value::Null);
                };
                let futures = elements.iter().enumerate().map(|(index, element)| {
                    self.resolve_input(element, item, field_name, format!("{path}.{index}"))
                });
                Ok(Value::Array(try_join_all(futures).await?))
            }
        }
    }

    // =========================================================================
    // Output resolution
    // =========================================================================

    /// Resolves the requested wants against an object-shaped data node,
    /// concurrently. Result keys are the wants' aliases, in request order.
    fn resolve_wants<'e>(
        &'e self,
        parent: DataNode<'e>,
        wants: &'e [Want],
        fields: &'e IndexMap<String, FieldDef>,
        parent_path: &'e str,
    ) -> BoxFuture<'e, Result<Map<String, Value>, GraphError>> {
        async move {
            let entries = wants.iter().map(|want| async move {
                let path = format!("{parent_path}.{}", want.alias);
                let def = fields.get(&want.field_name).ok_or_else(|| {
                    GraphError::validation(format!("no such field {path}"), path.clone())
                })?;
                let value = self.resolve_want(parent, want, def, path).await?;
                Ok::<_, GraphError>((want.alias.clone(), value))
            });
            Ok(try_join_all(entries).await?.into_iter().collect())
        }
        .boxed()
    }

    /// Resolves one want: call-site arguments first (input resolution
    /// against the field's declared argument map), then the field
    /// directive chain whose terminal produces and resolves the data.
    async fn resolve_want(
        &self,
        parent: DataNode<'_>,
        want: &Want,
        def: &FieldDef,
        path: String,
    ) -> Result<Value, GraphError> {
        let args = self
            .resolve_inputs(&want.args, &def.args, &path)
            .await?;
        let input_args = Value::Object(args);
        let entry = parent.get(&want.field_name);

        let chain = FieldChain {
            directives: def.directives.as_slice(),
            table: self.directives,
            field_name: &want.field_name,
            wants: &want.wants,
            input_args: &input_args,
            context: self.context,
            terminal: Box::new({
                let input_args = &input_args;
                let terminal_path = path.clone();
                move || {
                    self.field_terminal(entry, def, want, input_args, terminal_path)
                        .boxed()
                }
            }),
        };
        chain.proceed().await.map_err(|err| err.located(&path))
    }

    /// The terminal action of a field chain: invoke the underlying
    /// resolver (a plain stored value acts as a resolver returning that
    /// constant), then resolve the produced data by the field's kind.
    async fn field_terminal(
        &self,
        entry: Option<DataNode<'_>>,
        def: &FieldDef,
        want: &Want,
        args: &Value,
        path: String,
    ) -> Result<Value, GraphError> {
        if let Some(resolver) = entry.as_ref().and_then(DataNode::lazy) {
            let data = resolver
                .resolve(
                    args.clone(),
                    FieldInfo {
                        context: self.context,
                        wants: &want.wants,
                        path: &path,
                    },
                )
                .await
                .map_err(|err| err.located(&path))?;
            return self
                .resolve_entry(Some(DataNode::Data(&data)), def, &want.wants, path.clone())
                .await;
        }
        self.resolve_entry(entry, def, &want.wants, path).await
    }

    /// Resolves a produced data node by its declared kind, applying the
    /// nullability policy: a null/absent production for a non-nullable
    /// definition raises; otherwise it yields `null` and short-circuits
    /// recursion into children.
    fn resolve_entry<'e>(
        &'e self,
        node: Option<DataNode<'e>>,
        def: &'e FieldDef,
        wants: &'e [Want],
        path: String,
    ) -> BoxFuture<'e, Result<Value, GraphError>> {
        async move {
            let Some(node) = node.filter(|n| !n.is_null()) else {
                return self.null_result(def, path);
            };

            match &def.kind {
                FieldKind::Scalar { scalar } => {
                    let raw = node.to_value(&path)?;
                    if raw.is_null() {
                        return self.null_result(def, path);
                    }
                    let resolver = self.scalars.get(scalar).ok_or_else(|| {
                        GraphError::resolution(
                            format!("no resolver registered for scalar {scalar}"),
                            &path,
                        )
                    })?;
                    resolver
                        .outgoing(raw)
                        .await
                        .map_err(|err| err.located(&path))
                }
                FieldKind::Object { type_name } => {
                    if !node.is_object() {
                        return self.null_result(def, path);
                    }
                    let fields = self.schema.fields_of(type_name, &path)?;
                    let resolved = self.resolve_wants(node, wants, fields, &path).await?;
                    Ok(Value::Object(resolved))
                }
                FieldKind::List { item } => {
                    let Some(items) = node.items() else {
                        return self.null_result(def, path);
                    };
                    let futures = items.into_iter().enumerate().map(|(index, element)| {
                        self.resolve_element(element, item, wants, format!("{path}.{index}"))
                    });
                    Ok(Value::Array(try_join_all(futures).await?))
                }
            }
        }
        .boxed()
    }

    /// Resolves one array element, re-using the field's want tree and the
    /// item definition. Deferred elements are invoked with no arguments.
    fn resolve_element<'e>(
        &'e self,
        element: DataNode<'e>,
        def: &'e FieldDef,
        wants: &'e [Want],
        path: String,
    ) -> BoxFuture<'e, Result<Value, GraphError>> {
        async move {
            if let Some(resolver) = element.lazy() {
                let data = resolver
                    .resolve(
                        Value::Object(Map::new()),
                        FieldInfo {
                            context: self.context,
                            wants,
                            path: &path,
                        },
                    )
                    .await
                    .map_err(|err| err.located(&path))?;
                return self
                    .resolve_entry(Some(DataNode::Data(&data)), def, wants, path.clone())
                    .await;
            }
            self.resolve_entry(Some(element), def, wants, path).await
        }
        .boxed()
    }

    /// The shared null/absent outcome: an error for non-nullable
    /// definitions, `null` otherwise.
    fn null_result(&self, def: &FieldDef, path: String) -> Result<Value, GraphError> {
        if !def.nullable {
            return Err(GraphError::resolution(
                "non-nullable field received null",
                path,
            ));
        }
        Ok(Value::Null)
    }
}
