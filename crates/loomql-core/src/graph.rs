use crate::GraphBuilder;
use crate::GraphError;
use crate::cost::analyse;
use crate::execute::Executor;
use crate::resolver::DirectiveTable;
use crate::resolver::MessageTable;
use crate::resolver::ScalarTable;
use crate::schema::Schema;
use crate::validate::validate;
use loomql_parser::parse_query;
use serde_json::Value;

/// Per-execution options.
pub struct ExecuteOptions {
    /// An opaque value handed through to every resolver and directive.
    pub context: Value,

    /// The cost budget: analysis aborts the query before any resolver
    /// runs once the accumulated static cost would exceed it.
    pub max_cost: f64,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            context: Value::Null,
            max_cost: 1000.0,
        }
    }
}

/// A query engine over one linked schema.
///
/// Built once via [`Graph::builder`]; the linked type graph and resolver
/// tables are read-only for the engine's lifetime, so a `Graph` is freely
/// shareable across concurrent executions. Multiple engines with different
/// schemas may coexist.
pub struct Graph {
    pub(crate) schema: Schema,
    pub(crate) messages: MessageTable,
    pub(crate) directives: DirectiveTable,
    pub(crate) scalars: ScalarTable,
    pub(crate) default_cost: f64,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("schema", &self.schema)
            .field("messages", &self.messages.keys().collect::<Vec<_>>())
            .field("directives", &self.directives.keys().collect::<Vec<_>>())
            .field("scalars", &self.scalars.keys().collect::<Vec<_>>())
            .field("default_cost", &self.default_cost)
            .finish()
    }
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// The linked schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Parses, validates, cost-checks, and executes a query, returning the
    /// assembled result object. Result keys follow query source order.
    ///
    /// Any failure — syntax, validation, cost limit, or resolution —
    /// surfaces as a single [`GraphError`] carrying the dotted path of the
    /// offending node.
    pub async fn execute(
        &self,
        query: &str,
        options: ExecuteOptions,
    ) -> Result<Value, GraphError> {
        let document = parse_query(query)?;
        validate(&document, &self.schema)?;
        let cost = analyse(&document, &self.schema, options.max_cost, self.default_cost)?;
        tracing::debug!(
            messages = document.messages.len(),
            cost,
            max_cost = options.max_cost,
            "query admitted",
        );

        let executor = Executor {
            schema: &self.schema,
            messages: &self.messages,
            directives: &self.directives,
            scalars: &self.scalars,
            context: &options.context,
        };
        executor.run(&document).await
    }
}
