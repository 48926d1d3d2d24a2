use crate::BuildError;
use crate::Graph;
use crate::resolver::BooleanScalar;
use crate::resolver::CostDirective;
use crate::resolver::DeprecatedDirective;
use crate::resolver::DirectiveResolver;
use crate::resolver::DirectiveTable;
use crate::resolver::MessageResolver;
use crate::resolver::MessageTable;
use crate::resolver::NumberScalar;
use crate::resolver::ScalarResolver;
use crate::resolver::ScalarTable;
use crate::resolver::StringScalar;
use crate::schema::link;
use loomql_parser::parse_schema;
use std::sync::Arc;

/// The built-in prelude appended to every user schema: the minimal scalar
/// set and the two always-available directives.
const BUILTIN_SCHEMA: &str = "
scalar Number
scalar String
scalar Boolean

directive cost(
    cost: Number
    multiplyParent: Boolean
    multipliers: [String]
) INPUT FIELD OBJECT
directive deprecated(reason: String) INPUT FIELD OBJECT
";

/// Builds a [`Graph`] from schema text and resolver registrations.
///
/// `build()` parses and links the schema, then checks resolver
/// completeness: every declared scalar, message, and directive must have a
/// registered resolver, and any gap is a fatal [`BuildError`] — the engine
/// cannot be constructed at all.
pub struct GraphBuilder {
    schema_text: String,
    messages: MessageTable,
    directives: DirectiveTable,
    scalars: ScalarTable,
    default_cost: f64,
}

impl GraphBuilder {
    pub fn new() -> Self {
        let mut scalars: ScalarTable = ScalarTable::new();
        scalars.insert("Number".to_string(), Arc::new(NumberScalar));
        scalars.insert("String".to_string(), Arc::new(StringScalar));
        scalars.insert("Boolean".to_string(), Arc::new(BooleanScalar));

        let mut directives: DirectiveTable = DirectiveTable::new();
        directives.insert("cost".to_string(), Arc::new(CostDirective));
        directives.insert("deprecated".to_string(), Arc::new(DeprecatedDirective));

        Self {
            schema_text: String::new(),
            messages: MessageTable::new(),
            directives,
            scalars,
            default_cost: 0.0,
        }
    }

    /// Appends schema text. May be called multiple times; declarations
    /// from every call land in one schema.
    pub fn schema(mut self, text: impl AsRef<str>) -> Self {
        self.schema_text.push_str(text.as_ref());
        self.schema_text.push('\n');
        self
    }

    /// Registers the resolver for a declared message.
    pub fn message_resolver(
        mut self,
        name: impl Into<String>,
        resolver: impl MessageResolver + 'static,
    ) -> Self {
        self.messages.insert(name.into(), Arc::new(resolver));
        self
    }

    /// Registers the resolver for a declared directive. Registering under
    /// a built-in name (`cost`, `deprecated`) replaces the default.
    pub fn directive_resolver(
        mut self,
        name: impl Into<String>,
        resolver: impl DirectiveResolver + 'static,
    ) -> Self {
        self.directives.insert(name.into(), Arc::new(resolver));
        self
    }

    /// Registers the resolver for a declared scalar. Registering under a
    /// built-in name (`Number`, `String`, `Boolean`) replaces the default.
    pub fn scalar_resolver(
        mut self,
        name: impl Into<String>,
        resolver: impl ScalarResolver + 'static,
    ) -> Self {
        self.scalars.insert(name.into(), Arc::new(resolver));
        self
    }

    /// The cost contributed by every query node that carries no `cost`
    /// directive. Defaults to `0`.
    pub fn default_cost(mut self, cost: f64) -> Self {
        self.default_cost = cost;
        self
    }

    pub fn build(self) -> Result<Graph, BuildError> {
        let mut schema_text = self.schema_text;
        schema_text.push_str(BUILTIN_SCHEMA);

        let raw = parse_schema(&schema_text)?;
        let schema = link(&raw)?;

        check_missing(
            schema.scalar_names.iter().map(String::as_str),
            "scalar",
            |name| self.scalars.contains_key(name),
        )?;
        check_missing(schema.message_names(), "message", |name| {
            self.messages.contains_key(name)
        })?;
        check_missing(
            schema.directives.keys().map(String::as_str),
            "directive",
            |name| self.directives.contains_key(name),
        )?;

        tracing::debug!(
            types = schema.types.len(),
            messages = schema.messages.len(),
            "schema linked",
        );

        Ok(Graph {
            schema,
            messages: self.messages,
            directives: self.directives,
            scalars: self.scalars,
            default_cost: self.default_cost,
        })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_missing<'a>(
    names: impl Iterator<Item = &'a str>,
    kind: &'static str,
    registered: impl Fn(&str) -> bool,
) -> Result<(), BuildError> {
    for name in names {
        if !registered(name) {
            return Err(BuildError::MissingResolver {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
