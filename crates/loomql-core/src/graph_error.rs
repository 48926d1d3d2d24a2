use loomql_parser::ParseError;

/// Classification of per-query failures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphErrorKind {
    /// Malformed query text.
    Syntax,
    /// The query does not match the linked schema.
    Validation,
    /// The query's static cost exceeded the caller's budget.
    CostLimit,
    /// A resolver, scalar conversion, or directive failed during execution.
    Resolution,
}

/// The engine's single per-query error type.
///
/// Every raised error carries a dotted `path` locating the offending node
/// in the query tree (e.g. `UpdateUser.friends.0.test`). The first error
/// encountered aborts the query; errors are never aggregated.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct GraphError {
    kind: GraphErrorKind,
    message: String,
    path: String,
}

impl GraphError {
    pub fn new(
        kind: GraphErrorKind,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.into(),
        }
    }

    /// A resolution error with no location yet. Resolvers and directives
    /// raise these to reject a value; the engine attaches the dotted path
    /// of the node being resolved as the error propagates.
    pub fn reject(message: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::Resolution, message, "")
    }

    pub(crate) fn validation(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::Validation, message, path)
    }

    pub(crate) fn cost_limit(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::CostLimit, message, path)
    }

    pub(crate) fn resolution(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::Resolution, message, path)
    }

    /// Attaches `path` when the error does not carry a location yet.
    /// An error that already has a path keeps the more specific one.
    pub(crate) fn located(mut self, path: &str) -> Self {
        if self.path.is_empty() {
            self.path = path.to_string();
        }
        self
    }

    pub fn kind(&self) -> GraphErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The dotted path locating the offending node.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn format_oneline(&self) -> String {
        if self.path.is_empty() {
            self.message.clone()
        } else {
            format!("{} (at {})", self.message, self.path)
        }
    }
}

impl From<ParseError> for GraphError {
    fn from(err: ParseError) -> Self {
        let message = match err.position() {
            Some(position) => format!("{} at {position}", err.message()),
            None => err.message().to_string(),
        };
        Self::new(GraphErrorKind::Syntax, message, err.path())
    }
}
