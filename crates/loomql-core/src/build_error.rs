use loomql_parser::ParseError;
use thiserror::Error;

/// A fatal setup-time error raised while building a
/// [`Graph`](crate::Graph).
///
/// These are distinct from per-query [`GraphError`](crate::GraphError)s:
/// any of them prevents the engine from being constructed at all.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to parse schema: {0}")]
    SchemaParseError(#[from] ParseError),

    #[error("`{name}` is not a valid type (at {path})")]
    UnknownTypeReference { name: String, path: String },

    #[error("`{name}` is not a declared paginator (at {path})")]
    UnknownPaginator { name: String, path: String },

    #[error("spread `...{name}` does not reference a declared type (at {path})")]
    UnknownSpreadType { name: String, path: String },

    #[error("`@{name}` is not a declared directive (at {path})")]
    UnknownDirective { name: String, path: String },

    #[error("directive `@{name}` does not accept argument `{arg}` (at {path})")]
    UnknownDirectiveArgument {
        name: String,
        arg: String,
        path: String,
    },

    #[error("directive `@{name}` may not be applied to the {site} site (at {path})")]
    DisallowedDirectiveSite {
        name: String,
        site: &'static str,
        path: String,
    },

    #[error("could not find resolver for {kind}: {name}")]
    MissingResolver { kind: &'static str, name: String },
}
