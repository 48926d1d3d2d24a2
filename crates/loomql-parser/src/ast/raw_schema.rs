use crate::ast::DirectiveDecl;
use crate::ast::MessageDecl;
use crate::ast::TypeDecl;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// The raw, unlinked output of the schema parser: top-level declarations
/// keyed by name, in declaration order. Named-type references are not yet
/// resolved and spreads are not yet expanded — that is the linker's job.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RawSchema {
    pub types: IndexMap<String, TypeDecl>,
    pub paginators: IndexMap<String, TypeDecl>,
    pub messages: IndexMap<String, MessageDecl>,
    pub directives: IndexMap<String, DirectiveDecl>,
    pub scalar_types: Vec<String>,
}
