use crate::ast::DirectiveSite;
use crate::ast::FieldDecl;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// A raw `directive` declaration: argument schema plus the sites the
/// directive may annotate. At least one site is required.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DirectiveDecl {
    pub name: String,
    pub args: IndexMap<String, FieldDecl>,
    pub sites: Vec<DirectiveSite>,
}
