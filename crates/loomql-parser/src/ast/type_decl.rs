use crate::ast::DirectiveUseVec;
use crate::ast::FieldDecl;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// A raw `type` or `paginator` declaration: a named, ordered map of field
/// declarations.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub fields: IndexMap<String, FieldDecl>,
    pub directives: DirectiveUseVec,
}
