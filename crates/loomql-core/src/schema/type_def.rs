use crate::schema::FieldDef;
use indexmap::IndexMap;
use loomql_parser::ast::DirectiveUseVec;
use serde::Deserialize;
use serde::Serialize;

/// A linked named type: an ordered map of field definitions.
///
/// The type graph is built once at link time and is read-only thereafter;
/// fields reference other types by name handle, which is what allows the
/// graph to be cyclic.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub fields: IndexMap<String, FieldDef>,
    pub directives: DirectiveUseVec,
}
