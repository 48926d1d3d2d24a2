use crate::schema::FieldDef;
use indexmap::IndexMap;
use loomql_parser::ast::DirectiveSite;
use serde::Deserialize;
use serde::Serialize;

/// A linked directive declaration: its argument schema and the sites it
/// may annotate.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DirectiveDef {
    pub name: String,
    pub args: IndexMap<String, FieldDef>,
    pub sites: Vec<DirectiveSite>,
}
