use crate::schema::FieldDef;
use indexmap::IndexMap;
use loomql_parser::ast::DirectiveUseVec;
use serde::Deserialize;
use serde::Serialize;

/// A linked message definition — a callable entry point with declared
/// inputs, an output definition, and a message-level directive chain.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MessageDef {
    pub name: String,
    pub inputs: IndexMap<String, FieldDef>,
    pub output: FieldDef,
    pub directives: DirectiveUseVec,
}
