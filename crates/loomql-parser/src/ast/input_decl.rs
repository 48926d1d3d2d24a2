use crate::ast::FieldDecl;
use serde::Deserialize;
use serde::Serialize;

/// One entry in an input/argument declaration list: either an ordinary
/// typed declaration or a spread of another type's fields
/// (`...PaginationInput`), expanded in place at link time.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum InputDecl {
    Field(FieldDecl),
    Spread { type_name: String },
}
