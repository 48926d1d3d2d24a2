use crate::ast::DirectiveUseVec;
use crate::ast::InputDecl;
use crate::ast::TypeExpr;
use serde::Deserialize;
use serde::Serialize;

/// One declared field, input, or argument:
/// `name(args)?: TypeExpr directive* (!)?`.
///
/// Nullability defaults to nullable; a `!` marker after the type expression
/// makes the field required.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldDecl {
    pub name: String,

    /// Declared arguments, when this is an output field that accepts them
    /// (`friends(limit: Number)`). Always empty for inputs and arguments
    /// themselves.
    pub args: Vec<InputDecl>,

    pub type_expr: TypeExpr,

    pub nullable: bool,

    pub directives: DirectiveUseVec,
}
