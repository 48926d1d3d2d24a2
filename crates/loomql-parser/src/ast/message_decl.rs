use crate::ast::DirectiveUseVec;
use crate::ast::InputDecl;
use crate::ast::TypeExpr;
use serde::Deserialize;
use serde::Serialize;

/// A raw `message` declaration — a callable entry point:
/// `message Name(inputs): TypeExpr directive* (!)?`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MessageDecl {
    pub name: String,
    pub inputs: Vec<InputDecl>,
    pub output: TypeExpr,

    /// Nullability of the message's output.
    pub nullable: bool,

    pub directives: DirectiveUseVec,
}
