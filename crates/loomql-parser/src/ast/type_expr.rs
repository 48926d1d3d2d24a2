use serde::Deserialize;
use serde::Serialize;

/// An unresolved type expression from a field, input, or message-output
/// declaration. Whether a named reference is a scalar or a type is decided
/// at link time, not here.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TypeExpr {
    /// `Identifier` — a scalar or type reference.
    Named { name: String },

    /// `[Identifier]` — an array of the referenced scalar/type. The item
    /// nullability marker sits inside the brackets: `[User!]`.
    List { item: String, item_nullable: bool },

    /// `Paginator[Item]` — paginator-of-item shorthand. The outer
    /// identifier names a declared paginator, the inner names the item
    /// scalar/type.
    Paginator {
        paginator: String,
        item: String,
        item_nullable: bool,
    },
}

impl TypeExpr {
    /// The source-level spelling, used for error messages and for naming
    /// synthesized paginator container types.
    pub fn spelling(&self) -> String {
        match self {
            TypeExpr::Named { name } => name.clone(),
            TypeExpr::List { item, .. } => format!("[{item}]"),
            TypeExpr::Paginator {
                paginator, item, ..
            } => format!("{paginator}[{item}]"),
        }
    }
}
