use crate::schema::FieldKind;
use indexmap::IndexMap;
use loomql_parser::ast::DirectiveUseVec;
use serde::Deserialize;
use serde::Serialize;

/// A fully linked field, input, or argument definition.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldDef {
    pub kind: FieldKind,

    /// Nullable unless the declaration carried a `!` marker.
    pub nullable: bool,

    /// Declared call-site arguments (spreads already expanded). Empty for
    /// inputs and arguments.
    pub args: IndexMap<String, FieldDef>,

    /// Directive uses in declaration order; executed as a chain during
    /// resolution.
    pub directives: DirectiveUseVec,
}

impl FieldDef {
    /// A bare definition with no arguments or directives, used for array
    /// items and synthesized fields.
    pub(crate) fn plain(kind: FieldKind, nullable: bool) -> Self {
        Self {
            kind,
            nullable,
            args: IndexMap::new(),
            directives: DirectiveUseVec::new(),
        }
    }
}
