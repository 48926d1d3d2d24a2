use crate::schema::FieldDef;
use serde::Deserialize;
use serde::Serialize;

/// The resolved kind of a linked field definition.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum FieldKind {
    /// A scalar, coerced through the registered scalar resolver.
    Scalar { scalar: String },

    /// A reference into the schema's type arena. Types are shared by name
    /// handle rather than by copy, so self-referential schemas (a type
    /// whose field returns the same type) resolve without recursion.
    /// Synthesized paginator containers live in the arena under their
    /// `Paginator[Item]` spelling.
    Object { type_name: String },

    /// An array of an item definition.
    List { item: Box<FieldDef> },
}
