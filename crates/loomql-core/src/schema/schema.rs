use crate::GraphError;
use crate::schema::DirectiveDef;
use crate::schema::FieldDef;
use crate::schema::FieldKind;
use crate::schema::MessageDef;
use crate::schema::TypeDef;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde::Deserialize;
use serde::Serialize;

/// The fully linked schema: an arena of named types plus the message,
/// directive, and scalar tables, built once when the engine is constructed
/// and read-only for its lifetime.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Schema {
    pub(crate) types: IndexMap<String, TypeDef>,
    pub(crate) messages: IndexMap<String, MessageDef>,
    pub(crate) directives: IndexMap<String, DirectiveDef>,
    pub(crate) scalar_names: IndexSet<String>,
}

impl Schema {
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn message(&self, name: &str) -> Option<&MessageDef> {
        self.messages.get(name)
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDef> {
        self.directives.get(name)
    }

    pub fn is_scalar(&self, name: &str) -> bool {
        self.scalar_names.contains(name)
    }

    pub fn message_names(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Dereferences a type handle to its field map. A miss is an internal
    /// inconsistency: linking guarantees every handle resolves.
    pub(crate) fn fields_of(
        &self,
        type_name: &str,
        path: &str,
    ) -> Result<&IndexMap<String, FieldDef>, GraphError> {
        self.types
            .get(type_name)
            .map(|type_def| &type_def.fields)
            .ok_or_else(|| {
                GraphError::resolution(format!("schema type `{type_name}` is not linked"), path)
            })
    }

    /// The nested field map selected by a want targeting `def`, if `def`
    /// is composite: the type's own fields, or the item type's fields for
    /// arrays (however deeply nested). `None` for scalars.
    pub(crate) fn composite_fields(&self, def: &FieldDef) -> Option<&IndexMap<String, FieldDef>> {
        match &def.kind {
            FieldKind::Scalar { .. } => None,
            FieldKind::Object { type_name } => {
                self.types.get(type_name).map(|type_def| &type_def.fields)
            }
            FieldKind::List { item } => self.composite_fields(item),
        }
    }
}
