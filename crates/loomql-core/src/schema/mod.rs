//! The linked schema: type arena, message/directive tables, and the
//! link + expand pass that builds them.

mod directive_def;
mod field_def;
mod field_kind;
mod linker;
mod message_def;
mod schema;
mod type_def;

pub use directive_def::DirectiveDef;
pub use field_def::FieldDef;
pub use field_kind::FieldKind;
pub use message_def::MessageDef;
pub use schema::Schema;
pub use type_def::TypeDef;

pub(crate) use linker::link;
