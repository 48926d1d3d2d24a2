//! Raw AST for the schema and query languages.

mod directive_decl;
mod directive_site;
mod directive_use;
mod field_decl;
mod input_decl;
mod message_decl;
mod query_document;
mod raw_schema;
mod type_decl;
mod type_expr;
mod want;

pub use directive_decl::DirectiveDecl;
pub use directive_site::DirectiveSite;
pub use directive_use::DirectiveUse;
pub use directive_use::DirectiveUseVec;
pub use field_decl::FieldDecl;
pub use input_decl::InputDecl;
pub use message_decl::MessageDecl;
pub use query_document::QueryDocument;
pub use raw_schema::RawSchema;
pub use type_decl::TypeDecl;
pub use type_expr::TypeExpr;
pub use want::Want;
