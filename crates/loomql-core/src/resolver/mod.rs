//! Resolver capability interfaces and the runtime data model.
//!
//! Message, scalar, and directive behaviors are supplied by the embedding
//! application as trait implementations registered in name-keyed tables at
//! engine construction; dispatch is always by table lookup.

mod builtin_directives;
mod builtin_scalars;
mod chain;
mod data;
mod directive_resolver;
mod field_resolver;
mod message_resolver;
mod scalar_resolver;

pub use builtin_directives::CostDirective;
pub use builtin_directives::DeprecatedDirective;
pub use builtin_scalars::BooleanScalar;
pub use builtin_scalars::NumberScalar;
pub use builtin_scalars::StringScalar;
pub use chain::FieldChain;
pub use chain::FieldVisit;
pub use chain::InputChain;
pub use chain::InputVisit;
pub use data::Data;
pub use directive_resolver::DirectiveResolver;
pub use field_resolver::FieldInfo;
pub use field_resolver::FieldResolver;
pub use message_resolver::MessageResolver;
pub use message_resolver::ResolveInfo;
pub use scalar_resolver::ScalarResolver;

pub(crate) use chain::DirectiveTable;

use indexmap::IndexMap;
use std::sync::Arc;

pub(crate) type MessageTable = IndexMap<String, Arc<dyn MessageResolver>>;
pub(crate) type ScalarTable = IndexMap<String, Arc<dyn ScalarResolver>>;
