//! The built-in `cost` and `deprecated` directives.
//!
//! Both are metadata-only: `cost` is read by the static cost analyser
//! before execution and `deprecated` is documentation, so the default
//! pass-through visitors apply.

use crate::resolver::DirectiveResolver;

pub struct CostDirective;

impl DirectiveResolver for CostDirective {}

pub struct DeprecatedDirective;

impl DirectiveResolver for DeprecatedDirective {}
