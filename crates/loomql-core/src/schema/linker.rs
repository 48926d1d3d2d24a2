//! The link + expand pass: turns a raw parsed schema into a [`Schema`].
//!
//! Linking resolves every type expression into a [`FieldKind`], expands
//! `...Type` argument spreads in place, synthesizes paginator container
//! types, and validates every directive use against its declaration. It is
//! a pure function of the raw schema and runs exactly once, at engine
//! construction.

use crate::BuildError;
use crate::schema::DirectiveDef;
use crate::schema::FieldDef;
use crate::schema::FieldKind;
use crate::schema::MessageDef;
use crate::schema::Schema;
use crate::schema::TypeDef;
use indexmap::IndexMap;
use indexmap::IndexSet;
use loomql_parser::ast::DirectiveSite;
use loomql_parser::ast::DirectiveUse;
use loomql_parser::ast::FieldDecl;
use loomql_parser::ast::InputDecl;
use loomql_parser::ast::MessageDecl;
use loomql_parser::ast::RawSchema;
use loomql_parser::ast::TypeDecl;
use loomql_parser::ast::TypeExpr;

pub(crate) fn link(raw: &RawSchema) -> Result<Schema, BuildError> {
    let mut linker = Linker {
        raw,
        scalar_names: raw.scalar_types.iter().cloned().collect(),
        types: IndexMap::new(),
    };

    // Types and paginators both land in the arena; forward references and
    // cycles are fine because fields hold name handles, never copies.
    for decl in raw.types.values().chain(raw.paginators.values()) {
        let type_def = linker.link_type_decl(decl)?;
        linker.types.insert(decl.name.clone(), type_def);
    }

    let mut messages = IndexMap::new();
    for decl in raw.messages.values() {
        messages.insert(decl.name.clone(), linker.link_message_decl(decl)?);
    }

    let mut directives = IndexMap::new();
    for decl in raw.directives.values() {
        let mut args = IndexMap::new();
        for (arg_name, arg_decl) in &decl.args {
            let path = format!("{}.{arg_name}", decl.name);
            args.insert(arg_name.clone(), linker.link_field_decl(arg_decl, &path)?);
        }
        directives.insert(
            decl.name.clone(),
            DirectiveDef {
                name: decl.name.clone(),
                args,
                sites: decl.sites.clone(),
            },
        );
    }

    let schema = Schema {
        types: linker.types,
        messages,
        directives,
        scalar_names: linker.scalar_names,
    };
    validate_directive_uses(&schema)?;
    Ok(schema)
}

struct Linker<'raw> {
    raw: &'raw RawSchema,
    scalar_names: IndexSet<String>,

    /// The arena under construction. Synthesized paginator containers are
    /// inserted here as they are first referenced.
    types: IndexMap<String, TypeDef>,
}

impl Linker<'_> {
    fn link_type_decl(&mut self, decl: &TypeDecl) -> Result<TypeDef, BuildError> {
        let mut fields = IndexMap::new();
        for (field_name, field_decl) in &decl.fields {
            let path = format!("{}.{field_name}", decl.name);
            fields.insert(field_name.clone(), self.link_field_decl(field_decl, &path)?);
        }
        Ok(TypeDef {
            name: decl.name.clone(),
            fields,
            directives: decl.directives.clone(),
        })
    }

    fn link_message_decl(&mut self, decl: &MessageDecl) -> Result<MessageDef, BuildError> {
        let inputs = self.link_input_decls(&decl.inputs, &decl.name)?;
        let output_kind = self.link_type_expr(&decl.output, &decl.name)?;
        Ok(MessageDef {
            name: decl.name.clone(),
            inputs,
            output: FieldDef::plain(output_kind, decl.nullable),
            directives: decl.directives.clone(),
        })
    }

    fn link_field_decl(&mut self, decl: &FieldDecl, path: &str) -> Result<FieldDef, BuildError> {
        let args = self.link_input_decls(&decl.args, path)?;
        let kind = self.link_type_expr(&decl.type_expr, path)?;
        Ok(FieldDef {
            kind,
            nullable: decl.nullable,
            args,
            directives: decl.directives.clone(),
        })
    }

    /// Links an input/argument declaration list, replacing each
    /// `...Type` spread with the referenced type's fields as sibling
    /// arguments at the same position.
    fn link_input_decls(
        &mut self,
        decls: &[InputDecl],
        path: &str,
    ) -> Result<IndexMap<String, FieldDef>, BuildError> {
        let mut linked = IndexMap::new();
        for decl in decls {
            match decl {
                InputDecl::Field(field) => {
                    let field_path = format!("{path}.{}", field.name);
                    linked.insert(field.name.clone(), self.link_field_decl(field, &field_path)?);
                }
                InputDecl::Spread { type_name } => {
                    let Some(spread_type) = self.raw.types.get(type_name) else {
                        return Err(BuildError::UnknownSpreadType {
                            name: type_name.clone(),
                            path: path.to_string(),
                        });
                    };
                    for (field_name, field) in &spread_type.fields {
                        let field_path = format!("{path}.{field_name}");
                        linked.insert(
                            field_name.clone(),
                            self.link_field_decl(field, &field_path)?,
                        );
                    }
                }
            }
        }
        Ok(linked)
    }

    fn link_type_expr(&mut self, expr: &TypeExpr, path: &str) -> Result<FieldKind, BuildError> {
        match expr {
            TypeExpr::Named { name } => self.named_kind(name, path),
            TypeExpr::List {
                item,
                item_nullable,
            } => {
                let item_kind = self.named_kind(item, path)?;
                Ok(FieldKind::List {
                    item: Box::new(FieldDef::plain(item_kind, *item_nullable)),
                })
            }
            TypeExpr::Paginator {
                paginator,
                item,
                item_nullable,
            } => {
                let container =
                    self.paginator_container(paginator, item, *item_nullable, path)?;
                Ok(FieldKind::Object {
                    type_name: container,
                })
            }
        }
    }

    /// Resolves a bare identifier to a scalar or type handle.
    fn named_kind(&mut self, name: &str, path: &str) -> Result<FieldKind, BuildError> {
        if self.scalar_names.contains(name) {
            return Ok(FieldKind::Scalar {
                scalar: name.to_string(),
            });
        }
        if self.raw.types.contains_key(name)
            || self.raw.paginators.contains_key(name)
            || self.types.contains_key(name)
        {
            return Ok(FieldKind::Object {
                type_name: name.to_string(),
            });
        }
        Err(BuildError::UnknownTypeReference {
            name: name.to_string(),
            path: path.to_string(),
        })
    }

    /// Synthesizes (or reuses) the container type for a
    /// `Paginator[Item]` reference: an `items` array of the item type
    /// unioned with the paginator's own declared fields, registered in the
    /// arena under the `Paginator[Item]` spelling.
    fn paginator_container(
        &mut self,
        paginator: &str,
        item: &str,
        item_nullable: bool,
        path: &str,
    ) -> Result<String, BuildError> {
        let container_name = format!("{paginator}[{item}]");
        if self.types.contains_key(&container_name) {
            return Ok(container_name);
        }

        let Some(paginator_decl) = self.raw.paginators.get(paginator) else {
            return Err(BuildError::UnknownPaginator {
                name: paginator.to_string(),
                path: path.to_string(),
            });
        };

        // Register a placeholder first so a paginator that references its
        // own shorthand terminates instead of recursing.
        self.types.insert(
            container_name.clone(),
            TypeDef {
                name: container_name.clone(),
                fields: IndexMap::new(),
                directives: paginator_decl.directives.clone(),
            },
        );

        let item_kind = self.named_kind(item, path)?;
        let mut fields = IndexMap::new();
        fields.insert(
            "items".to_string(),
            FieldDef::plain(
                FieldKind::List {
                    item: Box::new(FieldDef::plain(item_kind, item_nullable)),
                },
                true,
            ),
        );
        for (field_name, field_decl) in &paginator_decl.fields {
            let field_path = format!("{container_name}.{field_name}");
            fields.insert(
                field_name.clone(),
                self.link_field_decl(field_decl, &field_path)?,
            );
        }

        self.types
            .get_mut(&container_name)
            .expect("placeholder registered above")
            .fields = fields;
        Ok(container_name)
    }
}

// =============================================================================
// Directive-use validation
// =============================================================================

/// Checks every directive use in the linked schema: the directive must be
/// declared, use only declared argument names, and appear on an allowed
/// site.
fn validate_directive_uses(schema: &Schema) -> Result<(), BuildError> {
    for type_def in schema.types.values() {
        check_uses(schema, &type_def.directives, DirectiveSite::Object, &type_def.name)?;
        for (field_name, field) in &type_def.fields {
            let path = format!("{}.{field_name}", type_def.name);
            check_field_uses(schema, field, &path)?;
        }
    }
    for message in schema.messages.values() {
        check_uses(schema, &message.directives, DirectiveSite::Object, &message.name)?;
        for (input_name, input) in &message.inputs {
            let path = format!("{}.{input_name}", message.name);
            check_uses(schema, &input.directives, DirectiveSite::Input, &path)?;
        }
    }
    for directive in schema.directives.values() {
        for (arg_name, arg) in &directive.args {
            let path = format!("{}.{arg_name}", directive.name);
            check_uses(schema, &arg.directives, DirectiveSite::Input, &path)?;
        }
    }
    Ok(())
}

fn check_field_uses(schema: &Schema, field: &FieldDef, path: &str) -> Result<(), BuildError> {
    check_uses(schema, &field.directives, DirectiveSite::Field, path)?;
    for (arg_name, arg) in &field.args {
        let arg_path = format!("{path}.{arg_name}");
        check_uses(schema, &arg.directives, DirectiveSite::Input, &arg_path)?;
    }
    Ok(())
}

fn check_uses(
    schema: &Schema,
    uses: &[DirectiveUse],
    site: DirectiveSite,
    path: &str,
) -> Result<(), BuildError> {
    for use_ in uses {
        let Some(def) = schema.directives.get(&use_.name) else {
            return Err(BuildError::UnknownDirective {
                name: use_.name.clone(),
                path: path.to_string(),
            });
        };
        for arg_name in use_.args.keys() {
            if !def.args.contains_key(arg_name) {
                return Err(BuildError::UnknownDirectiveArgument {
                    name: use_.name.clone(),
                    arg: arg_name.clone(),
                    path: path.to_string(),
                });
            }
        }
        if !def.sites.contains(&site) {
            return Err(BuildError::DisallowedDirectiveSite {
                name: use_.name.clone(),
                site: site.as_str(),
                path: path.to_string(),
            });
        }
    }
    Ok(())
}
