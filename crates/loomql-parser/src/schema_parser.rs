//! Recursive descent parser for the schema language.
//!
//! One top-level declaration is recognized per iteration until end of
//! input: `scalar Name`, `directive Name(args) SITE+`,
//! `type Name { field* }`, `paginator Name { field* }`, and
//! `message Name(inputs): TypeExpr`. Item separators (line breaks and
//! commas) between declarations and fields are optional and skippable.
//!
//! Parsing stops at the first structural mismatch; errors carry the
//! partial dotted path built so far.

use crate::ParseError;
use crate::TokenStream;
use crate::ast::DirectiveDecl;
use crate::ast::DirectiveSite;
use crate::ast::DirectiveUse;
use crate::ast::DirectiveUseVec;
use crate::ast::FieldDecl;
use crate::ast::InputDecl;
use crate::ast::MessageDecl;
use crate::ast::RawSchema;
use crate::ast::TypeDecl;
use crate::ast::TypeExpr;
use crate::delimited::delimited;
use crate::literal::take_primitive;
use crate::token::Keyword;
use crate::token::TokenKind;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;

/// Parses schema text into a [`RawSchema`] of unlinked declarations.
pub fn parse_schema(source: &str) -> Result<RawSchema, ParseError> {
    let mut stream = TokenStream::new(source);
    let mut schema = RawSchema::default();

    loop {
        stream.skip_separators();
        if stream.eof() {
            break;
        }
        let keyword = match stream.peek_checked("")?.kind {
            TokenKind::Keyword(kw) => kw,
            _ => {
                let found = stream.peek().kind.describe();
                return Err(stream.fail(
                    "",
                    format!("expected a top-level declaration, found {found}"),
                ));
            }
        };
        stream.consume();

        match keyword {
            Keyword::Scalar => {
                let name = stream.expect_name("scalar")?;
                schema.scalar_types.push(name);
            }
            Keyword::Type => {
                let decl = parse_type_decl(&mut stream)?;
                schema.types.insert(decl.name.clone(), decl);
            }
            Keyword::Paginator => {
                let decl = parse_type_decl(&mut stream)?;
                schema.paginators.insert(decl.name.clone(), decl);
            }
            Keyword::Message => {
                let decl = parse_message_decl(&mut stream)?;
                schema.messages.insert(decl.name.clone(), decl);
            }
            Keyword::Directive => {
                let decl = parse_directive_decl(&mut stream)?;
                schema.directives.insert(decl.name.clone(), decl);
            }
        }
    }

    Ok(schema)
}

/// Parses the body of a `type` or `paginator` declaration, positioned just
/// past the keyword.
fn parse_type_decl(stream: &mut TokenStream<'_>) -> Result<TypeDecl, ParseError> {
    let name = stream.expect_name("type")?;
    let fields = parse_field_block(stream, &name)?;
    let directives = parse_directive_uses(stream, &name)?;
    Ok(TypeDecl {
        name,
        fields,
        directives,
    })
}

fn parse_field_block(
    stream: &mut TokenStream<'_>,
    parent: &str,
) -> Result<IndexMap<String, FieldDecl>, ParseError> {
    let mut fields = IndexMap::new();
    delimited(
        stream,
        TokenKind::CurlyBraceOpen,
        TokenKind::CurlyBraceClose,
        parent,
        |stream, parent| {
            let field = parse_field_decl(stream, parent, true)?;
            fields.insert(field.name.clone(), field);
            Ok(())
        },
    )?;
    Ok(fields)
}

/// Parses one `name(args)?: TypeExpr` declaration with its nullability
/// marker and directive uses. Argument lists are only recognized when
/// `allow_args` is set (output fields); inputs and arguments themselves
/// cannot declare further arguments.
fn parse_field_decl(
    stream: &mut TokenStream<'_>,
    parent: &str,
    allow_args: bool,
) -> Result<FieldDecl, ParseError> {
    let name = stream.expect_name(parent)?;
    let path = format!("{parent}.{name}");

    let args = if allow_args {
        parse_input_decls(stream, &path)?
    } else {
        Vec::new()
    };

    stream.expect(&TokenKind::Colon, &path)?;
    let type_expr = parse_type_expr(stream, &path)?;
    let (nullable, directives) = parse_field_suffix(stream, &path)?;

    Ok(FieldDecl {
        name,
        args,
        type_expr,
        nullable,
        directives,
    })
}

/// Parses a parenthesized input/argument declaration list, including
/// `...Type` spread entries. Returns an empty list when no `(` is present.
fn parse_input_decls(
    stream: &mut TokenStream<'_>,
    path: &str,
) -> Result<Vec<InputDecl>, ParseError> {
    let mut decls = Vec::new();
    delimited(
        stream,
        TokenKind::ParenOpen,
        TokenKind::ParenClose,
        path,
        |stream, path| {
            if stream.at(&TokenKind::Ellipsis) {
                stream.consume();
                let type_name = stream.expect_name(path)?;
                decls.push(InputDecl::Spread { type_name });
                return Ok(());
            }
            let field = parse_field_decl(stream, path, false)?;
            decls.push(InputDecl::Field(field));
            Ok(())
        },
    )?;
    Ok(decls)
}

/// Parses a type expression, left to right: a bare identifier, `[Item]`,
/// or the `Paginator[Item]` shorthand.
fn parse_type_expr(stream: &mut TokenStream<'_>, path: &str) -> Result<TypeExpr, ParseError> {
    if stream.at(&TokenKind::SquareBracketOpen) {
        stream.consume();
        let item = stream.expect_name(path)?;
        let item_nullable = take_bang(stream);
        stream.expect(&TokenKind::SquareBracketClose, path)?;
        return Ok(TypeExpr::List {
            item,
            item_nullable,
        });
    }

    if matches!(stream.peek_checked(path)?.kind, TokenKind::Name(_)) {
        let name = stream.expect_name(path)?;
        if stream.at(&TokenKind::SquareBracketOpen) {
            stream.consume();
            let item = stream.expect_name(path)?;
            let item_nullable = take_bang(stream);
            stream.expect(&TokenKind::SquareBracketClose, path)?;
            return Ok(TypeExpr::Paginator {
                paginator: name,
                item,
                item_nullable,
            });
        }
        return Ok(TypeExpr::Named { name });
    }

    let found = stream.peek().kind.describe();
    Err(stream.fail(path, format!("expected a type expression, found {found}")))
}

/// Consumes a `!` marker if present. Returns the resulting nullability
/// (nullable unless explicitly marked required).
fn take_bang(stream: &mut TokenStream<'_>) -> bool {
    if stream.at(&TokenKind::Bang) {
        stream.consume();
        false
    } else {
        true
    }
}

/// Parses the trailing `!` marker and directive uses after a type
/// expression, in either order.
fn parse_field_suffix(
    stream: &mut TokenStream<'_>,
    path: &str,
) -> Result<(bool, DirectiveUseVec), ParseError> {
    let mut nullable = true;
    let mut directives = DirectiveUseVec::new();
    loop {
        if stream.at(&TokenKind::Bang) {
            stream.consume();
            nullable = false;
            continue;
        }
        if matches!(stream.peek().kind, TokenKind::DirectiveName(_)) {
            directives.push(parse_directive_use(stream, path)?);
            continue;
        }
        // Directive uses may continue on following lines.
        if stream.at_separator()
            && matches!(
                stream.peek_past_separators().kind,
                TokenKind::DirectiveName(_),
            )
        {
            stream.skip_separators();
            continue;
        }
        break;
    }
    Ok((nullable, directives))
}

fn parse_directive_uses(
    stream: &mut TokenStream<'_>,
    path: &str,
) -> Result<DirectiveUseVec, ParseError> {
    let mut directives = DirectiveUseVec::new();
    while matches!(stream.peek().kind, TokenKind::DirectiveName(_)) {
        directives.push(parse_directive_use(stream, path)?);
    }
    Ok(directives)
}

fn parse_directive_use(
    stream: &mut TokenStream<'_>,
    path: &str,
) -> Result<DirectiveUse, ParseError> {
    let name = match stream.consume().kind {
        TokenKind::DirectiveName(name) => name.into_owned(),
        _ => unreachable!("caller peeked a directive name"),
    };
    let args = parse_literal_args(stream, &format!("{path}.{name}"))?;
    Ok(DirectiveUse { name, args })
}

/// Parses a parenthesized list of `name: literal` directive arguments.
fn parse_literal_args(
    stream: &mut TokenStream<'_>,
    path: &str,
) -> Result<Map<String, Value>, ParseError> {
    let mut args = Map::new();
    delimited(
        stream,
        TokenKind::ParenOpen,
        TokenKind::ParenClose,
        path,
        |stream, path| {
            let name = stream.expect_name(path)?;
            let entry_path = format!("{path}.{name}");
            stream.expect(&TokenKind::Colon, &entry_path)?;
            let value = parse_literal_value(stream, &entry_path)?;
            args.insert(name, value);
            Ok(())
        },
    )?;
    Ok(args)
}

/// Parses a literal value in a schema directive-use position: a primitive,
/// a bare identifier (treated as a string), or an array of either.
fn parse_literal_value(stream: &mut TokenStream<'_>, path: &str) -> Result<Value, ParseError> {
    if let Some(value) = take_primitive(stream, path)? {
        return Ok(value);
    }
    if matches!(stream.peek().kind, TokenKind::Name(_)) {
        let name = stream.expect_name(path)?;
        return Ok(Value::String(name));
    }
    if stream.at(&TokenKind::SquareBracketOpen) {
        let mut items = Vec::new();
        delimited(
            stream,
            TokenKind::SquareBracketOpen,
            TokenKind::SquareBracketClose,
            path,
            |stream, path| {
                items.push(parse_literal_value(stream, path)?);
                Ok(())
            },
        )?;
        return Ok(Value::Array(items));
    }
    let found = stream.peek().kind.describe();
    Err(stream.fail(path, format!("{found} is not a valid literal value")))
}

/// Parses the body of a `message` declaration, positioned just past the
/// keyword.
fn parse_message_decl(stream: &mut TokenStream<'_>) -> Result<MessageDecl, ParseError> {
    let name = stream.expect_name("message")?;
    let inputs = parse_input_decls(stream, &name)?;
    stream.expect(&TokenKind::Colon, &name)?;
    let output = parse_type_expr(stream, &name)?;
    let (nullable, directives) = parse_field_suffix(stream, &name)?;
    Ok(MessageDecl {
        name,
        inputs,
        output,
        nullable,
        directives,
    })
}

/// Parses the body of a `directive` declaration, positioned just past the
/// keyword: typed arguments followed by one or more site keywords.
fn parse_directive_decl(stream: &mut TokenStream<'_>) -> Result<DirectiveDecl, ParseError> {
    let name = stream.expect_name("directive")?;

    let mut args = IndexMap::new();
    for decl in parse_input_decls(stream, &name)? {
        match decl {
            InputDecl::Field(field) => {
                args.insert(field.name.clone(), field);
            }
            InputDecl::Spread { type_name } => {
                return Err(stream.fail(
                    &name,
                    format!("spread `...{type_name}` is not allowed in directive arguments"),
                ));
            }
        }
    }

    let mut sites = Vec::new();
    while matches!(stream.peek().kind, TokenKind::Name(_)) {
        let site_word = stream.expect_name(&name)?;
        match DirectiveSite::from_keyword(&site_word) {
            Some(site) => sites.push(site),
            None => {
                return Err(stream.fail(
                    &name,
                    format!("`{site_word}` is not a directive site (expected INPUT, FIELD, or OBJECT)"),
                ));
            }
        }
    }
    if sites.is_empty() {
        return Err(stream.fail(
            &name,
            "directives must declare at least one site (INPUT, FIELD, OBJECT)",
        ));
    }

    Ok(DirectiveDecl { name, args, sites })
}
