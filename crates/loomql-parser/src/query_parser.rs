//! Recursive descent parser for the query language.
//!
//! A query is zero or more message invocations, each
//! `message Alias(: FieldName)? (inputLiteral)? { want* }`. Values in
//! argument positions are runtime literals (numbers, strings, booleans,
//! null, arrays, objects), not type declarations.

use crate::ParseError;
use crate::TokenStream;
use crate::ast::QueryDocument;
use crate::ast::Want;
use crate::delimited::delimited;
use crate::literal::take_primitive;
use crate::token::Keyword;
use crate::token::TokenKind;
use serde_json::Map;
use serde_json::Value;

/// Parses query text into an ordered [`QueryDocument`].
pub fn parse_query(source: &str) -> Result<QueryDocument, ParseError> {
    let mut stream = TokenStream::new(source);
    let mut document = QueryDocument::default();

    loop {
        stream.skip_separators();
        if stream.eof() {
            break;
        }
        stream.expect(&TokenKind::Keyword(Keyword::Message), "")?;
        document.messages.push(parse_want(&mut stream, "")?);
    }

    Ok(document)
}

/// Parses one want: an alias, an optional `: fieldName` target, optional
/// literal arguments, and an optional nested wants block. Message
/// invocations are top-level wants.
fn parse_want(stream: &mut TokenStream<'_>, parent_path: &str) -> Result<Want, ParseError> {
    let alias = stream.expect_name(parent_path)?;
    let path = if parent_path.is_empty() {
        alias.clone()
    } else {
        format!("{parent_path}.{alias}")
    };

    // An aliased fetch must name its target field after the `:`.
    let field_name = if stream.at(&TokenKind::Colon) {
        stream.consume();
        stream.expect_name(&path)?
    } else {
        alias.clone()
    };

    let args = parse_literal_args(stream, &path)?;
    let wants = parse_wants_block(stream, &path)?;

    Ok(Want {
        alias,
        field_name,
        args,
        wants,
    })
}

fn parse_wants_block(stream: &mut TokenStream<'_>, path: &str) -> Result<Vec<Want>, ParseError> {
    let mut wants = Vec::new();
    delimited(
        stream,
        TokenKind::CurlyBraceOpen,
        TokenKind::CurlyBraceClose,
        path,
        |stream, path| {
            wants.push(parse_want(stream, path)?);
            Ok(())
        },
    )?;
    Ok(wants)
}

/// Parses a parenthesized `name: literal` argument list. Returns an empty
/// map when no `(` is present.
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

/// Parses a runtime literal: a primitive, a `[...]` array, or a `{...}`
/// object, recursively.
fn parse_literal_value(stream: &mut TokenStream<'_>, path: &str) -> Result<Value, ParseError> {
    if let Some(value) = take_primitive(stream, path)? {
        return Ok(value);
    }

    if stream.at(&TokenKind::SquareBracketOpen) {
        let mut items = Vec::new();
        let mut index = 0usize;
        delimited(
            stream,
            TokenKind::SquareBracketOpen,
            TokenKind::SquareBracketClose,
            path,
            |stream, path| {
                let item_path = format!("{path}.{index}");
                items.push(parse_literal_value(stream, &item_path)?);
                index += 1;
                Ok(())
            },
        )?;
        return Ok(Value::Array(items));
    }

    if stream.at(&TokenKind::CurlyBraceOpen) {
        let mut map = Map::new();
        delimited(
            stream,
            TokenKind::CurlyBraceOpen,
            TokenKind::CurlyBraceClose,
            path,
            |stream, path| {
                let name = stream.expect_name(path)?;
                let entry_path = format!("{path}.{name}");
                stream.expect(&TokenKind::Colon, &entry_path)?;
                map.insert(name, parse_literal_value(stream, &entry_path)?);
                Ok(())
            },
        )?;
        return Ok(Value::Object(map));
    }

    let found = stream.peek().kind.describe();
    Err(stream.fail(path, format!("{found} is not a valid literal value")))
}
