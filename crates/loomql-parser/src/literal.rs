use crate::ParseError;
use crate::TokenStream;
use crate::token::TokenKind;
use serde_json::Value;

/// Consumes a primitive literal token (number, string, boolean, null) and
/// converts it to a runtime value. Returns `Ok(None)` without consuming
/// anything when the current token is not a primitive.
pub(crate) fn take_primitive(
    stream: &mut TokenStream<'_>,
    path: &str,
) -> Result<Option<Value>, ParseError> {
    stream.peek_checked(path)?;
    if !matches!(
        stream.peek().kind,
        TokenKind::Number(_)
            | TokenKind::Str(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
    ) {
        return Ok(None);
    }

    let token = stream.consume();
    let value = match token.kind {
        TokenKind::Number(n) => match serde_json::Number::from_f64(n) {
            Some(num) => Value::Number(num),
            None => {
                return Err(ParseError::new(
                    format!("number literal `{n}` is out of range"),
                    path,
                    Some(token.position),
                ));
            }
        },
        TokenKind::Str(s) => Value::String(s.into_owned()),
        TokenKind::True => Value::Bool(true),
        TokenKind::False => Value::Bool(false),
        TokenKind::Null => Value::Null,
        _ => unreachable!(),
    };
    Ok(Some(value))
}
