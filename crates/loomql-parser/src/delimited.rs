use crate::ParseError;
use crate::TokenStream;
use crate::token::TokenKind;

/// Parses a delimited list with skippable item separators.
///
/// This single primitive underlies every comma/newline-separated construct
/// in both grammars: field blocks, argument lists, wants blocks, and
/// array/object literals. If `open` is not the current token the list is
/// treated as absent and `Ok(false)` is returned; otherwise `item` is
/// invoked once per element until `close`, and `Ok(true)` is returned.
pub(crate) fn delimited<'src, F>(
    stream: &mut TokenStream<'src>,
    open: TokenKind<'static>,
    close: TokenKind<'static>,
    path: &str,
    mut item: F,
) -> Result<bool, ParseError>
where
    F: FnMut(&mut TokenStream<'src>, &str) -> Result<(), ParseError>,
{
    if !stream.at(&open) {
        return Ok(false);
    }
    stream.consume();
    loop {
        stream.skip_separators();
        if stream.at(&close) {
            stream.consume();
            return Ok(true);
        }
        if stream.eof() {
            return Err(stream.fail(
                path,
                format!("expected {} before end of input", close.describe()),
            ));
        }
        item(stream, path)?;
    }
}
