/// The reserved keyword-operators that open a top-level schema declaration
/// (and, in the query language, a message invocation).
///
/// These words are reserved everywhere: the lexer classifies them
/// unconditionally, so they are not usable as type or field names.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Keyword {
    Directive,
    Message,
    Paginator,
    Scalar,
    Type,
}

impl Keyword {
    /// Maps an identifier to its reserved keyword, if it is one.
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "directive" => Some(Keyword::Directive),
            "message" => Some(Keyword::Message),
            "paginator" => Some(Keyword::Paginator),
            "scalar" => Some(Keyword::Scalar),
            "type" => Some(Keyword::Type),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Directive => "directive",
            Keyword::Message => "message",
            Keyword::Paginator => "paginator",
            Keyword::Scalar => "scalar",
            Keyword::Type => "type",
        }
    }
}
