mod keyword;
mod token;
mod token_kind;

pub use keyword::Keyword;
pub use token::Token;
pub use token_kind::TokenKind;
