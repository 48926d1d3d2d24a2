use serde::Deserialize;
use serde::Serialize;

/// A site at which a directive may be applied.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DirectiveSite {
    /// Message inputs and field arguments.
    Input,
    /// Output fields.
    Field,
    /// Type and message declarations.
    Object,
}

impl DirectiveSite {
    /// Maps a site keyword from a `directive` declaration (`INPUT`, `FIELD`,
    /// `OBJECT`) to its site, if valid.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "INPUT" => Some(DirectiveSite::Input),
            "FIELD" => Some(DirectiveSite::Field),
            "OBJECT" => Some(DirectiveSite::Object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveSite::Input => "INPUT",
            DirectiveSite::Field => "FIELD",
            DirectiveSite::Object => "OBJECT",
        }
    }
}
