use crate::SourcePosition;
use serde::Deserialize;
use serde::Serialize;

/// A schema- or query-syntax error.
///
/// Carries the best-effort partial dotted path built up to the point of
/// failure (e.g. `UpdateUser.friends`) and the source position of the
/// offending token. Parsing stops at the first error; there is no recovery.
#[derive(Clone, Debug, Deserialize, Serialize, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct ParseError {
    message: String,
    path: String,
    position: Option<SourcePosition>,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        path: impl Into<String>,
        position: Option<SourcePosition>,
    ) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
            position,
        }
    }

    /// Returns the human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the partial dotted path built up to the point of failure.
    /// Empty when the error occurred before any named construct was entered.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the source position of the offending token, when known.
    pub fn position(&self) -> Option<&SourcePosition> {
        self.position.as_ref()
    }

    fn format_oneline(&self) -> String {
        let mut out = self.message.clone();
        if !self.path.is_empty() {
            out.push_str(&format!(" (in {})", self.path));
        }
        if let Some(position) = &self.position {
            out.push_str(&format!(" at {position}"));
        }
        out
    }
}
