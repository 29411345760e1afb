//! Card sets.

use serde::{Deserialize, Serialize};

/// A set of cards.
///
/// Sets are created explicitly from set documents, or implicitly the first
/// time a card references an unknown code (then `name == code`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Set {
    /// Unique set code.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Set {
    /// Set code used when a document does not name one.
    pub const DEFAULT_CODE: &'static str = "_DEFAULT_";

    /// Create a set whose name is its code.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
        }
    }

    /// Create a set with an explicit name.
    pub fn named(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Set {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
