//! Document information (author, creator, title) and its defaulting rules.

use serde::{Deserialize, Serialize};

/// Defaults an emitter falls back to, passed in explicitly rather than read
/// from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterDefaults {
    /// Product/version string used for unset author and creator fields.
    pub identifier: String,
}

impl Default for EmitterDefaults {
    fn default() -> Self {
        Self {
            identifier: format!("pdfwrap {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EmitterDefaults {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub author: String,
    pub creator: String,
    pub title: String,
}

impl DocumentMetadata {
    /// Apply an update. `Some` always overrides (the empty string included);
    /// `None` only fills a field that is still empty.
    pub fn apply(
        &mut self,
        author: Option<&str>,
        creator: Option<&str>,
        title: Option<&str>,
        defaults: &EmitterDefaults,
    ) {
        resolve(&mut self.author, author, &defaults.identifier);
        resolve(&mut self.creator, creator, &defaults.identifier);
        resolve(&mut self.title, title, "");
    }
}

fn resolve(slot: &mut String, input: Option<&str>, fallback: &str) {
    match input {
        Some(value) => *slot = value.to_string(),
        None if slot.is_empty() => *slot = fallback.to_string(),
        None => {}
    }
}
