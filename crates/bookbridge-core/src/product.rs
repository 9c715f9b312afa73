//! Product identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Natural dedup key for a catalog product, derived from its display name.
///
/// The derivation is lossy by design (it mirrors the catalog's original
/// behavior): two differently-named dishes can collide after normalization,
/// and a minor rename produces a different id. Callers that need a stable
/// identity must keep the display name stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Derives the id from a display name: lowercased, with every
    /// non-alphanumeric character replaced by `_`.
    #[must_use]
    pub fn derive(name: &str) -> Self {
        let id = name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        Self(id)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
