//! References into the reference-data catalogs.
//!
//! An `EntityRef` is only an identifier. Display text is always resolved
//! through a catalog lookup, falling back to [`pretty_label`] when the
//! catalog has no entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a catalog entry (class, race, trait, item, language, spell...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRef(String);

impl EntityRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for EntityRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An inventory entry: a reference plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountedEntityRef {
    pub item: EntityRef,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl CountedEntityRef {
    pub fn new(item: impl Into<EntityRef>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }

    /// A single unit of an item.
    pub fn one(item: impl Into<EntityRef>) -> Self {
        Self::new(item, 1)
    }
}

/// Turn a raw identifier into a readable label.
///
/// `"thieves-tools"` becomes `"Thieves Tools"`, `"deep_speech"` becomes `"Deep Speech"`.
/// Never fails; an empty id yields an empty label.
pub fn pretty_label(id: &str) -> String {
    id.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
