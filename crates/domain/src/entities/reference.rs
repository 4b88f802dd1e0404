//! Leaf reference entities: languages, equipment, class features and spells.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use crate::choice::Choice;
use crate::entity_ref::EntityRef;

/// A spoken language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDef {
    pub id: EntityRef,
    pub name: String,
}

impl LanguageDef {
    pub fn new(id: impl Into<EntityRef>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A piece of equipment with its category tags (e.g. "weapon", "simple", "martial").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDef {
    pub id: EntityRef,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl EquipmentDef {
    pub fn new(id: impl Into<EntityRef>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            categories: Vec::new(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the item carries every one of `required` (case-insensitive).
    pub fn has_all_categories(&self, required: &[String]) -> bool {
        required.iter().all(|needed| {
            self.categories
                .iter()
                .any(|category| category.eq_ignore_ascii_case(needed))
        })
    }
}

/// A class feature, possibly carrying a sub-choice (fighting style, favored enemy...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDef {
    pub id: EntityRef,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub choice: Option<Choice>,
}

impl FeatureDef {
    pub fn new(id: impl Into<EntityRef>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            choice: None,
        }
    }

    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choice = Some(choice);
        self
    }
}

/// A spell, reduced to what character creation needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpellDef {
    pub id: EntityRef,
    pub name: String,
    /// Spell level (cantrip = 0)
    pub level: u8,
    /// Classes whose spell list includes this spell
    #[serde(default)]
    pub classes: Vec<EntityRef>,
}

impl SpellDef {
    pub fn new<I, R>(id: impl Into<EntityRef>, name: impl Into<String>, level: u8, classes: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<EntityRef>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    pub fn is_available_to(&self, class: &EntityRef) -> bool {
        self.classes.contains(class)
    }
}

macro_rules! catalog_entry {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CatalogEntry for $ty {
                fn id(&self) -> &EntityRef {
                    &self.id
                }

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

catalog_entry!(LanguageDef, EquipmentDef, FeatureDef, SpellDef);
