//! Background entity.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use crate::choice::Choice;
use crate::effect::Effect;
use crate::entity_ref::EntityRef;

/// A character background (acolyte, sage, soldier...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundDef {
    pub id: EntityRef,
    pub name: String,
    /// Fixed grants (skill proficiencies, equipment...)
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub language_choice: Option<Choice>,
    #[serde(default)]
    pub equipment_choice: Option<Choice>,
}

impl BackgroundDef {
    pub fn new(id: impl Into<EntityRef>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effects: Vec::new(),
            language_choice: None,
            equipment_choice: None,
        }
    }
}

impl CatalogEntry for BackgroundDef {
    fn id(&self) -> &EntityRef {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
