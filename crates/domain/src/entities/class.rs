//! Character class entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use crate::ability::AbilityId;
use crate::choice::Choice;
use crate::entity_ref::{CountedEntityRef, EntityRef};

/// A character class as supplied by the reference data.
///
/// Plain data with public fields; any combination of values is valid reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassDef {
    /// Unique identifier (e.g., "wizard")
    pub id: EntityRef,
    /// Display name
    pub name: String,
    /// Hit die size (d6 = 6, d8 = 8, ...)
    pub hit_die: u8,
    /// Proficiencies every member of the class has
    #[serde(default)]
    pub proficiencies: Vec<EntityRef>,
    /// Proficiency picks (usually skills)
    #[serde(default)]
    pub proficiency_choices: Vec<Choice>,
    /// Fixed starting equipment
    #[serde(default)]
    pub starting_equipment: Vec<CountedEntityRef>,
    /// Abilities with saving-throw proficiency
    #[serde(default)]
    pub saving_throws: Vec<AbilityId>,
    /// Available subclasses
    #[serde(default)]
    pub subclasses: Vec<SubclassDef>,
    /// Spellcasting progression, if the class casts spells
    #[serde(default)]
    pub spellcasting: Option<Spellcasting>,
    /// Feature ids gained at each class level
    #[serde(default)]
    pub features: BTreeMap<u8, Vec<EntityRef>>,
}

impl ClassDef {
    pub fn new(id: impl Into<EntityRef>, name: impl Into<String>, hit_die: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hit_die,
            proficiencies: Vec::new(),
            proficiency_choices: Vec::new(),
            starting_equipment: Vec::new(),
            saving_throws: Vec::new(),
            subclasses: Vec::new(),
            spellcasting: None,
            features: BTreeMap::new(),
        }
    }

    /// Feature ids gained at `level`.
    pub fn features_at(&self, level: u8) -> &[EntityRef] {
        self.features.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether spellcasting is available at `level`.
    pub fn casts_spells_at(&self, level: u8) -> bool {
        self.spellcasting
            .as_ref()
            .is_some_and(|casting| casting.level <= level)
    }

    pub fn subclass(&self, id: &EntityRef) -> Option<&SubclassDef> {
        self.subclasses.iter().find(|sub| &sub.id == id)
    }
}

impl CatalogEntry for ClassDef {
    fn id(&self) -> &EntityRef {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A subclass (domain, origin, patron...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubclassDef {
    pub id: EntityRef,
    pub name: String,
}

/// When and how a class casts spells.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Spellcasting {
    /// Character level at which spellcasting starts
    pub level: u8,
    /// Spellcasting ability
    pub ability: AbilityId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_at_missing_level_is_empty() {
        let class = ClassDef::new("fighter", "Fighter", 10);
        assert!(class.features_at(1).is_empty());
    }

    #[test]
    fn spellcasting_start_level() {
        let mut paladin = ClassDef::new("paladin", "Paladin", 10);
        paladin.spellcasting = Some(Spellcasting {
            level: 2,
            ability: AbilityId::Cha,
        });
        assert!(!paladin.casts_spells_at(1));
        assert!(paladin.casts_spells_at(2));
        assert!(!ClassDef::new("fighter", "Fighter", 10).casts_spells_at(20));
    }

    #[test]
    fn deserializes_level_keyed_features() {
        let json = r#"{
            "id": "wizard",
            "name": "Wizard",
            "hitDie": 6,
            "savingThrows": ["INT", "WIS"],
            "spellcasting": {"level": 1, "ability": "INT"},
            "features": {"1": ["arcane-recovery"]}
        }"#;
        let class: ClassDef = serde_json::from_str(json).unwrap();
        assert_eq!(class.features_at(1), &[EntityRef::from("arcane-recovery")]);
        assert_eq!(class.saving_throws, vec![AbilityId::Int, AbilityId::Wis]);
        assert!(class.casts_spells_at(1));
    }
}
