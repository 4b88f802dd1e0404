//! The finished character record handed to persistence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ability::AbilityId;
use crate::entity_ref::EntityRef;
use crate::ids::CharacterId;

/// Lowest ability score a finished record may hold.
pub const MIN_ABILITY_SCORE: i32 = 1;
/// Highest ability score a finished record may hold.
pub const MAX_ABILITY_SCORE: i32 = 30;

/// A level-1 character derived from a completed guided selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub class_name: String,
    pub subclass_name: Option<String>,
    /// Race name, with the subrace in parentheses when one was picked
    pub race: String,
    pub background: String,
    pub level: u8,
    pub ability_scores: BTreeMap<AbilityId, i32>,
    pub proficiency_bonus: i32,
    pub hit_points: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub speed: u32,
    pub saving_throws: Vec<SavingThrow>,
    pub skills: Vec<SkillEntry>,
    pub proficiencies: String,
    pub languages: String,
    pub equipment: String,
    pub spells: Vec<CharacterSpell>,
}

impl CharacterRecord {
    pub fn saving_throw(&self, ability: AbilityId) -> Option<&SavingThrow> {
        self.saving_throws.iter().find(|save| save.ability == ability)
    }

    pub fn skill(&self, id: &str) -> Option<&SkillEntry> {
        self.skills.iter().find(|skill| skill.id == id)
    }
}

/// Saving throw line of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingThrow {
    pub ability: AbilityId,
    pub proficient: bool,
    pub bonus: i32,
}

/// Skill line of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub id: String,
    pub name: String,
    pub ability: AbilityId,
    pub proficient: bool,
    pub bonus: i32,
}

/// A spell the character knows or has prepared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSpell {
    pub spell_id: EntityRef,
    pub name: String,
    pub level: u8,
    pub prepared: bool,
    /// Where the spell comes from (the class name)
    pub source: String,
}
