//! Effect model and the effect engine.
//!
//! An [`Effect`] is pure data describing one way a character gains
//! proficiencies, equipment, languages or ability adjustments. Behaviour lives
//! in [`apply_effect`], which matches every variant exhaustively.
//!
//! Every effect is commutative on the part of [`CharacterState`] it touches
//! (set union, additive counters), so folding a list of effects in any order
//! yields the same state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ability::AbilityId;
use crate::entity_ref::{CountedEntityRef, EntityRef};

/// Walking speed of a character whose race declares none.
pub const DEFAULT_SPEED: u32 = 30;

/// A data-only source of character state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    AddProficiencies {
        proficiencies: BTreeSet<EntityRef>,
    },
    AddEquipment {
        items: Vec<CountedEntityRef>,
    },
    AddLanguages {
        languages: BTreeSet<EntityRef>,
    },
    ModifyAbility {
        deltas: BTreeMap<AbilityId, i32>,
    },
}

impl Effect {
    pub fn proficiencies<I, R>(ids: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<EntityRef>,
    {
        Self::AddProficiencies {
            proficiencies: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn languages<I, R>(ids: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<EntityRef>,
    {
        Self::AddLanguages {
            languages: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn equipment(items: impl IntoIterator<Item = CountedEntityRef>) -> Self {
        Self::AddEquipment {
            items: items.into_iter().collect(),
        }
    }

    pub fn modify_abilities(deltas: impl IntoIterator<Item = (AbilityId, i32)>) -> Self {
        let mut merged = BTreeMap::new();
        for (ability, delta) in deltas {
            *merged.entry(ability).or_insert(0) += delta;
        }
        Self::ModifyAbility { deltas: merged }
    }
}

/// The running character state produced by folding effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterState {
    pub level: u8,
    pub ability_scores: BTreeMap<AbilityId, i32>,
    pub proficiencies: BTreeSet<EntityRef>,
    pub languages: BTreeSet<EntityRef>,
    pub inventory: BTreeMap<EntityRef, u32>,
    pub speed: u32,
}

impl CharacterState {
    /// A fresh level-1 accumulator seeded with base ability scores.
    pub fn seeded(base_scores: BTreeMap<AbilityId, i32>) -> Self {
        Self {
            level: 1,
            ability_scores: base_scores,
            proficiencies: BTreeSet::new(),
            languages: BTreeSet::new(),
            inventory: BTreeMap::new(),
            speed: DEFAULT_SPEED,
        }
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Score for an ability; a missing entry counts as 0.
    pub fn score(&self, ability: AbilityId) -> i32 {
        self.ability_scores.get(&ability).copied().unwrap_or(0)
    }
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::seeded(BTreeMap::new())
    }
}

/// Apply one effect and return the resulting state.
///
/// Negative ability results are kept as-is; clamping happens only when a
/// finished record is derived.
pub fn apply_effect(mut state: CharacterState, effect: &Effect) -> CharacterState {
    match effect {
        Effect::AddProficiencies { proficiencies } => {
            state.proficiencies.extend(proficiencies.iter().cloned());
        }
        Effect::AddEquipment { items } => {
            for counted in items.iter().filter(|c| c.quantity > 0) {
                *state.inventory.entry(counted.item.clone()).or_insert(0) += counted.quantity;
            }
        }
        Effect::AddLanguages { languages } => {
            state.languages.extend(languages.iter().cloned());
        }
        Effect::ModifyAbility { deltas } => {
            for (ability, delta) in deltas {
                *state.ability_scores.entry(*ability).or_insert(0) += delta;
            }
        }
    }
    state
}

/// Fold `apply_effect` over `effects`, left to right.
pub fn apply_all_effects(state: CharacterState, effects: &[Effect]) -> CharacterState {
    effects.iter().fold(state, apply_effect)
}
