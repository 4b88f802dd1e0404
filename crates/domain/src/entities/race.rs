//! Race, subrace and racial trait entities.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use crate::choice::{Choice, TraitChoiceKind};
use crate::effect::Effect;
use crate::entity_ref::EntityRef;

/// A playable race.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RaceDef {
    pub id: EntityRef,
    pub name: String,
    /// Base walking speed; the default speed applies when absent
    #[serde(default)]
    pub speed: Option<u32>,
    /// Trait ids granted by the race itself
    #[serde(default)]
    pub traits: Vec<EntityRef>,
    /// Subrace ids the player may pick from
    #[serde(default)]
    pub subraces: Vec<EntityRef>,
    /// Languages every member of the race speaks
    #[serde(default)]
    pub languages: Vec<EntityRef>,
}

impl RaceDef {
    pub fn new(id: impl Into<EntityRef>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            speed: None,
            traits: Vec::new(),
            subraces: Vec::new(),
            languages: Vec::new(),
        }
    }
}

impl CatalogEntry for RaceDef {
    fn id(&self) -> &EntityRef {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A subrace refining a race with extra traits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubraceDef {
    pub id: EntityRef,
    pub name: String,
    /// Parent race id
    pub race: EntityRef,
    #[serde(default)]
    pub traits: Vec<EntityRef>,
}

impl CatalogEntry for SubraceDef {
    fn id(&self) -> &EntityRef {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A racial trait: fixed effects plus optional sub-choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TraitDef {
    pub id: EntityRef,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub ability_bonus_choice: Option<Choice>,
    #[serde(default)]
    pub language_choice: Option<Choice>,
    #[serde(default)]
    pub proficiency_choice: Option<Choice>,
    #[serde(default)]
    pub draconic_ancestry_choice: Option<Choice>,
    #[serde(default)]
    pub spell_choice: Option<Choice>,
}

impl TraitDef {
    pub fn new(id: impl Into<EntityRef>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            effects: Vec::new(),
            ability_bonus_choice: None,
            language_choice: None,
            proficiency_choice: None,
            draconic_ancestry_choice: None,
            spell_choice: None,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn choice(&self, kind: TraitChoiceKind) -> Option<&Choice> {
        match kind {
            TraitChoiceKind::AbilityBonus => self.ability_bonus_choice.as_ref(),
            TraitChoiceKind::Language => self.language_choice.as_ref(),
            TraitChoiceKind::Proficiency => self.proficiency_choice.as_ref(),
            TraitChoiceKind::DraconicAncestry => self.draconic_ancestry_choice.as_ref(),
            TraitChoiceKind::Spell => self.spell_choice.as_ref(),
        }
    }

    /// Declared sub-choices, in a fixed kind order.
    pub fn choices(&self) -> impl Iterator<Item = (TraitChoiceKind, &Choice)> + '_ {
        TraitChoiceKind::ALL
            .into_iter()
            .filter_map(move |kind| self.choice(kind).map(|choice| (kind, choice)))
    }
}

impl CatalogEntry for TraitDef {
    fn id(&self) -> &EntityRef {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::ChoiceSource;

    #[test]
    fn choices_follow_kind_order() {
        let mut trait_def = TraitDef::new("extra-language", "Extra Language");
        trait_def.spell_choice = Some(Choice::new(1, ChoiceSource::FromAll));
        trait_def.language_choice = Some(Choice::new(1, ChoiceSource::FromAll));

        let kinds: Vec<_> = trait_def.choices().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![TraitChoiceKind::Language, TraitChoiceKind::Spell]);
    }

    #[test]
    fn trait_without_choices_yields_none() {
        let trait_def = TraitDef::new("darkvision", "Darkvision");
        assert_eq!(trait_def.choices().count(), 0);
    }
}
