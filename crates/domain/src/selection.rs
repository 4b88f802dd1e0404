//! Player input for the guided creation wizard.
//!
//! [`GuidedSelection`] is the full snapshot of what the player picked so far.
//! Every edit is last-write-wins; choices under different keys never interact.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ability::AbilityId;
use crate::choice::ChoiceKey;
use crate::entities::ReferenceCatalogs;
use crate::entity_ref::EntityRef;
use crate::game_systems::dnd5e::{POINT_BUY_MAX, POINT_BUY_MIN};

/// How base ability scores are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityScoreMethod {
    StandardArray,
    PointBuy,
}

/// One page of the guided creation wizard.
///
/// Declaration order is the canonical order; which steps are shown is decided
/// by the step planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuidedStep {
    Basics,
    Class,
    ClassChoices,
    Race,
    Background,
    AbilityMethod,
    AbilityAssign,
    SkillsProficiencies,
    Equipment,
    Spells,
    Review,
}

impl GuidedStep {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Basics => "Basics",
            Self::Class => "Class",
            Self::ClassChoices => "Class Choices",
            Self::Race => "Race",
            Self::Background => "Background",
            Self::AbilityMethod => "Ability Scores",
            Self::AbilityAssign => "Assign Abilities",
            Self::SkillsProficiencies => "Skills & Proficiencies",
            Self::Equipment => "Equipment",
            Self::Spells => "Spells",
            Self::Review => "Review",
        }
    }
}

impl fmt::Display for GuidedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Everything the player has entered so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuidedSelection {
    pub name: String,
    pub class_id: Option<EntityRef>,
    pub subclass_id: Option<EntityRef>,
    pub race_id: Option<EntityRef>,
    pub subrace_id: Option<EntityRef>,
    pub background_id: Option<EntityRef>,
    pub ability_method: Option<AbilityScoreMethod>,
    /// Standard-array slot per ability; `None` while unassigned
    pub standard_array: BTreeMap<AbilityId, Option<i32>>,
    /// Point-buy score per ability
    pub point_buy: BTreeMap<AbilityId, i32>,
    pub choice_selections: BTreeMap<ChoiceKey, BTreeSet<String>>,
    pub selected_spells: BTreeSet<EntityRef>,
}

impl Default for GuidedSelection {
    fn default() -> Self {
        Self {
            name: String::new(),
            class_id: None,
            subclass_id: None,
            race_id: None,
            subrace_id: None,
            background_id: None,
            ability_method: None,
            standard_array: AbilityId::ALL.iter().map(|a| (*a, None)).collect(),
            point_buy: AbilityId::ALL.iter().map(|a| (*a, POINT_BUY_MIN)).collect(),
            choice_selections: BTreeMap::new(),
            selected_spells: BTreeSet::new(),
        }
    }
}

impl GuidedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options currently selected for `key` (empty when none).
    pub fn selected(&self, key: &ChoiceKey) -> BTreeSet<String> {
        self.choice_selections.get(key).cloned().unwrap_or_default()
    }

    /// Number of options selected for `key`.
    pub fn selected_count(&self, key: &ChoiceKey) -> usize {
        self.choice_selections.get(key).map_or(0, BTreeSet::len)
    }

    /// Toggle `option` under `key`, never exceeding `max_selected`.
    ///
    /// A selected option is removed. An unselected option is added while there is
    /// room; a single-select choice swaps its option instead; a full multi-select
    /// choice ignores the toggle.
    pub fn toggle_choice(&mut self, key: ChoiceKey, option: impl Into<String>, max_selected: usize) {
        let option = option.into();
        let entry = self.choice_selections.entry(key.clone()).or_default();
        if !entry.remove(&option) {
            if entry.len() < max_selected {
                entry.insert(option);
            } else if max_selected == 1 {
                entry.clear();
                entry.insert(option);
            }
        }
        if entry.is_empty() {
            self.choice_selections.remove(&key);
        }
    }

    /// Replace the selection under `key` wholesale.
    pub fn set_choice(&mut self, key: ChoiceKey, options: impl IntoIterator<Item = String>) {
        let options: BTreeSet<String> = options.into_iter().collect();
        if options.is_empty() {
            self.choice_selections.remove(&key);
        } else {
            self.choice_selections.insert(key, options);
        }
    }

    /// Pick a class. A different class drops the subclass, class choices and spells.
    pub fn select_class(&mut self, class_id: EntityRef) {
        if self.class_id.as_ref() != Some(&class_id) {
            self.subclass_id = None;
            self.selected_spells.clear();
            self.choice_selections.retain(|key, _| !key.is_class_scoped());
        }
        self.class_id = Some(class_id);
    }

    /// Pick a race. A different race drops the subrace and trait choices.
    pub fn select_race(&mut self, race_id: EntityRef) {
        if self.race_id.as_ref() != Some(&race_id) {
            self.subrace_id = None;
            self.choice_selections.retain(|key, _| !key.is_race_scoped());
        }
        self.race_id = Some(race_id);
    }

    /// Pick a subrace. A different subrace drops the choices of traits that only
    /// the previous subrace granted; choices of the base race's traits stay.
    pub fn select_subrace(
        &mut self,
        subrace_id: Option<EntityRef>,
        catalogs: &ReferenceCatalogs,
    ) {
        if self.subrace_id != subrace_id {
            let race_traits = self
                .race_id
                .as_ref()
                .and_then(|id| catalogs.races.get(id))
                .map(|race| race.traits.as_slice())
                .unwrap_or_default();
            let stale: BTreeSet<&EntityRef> = self
                .subrace_id
                .as_ref()
                .and_then(|id| catalogs.subraces.get(id))
                .map(|subrace| {
                    subrace
                        .traits
                        .iter()
                        .filter(|id| !race_traits.contains(*id))
                        .collect()
                })
                .unwrap_or_default();
            self.choice_selections.retain(|key, _| match key {
                ChoiceKey::RaceTrait { trait_id, .. } => !stale.contains(trait_id),
                _ => true,
            });
        }
        self.subrace_id = subrace_id;
    }

    /// Pick a background. A different background drops its choices.
    pub fn select_background(&mut self, background_id: EntityRef) {
        if self.background_id.as_ref() != Some(&background_id) {
            self.choice_selections.retain(|key, _| !key.is_background_scoped());
        }
        self.background_id = Some(background_id);
    }

    /// Assign (or clear) a standard-array slot.
    pub fn assign_standard_array(&mut self, ability: AbilityId, score: Option<i32>) {
        self.standard_array.insert(ability, score);
    }

    pub fn point_buy_score(&self, ability: AbilityId) -> i32 {
        self.point_buy.get(&ability).copied().unwrap_or(POINT_BUY_MIN)
    }

    /// Raise a point-buy score by one, capped at the maximum.
    pub fn increment_point_buy(&mut self, ability: AbilityId) {
        let score = (self.point_buy_score(ability) + 1).min(POINT_BUY_MAX);
        self.point_buy.insert(ability, score);
    }

    /// Lower a point-buy score by one, floored at the minimum.
    pub fn decrement_point_buy(&mut self, ability: AbilityId) {
        let score = (self.point_buy_score(ability) - 1).max(POINT_BUY_MIN);
        self.point_buy.insert(ability, score);
    }

    pub fn toggle_spell(&mut self, spell_id: EntityRef) {
        if !self.selected_spells.remove(&spell_id) {
            self.selected_spells.insert(spell_id);
        }
    }
}
