//! Effect collection: turns a selection into the list of effects to fold.
//!
//! Only satisfied choices (selection count equal to the required count)
//! contribute. A half-finished wizard therefore still folds cleanly.

use std::collections::{BTreeMap, BTreeSet};

use charforge_domain::game_systems::dnd5e::{POINT_BUY_MAX, POINT_BUY_MIN};
use charforge_domain::{
    apply_all_effects, AbilityId, AbilityScoreMethod, CharacterState, Choice, ChoiceKey,
    CountedEntityRef, Effect, GuidedSelection, ReferenceCatalogs, TraitChoiceKind, DEFAULT_SPEED,
};

use super::selected;

/// Selected options for `key`, if they satisfy `choice`.
pub(crate) fn satisfied<'s>(
    selection: &'s GuidedSelection,
    key: &ChoiceKey,
    choice: &Choice,
) -> Option<&'s BTreeSet<String>> {
    selection
        .choice_selections
        .get(key)
        .filter(|picked| choice.is_satisfied_by(picked.len()))
}

/// Every effect the current selection grants.
pub fn collect_effects(selection: &GuidedSelection, catalogs: &ReferenceCatalogs) -> Vec<Effect> {
    let mut effects = Vec::new();

    if let Some(class) = selected::class(selection, catalogs) {
        if !class.proficiencies.is_empty() {
            effects.push(Effect::proficiencies(class.proficiencies.iter().cloned()));
        }
        if !class.starting_equipment.is_empty() {
            effects.push(Effect::equipment(class.starting_equipment.iter().cloned()));
        }

        for (index, choice) in class.proficiency_choices.iter().enumerate() {
            let key = ChoiceKey::ClassProficiency { index };
            if let Some(picked) = satisfied(selection, &key, choice) {
                effects.push(Effect::proficiencies(picked.iter().cloned()));
            }
        }

        let proficiency_features = class
            .features_at(1)
            .iter()
            .filter_map(|id| catalogs.features.get(id))
            .filter_map(|feature| feature.choice.as_ref().map(|choice| (feature, choice)))
            .filter(|(_, choice)| choice.grants_proficiencies());
        for (feature, choice) in proficiency_features {
            let key = ChoiceKey::class_feature(feature.id.clone());
            if let Some(picked) = satisfied(selection, &key, choice) {
                effects.push(Effect::proficiencies(picked.iter().cloned()));
            }
        }
    }

    if let Some(race) = selected::race(selection, catalogs) {
        if !race.languages.is_empty() {
            effects.push(Effect::languages(race.languages.iter().cloned()));
        }
    }

    for trait_def in selected::traits(selection, catalogs) {
        effects.extend(trait_def.effects.iter().cloned());

        for (kind, choice) in trait_def.choices() {
            let key = ChoiceKey::race_trait(trait_def.id.clone(), kind);
            let Some(picked) = satisfied(selection, &key, choice) else {
                continue;
            };
            match kind {
                TraitChoiceKind::AbilityBonus => {
                    effects.push(Effect::modify_abilities(
                        picked
                            .iter()
                            .filter_map(|id| id.parse::<AbilityId>().ok())
                            .map(|ability| (ability, 1)),
                    ));
                }
                TraitChoiceKind::Language => {
                    effects.push(Effect::languages(picked.iter().cloned()));
                }
                TraitChoiceKind::Proficiency => {
                    effects.push(Effect::proficiencies(picked.iter().cloned()));
                }
                // Recorded on the selection only; no effect on the accumulator
                TraitChoiceKind::DraconicAncestry | TraitChoiceKind::Spell => {}
            }
        }
    }

    if let Some(background) = selected::background(selection, catalogs) {
        effects.extend(background.effects.iter().cloned());

        if let Some(choice) = &background.language_choice {
            if let Some(picked) = satisfied(selection, &ChoiceKey::BackgroundLanguage, choice) {
                effects.push(Effect::languages(picked.iter().cloned()));
            }
        }
        if let Some(choice) = &background.equipment_choice {
            if let Some(picked) = satisfied(selection, &ChoiceKey::BackgroundEquipment, choice) {
                effects.push(Effect::equipment(
                    picked.iter().cloned().map(CountedEntityRef::one),
                ));
            }
        }
    }

    effects
}

/// Base ability scores from the chosen method, or `None` while unresolved.
///
/// Standard array needs all six slots assigned; point-buy scores are clamped
/// into the purchasable range.
pub fn base_ability_scores(selection: &GuidedSelection) -> Option<BTreeMap<AbilityId, i32>> {
    match selection.ability_method? {
        AbilityScoreMethod::StandardArray => AbilityId::ALL
            .into_iter()
            .map(|ability| {
                selection
                    .standard_array
                    .get(&ability)
                    .copied()
                    .flatten()
                    .map(|score| (ability, score))
            })
            .collect(),
        AbilityScoreMethod::PointBuy => Some(
            AbilityId::ALL
                .into_iter()
                .map(|ability| {
                    let score = selection
                        .point_buy_score(ability)
                        .clamp(POINT_BUY_MIN, POINT_BUY_MAX);
                    (ability, score)
                })
                .collect(),
        ),
    }
}

/// Seed a fresh accumulator and fold every collected effect into it.
pub fn accumulate(
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) -> Option<CharacterState> {
    let base = base_ability_scores(selection)?;
    let speed = selected::race(selection, catalogs)
        .and_then(|race| race.speed)
        .unwrap_or(DEFAULT_SPEED);
    let seed = CharacterState::seeded(base).with_speed(speed);
    Some(apply_all_effects(seed, &collect_effects(selection, catalogs)))
}
