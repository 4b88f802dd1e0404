//! Choice resolution.
//!
//! Turns a [`Choice`] into the concrete options a player can pick from, lists
//! every choice the current selection asks for, and explains which options
//! are already granted elsewhere.

use std::collections::{BTreeMap, BTreeSet};

use charforge_domain::game_systems::dnd5e::requires_subclass_at_level_one;
use charforge_domain::game_systems::skill_by_id;
use charforge_domain::{
    pretty_label, AbilityId, Choice, ChoiceKey, ChoiceSource, Effect, EntityRef, EquipmentDef,
    GuidedSelection, GuidedStep, ReferenceCatalogs, ResourceFilter, SpellDef,
};
use indexmap::IndexMap;

use super::effects::satisfied;
use super::selected;

/// Resolved options of a choice: option id -> display label, in display order.
pub type ResolvedOptions = IndexMap<String, String>;

// =============================================================================
// Option Resolution
// =============================================================================

/// Concrete options for `choice`. Never fails; unknown sources resolve to no options.
pub fn resolve_options(choice: &Choice, catalogs: &ReferenceCatalogs) -> ResolvedOptions {
    match &choice.from {
        ChoiceSource::FromAll => catalogs
            .languages
            .iter()
            .map(|language| (language.id.to_string(), language.name.clone()))
            .collect(),
        ChoiceSource::OptionsArray { options }
        | ChoiceSource::Proficiency { options }
        | ChoiceSource::Equipment { options } => options
            .iter()
            .map(|id| (id.to_string(), display_label(id.as_str(), catalogs)))
            .collect(),
        ChoiceSource::EquipmentCategories { categories } => {
            let mut items: Vec<&EquipmentDef> = catalogs
                .equipment
                .iter()
                .filter(|item| item.has_all_categories(categories))
                .collect();
            items.sort_by(|a, b| a.name.cmp(&b.name));
            items
                .into_iter()
                .map(|item| (item.id.to_string(), item.name.clone()))
                .collect()
        }
        ChoiceSource::Feature { options } => options
            .iter()
            .map(|id| {
                let label = catalogs
                    .features
                    .name_of(id)
                    .map(str::to_string)
                    .unwrap_or_else(|| display_label(id.as_str(), catalogs));
                (id.to_string(), label)
            })
            .collect(),
        ChoiceSource::FavoredEnemy { options } | ChoiceSource::TerrainType { options } => options
            .iter()
            .map(|option| (option.clone(), option.clone()))
            .collect(),
        ChoiceSource::AbilityBonus { sets } => sets
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<AbilityId>>()
            .into_iter()
            .map(|ability| {
                (
                    ability.as_str().to_string(),
                    format!("{} +1", ability.display_name()),
                )
            })
            .collect(),
        ChoiceSource::ResourceList { resource, filters } => {
            resolve_resource_list(resource, filters, catalogs)
        }
        // Presented by the UI layer directly
        ChoiceSource::Ideal { .. } | ChoiceSource::Nested { .. } => ResolvedOptions::new(),
    }
}

fn resolve_resource_list(
    resource: &str,
    filters: &[ResourceFilter],
    catalogs: &ReferenceCatalogs,
) -> ResolvedOptions {
    match resource {
        "languages" => catalogs
            .languages
            .iter()
            .map(|language| (language.id.to_string(), language.name.clone()))
            .collect(),
        "spells" => {
            let mut spells: Vec<&SpellDef> = catalogs
                .spells
                .iter()
                .filter(|spell| filters.iter().all(|filter| spell_matches(spell, filter)))
                .collect();
            spells.sort_by(|a, b| a.name.cmp(&b.name));
            spells
                .into_iter()
                .map(|spell| (spell.id.to_string(), spell.name.clone()))
                .collect()
        }
        other => {
            tracing::warn!(resource = %other, "Unknown resource list, no options resolved");
            ResolvedOptions::new()
        }
    }
}

fn spell_matches(spell: &SpellDef, filter: &ResourceFilter) -> bool {
    match filter {
        ResourceFilter::Class(class) => spell.is_available_to(class),
        ResourceFilter::Level(level) => spell.level == *level,
        ResourceFilter::Unsupported => {
            tracing::debug!(spell = %spell.id, "Ignoring unsupported resource filter");
            true
        }
    }
}

/// Display label for any reference id.
///
/// Tries skills, then languages, equipment, features, traits and spells, and
/// finally pretty-prints the raw id.
pub fn display_label(id: &str, catalogs: &ReferenceCatalogs) -> String {
    if let Some(skill) = skill_by_id(id) {
        return skill.name.to_string();
    }
    let id_ref = EntityRef::from(id);
    catalogs
        .languages
        .name_of(&id_ref)
        .or_else(|| catalogs.equipment.name_of(&id_ref))
        .or_else(|| catalogs.features.name_of(&id_ref))
        .or_else(|| catalogs.traits.name_of(&id_ref))
        .or_else(|| catalogs.spells.name_of(&id_ref))
        .map(str::to_string)
        .unwrap_or_else(|| pretty_label(id))
}

// =============================================================================
// Pending Choices
// =============================================================================

/// A choice the current selection asks the player to make.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChoice<'a> {
    /// Step on which the choice is made
    pub step: GuidedStep,
    pub key: ChoiceKey,
    pub choice: &'a Choice,
    /// Who asks for it, e.g. "Race trait: Keen Senses"
    pub source: String,
}

/// Every choice the selection asks for, in step order.
pub fn pending_choices<'a>(
    selection: &GuidedSelection,
    catalogs: &'a ReferenceCatalogs,
) -> Vec<PendingChoice<'a>> {
    let mut pending = Vec::new();
    let class = selected::class(selection, catalogs);

    if let Some(class) = class {
        for feature in class
            .features_at(1)
            .iter()
            .filter_map(|id| catalogs.features.get(id))
        {
            if let Some(choice) = &feature.choice {
                pending.push(PendingChoice {
                    step: GuidedStep::ClassChoices,
                    key: ChoiceKey::class_feature(feature.id.clone()),
                    choice,
                    source: format!("Class feature: {}", feature.name),
                });
            }
        }
    }

    for trait_def in selected::traits(selection, catalogs) {
        for (kind, choice) in trait_def.choices() {
            pending.push(PendingChoice {
                step: GuidedStep::Race,
                key: ChoiceKey::race_trait(trait_def.id.clone(), kind),
                choice,
                source: format!("Race trait: {}", trait_def.name),
            });
        }
    }

    let background = selected::background(selection, catalogs);
    if let Some(background) = background {
        if let Some(choice) = &background.language_choice {
            pending.push(PendingChoice {
                step: GuidedStep::Background,
                key: ChoiceKey::BackgroundLanguage,
                choice,
                source: format!("Background: {}", background.name),
            });
        }
    }

    if let Some(class) = class {
        for (index, choice) in class.proficiency_choices.iter().enumerate() {
            pending.push(PendingChoice {
                step: GuidedStep::SkillsProficiencies,
                key: ChoiceKey::ClassProficiency { index },
                choice,
                source: format!("Class: {}", class.name),
            });
        }
    }

    if let Some(background) = background {
        if let Some(choice) = &background.equipment_choice {
            pending.push(PendingChoice {
                step: GuidedStep::Equipment,
                key: ChoiceKey::BackgroundEquipment,
                choice,
                source: format!("Background: {}", background.name),
            });
        }
    }

    pending
}

/// Whether the chosen class has anything to decide on the class choices step.
pub fn has_class_choices(selection: &GuidedSelection, catalogs: &ReferenceCatalogs) -> bool {
    let Some(class) = selected::class(selection, catalogs) else {
        return false;
    };
    requires_subclass_at_level_one(class.id.as_str())
        || class
            .features_at(1)
            .iter()
            .filter_map(|id| catalogs.features.get(id))
            .any(|feature| feature.choice.is_some())
}

// =============================================================================
// Disabled Reasons
// =============================================================================

/// Options of the choice under `key` that another source already grants,
/// mapped to a description of that source.
///
/// The first source found for an id wins. Options already selected under `key`
/// itself are never reported.
pub fn disabled_reasons(
    key: &ChoiceKey,
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) -> BTreeMap<String, String> {
    let mut reasons = granted_elsewhere(key, selection, catalogs);
    if let Some(own) = selection.choice_selections.get(key) {
        reasons.retain(|id, _| !own.contains(id));
    }
    reasons
}

/// Every id granted by a source other than the choice under `key`, mapped to
/// that source. First source wins.
fn granted_elsewhere(
    key: &ChoiceKey,
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) -> BTreeMap<String, String> {
    let mut reasons = BTreeMap::new();

    if let Some(class) = selected::class(selection, catalogs) {
        let source = format!("Class: {}", class.name);
        claim(&mut reasons, class.proficiencies.iter().map(EntityRef::as_str), &source);
    }

    if let Some(race) = selected::race(selection, catalogs) {
        let source = format!("Race: {}", race.name);
        claim(&mut reasons, race.languages.iter().map(EntityRef::as_str), &source);
    }

    for trait_def in selected::traits(selection, catalogs) {
        let source = format!("Race trait: {}", trait_def.name);
        claim_granted(&mut reasons, &trait_def.effects, &source);
    }

    if let Some(background) = selected::background(selection, catalogs) {
        let source = format!("Background: {}", background.name);
        claim_granted(&mut reasons, &background.effects, &source);
    }

    for pending in pending_choices(selection, catalogs) {
        if &pending.key == key {
            continue;
        }
        if let Some(picked) = satisfied(selection, &pending.key, pending.choice) {
            claim(&mut reasons, picked.iter().map(String::as_str), &pending.source);
        }
    }

    reasons
}

/// Why picks under `pending` cannot be accepted, one reason per rejected pick.
///
/// A pick must be one of the resolved options and must not already be granted
/// by another source. Choices presented by the UI directly accept any value.
pub fn rejected_picks<'p>(
    pending: &PendingChoice<'_>,
    picks: impl IntoIterator<Item = &'p str>,
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) -> Vec<String> {
    let free_form = matches!(
        pending.choice.from,
        ChoiceSource::Ideal { .. } | ChoiceSource::Nested { .. }
    );
    let options = resolve_options(pending.choice, catalogs);
    let granted = granted_elsewhere(&pending.key, selection, catalogs);

    picks
        .into_iter()
        .filter_map(|pick| {
            if free_form {
                return granted
                    .get(pick)
                    .map(|source| format!("{} is already granted by {}", pick, source));
            }
            match options.get(pick) {
                None => Some(format!(
                    "{} is not one of the options",
                    display_label(pick, catalogs)
                )),
                Some(label) => granted
                    .get(pick)
                    .map(|source| format!("{} is already granted by {}", label, source)),
            }
        })
        .collect()
}

fn claim<'i>(
    reasons: &mut BTreeMap<String, String>,
    ids: impl IntoIterator<Item = &'i str>,
    source: &str,
) {
    for id in ids {
        reasons
            .entry(id.to_string())
            .or_insert_with(|| source.to_string());
    }
}

/// Claim the proficiencies and languages granted by fixed effects.
fn claim_granted(reasons: &mut BTreeMap<String, String>, effects: &[Effect], source: &str) {
    for effect in effects {
        match effect {
            Effect::AddProficiencies { proficiencies } => {
                claim(reasons, proficiencies.iter().map(EntityRef::as_str), source);
            }
            Effect::AddLanguages { languages } => {
                claim(reasons, languages.iter().map(EntityRef::as_str), source);
            }
            Effect::AddEquipment { .. } | Effect::ModifyAbility { .. } => {}
        }
    }
}
