//! Character sheet builder: from a finished selection to a [`CharacterRecord`].

use std::collections::BTreeMap;

use charforge_domain::game_systems::dnd5e::{
    ability_modifier, level_one_hit_points, proficiency_bonus, unarmored_armor_class, SKILLS,
};
use charforge_domain::{
    AbilityId, CharacterId, CharacterRecord, CharacterSpell, EntityRef, GuidedSelection,
    ReferenceCatalogs, SavingThrow, SkillEntry, MAX_ABILITY_SCORE, MIN_ABILITY_SCORE,
};

use super::choices::display_label;
use super::effects::accumulate;
use super::error::GuidedCreationError;
use super::selected;

/// Build the level-1 record for `selection`.
///
/// Callers validate first. Missing class, race, background or unresolved
/// ability scores are reported as [`GuidedCreationError::MissingPrecondition`].
pub fn build_character(
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) -> Result<CharacterRecord, GuidedCreationError> {
    let class = selected::class(selection, catalogs)
        .ok_or(GuidedCreationError::MissingPrecondition("no class selected"))?;
    let race = selected::race(selection, catalogs)
        .ok_or(GuidedCreationError::MissingPrecondition("no race selected"))?;
    let background = selected::background(selection, catalogs)
        .ok_or(GuidedCreationError::MissingPrecondition("no background selected"))?;
    let state = accumulate(selection, catalogs).ok_or(
        GuidedCreationError::MissingPrecondition("ability scores are not resolved"),
    )?;

    let ability_scores: BTreeMap<AbilityId, i32> = AbilityId::ALL
        .into_iter()
        .map(|ability| {
            let score = state
                .score(ability)
                .clamp(MIN_ABILITY_SCORE, MAX_ABILITY_SCORE);
            (ability, score)
        })
        .collect();
    let modifier = |ability: AbilityId| ability_modifier(ability_scores[&ability]);
    let bonus = proficiency_bonus(state.level);

    let saving_throws = AbilityId::ALL
        .into_iter()
        .map(|ability| {
            let proficient = class.saving_throws.contains(&ability);
            SavingThrow {
                ability,
                proficient,
                bonus: modifier(ability) + if proficient { bonus } else { 0 },
            }
        })
        .collect();

    let skills = SKILLS
        .iter()
        .map(|skill| {
            let proficient = state.proficiencies.contains(&EntityRef::from(skill.id));
            SkillEntry {
                id: skill.id.to_string(),
                name: skill.name.to_string(),
                ability: skill.ability,
                proficient,
                bonus: modifier(skill.ability) + if proficient { bonus } else { 0 },
            }
        })
        .collect();

    let race_display = match selected::subrace(selection, catalogs) {
        Some(subrace) => format!("{} ({})", race.name, subrace.name),
        None => race.name.clone(),
    };

    let equipment = joined_labels(state.inventory.iter().map(|(id, quantity)| {
        let label = display_label(id.as_str(), catalogs);
        if *quantity > 1 {
            format!("{} x{}", label, quantity)
        } else {
            label
        }
    }));

    let hit_points = level_one_hit_points(class.hit_die, modifier(AbilityId::Con));
    let armor_class = unarmored_armor_class(modifier(AbilityId::Dex));
    let initiative = modifier(AbilityId::Dex);

    let spells = selection
        .selected_spells
        .iter()
        .map(|id| {
            let spell = catalogs.spells.get(id);
            CharacterSpell {
                spell_id: id.clone(),
                name: spell
                    .map(|spell| spell.name.clone())
                    .unwrap_or_else(|| display_label(id.as_str(), catalogs)),
                level: spell.map_or(0, |spell| spell.level),
                prepared: true,
                source: class.name.clone(),
            }
        })
        .collect();

    let record = CharacterRecord {
        id: CharacterId::new(),
        name: selection.name.trim().to_string(),
        class_name: class.name.clone(),
        subclass_name: selection
            .subclass_id
            .as_ref()
            .and_then(|id| class.subclass(id))
            .map(|subclass| subclass.name.clone()),
        race: race_display,
        background: background.name.clone(),
        level: state.level,
        proficiency_bonus: bonus,
        hit_points,
        armor_class,
        initiative,
        speed: state.speed,
        saving_throws,
        skills,
        proficiencies: joined_labels(
            state
                .proficiencies
                .iter()
                .map(|id| display_label(id.as_str(), catalogs)),
        ),
        languages: joined_labels(
            state
                .languages
                .iter()
                .map(|id| display_label(id.as_str(), catalogs)),
        ),
        equipment,
        spells,
        ability_scores,
    };

    tracing::debug!(
        character_id = %record.id,
        class = %record.class_name,
        race = %record.race,
        hit_points = record.hit_points,
        "Built character record"
    );

    Ok(record)
}

/// Sorted, comma-joined labels.
fn joined_labels(labels: impl Iterator<Item = String>) -> String {
    let mut labels: Vec<String> = labels.collect();
    labels.sort();
    labels.join(", ")
}
