//! Step and whole-wizard validation.
//!
//! Unmet requirements are ERRORs and block progress; a blank name is the only
//! WARNING besides spellcasting classes whose level-1 spell rules are missing.

use charforge_domain::game_systems::dnd5e::{
    ability_modifier, is_valid_point_buy, is_valid_standard_array, level_one_spell_requirement,
    point_buy_total, requires_subclass_at_level_one, SpellRequirement, POINT_BUY_BUDGET,
};
use charforge_domain::{
    AbilityId, AbilityScoreMethod, ClassDef, GuidedSelection, GuidedStep, ReferenceCatalogs,
    ValidationReport,
};

use super::choices::{pending_choices, rejected_picks, PendingChoice};
use super::effects::accumulate;
use super::selected;
use super::steps::compute_steps;

/// Choices made on `step`, in order.
pub fn step_choices<'a>(
    step: GuidedStep,
    selection: &GuidedSelection,
    catalogs: &'a ReferenceCatalogs,
) -> Vec<PendingChoice<'a>> {
    pending_choices(selection, catalogs)
        .into_iter()
        .filter(|pending| pending.step == step)
        .collect()
}

/// Issues that keep the player from leaving `step`. REVIEW checks the whole wizard.
pub fn validate_step(
    step: GuidedStep,
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    match step {
        GuidedStep::Basics => {
            if selection.name.trim().is_empty() {
                report.warning("Your character has no name yet");
            }
        }
        GuidedStep::Class => {
            if selected::class(selection, catalogs).is_none() {
                report.error("Select a class");
            }
        }
        GuidedStep::ClassChoices => {
            if let Some(class) = selected::class(selection, catalogs) {
                check_subclass(&mut report, class, selection);
            }
        }
        GuidedStep::Race => {
            if selected::race(selection, catalogs).is_none() {
                report.error("Select a race");
            }
        }
        GuidedStep::Background => {
            if selected::background(selection, catalogs).is_none() {
                report.error("Select a background");
            }
        }
        GuidedStep::AbilityMethod => {
            if selection.ability_method.is_none() {
                report.error("Choose how to generate ability scores");
            }
        }
        GuidedStep::AbilityAssign => check_ability_scores(&mut report, selection),
        GuidedStep::SkillsProficiencies | GuidedStep::Equipment => {}
        GuidedStep::Spells => check_spells(&mut report, selection, catalogs),
        GuidedStep::Review => return validate_all(selection, catalogs),
    }

    for pending in step_choices(step, selection, catalogs) {
        check_choice(&mut report, &pending, selection, catalogs);
    }

    report
}

/// Every planned step's issues, in step order.
pub fn validate_all(selection: &GuidedSelection, catalogs: &ReferenceCatalogs) -> ValidationReport {
    let mut report = ValidationReport::new();
    for step in compute_steps(selection, catalogs) {
        if step != GuidedStep::Review {
            report.extend(validate_step(step, selection, catalogs));
        }
    }
    report
}

/// The first error of `step`, worded for a disabled Continue button.
pub fn blocking_reason(
    step: GuidedStep,
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) -> Option<String> {
    validate_step(step, selection, catalogs)
        .first_error()
        .map(str::to_string)
}

fn check_subclass(report: &mut ValidationReport, class: &ClassDef, selection: &GuidedSelection) {
    if !requires_subclass_at_level_one(class.id.as_str()) {
        return;
    }
    let chosen = selection
        .subclass_id
        .as_ref()
        .and_then(|id| class.subclass(id));
    if chosen.is_none() {
        report.error(format!("Choose a {} subclass", class.name));
    }
}

fn check_ability_scores(report: &mut ValidationReport, selection: &GuidedSelection) {
    match selection.ability_method {
        // Reported on the method step
        None => {}
        Some(AbilityScoreMethod::StandardArray) => {
            let unassigned = AbilityId::ALL
                .iter()
                .filter(|ability| {
                    selection
                        .standard_array
                        .get(*ability)
                        .copied()
                        .flatten()
                        .is_none()
                })
                .count();
            if unassigned > 0 {
                report.error(format!(
                    "Assign a standard array score to every ability ({} left)",
                    unassigned
                ));
            } else if !is_valid_standard_array(&selection.standard_array) {
                report.error("Use each standard array score (15, 14, 13, 12, 10, 8) exactly once");
            }
        }
        Some(AbilityScoreMethod::PointBuy) => {
            if !is_valid_point_buy(&selection.point_buy) {
                report.error(format!(
                    "Point buy spends {} of {} points",
                    point_buy_total(selection.point_buy.values()),
                    POINT_BUY_BUDGET
                ));
            }
        }
    }
}

fn check_choice(
    report: &mut ValidationReport,
    pending: &PendingChoice<'_>,
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) {
    let required = pending.choice.required();
    let selected = selection.selected_count(&pending.key);
    if selected != required {
        report.error(format!(
            "{}: choose {} ({} selected)",
            pending.source, required, selected
        ));
    }

    let Some(picks) = selection.choice_selections.get(&pending.key) else {
        return;
    };
    let picks = picks.iter().map(String::as_str);
    for reason in rejected_picks(pending, picks, selection, catalogs) {
        report.error(format!("{}: {}", pending.source, reason));
    }
}

fn check_spells(
    report: &mut ValidationReport,
    selection: &GuidedSelection,
    catalogs: &ReferenceCatalogs,
) {
    let Some(class) = selected::class(selection, catalogs) else {
        return;
    };
    let Some(spellcasting) = class.spellcasting.filter(|casting| casting.level <= 1) else {
        return;
    };

    let modifier = accumulate(selection, catalogs)
        .map(|state| ability_modifier(state.score(spellcasting.ability)))
        .unwrap_or(0);

    let (cantrips, spells) = match level_one_spell_requirement(class.id.as_str(), modifier) {
        SpellRequirement::Counts { cantrips, spells } => (cantrips, spells),
        SpellRequirement::RequiresExtension => {
            report.warning(format!(
                "{} spell selection at level 1 requires later extension",
                class.name
            ));
            return;
        }
    };

    let mut picked_cantrips = 0;
    let mut picked_spells = 0;
    for id in &selection.selected_spells {
        match catalogs.spells.get(id) {
            Some(spell) if spell.is_available_to(&class.id) && spell.level <= 1 => {
                if spell.is_cantrip() {
                    picked_cantrips += 1;
                } else {
                    picked_spells += 1;
                }
            }
            _ => report.error(format!(
                "{} is not a level-1 {} spell",
                catalogs.spells.label_of(id),
                class.name
            )),
        }
    }

    if picked_cantrips != cantrips {
        report.error(format!(
            "Select {} cantrips ({} selected)",
            cantrips, picked_cantrips
        ));
    }
    if picked_spells != spells {
        report.error(format!(
            "Select {} 1st-level spells ({} selected)",
            spells, picked_spells
        ));
    }
}
