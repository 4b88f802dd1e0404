//! Step planning: which wizard pages apply to the current selection.

use charforge_domain::{GuidedSelection, GuidedStep, ReferenceCatalogs};

use super::choices::has_class_choices;
use super::selected;

/// Ordered steps for the current selection.
///
/// CLASS_CHOICES appears only when the class picks a subclass at level 1 or a
/// level-1 feature carries a choice. SPELLS appears only when spellcasting
/// starts at level 1. Both are omitted while no class is selected.
pub fn compute_steps(selection: &GuidedSelection, catalogs: &ReferenceCatalogs) -> Vec<GuidedStep> {
    let mut steps = vec![GuidedStep::Basics, GuidedStep::Class];

    if has_class_choices(selection, catalogs) {
        steps.push(GuidedStep::ClassChoices);
    }

    steps.extend([
        GuidedStep::Race,
        GuidedStep::Background,
        GuidedStep::AbilityMethod,
        GuidedStep::AbilityAssign,
        GuidedStep::SkillsProficiencies,
        GuidedStep::Equipment,
    ]);

    if selected::class(selection, catalogs).is_some_and(|class| class.casts_spells_at(1)) {
        steps.push(GuidedStep::Spells);
    }

    steps.push(GuidedStep::Review);
    steps
}

/// Index of `current` in `steps`, snapping to the first step when it is gone.
pub fn current_step_index(steps: &[GuidedStep], current: GuidedStep) -> usize {
    steps.iter().position(|step| *step == current).unwrap_or(0)
}

/// `current` if it is still planned, otherwise the first planned step.
pub fn resolve_current_step(steps: &[GuidedStep], current: GuidedStep) -> GuidedStep {
    steps
        .get(current_step_index(steps, current))
        .copied()
        .unwrap_or(GuidedStep::Basics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::srd_catalogs;
    use GuidedStep::*;

    fn steps_for(class: Option<&str>) -> Vec<GuidedStep> {
        let mut selection = GuidedSelection::new();
        if let Some(class) = class {
            selection.select_class(class.into());
        }
        compute_steps(&selection, &srd_catalogs())
    }

    #[test]
    fn no_class_omits_conditional_steps() {
        assert_eq!(
            steps_for(None),
            vec![
                Basics,
                Class,
                Race,
                Background,
                AbilityMethod,
                AbilityAssign,
                SkillsProficiencies,
                Equipment,
                Review
            ]
        );
    }

    #[test]
    fn wizard_gets_spells_but_no_class_choices() {
        let steps = steps_for(Some("wizard"));
        assert!(steps.contains(&Spells));
        assert!(!steps.contains(&ClassChoices));
        assert_eq!(steps.last(), Some(&Review));
        assert_eq!(steps[steps.len() - 2], Spells);
    }

    #[test]
    fn cleric_gets_class_choices_for_its_subclass() {
        let steps = steps_for(Some("cleric"));
        assert_eq!(&steps[..4], &[Basics, Class, ClassChoices, Race]);
        assert!(steps.contains(&Spells));
    }

    #[test]
    fn fighter_gets_class_choices_for_a_feature_choice_and_no_spells() {
        let steps = steps_for(Some("fighter"));
        assert!(steps.contains(&ClassChoices));
        assert!(!steps.contains(&Spells));
    }

    #[test]
    fn spellcasting_after_level_one_has_no_spells_step() {
        // Rangers cast from level 2
        assert!(!steps_for(Some("ranger")).contains(&Spells));
    }

    #[test]
    fn unknown_class_is_treated_as_unselected() {
        assert_eq!(steps_for(Some("artificer")), steps_for(None));
    }

    #[test]
    fn missing_current_step_snaps_to_first() {
        let steps = steps_for(None);
        assert_eq!(current_step_index(&steps, Race), 2);
        assert_eq!(current_step_index(&steps, Spells), 0);
        assert_eq!(resolve_current_step(&steps, ClassChoices), Basics);
        assert_eq!(resolve_current_step(&steps, Review), Review);
    }
}
