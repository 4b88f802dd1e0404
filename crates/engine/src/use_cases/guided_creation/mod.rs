//! Guided character creation.
//!
//! The rules pieces are plain functions over a [`GuidedSelection`] and the
//! reference catalogs. [`GuidedCreation`] holds the player's session: it applies
//! intents, keeps the current step valid, and persists the finished record.

mod choices;
mod effects;
mod error;
mod projection;
mod selected;
mod sheet;
mod steps;
mod validation;

use std::sync::Arc;

use charforge_domain::{
    AbilityId, AbilityScoreMethod, CharacterRecord, ChoiceKey, EntityRef, GuidedSelection,
    GuidedStep, ReferenceCatalogs,
};

use crate::infrastructure::ports::CharacterRecordRepo;

pub use choices::{
    disabled_reasons, display_label, has_class_choices, pending_choices, rejected_picks,
    resolve_options, PendingChoice, ResolvedOptions,
};
pub use effects::{accumulate, base_ability_scores, collect_effects};
pub use error::GuidedCreationError;
pub use projection::{
    project, view, ChoiceView, ClassBundle, GuidedUiState, GuidedView, Loadable, RaceBundle,
    ReferenceStreams,
};
pub use sheet::build_character;
pub use steps::{compute_steps, current_step_index, resolve_current_step};
pub use validation::{blocking_reason, step_choices, validate_all, validate_step};

/// A single player action on the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum GuidedIntent {
    SetName(String),
    SelectClass(EntityRef),
    SelectSubclass(Option<EntityRef>),
    SelectRace(EntityRef),
    SelectSubrace(Option<EntityRef>),
    SelectBackground(EntityRef),
    SelectAbilityMethod(AbilityScoreMethod),
    AssignStandardArray {
        ability: AbilityId,
        score: Option<i32>,
    },
    IncrementPointBuy(AbilityId),
    DecrementPointBuy(AbilityId),
    ToggleChoice {
        key: ChoiceKey,
        option: String,
        max_selected: usize,
    },
    ToggleSpell(EntityRef),
    /// Advance one step; ignored while the current step has errors
    Next,
    Back,
    /// Jump to a planned step; forward jumps need every earlier step valid
    GoTo(GuidedStep),
}

/// One player's guided creation session.
pub struct GuidedCreation {
    selection: GuidedSelection,
    current_step: GuidedStep,
    record_repo: Arc<dyn CharacterRecordRepo>,
}

impl GuidedCreation {
    pub fn new(record_repo: Arc<dyn CharacterRecordRepo>) -> Self {
        Self::with_selection(GuidedSelection::new(), record_repo)
    }

    /// Resume from a saved selection, starting on the first step.
    pub fn with_selection(
        selection: GuidedSelection,
        record_repo: Arc<dyn CharacterRecordRepo>,
    ) -> Self {
        Self {
            selection,
            current_step: GuidedStep::Basics,
            record_repo,
        }
    }

    pub fn selection(&self) -> &GuidedSelection {
        &self.selection
    }

    pub fn current_step(&self) -> GuidedStep {
        self.current_step
    }

    /// Apply one intent, then snap the current step to a planned one.
    pub fn apply(&mut self, intent: GuidedIntent, catalogs: &ReferenceCatalogs) {
        match intent {
            GuidedIntent::SetName(name) => self.selection.name = name,
            GuidedIntent::SelectClass(id) => self.selection.select_class(id),
            GuidedIntent::SelectSubclass(id) => self.selection.subclass_id = id,
            GuidedIntent::SelectRace(id) => self.selection.select_race(id),
            GuidedIntent::SelectSubrace(id) => self.selection.select_subrace(id, catalogs),
            GuidedIntent::SelectBackground(id) => self.selection.select_background(id),
            GuidedIntent::SelectAbilityMethod(method) => {
                self.selection.ability_method = Some(method)
            }
            GuidedIntent::AssignStandardArray { ability, score } => {
                self.selection.assign_standard_array(ability, score)
            }
            GuidedIntent::IncrementPointBuy(ability) => {
                self.selection.increment_point_buy(ability)
            }
            GuidedIntent::DecrementPointBuy(ability) => {
                self.selection.decrement_point_buy(ability)
            }
            GuidedIntent::ToggleChoice {
                key,
                option,
                max_selected,
            } => self.toggle_choice(key, option, max_selected, catalogs),
            GuidedIntent::ToggleSpell(id) => self.selection.toggle_spell(id),
            GuidedIntent::Next => self.next(catalogs),
            GuidedIntent::Back => self.back(catalogs),
            GuidedIntent::GoTo(step) => self.go_to(step, catalogs),
        }

        let steps = compute_steps(&self.selection, catalogs);
        self.current_step = resolve_current_step(&steps, self.current_step);
    }

    /// Removing a pick is always allowed; adding one requires a pending choice
    /// under `key` that accepts it.
    fn toggle_choice(
        &mut self,
        key: ChoiceKey,
        option: String,
        max_selected: usize,
        catalogs: &ReferenceCatalogs,
    ) {
        let selected = self
            .selection
            .choice_selections
            .get(&key)
            .is_some_and(|picks| picks.contains(&option));

        if !selected {
            let rejection = match pending_choices(&self.selection, catalogs)
                .into_iter()
                .find(|pending| pending.key == key)
            {
                Some(pending) => {
                    rejected_picks(&pending, [option.as_str()], &self.selection, catalogs)
                        .into_iter()
                        .next()
                }
                None => Some(format!("No choice is pending under {}", key)),
            };
            if let Some(reason) = rejection {
                tracing::debug!(key = %key, option = %option, reason = %reason, "Pick rejected");
                return;
            }
        }

        self.selection.toggle_choice(key, option, max_selected);
    }

    fn next(&mut self, catalogs: &ReferenceCatalogs) {
        let steps = compute_steps(&self.selection, catalogs);
        let index = current_step_index(&steps, self.current_step);
        let current = steps.get(index).copied().unwrap_or(GuidedStep::Basics);

        if let Some(reason) = blocking_reason(current, &self.selection, catalogs) {
            tracing::debug!(step = %current, reason = %reason, "Next blocked");
            return;
        }
        if let Some(next) = steps.get(index + 1) {
            self.current_step = *next;
        }
    }

    fn back(&mut self, catalogs: &ReferenceCatalogs) {
        let steps = compute_steps(&self.selection, catalogs);
        let index = current_step_index(&steps, self.current_step);
        if let Some(previous) = index.checked_sub(1).and_then(|i| steps.get(i)) {
            self.current_step = *previous;
        }
    }

    fn go_to(&mut self, target: GuidedStep, catalogs: &ReferenceCatalogs) {
        let steps = compute_steps(&self.selection, catalogs);
        let Some(target_index) = steps.iter().position(|step| *step == target) else {
            return;
        };
        let current_index = current_step_index(&steps, self.current_step);

        let reachable = target_index <= current_index
            || steps[..target_index]
                .iter()
                .all(|step| !validate_step(*step, &self.selection, catalogs).has_errors());
        if reachable {
            self.current_step = target;
        } else {
            tracing::debug!(step = %target, "Jump blocked by an earlier step");
        }
    }

    /// Current view for already-loaded catalogs.
    pub fn view(&self, catalogs: &ReferenceCatalogs) -> GuidedView {
        view(&self.selection, self.current_step, catalogs)
    }

    /// Current UI state from the reference streams.
    pub fn project(&self, streams: &ReferenceStreams) -> GuidedUiState {
        project(&self.selection, self.current_step, streams)
    }

    /// Validate, build and persist the character.
    ///
    /// On success the session starts over; on failure the selection is kept so
    /// the player can fix it or retry.
    pub async fn create(
        &mut self,
        catalogs: &ReferenceCatalogs,
    ) -> Result<CharacterRecord, GuidedCreationError> {
        let report = validate_all(&self.selection, catalogs);
        if report.has_errors() {
            return Err(GuidedCreationError::Incomplete(report));
        }

        let record = build_character(&self.selection, catalogs)?;

        if let Err(e) = self.record_repo.save(&record).await {
            tracing::warn!(
                error = %e,
                character_id = %record.id,
                "Failed to save character record"
            );
            return Err(e.into());
        }

        tracing::info!(
            character_id = %record.id,
            name = %record.name,
            class = %record.class_name,
            "Character created"
        );

        self.selection = GuidedSelection::new();
        self.current_step = GuidedStep::Basics;
        Ok(record)
    }
}
