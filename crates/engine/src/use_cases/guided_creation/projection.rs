//! UI-state projection.
//!
//! [`project`] is a pure function of the selection, the current step and the
//! seven reference-data streams. Whatever observes those inputs calls it again
//! on every change; nothing here keeps state between calls.

use std::collections::{BTreeMap, BTreeSet};

use charforge_domain::game_systems::dnd5e::{point_buy_total, POINT_BUY_BUDGET};
use charforge_domain::{
    BackgroundDef, Catalog, ChoiceKey, ClassDef, EquipmentDef, FeatureDef, GuidedSelection,
    GuidedStep, LanguageDef, RaceDef, ReferenceCatalogs, SpellDef, SubraceDef, TraitDef,
    ValidationReport,
};

use crate::infrastructure::ports::RepoError;

use super::choices::{disabled_reasons, resolve_options, ResolvedOptions};
use super::steps::{compute_steps, current_step_index};
use super::validation::{step_choices, validate_step};

// =============================================================================
// Reference Streams
// =============================================================================

/// Latest value of one reference-data stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    /// No value yet
    Pending,
    Ready(T),
    /// The provider reported a failure; not retried here
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T> Loadable<T> {
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Pending | Self::Ready(_) => None,
        }
    }
}

/// Classes arrive together with the features they reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassBundle {
    pub classes: Catalog<ClassDef>,
    pub features: Catalog<FeatureDef>,
}

/// Races arrive together with their subraces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceBundle {
    pub races: Catalog<RaceDef>,
    pub subraces: Catalog<SubraceDef>,
}

/// The seven reference-data streams the wizard waits on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceStreams {
    pub classes: Loadable<ClassBundle>,
    pub races: Loadable<RaceBundle>,
    pub traits: Loadable<Catalog<TraitDef>>,
    pub backgrounds: Loadable<Catalog<BackgroundDef>>,
    pub languages: Loadable<Catalog<LanguageDef>>,
    pub equipment: Loadable<Catalog<EquipmentDef>>,
    pub spells: Loadable<Catalog<SpellDef>>,
}

impl ReferenceStreams {
    /// Every stream ready with the matching catalogs.
    pub fn ready(catalogs: ReferenceCatalogs) -> Self {
        Self {
            classes: Loadable::Ready(ClassBundle {
                classes: catalogs.classes,
                features: catalogs.features,
            }),
            races: Loadable::Ready(RaceBundle {
                races: catalogs.races,
                subraces: catalogs.subraces,
            }),
            traits: Loadable::Ready(catalogs.traits),
            backgrounds: Loadable::Ready(catalogs.backgrounds),
            languages: Loadable::Ready(catalogs.languages),
            equipment: Loadable::Ready(catalogs.equipment),
            spells: Loadable::Ready(catalogs.spells),
        }
    }

    /// Every stream failed with the same message.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            classes: Loadable::Failed(message.clone()),
            races: Loadable::Failed(message.clone()),
            traits: Loadable::Failed(message.clone()),
            backgrounds: Loadable::Failed(message.clone()),
            languages: Loadable::Failed(message.clone()),
            equipment: Loadable::Failed(message.clone()),
            spells: Loadable::Failed(message),
        }
    }

    /// Streams for a single provider load: all ready, or all failed with the error.
    pub fn from_load(result: Result<ReferenceCatalogs, RepoError>) -> Self {
        match result {
            Ok(catalogs) => Self::ready(catalogs),
            Err(e) => Self::failed(e.to_string()),
        }
    }

    /// First failure in stream order.
    fn first_failure(&self) -> Option<&str> {
        self.classes
            .failure()
            .or_else(|| self.races.failure())
            .or_else(|| self.traits.failure())
            .or_else(|| self.backgrounds.failure())
            .or_else(|| self.languages.failure())
            .or_else(|| self.equipment.failure())
            .or_else(|| self.spells.failure())
    }

    /// Combine the streams: any failure wins, then any pending stream, else ready.
    pub fn combine(&self) -> Loadable<ReferenceCatalogs> {
        if let Some(message) = self.first_failure() {
            return Loadable::Failed(message.to_string());
        }
        match (
            self.classes.as_ready(),
            self.races.as_ready(),
            self.traits.as_ready(),
            self.backgrounds.as_ready(),
            self.languages.as_ready(),
            self.equipment.as_ready(),
            self.spells.as_ready(),
        ) {
            (
                Some(class_bundle),
                Some(race_bundle),
                Some(traits),
                Some(backgrounds),
                Some(languages),
                Some(equipment),
                Some(spells),
            ) => Loadable::Ready(ReferenceCatalogs {
                classes: class_bundle.classes.clone(),
                features: class_bundle.features.clone(),
                races: race_bundle.races.clone(),
                subraces: race_bundle.subraces.clone(),
                traits: traits.clone(),
                backgrounds: backgrounds.clone(),
                languages: languages.clone(),
                equipment: equipment.clone(),
                spells: spells.clone(),
            }),
            _ => Loadable::Pending,
        }
    }
}

// =============================================================================
// UI State
// =============================================================================

/// Everything the wizard needs to render.
#[derive(Debug, Clone, PartialEq)]
pub enum GuidedUiState {
    Loading,
    Failed { message: String },
    Ready(Box<GuidedView>),
}

/// One choice as shown on its step.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceView {
    pub key: ChoiceKey,
    pub source: String,
    /// Exact number of options to select
    pub choose: usize,
    pub options: ResolvedOptions,
    pub selected: BTreeSet<String>,
    /// Option id -> where it is already granted
    pub disabled: BTreeMap<String, String>,
}

/// The wizard as seen from the current step.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidedView {
    pub steps: Vec<GuidedStep>,
    pub current_step: GuidedStep,
    pub current_index: usize,
    pub choices: Vec<ChoiceView>,
    /// Issues of the current step; on REVIEW, of the whole wizard
    pub report: ValidationReport,
    pub can_continue: bool,
    pub blocking_reason: Option<String>,
    pub point_buy_remaining: i32,
}

/// Project the selection onto a renderable state.
pub fn project(
    selection: &GuidedSelection,
    current_step: GuidedStep,
    streams: &ReferenceStreams,
) -> GuidedUiState {
    match streams.combine() {
        Loadable::Pending => GuidedUiState::Loading,
        Loadable::Failed(message) => GuidedUiState::Failed { message },
        Loadable::Ready(catalogs) => {
            GuidedUiState::Ready(Box::new(view(selection, current_step, &catalogs)))
        }
    }
}

/// The view for already-loaded catalogs.
pub fn view(
    selection: &GuidedSelection,
    current_step: GuidedStep,
    catalogs: &ReferenceCatalogs,
) -> GuidedView {
    let steps = compute_steps(selection, catalogs);
    let current_index = current_step_index(&steps, current_step);
    let current_step = steps.get(current_index).copied().unwrap_or(GuidedStep::Basics);

    let choices = step_choices(current_step, selection, catalogs)
        .into_iter()
        .map(|pending| ChoiceView {
            options: resolve_options(pending.choice, catalogs),
            selected: selection.selected(&pending.key),
            disabled: disabled_reasons(&pending.key, selection, catalogs),
            choose: pending.choice.required(),
            source: pending.source,
            key: pending.key,
        })
        .collect();

    let report = validate_step(current_step, selection, catalogs);
    let blocking_reason = report.first_error().map(str::to_string);

    tracing::debug!(
        step = %current_step,
        steps = steps.len(),
        blocked = blocking_reason.is_some(),
        "Projected guided creation view"
    );

    GuidedView {
        can_continue: blocking_reason.is_none(),
        blocking_reason,
        report,
        choices,
        current_step,
        current_index,
        steps,
        point_buy_remaining: POINT_BUY_BUDGET - point_buy_total(selection.point_buy.values()),
    }
}
