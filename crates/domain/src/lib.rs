//! Charforge domain: the pure data model of guided character creation.
//!
//! Everything here is plain data plus total functions over it. Reference
//! catalogs are read-only inputs; resolving choices against them, planning
//! steps and building records happens in the engine crate.

pub mod ability;
pub mod character_record;
pub mod choice;
pub mod effect;
pub mod entities;
pub mod entity_ref;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod selection;
pub mod validation;

pub use ability::AbilityId;
pub use character_record::{
    CharacterRecord, CharacterSpell, SavingThrow, SkillEntry, MAX_ABILITY_SCORE,
    MIN_ABILITY_SCORE,
};
pub use choice::{Choice, ChoiceKey, ChoiceSource, ResourceFilter, TraitChoiceKind};
pub use effect::{apply_all_effects, apply_effect, CharacterState, Effect, DEFAULT_SPEED};
pub use entities::{
    BackgroundDef, Catalog, CatalogEntry, ClassDef, EquipmentDef, FeatureDef, LanguageDef,
    RaceDef, ReferenceCatalogs, SpellDef, Spellcasting, SubclassDef, SubraceDef, TraitDef,
};
pub use entity_ref::{pretty_label, CountedEntityRef, EntityRef};
pub use error::DomainError;
pub use ids::CharacterId;
pub use selection::{AbilityScoreMethod, GuidedSelection, GuidedStep};
pub use validation::{GuidedValidationIssue, Severity, ValidationReport};
