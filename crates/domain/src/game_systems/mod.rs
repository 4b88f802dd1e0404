//! Game system rules used by guided character creation.
//!
//! # Supported Systems
//!
//! - D&D 5th Edition (`dnd5e`), level-1 creation rules only

pub mod dnd5e;

pub use dnd5e::{
    ability_modifier, proficiency_bonus, skill_by_id, SkillDef, SpellRequirement, SKILLS,
};
