//! Reference entities - the read-only game data guided creation draws from

mod background;
mod catalog;
mod class;
mod race;
mod reference;

pub use background::BackgroundDef;
pub use catalog::{Catalog, CatalogEntry, ReferenceCatalogs};
pub use class::{ClassDef, Spellcasting, SubclassDef};
pub use race::{RaceDef, SubraceDef, TraitDef};
pub use reference::{EquipmentDef, FeatureDef, LanguageDef, SpellDef};
