//! Read-only reference catalogs.
//!
//! A [`Catalog`] keeps entries in the order the provider delivered them and
//! indexes them by id. The engine only ever reads from catalogs.

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::background::BackgroundDef;
use super::class::ClassDef;
use super::race::{RaceDef, SubraceDef, TraitDef};
use super::reference::{EquipmentDef, FeatureDef, LanguageDef, SpellDef};
use crate::entity_ref::{pretty_label, EntityRef};

/// An entry that can be stored in a [`Catalog`].
pub trait CatalogEntry {
    fn id(&self) -> &EntityRef;
    fn name(&self) -> &str;
}

/// Insertion-ordered, id-indexed collection of reference entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    entries: IndexMap<EntityRef, T>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: CatalogEntry> Catalog<T> {
    /// Add an entry; a later entry with the same id replaces the earlier one.
    pub fn insert(&mut self, entry: T) {
        self.entries.insert(entry.id().clone(), entry);
    }

    pub fn get(&self, id: &EntityRef) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &EntityRef) -> bool {
        self.entries.contains_key(id)
    }

    /// Display name of `id`, if the catalog knows it.
    pub fn name_of(&self, id: &EntityRef) -> Option<&str> {
        self.get(id).map(CatalogEntry::name)
    }

    /// Display name of `id`, pretty-printing the raw id when unknown.
    pub fn label_of(&self, id: &EntityRef) -> String {
        self.name_of(id)
            .map(str::to_string)
            .unwrap_or_else(|| pretty_label(id.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: CatalogEntry> FromIterator<T> for Catalog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut catalog = Self::default();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

impl<T: Serialize> Serialize for Catalog<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'de, T> Deserialize<'de> for Catalog<T>
where
    T: Deserialize<'de> + CatalogEntry,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Catalog::from_iter)
    }
}

/// Every catalog the guided creation flow reads from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceCatalogs {
    pub classes: Catalog<ClassDef>,
    pub features: Catalog<FeatureDef>,
    pub races: Catalog<RaceDef>,
    pub subraces: Catalog<SubraceDef>,
    pub traits: Catalog<TraitDef>,
    pub backgrounds: Catalog<BackgroundDef>,
    pub languages: Catalog<LanguageDef>,
    pub equipment: Catalog<EquipmentDef>,
    pub spells: Catalog<SpellDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_delivery_order() {
        let catalog: Catalog<LanguageDef> = [
            LanguageDef::new("elvish", "Elvish"),
            LanguageDef::new("common", "Common"),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = catalog.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["elvish", "common"]);
    }

    #[test]
    fn label_falls_back_to_pretty_id() {
        let catalog: Catalog<LanguageDef> =
            [LanguageDef::new("common", "Common")].into_iter().collect();

        assert_eq!(catalog.label_of(&EntityRef::from("common")), "Common");
        assert_eq!(catalog.label_of(&EntityRef::from("deep-speech")), "Deep Speech");
    }

    #[test]
    fn catalogs_deserialize_from_arrays() {
        let json = r#"{
            "languages": [{"id": "common", "name": "Common"}],
            "spells": [{"id": "light", "name": "Light", "level": 0, "classes": ["wizard"]}]
        }"#;
        let catalogs: ReferenceCatalogs = serde_json::from_str(json).unwrap();
        assert_eq!(catalogs.languages.len(), 1);
        assert!(catalogs.spells.contains(&EntityRef::from("light")));
        assert!(catalogs.classes.is_empty());
    }
}
