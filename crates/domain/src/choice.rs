//! Choice model: pick-N-of-M decisions and the keys they are stored under.
//!
//! The option universe of a [`Choice`] depends on reference data, so this
//! module only describes choices. Resolving them into concrete options is the
//! engine's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ability::AbilityId;
use crate::entity_ref::EntityRef;
use crate::error::DomainError;

/// A decision where the player must pick exactly `choose` options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub choose: u32,
    pub from: ChoiceSource,
}

impl Choice {
    pub fn new(choose: u32, from: ChoiceSource) -> Self {
        Self { choose, from }
    }

    /// Number of selections required. A declared count below 1 counts as 1.
    pub fn required(&self) -> usize {
        self.choose.max(1) as usize
    }

    /// Whether `selected` options satisfy this choice (exact count, neither fewer nor more).
    pub fn is_satisfied_by(&self, selected: usize) -> bool {
        selected == self.required()
    }

    /// Whether the option universe consists of proficiencies.
    pub fn grants_proficiencies(&self) -> bool {
        matches!(self.from, ChoiceSource::Proficiency { .. })
    }
}

/// Where the options of a choice come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChoiceSource {
    /// Every known language
    FromAll,
    /// Explicit literal option ids
    OptionsArray { options: Vec<EntityRef> },
    Proficiency { options: Vec<EntityRef> },
    Equipment { options: Vec<EntityRef> },
    /// Equipment whose category tags include every listed category
    EquipmentCategories { categories: Vec<String> },
    Feature { options: Vec<EntityRef> },
    FavoredEnemy { options: Vec<String> },
    TerrainType { options: Vec<String> },
    /// One of several ability sets; each picked ability gains +1
    AbilityBonus { sets: Vec<Vec<AbilityId>> },
    /// A named catalog, optionally filtered
    ResourceList {
        resource: String,
        #[serde(default)]
        filters: Vec<ResourceFilter>,
    },
    Ideal {
        #[serde(default)]
        options: Vec<String>,
    },
    Nested {
        #[serde(default)]
        choices: Vec<Choice>,
    },
}

/// Declarative key/value predicate over a resource list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum ResourceFilter {
    /// Entry must list this class
    Class(EntityRef),
    /// Entry must have exactly this level
    Level(u8),
    /// Unknown predicate key; ignored by the resolver
    #[serde(other)]
    Unsupported,
}

/// Which sub-choice of a racial trait a key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TraitChoiceKind {
    AbilityBonus,
    Language,
    Proficiency,
    DraconicAncestry,
    Spell,
}

impl TraitChoiceKind {
    pub const ALL: [TraitChoiceKind; 5] = [
        Self::AbilityBonus,
        Self::Language,
        Self::Proficiency,
        Self::DraconicAncestry,
        Self::Spell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbilityBonus => "ability-bonus",
            Self::Language => "language",
            Self::Proficiency => "proficiency",
            Self::DraconicAncestry => "draconic-ancestry",
            Self::Spell => "spell",
        }
    }
}

impl FromStr for TraitChoiceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown trait choice kind: {}", s)))
    }
}

/// Structured key of an entry in `GuidedSelection::choice_selections`.
///
/// The namespaced string form (`"race/trait/<id>/language"`) exists only at
/// serialization boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChoiceKey {
    /// `class/proficiency/<index>`
    ClassProficiency { index: usize },
    /// `class/feature/<featureId>`
    ClassFeature { feature: EntityRef },
    /// `race/trait/<traitId>/<kind>`
    RaceTrait {
        trait_id: EntityRef,
        kind: TraitChoiceKind,
    },
    /// `background/language`
    BackgroundLanguage,
    /// `background/equipment`
    BackgroundEquipment,
}

impl ChoiceKey {
    pub fn race_trait(trait_id: impl Into<EntityRef>, kind: TraitChoiceKind) -> Self {
        Self::RaceTrait {
            trait_id: trait_id.into(),
            kind,
        }
    }

    pub fn class_feature(feature: impl Into<EntityRef>) -> Self {
        Self::ClassFeature {
            feature: feature.into(),
        }
    }

    /// Whether the key belongs to the class (cleared when the class changes).
    pub fn is_class_scoped(&self) -> bool {
        matches!(self, Self::ClassProficiency { .. } | Self::ClassFeature { .. })
    }

    pub fn is_race_scoped(&self) -> bool {
        matches!(self, Self::RaceTrait { .. })
    }

    pub fn is_background_scoped(&self) -> bool {
        matches!(self, Self::BackgroundLanguage | Self::BackgroundEquipment)
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassProficiency { index } => write!(f, "class/proficiency/{}", index),
            Self::ClassFeature { feature } => write!(f, "class/feature/{}", feature),
            Self::RaceTrait { trait_id, kind } => {
                write!(f, "race/trait/{}/{}", trait_id, kind.as_str())
            }
            Self::BackgroundLanguage => write!(f, "background/language"),
            Self::BackgroundEquipment => write!(f, "background/equipment"),
        }
    }
}

impl FromStr for ChoiceKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || DomainError::parse(format!("Unknown choice key: {}", s));
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            ["class", "proficiency", index] => index
                .parse()
                .map(|index| Self::ClassProficiency { index })
                .map_err(|_| unknown()),
            ["class", "feature", feature] if !feature.is_empty() => {
                Ok(Self::class_feature(*feature))
            }
            ["race", "trait", trait_id, kind] if !trait_id.is_empty() => {
                Ok(Self::race_trait(*trait_id, kind.parse()?))
            }
            ["background", "language"] => Ok(Self::BackgroundLanguage),
            ["background", "equipment"] => Ok(Self::BackgroundEquipment),
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for ChoiceKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChoiceKey> for String {
    fn from(value: ChoiceKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn required_count_is_at_least_one() {
        let choice = Choice::new(0, ChoiceSource::FromAll);
        assert_eq!(choice.required(), 1);
        assert!(choice.is_satisfied_by(1));
        assert!(!choice.is_satisfied_by(0));
    }

    #[test]
    fn satisfaction_requires_exact_count() {
        let choice = Choice::new(2, ChoiceSource::FromAll);
        assert!(!choice.is_satisfied_by(1));
        assert!(choice.is_satisfied_by(2));
        assert!(!choice.is_satisfied_by(3));
    }

    #[test]
    fn choice_key_string_forms() {
        assert_eq!(
            ChoiceKey::ClassProficiency { index: 0 }.to_string(),
            "class/proficiency/0"
        );
        assert_eq!(
            ChoiceKey::race_trait("high-elf-cantrip", TraitChoiceKind::Spell).to_string(),
            "race/trait/high-elf-cantrip/spell"
        );
        assert_eq!(ChoiceKey::BackgroundEquipment.to_string(), "background/equipment");
    }

    #[test]
    fn choice_key_parses_its_own_output() {
        let keys = [
            ChoiceKey::ClassProficiency { index: 3 },
            ChoiceKey::class_feature("fighting-style"),
            ChoiceKey::race_trait("draconic-ancestry", TraitChoiceKind::DraconicAncestry),
            ChoiceKey::BackgroundLanguage,
        ];
        for key in keys {
            assert_eq!(key.to_string().parse::<ChoiceKey>(), Ok(key));
        }
    }

    #[test]
    fn malformed_choice_keys_are_parse_errors() {
        for raw in [
            "class/proficiency/x",
            "race/trait//language",
            "race/trait/keen-senses/smell",
            "background",
            "",
        ] {
            assert!(
                matches!(raw.parse::<ChoiceKey>(), Err(DomainError::Parse(_))),
                "{raw} should not parse"
            );
        }
    }

    #[test]
    fn choice_keys_serialize_as_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(ChoiceKey::BackgroundLanguage, vec!["elvish".to_string()]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"background/language":["elvish"]}"#);

        let parsed: BTreeMap<ChoiceKey, Vec<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn choice_deserializes_from_tagged_json() {
        let json = r#"{
            "choose": 2,
            "from": {
                "kind": "resource_list",
                "resource": "spells",
                "filters": [
                    {"key": "class", "value": "wizard"},
                    {"key": "level", "value": 0},
                    {"key": "school"}
                ]
            }
        }"#;
        let choice: Choice = serde_json::from_str(json).unwrap();
        assert_eq!(choice.choose, 2);
        let ChoiceSource::ResourceList { resource, filters } = choice.from else {
            panic!("expected a resource list");
        };
        assert_eq!(resource, "spells");
        assert_eq!(
            filters,
            vec![
                ResourceFilter::Class(EntityRef::from("wizard")),
                ResourceFilter::Level(0),
                ResourceFilter::Unsupported,
            ]
        );
    }
}
