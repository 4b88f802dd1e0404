//! Shared test fixtures: a small SRD-flavoured reference catalog and a
//! finished wizard selection built on top of it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{complete_wizard_selection, srd_catalogs};
//!
//! #[test]
//! fn wizard_is_valid() {
//!     let report = validate_all(&complete_wizard_selection(), &srd_catalogs());
//!     assert!(!report.has_errors());
//! }
//! ```

use charforge_domain::{
    AbilityId, AbilityScoreMethod, BackgroundDef, Choice, ChoiceKey, ChoiceSource, ClassDef,
    CountedEntityRef, Effect, EntityRef, EquipmentDef, FeatureDef, GuidedSelection, LanguageDef,
    RaceDef, ReferenceCatalogs, ResourceFilter, SpellDef, Spellcasting, SubclassDef, SubraceDef,
    TraitDef,
};

fn refs(ids: &[&str]) -> Vec<EntityRef> {
    ids.iter().copied().map(EntityRef::from).collect()
}

fn proficiency_choice(choose: u32, options: &[&str]) -> Choice {
    Choice::new(
        choose,
        ChoiceSource::Proficiency {
            options: refs(options),
        },
    )
}

fn items(ids: &[&str]) -> Vec<CountedEntityRef> {
    ids.iter().copied().map(CountedEntityRef::one).collect()
}

fn subclasses(pairs: &[(&str, &str)]) -> Vec<SubclassDef> {
    pairs
        .iter()
        .map(|(id, name)| SubclassDef {
            id: (*id).into(),
            name: (*name).to_string(),
        })
        .collect()
}

// =============================================================================
// Classes & Features
// =============================================================================

fn classes() -> Vec<ClassDef> {
    let mut wizard = ClassDef::new("wizard", "Wizard", 8);
    wizard.proficiencies = refs(&["daggers", "darts", "slings", "quarterstaffs", "light-crossbows"]);
    wizard.proficiency_choices = vec![proficiency_choice(
        2,
        &[
            "skill-arcana",
            "skill-history",
            "skill-insight",
            "skill-investigation",
            "skill-medicine",
            "skill-religion",
        ],
    )];
    wizard.starting_equipment = items(&["quarterstaff", "spellbook", "component-pouch"]);
    wizard.saving_throws = vec![AbilityId::Int, AbilityId::Wis];
    wizard.spellcasting = Some(Spellcasting {
        level: 1,
        ability: AbilityId::Int,
    });
    wizard.features.insert(1, refs(&["arcane-recovery", "spellcasting-wizard"]));

    let mut fighter = ClassDef::new("fighter", "Fighter", 10);
    fighter.proficiencies = refs(&["all-armor", "shields", "simple-weapons", "martial-weapons"]);
    fighter.proficiency_choices = vec![proficiency_choice(
        2,
        &[
            "skill-acrobatics",
            "skill-animal-handling",
            "skill-athletics",
            "skill-history",
            "skill-insight",
            "skill-intimidation",
            "skill-perception",
            "skill-survival",
        ],
    )];
    fighter.starting_equipment = items(&["longsword", "shortbow"]);
    fighter.saving_throws = vec![AbilityId::Str, AbilityId::Con];
    fighter.features.insert(1, refs(&["fighting-style", "second-wind"]));

    let mut cleric = ClassDef::new("cleric", "Cleric", 8);
    cleric.proficiencies = refs(&["light-armor", "medium-armor", "shields", "simple-weapons"]);
    cleric.proficiency_choices = vec![proficiency_choice(
        2,
        &[
            "skill-history",
            "skill-insight",
            "skill-medicine",
            "skill-persuasion",
            "skill-religion",
        ],
    )];
    cleric.starting_equipment = items(&["holy-symbol"]);
    cleric.saving_throws = vec![AbilityId::Wis, AbilityId::Cha];
    cleric.subclasses = subclasses(&[("life", "Life Domain"), ("light", "Light Domain")]);
    cleric.spellcasting = Some(Spellcasting {
        level: 1,
        ability: AbilityId::Wis,
    });

    let mut warlock = ClassDef::new("warlock", "Warlock", 8);
    warlock.saving_throws = vec![AbilityId::Wis, AbilityId::Cha];
    warlock.subclasses = subclasses(&[("fiend", "The Fiend"), ("archfey", "The Archfey")]);
    warlock.spellcasting = Some(Spellcasting {
        level: 1,
        ability: AbilityId::Cha,
    });

    let mut bard = ClassDef::new("bard", "Bard", 8);
    bard.saving_throws = vec![AbilityId::Dex, AbilityId::Cha];
    bard.spellcasting = Some(Spellcasting {
        level: 1,
        ability: AbilityId::Cha,
    });

    let mut ranger = ClassDef::new("ranger", "Ranger", 10);
    ranger.saving_throws = vec![AbilityId::Str, AbilityId::Dex];
    ranger.spellcasting = Some(Spellcasting {
        level: 2,
        ability: AbilityId::Wis,
    });
    ranger.features.insert(1, refs(&["favored-enemy", "natural-explorer"]));

    let mut rogue = ClassDef::new("rogue", "Rogue", 8);
    rogue.proficiencies = refs(&["light-armor", "simple-weapons", "thieves-tools"]);
    rogue.saving_throws = vec![AbilityId::Dex, AbilityId::Int];
    rogue.features.insert(1, refs(&["expertise", "sneak-attack"]));

    vec![wizard, fighter, cleric, warlock, bard, ranger, rogue]
}

fn features() -> Vec<FeatureDef> {
    vec![
        FeatureDef::new("arcane-recovery", "Arcane Recovery"),
        FeatureDef::new("spellcasting-wizard", "Spellcasting"),
        FeatureDef::new("fighting-style", "Fighting Style").with_choice(Choice::new(
            1,
            ChoiceSource::Feature {
                options: refs(&["fighting-style-archery", "fighting-style-defense"]),
            },
        )),
        FeatureDef::new("fighting-style-archery", "Archery"),
        FeatureDef::new("fighting-style-defense", "Defense"),
        FeatureDef::new("second-wind", "Second Wind"),
        FeatureDef::new("favored-enemy", "Favored Enemy").with_choice(Choice::new(
            1,
            ChoiceSource::FavoredEnemy {
                options: vec!["beasts".into(), "fey".into(), "undead".into()],
            },
        )),
        FeatureDef::new("natural-explorer", "Natural Explorer").with_choice(Choice::new(
            1,
            ChoiceSource::TerrainType {
                options: vec!["forest".into(), "mountain".into(), "swamp".into()],
            },
        )),
        FeatureDef::new("expertise", "Expertise").with_choice(proficiency_choice(
            2,
            &[
                "skill-acrobatics",
                "skill-deception",
                "skill-sleight-of-hand",
                "skill-stealth",
                "thieves-tools",
            ],
        )),
        FeatureDef::new("sneak-attack", "Sneak Attack"),
    ]
}

// =============================================================================
// Races, Subraces & Traits
// =============================================================================

fn races() -> Vec<RaceDef> {
    let mut human = RaceDef::new("human", "Human");
    human.speed = Some(30);
    human.traits = refs(&["human-resourceful"]);
    human.languages = refs(&["common"]);

    let mut elf = RaceDef::new("elf", "Elf");
    elf.speed = Some(30);
    elf.traits = refs(&["darkvision", "keen-senses", "elf-dex"]);
    elf.subraces = refs(&["high-elf"]);
    elf.languages = refs(&["common", "elvish"]);

    let mut half_elf = RaceDef::new("half-elf", "Half-Elf");
    half_elf.speed = Some(30);
    half_elf.traits = refs(&["half-elf-cha", "half-elf-versatility", "skill-versatility"]);
    half_elf.languages = refs(&["common", "elvish"]);

    let mut dragonborn = RaceDef::new("dragonborn", "Dragonborn");
    dragonborn.speed = Some(30);
    dragonborn.traits = refs(&["dragonborn-abilities", "draconic-ancestry"]);
    dragonborn.languages = refs(&["common", "draconic"]);

    vec![human, elf, half_elf, dragonborn]
}

fn subraces() -> Vec<SubraceDef> {
    vec![SubraceDef {
        id: "high-elf".into(),
        name: "High Elf".to_string(),
        race: "elf".into(),
        traits: refs(&["high-elf-int", "high-elf-cantrip", "extra-language"]),
    }]
}

fn traits() -> Vec<TraitDef> {
    let mut high_elf_cantrip = TraitDef::new("high-elf-cantrip", "Cantrip");
    high_elf_cantrip.spell_choice = Some(Choice::new(
        1,
        ChoiceSource::ResourceList {
            resource: "spells".into(),
            filters: vec![
                ResourceFilter::Class("wizard".into()),
                ResourceFilter::Level(0),
            ],
        },
    ));

    let mut extra_language = TraitDef::new("extra-language", "Extra Language");
    extra_language.language_choice = Some(Choice::new(1, ChoiceSource::FromAll));

    let mut versatility = TraitDef::new("half-elf-versatility", "Ability Score Increase");
    versatility.ability_bonus_choice = Some(Choice::new(
        2,
        ChoiceSource::AbilityBonus {
            sets: vec![vec![
                AbilityId::Str,
                AbilityId::Dex,
                AbilityId::Con,
                AbilityId::Int,
                AbilityId::Wis,
            ]],
        },
    ));

    let mut skill_versatility = TraitDef::new("skill-versatility", "Skill Versatility");
    skill_versatility.proficiency_choice = Some(proficiency_choice(
        2,
        &[
            "skill-athletics",
            "skill-deception",
            "skill-persuasion",
            "skill-stealth",
            "skill-survival",
        ],
    ));

    let mut ancestry = TraitDef::new("draconic-ancestry", "Draconic Ancestry");
    ancestry.draconic_ancestry_choice = Some(Choice::new(
        1,
        ChoiceSource::OptionsArray {
            options: refs(&["black-dragon", "blue-dragon", "gold-dragon", "red-dragon"]),
        },
    ));

    vec![
        TraitDef::new("human-resourceful", "Resourceful"),
        TraitDef::new("darkvision", "Darkvision"),
        TraitDef::new("keen-senses", "Keen Senses")
            .with_effect(Effect::proficiencies(["skill-perception"])),
        TraitDef::new("elf-dex", "Ability Score Increase")
            .with_effect(Effect::modify_abilities([(AbilityId::Dex, 2)])),
        TraitDef::new("high-elf-int", "Ability Score Increase")
            .with_effect(Effect::modify_abilities([(AbilityId::Int, 1)])),
        high_elf_cantrip,
        extra_language,
        TraitDef::new("half-elf-cha", "Ability Score Increase")
            .with_effect(Effect::modify_abilities([(AbilityId::Cha, 2)])),
        versatility,
        skill_versatility,
        TraitDef::new("dragonborn-abilities", "Ability Score Increase").with_effect(
            Effect::modify_abilities([(AbilityId::Str, 2), (AbilityId::Cha, 1)]),
        ),
        ancestry,
    ]
}

// =============================================================================
// Backgrounds
// =============================================================================

fn backgrounds() -> Vec<BackgroundDef> {
    let mut sage = BackgroundDef::new("sage", "Sage");
    sage.effects = vec![
        Effect::proficiencies(["skill-arcana", "skill-history"]),
        Effect::equipment(items(&["bottle-of-ink", "quill", "common-clothes"])),
    ];
    sage.language_choice = Some(Choice::new(2, ChoiceSource::FromAll));
    sage.equipment_choice = Some(Choice::new(
        1,
        ChoiceSource::EquipmentCategories {
            categories: vec!["arcane-focus".into()],
        },
    ));

    let mut acolyte = BackgroundDef::new("acolyte", "Acolyte");
    acolyte.effects = vec![
        Effect::proficiencies(["skill-insight", "skill-religion"]),
        Effect::equipment(items(&["holy-symbol", "prayer-book", "common-clothes"])),
    ];
    acolyte.language_choice = Some(Choice::new(2, ChoiceSource::FromAll));

    let mut soldier = BackgroundDef::new("soldier", "Soldier");
    soldier.effects = vec![
        Effect::proficiencies(["skill-athletics", "skill-intimidation"]),
        Effect::equipment(items(&["common-clothes"])),
    ];
    soldier.equipment_choice = Some(Choice::new(
        1,
        ChoiceSource::Equipment {
            options: refs(&["dice-set", "playing-cards"]),
        },
    ));

    vec![sage, acolyte, soldier]
}

// =============================================================================
// Languages, Equipment & Spells
// =============================================================================

fn languages() -> Vec<LanguageDef> {
    [
        ("common", "Common"),
        ("dwarvish", "Dwarvish"),
        ("elvish", "Elvish"),
        ("giant", "Giant"),
        ("gnomish", "Gnomish"),
        ("goblin", "Goblin"),
        ("halfling", "Halfling"),
        ("orc", "Orc"),
        ("draconic", "Draconic"),
        ("celestial", "Celestial"),
    ]
    .into_iter()
    .map(|(id, name)| LanguageDef::new(id, name))
    .collect()
}

fn equipment() -> Vec<EquipmentDef> {
    vec![
        EquipmentDef::new("quarterstaff", "Quarterstaff").with_categories(["weapon", "simple", "melee"]),
        EquipmentDef::new("dagger", "Dagger").with_categories(["weapon", "simple", "melee"]),
        EquipmentDef::new("shortbow", "Shortbow").with_categories(["weapon", "simple", "ranged"]),
        EquipmentDef::new("longsword", "Longsword").with_categories(["weapon", "martial", "melee"]),
        EquipmentDef::new("spellbook", "Spellbook"),
        EquipmentDef::new("component-pouch", "Component Pouch"),
        EquipmentDef::new("wand", "Wand").with_categories(["arcane-focus"]),
        EquipmentDef::new("orb", "Orb").with_categories(["arcane-focus"]),
        EquipmentDef::new("crystal", "Crystal").with_categories(["arcane-focus"]),
        EquipmentDef::new("bottle-of-ink", "Bottle of Ink"),
        EquipmentDef::new("quill", "Quill"),
        EquipmentDef::new("common-clothes", "Common Clothes"),
        EquipmentDef::new("holy-symbol", "Holy Symbol"),
        EquipmentDef::new("prayer-book", "Prayer Book"),
        EquipmentDef::new("dice-set", "Dice Set").with_categories(["gaming-set"]),
        EquipmentDef::new("playing-cards", "Playing Cards").with_categories(["gaming-set"]),
    ]
}

fn spells() -> Vec<SpellDef> {
    vec![
        SpellDef::new("fire-bolt", "Fire Bolt", 0, ["wizard"]),
        SpellDef::new("light", "Light", 0, ["wizard", "cleric", "bard"]),
        SpellDef::new("mage-hand", "Mage Hand", 0, ["wizard", "bard"]),
        SpellDef::new("prestidigitation", "Prestidigitation", 0, ["wizard"]),
        SpellDef::new("ray-of-frost", "Ray of Frost", 0, ["wizard"]),
        SpellDef::new("sacred-flame", "Sacred Flame", 0, ["cleric"]),
        SpellDef::new("guidance", "Guidance", 0, ["cleric"]),
        SpellDef::new("thaumaturgy", "Thaumaturgy", 0, ["cleric"]),
        SpellDef::new("magic-missile", "Magic Missile", 1, ["wizard"]),
        SpellDef::new("shield", "Shield", 1, ["wizard"]),
        SpellDef::new("mage-armor", "Mage Armor", 1, ["wizard"]),
        SpellDef::new("sleep", "Sleep", 1, ["wizard", "bard"]),
        SpellDef::new("detect-magic", "Detect Magic", 1, ["wizard", "cleric", "bard"]),
        SpellDef::new("identify", "Identify", 1, ["wizard", "bard"]),
        SpellDef::new("burning-hands", "Burning Hands", 1, ["wizard"]),
        SpellDef::new("feather-fall", "Feather Fall", 1, ["wizard", "bard"]),
        SpellDef::new("cure-wounds", "Cure Wounds", 1, ["cleric", "bard"]),
        SpellDef::new("bless", "Bless", 1, ["cleric"]),
        SpellDef::new("healing-word", "Healing Word", 1, ["cleric", "bard"]),
        SpellDef::new("fireball", "Fireball", 3, ["wizard"]),
    ]
}

// =============================================================================
// Public Fixtures
// =============================================================================

/// Reference catalogs covering every branch of the guided flow.
pub fn srd_catalogs() -> ReferenceCatalogs {
    ReferenceCatalogs {
        classes: classes().into_iter().collect(),
        features: features().into_iter().collect(),
        races: races().into_iter().collect(),
        subraces: subraces().into_iter().collect(),
        traits: traits().into_iter().collect(),
        backgrounds: backgrounds().into_iter().collect(),
        languages: languages().into_iter().collect(),
        equipment: equipment().into_iter().collect(),
        spells: spells().into_iter().collect(),
    }
}

/// A human sage wizard with every step filled in.
pub fn complete_wizard_selection() -> GuidedSelection {
    let mut selection = GuidedSelection::new();
    selection.name = "Elara".to_string();
    selection.select_class("wizard".into());
    selection.select_race("human".into());
    selection.select_background("sage".into());
    selection.ability_method = Some(AbilityScoreMethod::StandardArray);
    for (ability, score) in [
        (AbilityId::Str, 10),
        (AbilityId::Dex, 14),
        (AbilityId::Con, 13),
        (AbilityId::Int, 15),
        (AbilityId::Wis, 12),
        (AbilityId::Cha, 8),
    ] {
        selection.assign_standard_array(ability, Some(score));
    }
    selection.set_choice(
        ChoiceKey::ClassProficiency { index: 0 },
        ["skill-investigation", "skill-insight"].map(String::from),
    );
    selection.set_choice(
        ChoiceKey::BackgroundLanguage,
        ["elvish", "dwarvish"].map(String::from),
    );
    selection.set_choice(ChoiceKey::BackgroundEquipment, ["crystal".to_string()]);
    for spell in [
        "fire-bolt",
        "light",
        "mage-hand",
        "magic-missile",
        "shield",
        "mage-armor",
        "sleep",
        "detect-magic",
        "identify",
    ] {
        selection.toggle_spell(spell.into());
    }
    selection
}
