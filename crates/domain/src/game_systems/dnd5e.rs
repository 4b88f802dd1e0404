//! D&D 5th Edition character-creation rules.
//!
//! Calculation rules and lookup tables needed to build a level-1 character:
//! ability modifiers, the standard array, point buy, the skill list and the
//! level-1 spell selection requirements.

use std::collections::BTreeMap;

use crate::ability::AbilityId;

/// The fixed standard array, highest first.
pub const STANDARD_ARRAY: [i32; 6] = [15, 14, 13, 12, 10, 8];

/// Points available for point buy.
pub const POINT_BUY_BUDGET: i32 = 27;
/// Lowest score purchasable with point buy.
pub const POINT_BUY_MIN: i32 = 8;
/// Highest score purchasable with point buy.
pub const POINT_BUY_MAX: i32 = 15;

/// Point cost of each score from 8 to 15.
/// Index is score - 8.
const POINT_BUY_COSTS: [i32; 8] = [
    0, // 8
    1, // 9
    2, // 10
    3, // 11
    4, // 12
    5, // 13
    7, // 14
    9, // 15
];

/// Classes that pick their subclass at level 1.
const SUBCLASS_AT_LEVEL_ONE: [&str; 3] = ["cleric", "sorcerer", "warlock"];

/// Calculate ability modifier from score: floor((score - 10) / 2).
pub fn ability_modifier(score: i32) -> i32 {
    // Rust's / rounds toward zero; div_euclid floors for a positive divisor
    (score - 10).div_euclid(2)
}

/// Proficiency bonus for a character level: ((level - 1) / 4) + 2.
pub fn proficiency_bonus(level: u8) -> i32 {
    ((level.max(1) as i32 - 1) / 4) + 2
}

/// Level-1 hit points: the full hit die plus the CON modifier, at least 1.
pub fn level_one_hit_points(hit_die: u8, constitution_modifier: i32) -> i32 {
    (hit_die as i32 + constitution_modifier).max(1)
}

/// Unarmored AC: 10 + DEX modifier.
pub fn unarmored_armor_class(dexterity_modifier: i32) -> i32 {
    10 + dexterity_modifier
}

/// Point-buy cost of a score, clamping it into [8, 15] first.
pub fn point_buy_cost(score: i32) -> i32 {
    let clamped = score.clamp(POINT_BUY_MIN, POINT_BUY_MAX);
    POINT_BUY_COSTS[(clamped - POINT_BUY_MIN) as usize]
}

/// Total point-buy cost of a set of scores.
pub fn point_buy_total<'a>(scores: impl IntoIterator<Item = &'a i32>) -> i32 {
    scores.into_iter().map(|score| point_buy_cost(*score)).sum()
}

/// Whether the six ability scores fit within the point-buy budget.
pub fn is_valid_point_buy(scores: &BTreeMap<AbilityId, i32>) -> bool {
    let total: i32 = AbilityId::ALL
        .iter()
        .map(|ability| point_buy_cost(scores.get(ability).copied().unwrap_or(POINT_BUY_MIN)))
        .sum();
    total <= POINT_BUY_BUDGET
}

/// Whether every ability has a score and the scores are exactly the standard array.
pub fn is_valid_standard_array(assignments: &BTreeMap<AbilityId, Option<i32>>) -> bool {
    let mut assigned: Vec<i32> = Vec::with_capacity(AbilityId::ALL.len());
    for ability in AbilityId::ALL {
        match assignments.get(&ability).copied().flatten() {
            Some(score) => assigned.push(score),
            None => return false,
        }
    }
    assigned.sort_unstable_by(|a, b| b.cmp(a));
    assigned == STANDARD_ARRAY
}

/// Whether a class picks its subclass at level 1.
pub fn requires_subclass_at_level_one(class_id: &str) -> bool {
    SUBCLASS_AT_LEVEL_ONE.contains(&class_id.to_lowercase().as_str())
}

// =============================================================================
// Skills
// =============================================================================

/// A skill with its linked ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDef {
    /// Proficiency id, always "skill-<name>"
    pub id: &'static str,
    pub name: &'static str,
    pub ability: AbilityId,
}

const fn skill(id: &'static str, name: &'static str, ability: AbilityId) -> SkillDef {
    SkillDef { id, name, ability }
}

/// Every skill, in sheet order.
pub const SKILLS: [SkillDef; 18] = [
    skill("skill-acrobatics", "Acrobatics", AbilityId::Dex),
    skill("skill-animal-handling", "Animal Handling", AbilityId::Wis),
    skill("skill-arcana", "Arcana", AbilityId::Int),
    skill("skill-athletics", "Athletics", AbilityId::Str),
    skill("skill-deception", "Deception", AbilityId::Cha),
    skill("skill-history", "History", AbilityId::Int),
    skill("skill-insight", "Insight", AbilityId::Wis),
    skill("skill-intimidation", "Intimidation", AbilityId::Cha),
    skill("skill-investigation", "Investigation", AbilityId::Int),
    skill("skill-medicine", "Medicine", AbilityId::Wis),
    skill("skill-nature", "Nature", AbilityId::Int),
    skill("skill-perception", "Perception", AbilityId::Wis),
    skill("skill-performance", "Performance", AbilityId::Cha),
    skill("skill-persuasion", "Persuasion", AbilityId::Cha),
    skill("skill-religion", "Religion", AbilityId::Int),
    skill("skill-sleight-of-hand", "Sleight of Hand", AbilityId::Dex),
    skill("skill-stealth", "Stealth", AbilityId::Dex),
    skill("skill-survival", "Survival", AbilityId::Wis),
];

/// Prefix shared by all skill proficiency ids.
pub const SKILL_PREFIX: &str = "skill-";

/// Look up a skill by its proficiency id.
pub fn skill_by_id(id: &str) -> Option<&'static SkillDef> {
    SKILLS.iter().find(|skill| skill.id == id)
}

// =============================================================================
// Level-1 spell selection
// =============================================================================

/// How many leveled spells a class picks at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeveledSpells {
    /// A fixed number (e.g. a wizard's spellbook)
    Fixed(usize),
    /// Spellcasting modifier + class level, at least 1 (prepared casters)
    ModifierPlusLevel,
}

/// Level-1 spell rules, keyed by class id.
const SPELL_RULES: [(&str, usize, LeveledSpells); 3] = [
    ("wizard", 3, LeveledSpells::Fixed(6)),
    ("cleric", 3, LeveledSpells::ModifierPlusLevel),
    ("druid", 2, LeveledSpells::ModifierPlusLevel),
];

/// What a level-1 caster must select on the spells step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellRequirement {
    /// Exact counts of cantrips and first-level spells
    Counts { cantrips: usize, spells: usize },
    /// The class casts at level 1 but has no rule yet; the table needs extending
    RequiresExtension,
}

/// Level-1 spell selection requirement for a class.
pub fn level_one_spell_requirement(class_id: &str, spellcasting_modifier: i32) -> SpellRequirement {
    let class_id = class_id.to_lowercase();
    let Some((_, cantrips, leveled)) = SPELL_RULES.iter().find(|(id, _, _)| *id == class_id) else {
        return SpellRequirement::RequiresExtension;
    };
    let spells = match leveled {
        LeveledSpells::Fixed(count) => *count,
        LeveledSpells::ModifierPlusLevel => (spellcasting_modifier + 1).max(1) as usize,
    };
    SpellRequirement::Counts {
        cantrips: *cantrips,
        spells,
    }
}
