//! Built-in content: a small, playable set of classes, passives, monsters,
//! item bases, missions and affix ranges.

use crate::character::{BaseStats, ClassDefinition, PassiveEffect, PassiveNode, PassiveTier};
use crate::combat::{EliteOdds, MonsterDefinition, PhaseDefinition};
use crate::core::stats::{DamageDistribution, DamageType, Resistances, Stat, StatKey};
use crate::items::{
    Breakpoint, EquipmentSlot, ItemBase, SlotCategory, StatDefinition, WeaponProfile,
};
use crate::mission::{CombatMode, MissionDefinition, Rewards};

use SlotCategory::{Armor, Jewelry, Weapon};

fn ranged(key: StatKey, breakpoints: &[(u32, i32, i32)]) -> StatDefinition {
    StatDefinition::new(
        key,
        breakpoints
            .iter()
            .map(|&(item_level, min, max)| Breakpoint {
                item_level,
                min,
                max,
            })
            .collect(),
    )
}

fn flat(stat: Stat, breakpoints: &[(u32, i32, i32)]) -> StatDefinition {
    ranged(StatKey::flat(stat), breakpoints)
}

fn increased(stat: Stat, breakpoints: &[(u32, i32, i32)]) -> StatDefinition {
    ranged(StatKey::increased(stat), breakpoints)
}

fn more(stat: Stat, breakpoints: &[(u32, i32, i32)]) -> StatDefinition {
    ranged(StatKey::more(stat), breakpoints)
}

const ELEMENTAL_RESIST_RANGES: &[(u32, i32, i32)] = &[(1, 6, 12), (25, 12, 20), (50, 20, 30)];

/// Affix ranges by item level.
pub fn stat_definitions() -> Vec<StatDefinition> {
    vec![
        flat(Stat::Life, &[(1, 5, 15), (20, 15, 30), (50, 30, 55)]),
        increased(Stat::Life, &[(1, 3, 6), (30, 6, 10)])
            .for_slots(&[Armor, Jewelry]),
        flat(Stat::Damage, &[(1, 2, 5), (20, 5, 10), (50, 10, 18)])
            .for_slots(&[Weapon, Jewelry]),
        increased(Stat::Damage, &[(1, 5, 10), (30, 10, 20)])
            .for_slots(&[Weapon, Jewelry]),
        more(Stat::Damage, &[(40, 3, 6), (70, 6, 10)])
            .for_slots(&[Weapon]),
        flat(Stat::Defense, &[(1, 3, 8), (20, 8, 16), (50, 16, 30)])
            .for_slots(&[Armor]),
        increased(Stat::Defense, &[(1, 5, 12), (30, 12, 20)])
            .for_slots(&[Armor]),
        // Hundredths of an attack per round
        flat(Stat::AttackSpeed, &[(1, 5, 10), (30, 10, 15)])
            .for_slots(&[Weapon, Jewelry]),
        flat(Stat::FireResist, ELEMENTAL_RESIST_RANGES)
            .for_slots(&[Armor, Jewelry]),
        flat(Stat::ColdResist, ELEMENTAL_RESIST_RANGES)
            .for_slots(&[Armor, Jewelry]),
        flat(Stat::LightningResist, ELEMENTAL_RESIST_RANGES)
            .for_slots(&[Armor, Jewelry]),
        flat(Stat::ChaosResist, &[(1, 5, 10), (40, 10, 18)])
            .for_slots(&[Armor, Jewelry]),
        flat(Stat::AllResist, &[(10, 3, 6), (40, 6, 10)])
            .for_slots(&[Jewelry]),
        flat(Stat::GoldFind, &[(1, 5, 10), (30, 10, 20)])
            .for_slots(&[Armor, Jewelry]),
        flat(Stat::LifeRegen, &[(1, 1, 3), (30, 3, 6)])
            .for_slots(&[Armor, Jewelry]),
        flat(Stat::LifeLeech, &[(1, 1, 2), (40, 2, 4)])
            .for_slots(&[Weapon])
            .requiring_themes(&["blood"]),
        flat(Stat::LifeOnHit, &[(1, 1, 3), (30, 3, 6)])
            .for_slots(&[Weapon]),
        flat(Stat::MoraleGain, &[(1, 1, 2)]).for_slots(&[Jewelry]),
        flat(Stat::MoraleResistance, &[(1, 5, 15)])
            .for_slots(&[Armor, Jewelry]),
        flat(Stat::LightRadius, &[(1, 5, 10)])
            .for_slots(&[Armor])
            .requiring_themes(&["undead", "darkness"]),
        flat(Stat::MoveSpeed, &[(1, 3, 8)]).for_slots(&[Armor]),
    ]
}

fn weapon(
    id: &str,
    name: &str,
    attack_speed: f64,
    damage_multiplier: f64,
    damage_types: DamageDistribution,
) -> ItemBase {
    ItemBase::new(id, name, EquipmentSlot::Weapon).with_weapon(WeaponProfile {
        attack_speed,
        damage_multiplier,
        damage_types,
    })
}

pub fn item_bases() -> Vec<ItemBase> {
    let physical = DamageDistribution::physical();
    let ember = DamageDistribution {
        physical: 0.4,
        fire: 0.6,
        ..DamageDistribution::single(DamageType::Fire)
    };
    vec![
        weapon("rusted_sword", "Rusted Sword", 1.2, 1.0, physical)
            .with_implicit(StatKey::flat(Stat::Damage), 4),
        weapon("war_axe", "War Axe", 0.9, 1.3, physical)
            .with_implicit(StatKey::flat(Stat::Damage), 7)
            .with_weight(StatKey::more(Stat::Damage), 2.0),
        weapon("ember_wand", "Ember Wand", 1.4, 0.8, ember)
            .with_implicit(StatKey::increased(Stat::Damage), 10)
            .with_weight(StatKey::flat(Stat::AttackSpeed), 2.0),
        weapon("hunting_bow", "Hunting Bow", 1.1, 1.1, physical)
            .with_implicit(StatKey::flat(Stat::AttackSpeed), 5),
        ItemBase::new("leather_vest", "Leather Vest", EquipmentSlot::BodyArmor)
            .with_implicit(StatKey::flat(Stat::Defense), 10),
        ItemBase::new("plate_cuirass", "Plate Cuirass", EquipmentSlot::BodyArmor)
            .with_implicit(StatKey::flat(Stat::Defense), 20)
            .with_implicit(StatKey::flat(Stat::Life), 10)
            .with_weight(StatKey::increased(Stat::Defense), 3.0)
            .with_weight(StatKey::flat(Stat::MoveSpeed), 0.0),
        ItemBase::new("iron_hat", "Iron Hat", EquipmentSlot::Helmet)
            .with_implicit(StatKey::flat(Stat::Defense), 5),
        ItemBase::new("wool_gloves", "Wool Gloves", EquipmentSlot::Gloves)
            .with_implicit(StatKey::flat(Stat::Defense), 3),
        ItemBase::new("traveler_boots", "Traveler Boots", EquipmentSlot::Boots)
            .with_implicit(StatKey::flat(Stat::MoveSpeed), 5),
        ItemBase::new("jade_amulet", "Jade Amulet", EquipmentSlot::Amulet)
            .with_implicit(StatKey::flat(Stat::Life), 10),
        ItemBase::new("coral_ring", "Coral Ring", EquipmentSlot::Ring)
            .with_implicit(StatKey::flat(Stat::FireResist), 10)
            .with_weight(StatKey::flat(Stat::AllResist), 2.0),
        ItemBase::new("iron_ring", "Iron Ring", EquipmentSlot::Ring)
            .with_implicit(StatKey::flat(Stat::Damage), 2),
    ]
}

fn class(
    id: &str,
    name: &str,
    base: BaseStats,
    growth: BaseStats,
    affinities: &[(&str, f64)],
) -> ClassDefinition {
    ClassDefinition {
        id: id.to_string(),
        name: name.to_string(),
        base,
        growth,
        affinities: affinities
            .iter()
            .map(|(tag, weight)| (tag.to_string(), *weight))
            .collect(),
    }
}

pub fn classes() -> Vec<ClassDefinition> {
    vec![
        class(
            "marauder",
            "Marauder",
            BaseStats::new(120, 12, 8),
            BaseStats::new(12, 2, 1),
            &[("offense", 1.0), ("defense", 0.5)],
        ),
        class(
            "ranger",
            "Ranger",
            BaseStats::new(90, 10, 5),
            BaseStats::new(9, 2, 1),
            &[("speed", 1.5), ("offense", 0.5)],
        ),
        class(
            "witch",
            "Witch",
            BaseStats::new(80, 14, 3),
            BaseStats::new(8, 3, 0),
            &[("elemental", 1.5), ("utility", 0.5)],
        ),
    ]
}

fn passive(
    id: &str,
    name: &str,
    tier: PassiveTier,
    effects: &[(StatKey, i32)],
    tags: &[&str],
) -> PassiveNode {
    PassiveNode {
        id: id.to_string(),
        name: name.to_string(),
        tier,
        effects: effects
            .iter()
            .map(|&(stat, magnitude)| PassiveEffect { stat, magnitude })
            .collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn passives() -> Vec<PassiveNode> {
    use PassiveTier::{Keystone, Normal, Notable};
    vec![
        passive(
            "thick_skin",
            "Thick Skin",
            Normal,
            &[(StatKey::flat(Stat::Life), 10)],
            &["defense"],
        ),
        passive(
            "sharpened_edge",
            "Sharpened Edge",
            Normal,
            &[(StatKey::flat(Stat::Damage), 3)],
            &["offense"],
        ),
        passive(
            "quick_hands",
            "Quick Hands",
            Normal,
            &[(StatKey::increased(Stat::AttackSpeed), 5)],
            &["speed"],
        ),
        passive(
            "warm_blood",
            "Warm Blood",
            Normal,
            &[(StatKey::flat(Stat::FireResist), 8)],
            &["elemental"],
        ),
        passive(
            "prospector",
            "Prospector",
            Normal,
            &[(StatKey::flat(Stat::GoldFind), 10)],
            &["utility"],
        ),
        passive(
            "iron_will",
            "Iron Will",
            Notable,
            &[
                (StatKey::flat(Stat::MoraleResistance), 25),
                (StatKey::increased(Stat::Life), 8),
            ],
            &["defense"],
        ),
        passive(
            "blood_drinker",
            "Blood Drinker",
            Notable,
            &[(StatKey::flat(Stat::LifeLeech), 3)],
            &["offense"],
        ),
        passive(
            "elemental_ward",
            "Elemental Ward",
            Notable,
            &[(StatKey::flat(Stat::AllResist), 10)],
            &["elemental"],
        ),
        passive(
            "steady_nerves",
            "Steady Nerves",
            Notable,
            &[(StatKey::flat(Stat::MoraleGain), 1)],
            &["utility"],
        ),
        passive(
            "berserker",
            "Berserker",
            Keystone,
            &[
                (StatKey::more(Stat::Damage), 30),
                (StatKey::max_resist(Stat::AllResist), -10),
            ],
            &["offense"],
        ),
        passive(
            "fortress",
            "Fortress",
            Keystone,
            &[
                (StatKey::more(Stat::Defense), 40),
                (StatKey::increased(Stat::AttackSpeed), -20),
            ],
            &["defense"],
        ),
        passive(
            "elemental_bastion",
            "Elemental Bastion",
            Keystone,
            &[
                (StatKey::max_resist(Stat::AllResist), 5),
                (StatKey::increased(Stat::Life), -10),
            ],
            &["elemental"],
        ),
    ]
}

struct MonsterBase {
    life: i32,
    damage: i32,
    defense: i32,
    attack_speed: f64,
    experience: u64,
    gold: u64,
}

fn monster(id: &str, name: &str, base: MonsterBase) -> MonsterDefinition {
    MonsterDefinition {
        id: id.to_string(),
        name: name.to_string(),
        life: base.life,
        damage: base.damage,
        defense: base.defense,
        attack_speed: base.attack_speed,
        damage_types: DamageDistribution::physical(),
        resistances: Resistances::default(),
        phases: Vec::new(),
        boss: false,
        experience: base.experience,
        gold: base.gold,
    }
}

fn phase(
    threshold: f64,
    damage_multiplier: f64,
    attack_speed: Option<f64>,
    abilities: &[&str],
) -> PhaseDefinition {
    PhaseDefinition {
        threshold,
        damage_multiplier,
        attack_speed,
        abilities: abilities.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn monsters() -> Vec<MonsterDefinition> {
    vec![
        monster(
            "cave_rat",
            "Cave Rat",
            MonsterBase {
                life: 30,
                damage: 4,
                defense: 2,
                attack_speed: 1.3,
                experience: 8,
                gold: 3,
            },
        ),
        MonsterDefinition {
            damage_types: DamageDistribution {
                physical: 0.7,
                chaos: 0.3,
                ..DamageDistribution::physical()
            },
            resistances: Resistances {
                chaos: 30,
                ..Resistances::default()
            },
            ..monster(
                "ghoul",
                "Ghoul",
                MonsterBase {
                    life: 60,
                    damage: 8,
                    defense: 6,
                    attack_speed: 0.9,
                    experience: 15,
                    gold: 6,
                },
            )
        },
        MonsterDefinition {
            damage_types: DamageDistribution::single(DamageType::Fire),
            resistances: Resistances {
                fire: 50,
                ..Resistances::default()
            },
            ..monster(
                "fire_imp",
                "Fire Imp",
                MonsterBase {
                    life: 40,
                    damage: 9,
                    defense: 2,
                    attack_speed: 1.2,
                    experience: 14,
                    gold: 5,
                },
            )
        },
        monster(
            "bandit",
            "Bandit",
            MonsterBase {
                life: 70,
                damage: 10,
                defense: 12,
                attack_speed: 1.0,
                experience: 18,
                gold: 12,
            },
        ),
        MonsterDefinition {
            damage_types: DamageDistribution::single(DamageType::Cold),
            resistances: Resistances {
                cold: 60,
                ..Resistances::default()
            },
            ..monster(
                "frost_wraith",
                "Frost Wraith",
                MonsterBase {
                    life: 55,
                    damage: 11,
                    defense: 4,
                    attack_speed: 1.1,
                    experience: 20,
                    gold: 8,
                },
            )
        },
        MonsterDefinition {
            boss: true,
            phases: vec![
                phase(1.0, 1.0, None, &[]),
                phase(0.5, 1.3, None, &["bone_shield"]),
                phase(0.25, 1.6, Some(1.2), &["bone_storm"]),
            ],
            resistances: Resistances::uniform(15),
            ..monster(
                "bone_warden",
                "Bone Warden",
                MonsterBase {
                    life: 300,
                    damage: 16,
                    defense: 20,
                    attack_speed: 0.8,
                    experience: 120,
                    gold: 60,
                },
            )
        },
        MonsterDefinition {
            boss: true,
            damage_types: DamageDistribution {
                physical: 0.4,
                fire: 0.6,
                ..DamageDistribution::physical()
            },
            resistances: Resistances {
                fire: 75,
                ..Resistances::uniform(20)
            },
            phases: vec![
                phase(1.0, 1.0, None, &[]),
                phase(0.6, 1.2, None, &["flame_wall"]),
                phase(0.3, 1.5, Some(1.3), &["immolate"]),
            ],
            ..monster(
                "ember_queen",
                "Ember Queen",
                MonsterBase {
                    life: 420,
                    damage: 20,
                    defense: 25,
                    attack_speed: 1.0,
                    experience: 200,
                    gold: 90,
                },
            )
        },
    ]
}

fn mission(
    id: &str,
    name: &str,
    difficulty: f64,
    monster_level: u32,
    encounters: &[&str],
    boss: Option<&str>,
    rewards: Rewards,
) -> MissionDefinition {
    MissionDefinition {
        id: id.to_string(),
        name: name.to_string(),
        difficulty,
        monster_level,
        encounters: encounters.iter().map(|e| e.to_string()).collect(),
        boss: boss.map(str::to_string),
        elite_odds: EliteOdds::default(),
        mode: CombatMode::Instant,
        themes: Default::default(),
        rewards,
    }
}

pub fn missions() -> Vec<MissionDefinition> {
    vec![
        mission(
            "rat_cellar",
            "Rat Cellar",
            3.0,
            1,
            &["cave_rat", "cave_rat"],
            None,
            Rewards {
                gold_min: 5,
                gold_max: 15,
                experience: 20,
                item_drops: 1,
                drop_chance: 0.5,
            },
        ),
        MissionDefinition {
            elite_odds: EliteOdds {
                magic: 0.15,
                rare: 0.03,
            },
            ..mission(
                "bandit_camp",
                "Bandit Camp",
                6.0,
                3,
                &["bandit", "bandit"],
                None,
                Rewards {
                    gold_min: 15,
                    gold_max: 35,
                    experience: 60,
                    item_drops: 1,
                    drop_chance: 0.6,
                },
            )
        },
        MissionDefinition {
            mode: CombatMode::TurnBased,
            themes: ["undead".to_string()].into_iter().collect(),
            ..mission(
                "haunted_crypt",
                "Haunted Crypt",
                12.0,
                5,
                &["ghoul", "ghoul", "frost_wraith"],
                Some("bone_warden"),
                Rewards {
                    gold_min: 20,
                    gold_max: 50,
                    experience: 120,
                    item_drops: 2,
                    drop_chance: 0.6,
                },
            )
        },
        MissionDefinition {
            mode: CombatMode::TurnBased,
            themes: ["fire".to_string(), "blood".to_string()].into_iter().collect(),
            elite_odds: EliteOdds {
                magic: 0.2,
                rare: 0.05,
            },
            ..mission(
                "smouldering_depths",
                "Smouldering Depths",
                25.0,
                12,
                &["fire_imp", "fire_imp", "fire_imp"],
                Some("ember_queen"),
                Rewards {
                    gold_min: 60,
                    gold_max: 140,
                    experience: 400,
                    item_drops: 3,
                    drop_chance: 0.7,
                },
            )
        },
    ]
}
