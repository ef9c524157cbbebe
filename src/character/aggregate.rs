//! Final combat stats from class base, equipped gear and passives.

use super::modifiers::StatTotals;
use super::passives::PassiveBundle;
use crate::core::constants::*;
use crate::core::stats::{DamageDistribution, Resistances, Stat, StatKey};
use crate::items::Equipment;
use serde::{Deserialize, Serialize};

/// Class-derived base values, before gear and passives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub life: i32,
    pub damage: i32,
    pub defense: i32,
}

impl BaseStats {
    pub fn new(life: i32, damage: i32, defense: i32) -> Self {
        Self {
            life,
            damage,
            defense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub life: i32,
    pub damage: i32,
    pub defense: i32,
    pub attack_speed: f64,
    pub resistances: Resistances,
    /// Per-resistance caps (default cap plus max-resist modifiers).
    pub resist_caps: Resistances,
    pub gold_find: i32,
    pub morale_gain: i32,
    pub morale_resistance: i32,
    pub light_radius: i32,
    pub move_speed: i32,
    /// Life restored per round.
    pub life_regen: i32,
    /// Percent of damage dealt returned as life.
    pub life_leech: i32,
    pub life_on_hit: i32,
    pub damage_types: DamageDistribution,
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self {
            life: 1,
            damage: 1,
            defense: 1,
            attack_speed: UNARMED_ATTACK_SPEED,
            resistances: Resistances::default(),
            resist_caps: Resistances::uniform(DEFAULT_RESIST_CAP),
            gold_find: 0,
            morale_gain: 0,
            morale_resistance: 0,
            light_radius: 0,
            move_speed: 0,
            life_regen: 0,
            life_leech: 0,
            life_on_hit: 0,
            damage_types: DamageDistribution::physical(),
        }
    }
}

/// Sums implicit and rolled stats from every equipped item. Flat damage on
/// the weapon is scaled by the weapon's damage multiplier here, not on the
/// stored affix.
pub fn gear_totals(equipment: &Equipment) -> StatTotals {
    let mut totals = StatTotals::new();
    for item in equipment.iter_equipped() {
        let damage_multiplier = item.as_weapon().map_or(1.0, |w| w.damage_multiplier);
        for (key, value) in item.core().stats() {
            let mut value = *value as f64;
            if *key == StatKey::flat(Stat::Damage) {
                value *= damage_multiplier;
            }
            totals.add(*key, value);
        }
    }
    totals
}

/// Combines base stats, gear and passives. Pure: equal inputs always give
/// equal outputs, and morale is not applied (see [`with_morale`]).
pub fn aggregate(
    base: &BaseStats,
    equipment: &Equipment,
    passives: &PassiveBundle,
) -> DerivedStats {
    let mut totals = gear_totals(equipment);
    totals.merge(&passives.totals);

    let primary = |stat: Stat, base: i32| -> i32 {
        (totals.get(stat).apply(base as f64).floor() as i32).max(1)
    };
    let utility = |stat: Stat| -> i32 { totals.get(stat).apply(0.0).floor() as i32 };

    // Flat attack speed is stored in hundredths.
    let weapon = equipment.weapon();
    let speed_seed = weapon.map_or(UNARMED_ATTACK_SPEED, |w| w.attack_speed);
    let speed = totals.get(Stat::AttackSpeed);
    let attack_speed = ((speed_seed + speed.flat / PERCENT_DIVISOR)
        * (1.0 + speed.increased / PERCENT_DIVISOR)
        * (1.0 + speed.more / PERCENT_DIVISOR))
        .max(0.0);

    let caps = totals.max_resistances();
    let resist_caps = Resistances {
        fire: DEFAULT_RESIST_CAP + caps.fire,
        cold: DEFAULT_RESIST_CAP + caps.cold,
        lightning: DEFAULT_RESIST_CAP + caps.lightning,
        chaos: DEFAULT_RESIST_CAP + caps.chaos,
    };
    let raw = totals.resistances();
    let resistances = Resistances {
        fire: raw.fire.min(resist_caps.fire),
        cold: raw.cold.min(resist_caps.cold),
        lightning: raw.lightning.min(resist_caps.lightning),
        chaos: raw.chaos.min(resist_caps.chaos),
    };

    DerivedStats {
        life: primary(Stat::Life, base.life),
        damage: primary(Stat::Damage, base.damage),
        defense: primary(Stat::Defense, base.defense),
        attack_speed,
        resistances,
        resist_caps,
        gold_find: utility(Stat::GoldFind),
        morale_gain: utility(Stat::MoraleGain),
        morale_resistance: utility(Stat::MoraleResistance),
        light_radius: utility(Stat::LightRadius),
        move_speed: utility(Stat::MoveSpeed),
        life_regen: utility(Stat::LifeRegen),
        life_leech: utility(Stat::LifeLeech),
        life_on_hit: utility(Stat::LifeOnHit),
        damage_types: weapon.map_or_else(DamageDistribution::physical, |w| w.damage_types),
    }
}

/// Damage and defense multipliers at `morale`: ±20% damage and ±10% defense
/// at the extremes, neutral at 50.
pub fn morale_multipliers(morale: i32) -> (f64, f64) {
    let offset = (morale.clamp(MORALE_MIN, MORALE_MAX) - MORALE_NEUTRAL) as f64;
    (
        1.0 + offset * MORALE_DAMAGE_PER_POINT,
        1.0 + offset * MORALE_DEFENSE_PER_POINT,
    )
}

/// Applies morale on top of aggregated stats. Life is never affected.
pub fn with_morale(derived: &DerivedStats, morale: i32) -> DerivedStats {
    let (damage_mult, defense_mult) = morale_multipliers(morale);
    DerivedStats {
        damage: ((derived.damage as f64 * damage_mult).floor() as i32).max(1),
        defense: ((derived.defense as f64 * defense_mult).floor() as i32).max(1),
        ..*derived
    }
}

/// Single strength figure compared against mission difficulty.
///
/// Geometric mean of offense (damage per second) and effective life
/// (life scaled by defense and average resistance), scaled down.
pub fn power_rating(stats: &DerivedStats) -> f64 {
    let offense = stats.damage as f64 * stats.attack_speed;
    let effective_life = stats.life as f64
        * (1.0 + stats.defense as f64 / POWER_DEFENSE_DIVISOR)
        * (1.0 + stats.resistances.average().max(0.0) / PERCENT_DIVISOR);
    (offense * effective_life).max(0.0).sqrt() / POWER_RATING_SCALE
}
