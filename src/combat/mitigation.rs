//! Attack counts, raw damage rolls and per-type mitigation.

use super::types::{DamagePart, HitBreakdown};
use crate::core::config::CombatConfig;
use crate::core::constants::{
    PERCENT_DIVISOR, PHYSICAL_FLAT_REDUCTION_DIVISOR, PHYSICAL_MITIGATION_DIVISOR,
};
use crate::core::stats::{DamageDistribution, DamageType, Resistances};
use rand::Rng;

/// Attacks made this round at attack speed `speed`.
///
/// `floor(speed)` attacks, plus one more with probability equal to the
/// fractional part. Below 1.0 a round with no attack gets a second chance
/// at probability `speed`.
pub fn attack_count(speed: f64, rng: &mut impl Rng) -> u32 {
    if !speed.is_finite() || speed <= 0.0 {
        return 0;
    }
    let whole = speed.floor();
    let fraction = speed - whole;
    let mut count = whole as u32;
    if fraction > 0.0 && rng.gen::<f64>() < fraction {
        count += 1;
    }
    if speed < 1.0 && count == 0 && rng.gen::<f64>() < speed {
        count = 1;
    }
    count
}

/// Raw damage for one attack, varied within the configured band.
pub fn roll_raw_damage(damage: f64, config: &CombatConfig, rng: &mut impl Rng) -> f64 {
    let low = config.damage_variance_min.min(config.damage_variance_max);
    let high = config.damage_variance_min.max(config.damage_variance_max);
    if high <= low {
        return damage * low;
    }
    damage * rng.gen_range(low..=high)
}

/// `max(1, raw * (1 - defense/200) - defense/4)`
pub fn mitigate_physical(raw: f64, defense: i32) -> f64 {
    let defense = defense as f64;
    let reduced = raw * (1.0 - defense / PHYSICAL_MITIGATION_DIVISOR)
        - defense / PHYSICAL_FLAT_REDUCTION_DIVISOR;
    reduced.max(1.0)
}

/// `raw * (1 - resistance/100)`; negative resistance amplifies.
pub fn mitigate_elemental(raw: f64, resistance: i32) -> f64 {
    (raw * (1.0 - resistance as f64 / PERCENT_DIVISOR)).max(0.0)
}

/// Splits `raw` across `distribution` and mitigates each part.
pub fn resolve_hit(
    raw: f64,
    distribution: &DamageDistribution,
    defense: i32,
    resistances: &Resistances,
) -> HitBreakdown {
    let parts: Vec<DamagePart> = distribution
        .shares()
        .into_iter()
        .map(|(damage_type, share)| {
            let part = raw * share;
            let mitigated = match damage_type {
                DamageType::Physical => mitigate_physical(part, defense),
                elemental => mitigate_elemental(part, resistances.against(elemental)),
            };
            DamagePart {
                damage_type,
                raw: part,
                mitigated,
            }
        })
        .collect();

    let sum: f64 = parts.iter().map(|p| p.mitigated).sum();
    HitBreakdown {
        raw,
        parts,
        total: (sum.floor() as i32).max(1),
    }
}
